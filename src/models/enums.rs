use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(CompletenessStatus {
    Green => "Green",
    Yellow => "Yellow",
    Red => "Red",
});

impl CompletenessStatus {
    /// Green at 85 and above, Yellow from 60, Red below.
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            Self::Green
        } else if score >= 60 {
            Self::Yellow
        } else {
            Self::Red
        }
    }
}

/// Insurance coverage category.
///
/// Extraction only ever produces `GL`, `WC` or `AUTO`. `Other` keeps profiles
/// that name any other code loadable; the scorer gives those a generic checklist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineOfBusiness {
    GeneralLiability,
    WorkersComp,
    Auto,
    Other(String),
}

impl LineOfBusiness {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GeneralLiability => "GL",
            Self::WorkersComp => "WC",
            Self::Auto => "AUTO",
            Self::Other(code) => code,
        }
    }

    /// Strict parse into one of the supported codes (case-insensitive).
    pub fn parse_supported(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "GL" => Some(Self::GeneralLiability),
            "WC" => Some(Self::WorkersComp),
            "AUTO" => Some(Self::Auto),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for LineOfBusiness {
    fn from(code: String) -> Self {
        match code.as_str() {
            "GL" => Self::GeneralLiability,
            "WC" => Self::WorkersComp,
            "AUTO" => Self::Auto,
            _ => Self::Other(code),
        }
    }
}

impl From<LineOfBusiness> for String {
    fn from(lob: LineOfBusiness) -> Self {
        match lob {
            LineOfBusiness::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LineOfBusiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Ordered by code so sorted lists read AUTO, GL, WC.
impl Ord for LineOfBusiness {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for LineOfBusiness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_boundaries_are_exact() {
        assert_eq!(CompletenessStatus::from_score(100), CompletenessStatus::Green);
        assert_eq!(CompletenessStatus::from_score(85), CompletenessStatus::Green);
        assert_eq!(CompletenessStatus::from_score(84), CompletenessStatus::Yellow);
        assert_eq!(CompletenessStatus::from_score(60), CompletenessStatus::Yellow);
        assert_eq!(CompletenessStatus::from_score(59), CompletenessStatus::Red);
        assert_eq!(CompletenessStatus::from_score(0), CompletenessStatus::Red);
    }

    #[test]
    fn status_parses_from_str() {
        assert_eq!(
            "Yellow".parse::<CompletenessStatus>().unwrap(),
            CompletenessStatus::Yellow
        );
        assert!("yellow".parse::<CompletenessStatus>().is_err());
    }

    #[test]
    fn lob_serializes_as_code() {
        let json = serde_json::to_string(&vec![
            LineOfBusiness::GeneralLiability,
            LineOfBusiness::WorkersComp,
            LineOfBusiness::Auto,
        ])
        .unwrap();
        assert_eq!(json, r#"["GL","WC","AUTO"]"#);
    }

    #[test]
    fn unknown_lob_code_round_trips() {
        let lob: LineOfBusiness = serde_json::from_str(r#""BOP""#).unwrap();
        assert_eq!(lob, LineOfBusiness::Other("BOP".into()));
        assert!(!lob.is_supported());
        assert_eq!(serde_json::to_string(&lob).unwrap(), r#""BOP""#);
    }

    #[test]
    fn lobs_sort_by_code() {
        let mut lobs = vec![
            LineOfBusiness::WorkersComp,
            LineOfBusiness::Auto,
            LineOfBusiness::GeneralLiability,
        ];
        lobs.sort();
        let codes: Vec<&str> = lobs.iter().map(|l| l.as_str()).collect();
        assert_eq!(codes, vec!["AUTO", "GL", "WC"]);
    }

    #[test]
    fn parse_supported_is_case_insensitive() {
        assert_eq!(
            LineOfBusiness::parse_supported(" auto "),
            Some(LineOfBusiness::Auto)
        );
        assert_eq!(LineOfBusiness::parse_supported("BOP"), None);
    }
}
