pub mod config;
pub mod models;
pub mod pipeline;

pub use config::Settings;
pub use pipeline::processor::{run_pipeline_bytes, ProcessingError, SubmissionProcessor};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over
/// `settings.log_filter`. Returns false if a subscriber was already set.
pub fn init_tracing(settings: &Settings) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} core starting v{}", config::APP_NAME, config::APP_VERSION);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let settings = Settings::default();
        init_tracing(&settings);
        assert!(!init_tracing(&settings));
    }
}
