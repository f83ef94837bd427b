pub mod enums;
pub mod pipeline;
pub mod risk;
pub mod value;

pub use enums::*;
pub use pipeline::*;
pub use risk::*;
pub use value::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}
