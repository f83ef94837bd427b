pub mod missingness;
pub mod questions;

pub use missingness::*;
pub use questions::*;
