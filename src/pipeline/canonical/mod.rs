pub mod contradictions;
pub mod profile;

pub use contradictions::*;
pub use profile::*;
