pub mod extraction;
pub mod structuring;
pub mod canonical;
pub mod completeness;
pub mod processor;
