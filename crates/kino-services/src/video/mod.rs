//! Video aggregate use cases.

pub mod media_status;
pub mod validation;
pub mod write;
