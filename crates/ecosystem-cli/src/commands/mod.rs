//! CLI command implementations

pub mod apps;
pub mod convert;
pub mod validate;
