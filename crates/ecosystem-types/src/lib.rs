//! Ecosystem Types - Launch descriptors for an external process manager
//!
//! An ecosystem descriptor is a static document listing the applications a
//! process manager should start: a name, a command with its arguments, and the
//! environment the process receives, optionally overridden per deployment mode.
//!
//! ## Architectural Boundaries
//!
//! - **This crate** owns: the descriptor schema, loading, and eager validation
//! - **The process manager** owns: spawning, supervision, restarts, logging
//!
//! ## Key Concepts
//!
//! - **AppLaunchSpec**: One application's launch description
//! - **Descriptor**: The validated, immutable list of launch specs
//! - **LaunchPlan**: A launch spec resolved for one deployment mode
//! - **ValidationReport**: Every error and warning found while loading

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod descriptor;
pub mod error;
pub mod format;
pub mod spec;
pub mod validation;

// Re-export main types
pub use descriptor::Descriptor;
pub use error::{DescriptorError, LoadError, Result};
pub use format::Format;
pub use spec::{AppLaunchSpec, EnvMap, LaunchPlan};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};
