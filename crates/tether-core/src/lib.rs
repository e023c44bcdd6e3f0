//! Shared types for the tether transpiler.
//!
//! Holds the data model passed between discovery, the per-language builders and the
//! declaration exporter, plus configuration and the error type every crate returns.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;

pub use config::{GenerationOptions, TargetDir, TetherConfig};
pub use error::{Result, TetherError};
pub use filter::NameFilter;
pub use model::{ClassMap, ClassUnit, Inheritance, Language, TargetArtifact, CORE_PREFIX};
