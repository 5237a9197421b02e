//! mcc - Common Types and Utilities
//!
//! This crate contains shared types and error definitions used across
//! all components of the mcc mini-C compiler.

pub mod error;
pub mod source_loc;
pub mod types;

pub use error::CompilerError;
pub use source_loc::SourceLocation;
pub use types::*;
