//! Common identifier types shared by the IR
//!
//! Defined here so the IR data model and any downstream consumer agree on
//! the width of temporaries.

/// Temporary variable identifier for IR values
pub type TempId = u32;
