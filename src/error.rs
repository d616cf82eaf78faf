//! Error handling for T2C operations
//!
//! The error type lives in [`crate::common`] next to the format constants; it
//! uses thiserror and distinguishes every failure the engines can report.

pub use crate::common::Result;
pub use crate::common::T2cError;
