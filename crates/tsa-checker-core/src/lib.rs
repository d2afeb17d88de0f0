//! TSA Item Checker Core
//!
//! Types and errors shared by the classification client and the HTTP layer.
//!
//! This crate provides:
//! - The request and result shapes that cross the HTTP boundary
//! - The error taxonomy and its mapping onto HTTP status codes

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{CheckRequest, CheckResult};

