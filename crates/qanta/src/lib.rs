//! # QANTA Shared Rust Library
//!
//! Infrastructure around the answer resolution engine:
//! - **io**: reading titles, redirects, and questions; writing the answer map and reports
//! - **redirects**: the redirect CSV reader
//! - **annotation**: file-backed manual page assignments
//! - **error**: common error type
//! - **tracing**: logging setup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qanta::io::{read_titles, read_redirects, read_questions};
//! use qanta::annotation::AnnotatedMapping;
//! use qanta::error::Error;
//! ```

pub mod annotation;
pub mod error;
pub mod io;
pub mod redirects;
pub mod tracing;

// Re-export commonly used items at crate root
pub use annotation::AnnotatedMapping;
pub use error::{Error, Result};
