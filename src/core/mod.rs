//! Core types and functionality for NAB
//!
//! This module forms the foundation of NAB's type system. It provides the
//! strongly-typed error enumeration used at every stage boundary of the asset
//! pipeline, plus the user-facing error presentation layer used by the CLI.
//!
//! # Design Principles
//!
//! - **Error first**: every fallible operation returns a [`Result`] carrying a
//!   [`NabError`] or an `anyhow::Error` wrapping one; nothing is swallowed.
//! - **Fail fast**: a failure in any stage aborts the whole run. A manifest
//!   written before a failed npm run is intentionally left in place, so fixing
//!   the external problem and re-running does not require re-aggregation.
//! - **User experience**: CLI-facing errors are rendered through
//!   [`ErrorContext`] with colored output and actionable suggestions.

pub mod error;

pub use error::{ErrorContext, NabError, user_friendly_error};
