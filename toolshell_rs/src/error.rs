//! Invocation-time error taxonomy.
//!
//! Every failure that can happen while running a declared tool falls into
//! one of three categories, and all of them are contained: the shell turns
//! them into a single stderr line plus exit code 1. Only declaration-time
//! contract violations (conflicting defaults, a `NoValue` option given a
//! default, duplicate command names) escape as hard failures - those panic
//! immediately during tool construction, before any invocation exists.

use thiserror::Error;

/// A contained invocation-time failure.
///
/// The `Display` form is exactly what the dispatch boundary writes to
/// stderr: `Syntax` and `Execution` carry a `<kind>: <message>` prefix,
/// `Validation` carries the fixed category line(s) verbatim.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed flag or argument tokens (unknown option, missing value,
    /// excess positionals). The action never runs.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// One or more declared options/arguments failed their validity check.
    /// The message holds the fixed category line(s) ("Invalid option(s).",
    /// "Missing or invalid argument(s)."). The action never runs.
    #[error("{0}")]
    Validation(String),

    /// The user action itself returned an error. Caught at the dispatch
    /// boundary; the process still exits normally.
    #[error("execution error: {0}")]
    Execution(#[from] anyhow::Error),
}
