//! # toolshell
//!
//! **Declarative command-line tools** - define options and positional
//! arguments up front, validate them before anything runs, and dispatch to
//! a single action or to named subcommands with a clean exit code.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     User Input (argv)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ToolShell: help/version short-circuits, command routing    │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  binder: raw tokens → bound ToolOption / ToolArgument sets  │
//! │  dispatch: validate → execute → exit code                   │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Tool::execute / Command::execute (user action)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use toolshell::{
//!     Arity, Invocation, Schema, ShellConfig, Tool, ToolArgument, ToolOption, ToolShell,
//! };
//!
//! struct Greet;
//!
//! impl Tool for Greet {
//!     fn schema(&self) -> Schema {
//!         Schema::new(
//!             vec![ToolOption::new("shout", Arity::NoValue).describe("Upper-case the greeting")],
//!             vec![ToolArgument::new("name").default_value("world")],
//!         )
//!     }
//!
//!     fn execute(&self, inv: &Invocation) -> anyhow::Result<i32> {
//!         let name = inv.argument("name").and_then(|a| a.text()).unwrap_or("world");
//!         println!("Hello, {name}!");
//!         Ok(0)
//!     }
//! }
//!
//! fn main() {
//!     let shell = ToolShell::single(ShellConfig::default(), Greet);
//!     std::process::exit(shell.run_from_env());
//! }
//! ```
//!
//! # Design Principles
//!
//! 1. **Validate first**: the user action never sees an invocation that
//!    failed binding or validation.
//! 2. **Contained failures**: every invocation-time error becomes one
//!    stderr line and exit code 1; only declaration-time contract
//!    violations panic.
//! 3. **Frozen reads**: the first read of an option/argument value freezes
//!    its coerced sequence, so actions see one consistent view.

// ============================================================================
// Core Modules
// ============================================================================

/// Declared positional parameters.
pub mod argument;

/// Terminal styling for help output.
pub mod colors;

/// Validation and execution pipeline.
pub mod dispatch;

/// Invocation-time error taxonomy.
pub mod error;

/// Declared command flags.
pub mod option;

/// Help text generation.
pub mod render;

/// Top-level entry point and capability traits.
pub mod shell;

/// Typed value coercion.
pub mod value;

mod binder;

// ============================================================================
// Re-exports
// ============================================================================

pub use argument::ToolArgument;
pub use colors::{ColorMode, Painter};
pub use dispatch::{Invocation, Schema};
pub use error::ShellError;
pub use option::{Arity, ToolOption};
pub use render::RenderConfig;
pub use shell::{Command, CommandSet, Registrar, ShellConfig, Tool, ToolShell};
pub use value::{CoerceError, CoercedValue, ValueKind, coerce};
