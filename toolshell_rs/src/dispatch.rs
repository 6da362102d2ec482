//! Validation and execution pipeline.
//!
//! The dispatcher owns the declared option/argument set for one invocation
//! and walks it through the lifecycle:
//!
//! ```text
//! Idle -> Validating -> Executing -> Done
//!              |             |
//!              +-------------+--> Failed (exit code 1)
//! ```
//!
//! Binding and validation run before the user action; any invalidity stops
//! the pipeline with a fixed category diagnostic on stderr and the action
//! is never invoked. Action failures (errors and panics) are contained at
//! the execution boundary and mapped to exit code 1 - an invocation never
//! terminates the process abnormally.

use std::io::Write;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::argument::ToolArgument;
use crate::binder;
use crate::error::ShellError;
use crate::option::ToolOption;

/// The declared option/argument set for one tool or subcommand.
///
/// Construction contract (violations panic at declaration time):
/// - option names and aliases must be unique within the schema;
/// - only the final argument may collect trailing positionals.
#[derive(Debug, Default)]
pub struct Schema {
    pub(crate) options: Vec<ToolOption>,
    pub(crate) arguments: Vec<ToolArgument>,
}

impl Schema {
    pub fn new(options: Vec<ToolOption>, arguments: Vec<ToolArgument>) -> Self {
        let mut seen: Vec<&str> = Vec::new();
        for opt in &options {
            for name in std::iter::once(opt.name()).chain(opt.aliases().iter().map(String::as_str))
            {
                assert!(
                    !seen.contains(&name),
                    "schema: option name or alias '{name}' declared twice"
                );
                seen.push(name);
            }
        }
        if let Some(pos) = arguments.iter().position(ToolArgument::is_collecting) {
            assert!(
                pos == arguments.len() - 1,
                "schema: only the final argument may collect multiple values"
            );
        }
        Self { options, arguments }
    }

    /// A schema with no options or arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[ToolOption] {
        &self.options
    }

    pub fn arguments(&self) -> &[ToolArgument] {
        &self.arguments
    }
}

/// The bound, validated option/argument set handed to a user action.
#[derive(Debug)]
pub struct Invocation {
    options: Vec<ToolOption>,
    arguments: Vec<ToolArgument>,
}

impl Invocation {
    /// Look up a declared option by its long name.
    pub fn option(&self, name: &str) -> Option<&ToolOption> {
        self.options.iter().find(|o| o.name() == name)
    }

    /// Look up a declared argument by name.
    pub fn argument(&self, name: &str) -> Option<&ToolArgument> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    pub fn options(&self) -> &[ToolOption] {
        &self.options
    }

    pub fn arguments(&self) -> &[ToolArgument] {
        &self.arguments
    }
}

/// Bind `argv` into `schema`, validate, and run `action` on success.
/// Returns the process exit code; all diagnostics go to `err`.
///
/// `help_hint` is appended after validation diagnostics so the caller can
/// point at its own help flag.
pub(crate) fn run_action<F>(
    mut schema: Schema,
    action: F,
    argv: &[String],
    help_hint: &str,
    err: &mut dyn Write,
) -> i32
where
    F: FnOnce(&Invocation) -> anyhow::Result<i32>,
{
    // Idle -> Validating: bind raw tokens into the declared sets.
    if let Err(e) = binder::bind(argv, &mut schema.options, &mut schema.arguments) {
        let _ = writeln!(err, "{e}");
        return 1;
    }

    if let Err(e) = validate(&schema) {
        // Failed: the action is never invoked.
        let _ = writeln!(err, "{e}");
        let _ = writeln!(err, "{help_hint}");
        return 1;
    }

    // Validating -> Executing.
    let invocation = Invocation {
        options: schema.options,
        arguments: schema.arguments,
    };
    match catch_unwind(AssertUnwindSafe(|| action(&invocation))) {
        // Executing -> Done: the action's return value is the exit code.
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            let _ = writeln!(err, "{}", ShellError::Execution(e));
            1
        }
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            let _ = writeln!(err, "panic: {msg}");
            1
        }
    }
}

/// Check every bound option and argument, collecting the fixed category
/// diagnostics into one [`ShellError::Validation`].
fn validate(schema: &Schema) -> Result<(), ShellError> {
    let mut lines: Vec<&str> = Vec::new();
    if schema.options.iter().any(|o| !o.is_valid()) {
        lines.push("Invalid option(s).");
    }
    if schema.arguments.iter().any(|a| !a.is_valid()) {
        lines.push("Missing or invalid argument(s).");
    }
    if lines.is_empty() {
        Ok(())
    } else {
        Err(ShellError::Validation(lines.join("\n")))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Arity;
    use crate::value::ValueKind;

    const HINT: &str = "Run with --help for usage.";

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn stderr_of(schema: Schema, tokens: &[&str]) -> (i32, String) {
        let mut err = Vec::new();
        let code = run_action(schema, |_| Ok(0), &argv(tokens), HINT, &mut err);
        (code, String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_valid_invocation_runs_action() {
        let schema = Schema::new(
            vec![ToolOption::new("count", Arity::SingleValue).kind(ValueKind::Int32)],
            vec![ToolArgument::new("name").required()],
        );
        let mut err = Vec::new();
        let code = run_action(
            schema,
            |inv| {
                assert_eq!(inv.option("count").and_then(|o| o.integer()), Some(3));
                assert_eq!(inv.argument("name").and_then(|a| a.text()), Some("x"));
                Ok(7)
            },
            &argv(&["--count", "3", "x"]),
            HINT,
            &mut err,
        );
        assert_eq!(code, 7);
        assert!(err.is_empty());
    }

    #[test]
    fn test_invalid_option_blocks_action() {
        let schema = Schema::new(
            vec![ToolOption::new("count", Arity::SingleValue).kind(ValueKind::Int32)],
            vec![],
        );
        let mut err = Vec::new();
        let code = run_action(
            schema,
            |_| panic!("action must not run"),
            &argv(&["--count", "abc"]),
            HINT,
            &mut err,
        );
        let err = String::from_utf8(err).unwrap();
        assert_eq!(code, 1);
        assert!(err.contains("Invalid option(s)."));
        assert!(err.contains(HINT));
    }

    #[test]
    fn test_missing_required_argument_blocks_action() {
        let schema = Schema::new(vec![], vec![ToolArgument::new("name").required()]);
        let (code, err) = stderr_of(schema, &[]);
        assert_eq!(code, 1);
        assert!(err.contains("Missing or invalid argument(s)."));
        assert!(err.contains(HINT));
    }

    #[test]
    fn test_empty_required_argument_blocks_action() {
        let schema = Schema::new(vec![], vec![ToolArgument::new("name").required()]);
        let (code, err) = stderr_of(schema, &[""]);
        assert_eq!(code, 1);
        assert!(err.contains("Missing or invalid argument(s)."));
    }

    #[test]
    fn test_both_categories_reported_together() {
        let schema = Schema::new(
            vec![ToolOption::new("count", Arity::SingleValue).kind(ValueKind::Int32)],
            vec![ToolArgument::new("name").required()],
        );
        let (code, err) = stderr_of(schema, &["--count", "abc"]);
        assert_eq!(code, 1);
        assert_eq!(
            err,
            format!("Invalid option(s).\nMissing or invalid argument(s).\n{HINT}\n")
        );
    }

    #[test]
    fn test_validate_yields_validation_error() {
        let schema = Schema::new(vec![], vec![ToolArgument::new("name").required()]);
        let err = validate(&schema).unwrap_err();
        assert!(matches!(err, ShellError::Validation(_)));
        assert_eq!(err.to_string(), "Missing or invalid argument(s).");
    }

    #[test]
    fn test_syntax_error_has_no_hint() {
        let (code, err) = stderr_of(Schema::empty(), &["--bogus"]);
        assert_eq!(code, 1);
        assert!(err.contains("syntax error: Unknown option '--bogus'."));
        assert!(!err.contains(HINT));
    }

    #[test]
    fn test_action_error_is_contained() {
        let mut err = Vec::new();
        let code = run_action(
            Schema::empty(),
            |_| Err(anyhow::anyhow!("backend unreachable")),
            &[],
            HINT,
            &mut err,
        );
        assert_eq!(code, 1);
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("execution error: backend unreachable"));
    }

    #[test]
    fn test_action_panic_is_contained() {
        // Silence the default hook noise for this test only.
        let prev = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        let mut err = Vec::new();
        let code = run_action(
            Schema::empty(),
            |_| -> anyhow::Result<i32> { panic!("boom") },
            &[],
            HINT,
            &mut err,
        );
        std::panic::set_hook(prev);
        assert_eq!(code, 1);
        assert!(String::from_utf8(err).unwrap().contains("panic: boom"));
    }

    #[test]
    fn test_action_exit_code_passes_through() {
        let mut err = Vec::new();
        let code = run_action(Schema::empty(), |_| Ok(42), &[], HINT, &mut err);
        assert_eq!(code, 42);
    }

    #[test]
    #[should_panic(expected = "declared twice")]
    fn test_schema_rejects_duplicate_names() {
        let _ = Schema::new(
            vec![
                ToolOption::new("out", Arity::SingleValue),
                ToolOption::new("other", Arity::NoValue).alias("out"),
            ],
            vec![],
        );
    }

    #[test]
    #[should_panic(expected = "only the final argument may collect")]
    fn test_schema_rejects_collecting_argument_mid_list() {
        let _ = Schema::new(
            vec![],
            vec![
                ToolArgument::new("items").multiple(),
                ToolArgument::new("last"),
            ],
        );
    }
}
