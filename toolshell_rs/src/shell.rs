//! Top-level entry point for declared tools.
//!
//! A [`ToolShell`] owns the invocation lifecycle: it receives the raw
//! argument vector, decides between the "no arguments" shortcut, single
//! action execution, or subcommand routing, and maps every failure into a
//! process exit code. Tools plug in through the capability traits
//! ([`Tool`], [`Command`], [`CommandSet`]) - the shell is generic over
//! behavior, not over a type hierarchy.
//!
//! Exit codes: `0` is conventional success (the action's choice); `1`
//! covers empty invocation (when help-on-empty is enabled), syntax and
//! validation failures, a subcommand tool invoked without a command, and
//! any contained action failure. The core defines no other codes.

use std::io::Write;
use std::sync::Arc;

use crate::dispatch::{self, Invocation, Schema};
use crate::render::{self, RenderConfig};

/// A single-action tool: one declared schema, one action.
pub trait Tool: Send + Sync {
    /// Declare the options and arguments. Called once per invocation, so
    /// no bound state leaks between invocations.
    fn schema(&self) -> Schema;

    /// The action. Runs only after every option and argument validated;
    /// the returned code becomes the process exit code.
    fn execute(&self, invocation: &Invocation) -> anyhow::Result<i32>;
}

/// One named subcommand of a subcommand tool.
pub trait Command: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> Schema;
    fn execute(&self, invocation: &Invocation) -> anyhow::Result<i32>;
}

/// A set of subcommands, registered at shell construction.
pub trait CommandSet {
    fn register(&self, registrar: &mut Registrar);
}

/// Collects [`Command`] registrations. Duplicate names are a
/// declaration-time contract violation.
#[derive(Default)]
pub struct Registrar {
    commands: Vec<Box<dyn Command>>,
}

impl Registrar {
    pub fn add(&mut self, command: impl Command + 'static) {
        assert!(
            !self.commands.iter().any(|c| c.name() == command.name()),
            "command '{}' registered twice",
            command.name()
        );
        self.commands.push(Box::new(command));
    }
}

/// Shell construction settings.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Tool name shown in help and usage lines.
    pub name: String,
    /// One-line description for the help title.
    pub description: String,
    /// Enables the implicit `--version`/`-V` flag when set.
    pub version: Option<String>,
    /// Emit help and exit 1 when invoked with no arguments at all.
    pub help_on_empty: bool,
    /// Presentation settings (badges, styling).
    pub render: RenderConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            name: "tool".into(),
            description: String::new(),
            version: None,
            help_on_empty: true,
            render: RenderConfig::default(),
        }
    }
}

enum ShellMode {
    Single(Box<dyn Tool>),
    Commands(Vec<Box<dyn Command>>),
}

/// The top-level invocation runner. Immutable after construction; safe to
/// share across threads, though each invocation runs sequentially.
pub struct ToolShell {
    config: ShellConfig,
    mode: ShellMode,
}

impl ToolShell {
    /// Build a shell around a single-action tool.
    pub fn single(config: ShellConfig, tool: impl Tool + 'static) -> Self {
        Self {
            config,
            mode: ShellMode::Single(Box::new(tool)),
        }
    }

    /// Build a shell around a set of subcommands.
    pub fn commands(config: ShellConfig, set: &impl CommandSet) -> Self {
        let mut registrar = Registrar::default();
        set.register(&mut registrar);
        assert!(
            !registrar.commands.is_empty(),
            "a subcommand shell needs at least one registered command"
        );
        Self {
            config,
            mode: ShellMode::Commands(registrar.commands),
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Run against the process argument vector (skipping the executable
    /// path) with the real stdio streams.
    pub fn run_from_env(&self) -> i32 {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        self.run(&argv)
    }

    /// Run with the real stdio streams.
    pub fn run(&self, argv: &[String]) -> i32 {
        let mut out = std::io::stdout();
        let mut err = std::io::stderr();
        self.run_to(argv, &mut out, &mut err)
    }

    /// Convenience wrapper running the synchronous pipeline on a blocking
    /// worker. No additional concurrency semantics: validation and the
    /// action still run sequentially, and an in-flight invocation cannot
    /// be cancelled.
    pub async fn run_async(self: Arc<Self>, argv: Vec<String>) -> i32 {
        tokio::task::spawn_blocking(move || self.run(&argv))
            .await
            .unwrap_or(1)
    }

    /// Run with injected streams: help and action output go to `out`,
    /// diagnostics to `err`. Returns the exit code.
    pub fn run_to(&self, argv: &[String], out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        if argv.is_empty() && self.config.help_on_empty {
            let _ = writeln!(out, "{}", self.help());
            return 1;
        }

        match &self.mode {
            ShellMode::Single(tool) => {
                // Tokens behind `--` are positional, never implicit flags.
                let head = before_terminator(argv);
                if self.config.version.is_some() && has_version_flag(head) {
                    let _ = writeln!(out, "{}", self.version_line());
                    return 0;
                }
                if has_help_flag(head) {
                    let _ = writeln!(out, "{}", self.help());
                    return 0;
                }
                let hint = self.help_hint();
                dispatch::run_action(tool.schema(), |inv| tool.execute(inv), argv, &hint, err)
            }
            ShellMode::Commands(commands) => self.run_command(commands, argv, out, err),
        }
    }

    /// The full help text for this shell.
    pub fn help(&self) -> String {
        match &self.mode {
            ShellMode::Single(tool) => render::tool_help(&self.config, &tool.schema()),
            ShellMode::Commands(commands) => render::commands_help(&self.config, commands),
        }
    }

    fn help_hint(&self) -> String {
        format!("Run '{} --help' for usage.", self.config.name)
    }

    fn version_line(&self) -> String {
        let version = self.config.version.as_deref().unwrap_or_default();
        format!("{} {}", self.config.name, version)
    }

    /// Subcommand routing: the first positional token selects the command,
    /// every other token is parsed against that command's own schema. The
    /// implicit top-level flags only match before the command token; past
    /// it, `--version` and friends belong to the command's schema.
    fn run_command(
        &self,
        commands: &[Box<dyn Command>],
        argv: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> i32 {
        let selected = argv.iter().position(|a| !a.starts_with('-'));

        let head = before_terminator(&argv[..selected.unwrap_or(argv.len())]);
        if self.config.version.is_some() && has_version_flag(head) {
            let _ = writeln!(out, "{}", self.version_line());
            return 0;
        }

        let Some(selected) = selected else {
            // No command selected: help either way, exit code depends on
            // whether the caller asked for it.
            let _ = writeln!(out, "{}", self.help());
            return if has_help_flag(head) { 0 } else { 1 };
        };

        let name = &argv[selected];
        let Some(command) = commands.iter().find(|c| c.name() == name) else {
            let suggestion = suggest_similar_command(name, commands)
                .map(|s| format!("Did you mean: {s}?\n"))
                .unwrap_or_default();
            let _ = writeln!(
                err,
                "Unknown command '{}'. {}Run '{} --help' for available commands.",
                name, suggestion, self.config.name
            );
            return 1;
        };

        let remaining: Vec<String> = argv
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != selected)
            .map(|(_, a)| a.clone())
            .collect();

        if has_help_flag(before_terminator(&remaining)) {
            let _ = writeln!(out, "{}", render::command_help(&self.config, command.as_ref()));
            return 0;
        }

        let hint = format!("Run '{} {} --help' for usage.", self.config.name, name);
        dispatch::run_action(
            command.schema(),
            |inv| command.execute(inv),
            &remaining,
            &hint,
            err,
        )
    }
}

fn has_help_flag(argv: &[String]) -> bool {
    argv.iter().any(|a| a == "--help" || a == "-h")
}

fn has_version_flag(argv: &[String]) -> bool {
    argv.iter().any(|a| a == "--version" || a == "-V")
}

/// The slice of `argv` before the first `--` terminator. Only these tokens
/// can match the implicit help/version flags; the binder treats the rest
/// as positional.
fn before_terminator(argv: &[String]) -> &[String] {
    match argv.iter().position(|a| a == "--") {
        Some(pos) => &argv[..pos],
        None => argv,
    }
}

/// Suggest a registered command via Levenshtein distance (max 2).
fn suggest_similar_command<'a>(input: &str, commands: &'a [Box<dyn Command>]) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    let mut best: Option<(&str, usize)> = None;
    for cmd in commands {
        let distance = strsim::levenshtein(&input_lower, cmd.name());
        if distance <= 2 && best.is_none_or(|(_, d)| distance < d) {
            best = Some((cmd.name(), distance));
        }
    }
    best.map(|(name, _)| name)
}

// ============================================================================
// Tests
// ============================================================================
