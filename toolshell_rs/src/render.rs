//! Help text generation.
//!
//! Layout follows one fixed shape: a title line, a USAGE block, then
//! ARGUMENTS / OPTIONS / COMMANDS sections with aligned columns and a
//! dimmed footer hint. Arity and required badges are appended to the
//! descriptions unless disabled in [`RenderConfig`].

use crate::argument::ToolArgument;
use crate::colors::{ColorMode, Painter};
use crate::dispatch::Schema;
use crate::option::{Arity, ToolOption};
use crate::shell::{Command, ShellConfig};

/// Badge appended to single-value option descriptions.
pub const SINGLE_VALUE_BADGE: &str = "=";
/// Badge appended to multiple-value option descriptions.
pub const MULTI_VALUE_BADGE: &str = "\u{2026}";
/// Badge appended to required argument descriptions.
pub const REQUIRED_BADGE: &str = "*";

const COLUMN: usize = 18;

/// Presentation settings, passed explicitly at shell construction.
/// There is no process-wide styling state.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// When to apply ANSI styling to help output.
    pub color: ColorMode,
    /// Append arity/required badges to descriptions.
    pub append_badges: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            append_badges: true,
        }
    }
}

/// Option description plus its arity badge (single `=`, multiple `…`,
/// none for a bare switch), unless badges are disabled.
pub(crate) fn option_description(opt: &ToolOption, cfg: &RenderConfig, p: &Painter) -> String {
    let badge = match opt.arity() {
        Arity::NoValue => None,
        Arity::SingleValue => Some(SINGLE_VALUE_BADGE),
        Arity::MultipleValue => Some(MULTI_VALUE_BADGE),
    };
    decorate(opt.description(), badge, cfg, p)
}

/// Argument description plus the required badge `*`, unless disabled.
pub(crate) fn argument_description(arg: &ToolArgument, cfg: &RenderConfig, p: &Painter) -> String {
    let badge = arg.is_required().then_some(REQUIRED_BADGE);
    decorate(arg.description(), badge, cfg, p)
}

fn decorate(description: &str, badge: Option<&str>, cfg: &RenderConfig, p: &Painter) -> String {
    match badge {
        Some(b) if cfg.append_badges => {
            if description.is_empty() {
                p.badge(b)
            } else {
                format!("{description} {}", p.badge(b))
            }
        }
        _ => description.to_string(),
    }
}

/// Flag column label: long name first, then aliases.
pub(crate) fn option_label(opt: &ToolOption) -> String {
    let mut label = format!("--{}", opt.name());
    for alias in opt.aliases() {
        if alias.len() == 1 {
            label.push_str(&format!(", -{alias}"));
        } else {
            label.push_str(&format!(", --{alias}"));
        }
    }
    label
}

fn usage_arguments(schema: &Schema) -> String {
    let mut usage = String::new();
    for arg in schema.arguments() {
        usage.push(' ');
        let name = arg.name().to_uppercase();
        let name = if arg.is_collecting() {
            format!("{name}...")
        } else {
            name
        };
        if arg.is_required() {
            usage.push_str(&name);
        } else {
            usage.push_str(&format!("[{name}]"));
        }
    }
    usage
}

fn push_row(help: &mut String, label: &str, description: &str) {
    help.push_str(&format!("    {label:<COLUMN$} {description}\n"));
}

fn push_schema_sections(help: &mut String, schema: &Schema, cfg: &ShellConfig, p: &Painter) {
    if !schema.arguments().is_empty() {
        help.push_str("ARGUMENTS:\n");
        for arg in schema.arguments() {
            push_row(
                help,
                &arg.name().to_uppercase(),
                &argument_description(arg, &cfg.render, p),
            );
        }
        help.push('\n');
    }

    help.push_str("OPTIONS:\n");
    for opt in schema.options() {
        push_row(
            help,
            &option_label(opt),
            &option_description(opt, &cfg.render, p),
        );
    }
    push_row(help, "--help, -h", "Show this help message and exit");
    if cfg.version.is_some() {
        push_row(help, "--version, -V", "Show version information");
    }
}

fn title(cfg: &ShellConfig, p: &Painter) -> String {
    let mut line = cfg.name.clone();
    if let Some(version) = &cfg.version {
        line.push_str(&format!(" {version}"));
    }
    if !cfg.description.is_empty() {
        line.push_str(&format!(" - {}", cfg.description));
    }
    p.header(&line)
}

/// Help for a single-action tool.
pub(crate) fn tool_help(cfg: &ShellConfig, schema: &Schema) -> String {
    let p = Painter::new(cfg.render.color);
    let mut help = String::new();
    help.push_str(&title(cfg, &p));
    help.push_str("\n\n");
    help.push_str("USAGE:\n");
    help.push_str(&format!(
        "    {} [OPTIONS]{}\n\n",
        cfg.name,
        usage_arguments(schema)
    ));
    push_schema_sections(&mut help, schema, cfg, &p);
    help
}

/// Help for a subcommand tool: the command table plus global options.
pub(crate) fn commands_help(cfg: &ShellConfig, commands: &[Box<dyn Command>]) -> String {
    let p = Painter::new(cfg.render.color);
    let mut help = String::new();
    help.push_str(&title(cfg, &p));
    help.push_str("\n\n");
    help.push_str("USAGE:\n");
    help.push_str(&format!("    {} <COMMAND> [OPTIONS]\n\n", cfg.name));
    help.push_str("COMMANDS:\n");
    for cmd in commands {
        push_row(&mut help, cmd.name(), cmd.description());
    }
    help.push('\n');
    help.push_str("OPTIONS:\n");
    push_row(&mut help, "--help, -h", "Show this help message and exit");
    if cfg.version.is_some() {
        push_row(&mut help, "--version, -V", "Show version information");
    }
    help.push('\n');
    help.push_str(&p.dim(&format!(
        "Run '{} <command> --help' for command details.",
        cfg.name
    )));
    help.push('\n');
    help
}

/// Help for one registered subcommand.
pub(crate) fn command_help(cfg: &ShellConfig, cmd: &dyn Command) -> String {
    let p = Painter::new(cfg.render.color);
    let schema = cmd.schema();
    let mut help = String::new();
    help.push_str(&p.header(&format!(
        "{} {} - {}",
        cfg.name,
        cmd.name(),
        cmd.description()
    )));
    help.push_str("\n\n");
    help.push_str("USAGE:\n");
    help.push_str(&format!(
        "    {} {} [OPTIONS]{}\n\n",
        cfg.name,
        cmd.name(),
        usage_arguments(&schema)
    ));
    push_schema_sections(&mut help, &schema, cfg, &p);
    help
}

// ============================================================================
// Tests
// ============================================================================
