//! `greet` - reference single-action tool.
//!
//! Exercises options (switch + typed single-value with default), an
//! optional positional with a default, and the help-on-empty shortcut.

use anyhow::Context;
use toolshell::{
    Arity, Invocation, Schema, ShellConfig, Tool, ToolArgument, ToolOption, ToolShell, ValueKind,
};

struct Greet;

impl Tool for Greet {
    fn schema(&self) -> Schema {
        Schema::new(
            vec![
                ToolOption::new("shout", Arity::NoValue)
                    .alias("s")
                    .describe("Print the greeting in upper case"),
                ToolOption::new("repeat", Arity::SingleValue)
                    .alias("r")
                    .kind(ValueKind::Int32)
                    .default_value("1")
                    .describe("Number of times to repeat the greeting"),
            ],
            vec![
                ToolArgument::new("name")
                    .default_value("world")
                    .describe("Who to greet"),
            ],
        )
    }

    fn execute(&self, inv: &Invocation) -> anyhow::Result<i32> {
        let name = inv
            .argument("name")
            .and_then(|a| a.text())
            .context("argument 'name' not bound")?;
        let repeat = inv
            .option("repeat")
            .and_then(|o| o.integer())
            .context("option 'repeat' not bound")?;
        let shout = inv.option("shout").is_some_and(|o| o.is_present());

        let mut greeting = format!("Hello, {name}!");
        if shout {
            greeting = greeting.to_uppercase();
        }
        for _ in 0..repeat {
            println!("{greeting}");
        }
        Ok(0)
    }
}

fn main() {
    let config = ShellConfig {
        name: "greet".into(),
        description: "Greets people, loudly if asked".into(),
        version: Some(env!("CARGO_PKG_VERSION").into()),
        help_on_empty: true,
        ..Default::default()
    };
    let shell = ToolShell::single(config, Greet);
    std::process::exit(shell.run_from_env());
}
