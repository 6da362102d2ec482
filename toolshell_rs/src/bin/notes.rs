//! `notes` - reference subcommand tool.
//!
//! Exercises command routing, required non-empty arguments, multi-value
//! options, and the unknown-command suggestion.

use anyhow::Context;
use toolshell::{
    Arity, Command, CommandSet, Invocation, Registrar, Schema, ShellConfig, ToolArgument,
    ToolOption, ToolShell, ValueKind,
};

struct AddCommand;

impl Command for AddCommand {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add a note"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            vec![
                ToolOption::new("tag", Arity::MultipleValue)
                    .alias("t")
                    .describe("Tag to attach (repeatable)"),
            ],
            vec![
                ToolArgument::new("text")
                    .required()
                    .describe("The note text"),
            ],
        )
    }

    fn execute(&self, inv: &Invocation) -> anyhow::Result<i32> {
        let text = inv
            .argument("text")
            .and_then(|a| a.text())
            .context("argument 'text' not bound")?;
        let tags: Vec<&str> = inv
            .option("tag")
            .map(|o| o.values().iter().filter_map(|v| v.as_text()).collect())
            .unwrap_or_default();
        if tags.is_empty() {
            println!("Added note: {text}");
        } else {
            println!("Added note: {text} [{}]", tags.join(", "));
        }
        Ok(0)
    }
}

struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn description(&self) -> &str {
        "List stored notes"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            vec![
                ToolOption::new("limit", Arity::SingleValue)
                    .alias("n")
                    .kind(ValueKind::Int32)
                    .default_value("10")
                    .describe("Maximum number of notes to show"),
            ],
            vec![],
        )
    }

    fn execute(&self, inv: &Invocation) -> anyhow::Result<i32> {
        let limit = inv
            .option("limit")
            .and_then(|o| o.integer())
            .context("option 'limit' not bound")?;
        println!("Listing up to {limit} notes (none stored).");
        Ok(0)
    }
}

struct RemoveCommand;

impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "remove"
    }

    fn description(&self) -> &str {
        "Remove a note by id"
    }

    fn schema(&self) -> Schema {
        Schema::new(
            vec![],
            vec![
                ToolArgument::new("id")
                    .required()
                    .kind(ValueKind::Int64)
                    .describe("Id of the note to remove"),
            ],
        )
    }

    fn execute(&self, inv: &Invocation) -> anyhow::Result<i32> {
        let id = inv
            .argument("id")
            .and_then(|a| a.integer())
            .context("argument 'id' not bound")?;
        println!("Removed note {id}.");
        Ok(0)
    }
}

struct Notes;

impl CommandSet for Notes {
    fn register(&self, registrar: &mut Registrar) {
        registrar.add(AddCommand);
        registrar.add(ListCommand);
        registrar.add(RemoveCommand);
    }
}

fn main() {
    let config = ShellConfig {
        name: "notes".into(),
        description: "A tiny note-taking tool".into(),
        version: Some(env!("CARGO_PKG_VERSION").into()),
        ..Default::default()
    };
    let shell = ToolShell::commands(config, &Notes);
    std::process::exit(shell.run_from_env());
}
