//! Menu-bar plugin output
//!
//! Renders a run in the BitBar/SwiftBar plugin text format: a title line with
//! the overall health, a `---` separator, then one line per repository with
//! its failure diagnostics nested underneath.

use std::fmt::Write;

use crate::sync::{Health, Status, StepOutcome};

const CLEAR: &str = "✔";
const ATTENTION: &str = "❗";
const NOT_ATTEMPTED: &str = "–";
const PULLED: &str = "⬇";
const PUSHED: &str = "⬆";
const DIRTY: &str = "●";
const SEPARATOR: &str = "---";
const NESTED: &str = "--";

/// Everything the renderer needs to know about one invocation
#[derive(Debug)]
pub enum RunOutcome<'a> {
    /// Configuration could not be loaded; nothing was synced
    ConfigError(String),
    Completed(Vec<Status<'a>>),
}

impl RunOutcome<'_> {
    pub fn health(&self) -> Health {
        match self {
            RunOutcome::ConfigError(_) => Health::AttentionNeeded,
            RunOutcome::Completed(statuses) => Health::of_run(statuses),
        }
    }
}

fn health_glyph(health: Health) -> &'static str {
    match health {
        Health::AllClear => CLEAR,
        Health::AttentionNeeded => ATTENTION,
    }
}

fn step_glyph(outcome: &StepOutcome, succeeded: &'static str) -> &'static str {
    match outcome {
        StepOutcome::NotAttempted => NOT_ATTEMPTED,
        StepOutcome::Succeeded => succeeded,
        StepOutcome::Failed(_) => ATTENTION,
    }
}

/// Render the complete plugin output, trailing newline included
pub fn render(outcome: &RunOutcome<'_>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, outcome);
    out
}

fn write_report(out: &mut String, outcome: &RunOutcome<'_>) -> std::fmt::Result {
    writeln!(out, "{}", health_glyph(outcome.health()))?;
    writeln!(out, "{SEPARATOR}")?;

    match outcome {
        RunOutcome::ConfigError(message) => writeln!(out, "{message}")?,
        RunOutcome::Completed(statuses) => {
            for status in statuses {
                write_status(out, status)?;
            }
        }
    }
    Ok(())
}

fn write_status(out: &mut String, status: &Status<'_>) -> std::fmt::Result {
    let repository = status.repository();
    // Any failed step flags the line, even one that does not affect run health
    let marker = if status.has_failures() { ATTENTION } else { CLEAR };

    write!(
        out,
        "{} {}: {}{}",
        marker,
        repository.name(),
        step_glyph(status.pull(), PULLED),
        step_glyph(status.push(), PUSHED)
    )?;
    if status.dirty() == Some(true) {
        write!(out, " {DIRTY}")?;
    }
    if let Some(command) = repository.post_command() {
        write!(out, " | {}", shell_action(command))?;
    }
    writeln!(out)?;

    for (_, message) in status.failures() {
        writeln!(out, "{}", nest(message))?;
    }
    Ok(())
}

/// Indent every line of a diagnostic one submenu level
pub fn nest(message: &str) -> String {
    let message = message.trim_end_matches('\n');
    format!("{NESTED}{}", message.replace('\n', &format!("\n{NESTED}")))
}

/// BitBar attributes that run `command` through `/bin/sh` when clicked
pub fn shell_action(command: &str) -> String {
    format!(
        "bash=\"/bin/sh\" param1=\"-c\" param2=\"{}\" terminal=false",
        escape_param(command)
    )
}

fn escape_param(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
