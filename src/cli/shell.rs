//! Line-oriented shell over the shop services.
//!
//! Input and output are injected so the loop runs the same against a
//! terminal or an in-memory buffer.

use std::io::{BufRead, Write};

use clap::Parser;

use butik::{ButikError, ErrorKind, Services};

use super::{commands, OutputFormat, ShellCommand, ShellLine};

const PROMPT: &str = "butik> ";

enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a> {
    services: &'a Services,
    format: OutputFormat,
}

impl<'a> Session<'a> {
    pub fn new(services: &'a Services, format: OutputFormat) -> Self {
        Self { services, format }
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> anyhow::Result<()> {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            if let Flow::Quit = self.execute_line(&line, out)? {
                break;
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn execute_line<W: Write>(&self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        let words = match tokenize(line) {
            Ok(words) if words.is_empty() => return Ok(Flow::Continue),
            Ok(words) => words,
            Err(msg) => {
                writeln!(out, "Invalid input: {msg}")?;
                return Ok(Flow::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // help and usage errors both render through clap
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        let action = words[..words.len().min(2)].join(" ");
        let result = match command {
            ShellCommand::Quit => return Ok(Flow::Quit),
            ShellCommand::Customer { action } => {
                commands::customer(self.services, out, self.format, action)
            }
            ShellCommand::Product { action } => {
                commands::product(self.services, out, self.format, action)
            }
            ShellCommand::Order { action } => {
                commands::order(self.services, out, self.format, action)
            }
            ShellCommand::Categories => commands::categories(out, self.format),
        };
        if let Err(err) = result {
            report(out, &action, &err)?;
        }
        Ok(Flow::Continue)
    }
}

/// Logs a failed command and tells the user what went wrong, per error kind.
fn report<W: Write>(out: &mut W, action: &str, err: &anyhow::Error) -> std::io::Result<()> {
    match err.downcast_ref::<ButikError>() {
        Some(e) => {
            let label = match e.kind() {
                ErrorKind::Validation => "Invalid input",
                ErrorKind::NotFound => "Not found",
                ErrorKind::Duplicate => "Duplicate",
            };
            tracing::warn!("{} - {:?}: {}", action, e.kind(), e.message());
            writeln!(out, "{}: {}", label, e.message())
        }
        None => {
            tracing::error!("{} - unexpected error: {:#}", action, err);
            writeln!(out, "Unexpected error, please try again.")
        }
    }
}

/// Splits a line on whitespace; double quotes group words.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
