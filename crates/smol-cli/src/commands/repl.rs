//! REPL (Read-Eval-Print Loop) command implementation

use crate::{cli::CliConfig, diagnostics::render_evaluation_error, Result};
use clap::Args;
use console::style;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use smol_core::error::SmoltalkError;
use smol_core::Value;
use smol_interpret::Interpreter;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Arguments for the repl command
#[derive(Debug, Clone, Default, Args)]
pub struct ReplArgs {
    /// History file (overrides the configured one)
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// What one line of input amounts to.
#[derive(Debug, PartialEq)]
pub enum LineOutcome {
    Quit,
    Skip,
    Value(Value),
    Error(String),
}

/// Process a single REPL line. Lines starting with `@` are aliased
/// expressions.
pub fn process_line(interpreter: &Interpreter<'_>, quit_command: &str, line: &str) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Skip;
    }
    if line.eq_ignore_ascii_case(quit_command) {
        return LineOutcome::Quit;
    }
    let result = match line.strip_prefix('@') {
        Some(aliased) => interpreter.evaluate_aliased(aliased),
        None => interpreter.evaluate(line),
    };
    match result {
        Ok(value) => LineOutcome::Value(value),
        Err(err) => LineOutcome::Error(describe_error(&err)),
    }
}

fn describe_error(err: &SmoltalkError) -> String {
    match err {
        // implementation errors carry no diagnostic of their own
        SmoltalkError::Raised(report) => report.to_string(),
        other => render_evaluation_error(other),
    }
}

fn editor(config: &CliConfig) -> Result<DefaultEditor> {
    let editor_config = Config::builder()
        .max_history_size(config.repl.max_history)?
        .auto_add_history(true)
        .build();
    Ok(DefaultEditor::with_config(editor_config)?)
}

/// Execute the repl command
pub fn repl_command(args: ReplArgs, config: &CliConfig) -> Result<()> {
    let registry = config.registry()?;
    let ctx = config.context();
    let interpreter = Interpreter::new(&registry, &ctx);

    let mut rl = editor(config)?;
    let history = args.history.or_else(|| config.repl.history_file.clone());
    if let Some(path) = &history {
        if let Err(err) = rl.load_history(path) {
            debug!(path = %path.display(), %err, "no history loaded");
        }
    }

    println!(
        "{} Smoltalk REPL. Type `{}` to quit; prefix a line with `@` to expand an alias.",
        style("»").cyan(),
        config.repl.quit_command
    );

    loop {
        match rl.readline(&config.repl.prompt) {
            Ok(line) => match process_line(&interpreter, &config.repl.quit_command, &line) {
                LineOutcome::Quit => break,
                LineOutcome::Skip => continue,
                LineOutcome::Value(value) => super::print_result(&value),
                LineOutcome::Error(message) => {
                    println!("{} {}", style("Error:").red().bold(), message.trim_end())
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(err) = rl.save_history(path) {
            warn!(path = %path.display(), %err, "failed to save history");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smol_core::{EvalContext, FixedClock, Registry};

    fn fixed_context() -> EvalContext {
        let instant = "2022-03-04T05:06:07Z".parse().unwrap();
        EvalContext::new().with_clock(FixedClock(instant))
    }

    fn session(lines: &[&str]) -> Vec<LineOutcome> {
        let registry = Registry::new();
        let ctx = fixed_context();
        let interpreter = Interpreter::new(&registry, &ctx);
        lines
            .iter()
            .map(|line| process_line(&interpreter, "q", line))
            .collect()
    }

    #[test]
    fn test_values_and_skips() {
        assert_eq!(
            session(&["\"abc\" uppercaseString", "   "]),
            vec![LineOutcome::Value(Value::string("ABC")), LineOutcome::Skip]
        );
    }

    #[test]
    fn test_quit_is_case_insensitive() {
        assert_eq!(session(&["Q", "q"]), vec![LineOutcome::Quit, LineOutcome::Quit]);
    }

    #[test]
    fn test_aliased_lines() {
        assert_eq!(
            session(&["@today year"]),
            vec![LineOutcome::Value(Value::string("2022"))]
        );
    }

    #[test]
    fn test_errors_are_reported_not_fatal() {
        let outcomes = session(&["Banana count", "Int squareRoot"]);
        let LineOutcome::Error(message) = &outcomes[0] else {
            panic!("expected an error, got {:?}", outcomes[0]);
        };
        assert!(message.contains("[Banana]: no such initial object"));
        assert_eq!(outcomes[1], LineOutcome::Value(Value::double(0.0)));
    }

    #[test]
    fn test_raised_errors_show_their_message() {
        let outcomes = session(&["Date dateFromString: yesterday"]);
        let LineOutcome::Error(message) = &outcomes[0] else {
            panic!("expected an error, got {:?}", outcomes[0]);
        };
        assert!(message.starts_with("cannot parse date \"yesterday\""));
    }
}
