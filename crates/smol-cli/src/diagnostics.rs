//! Diagnostic and error reporting utilities

use crate::{CliError, Result};
use miette::{GraphicalReportHandler, GraphicalTheme};
use smol_core::error::SmoltalkError;
use tracing::debug;

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> Result<()> {
    // Install miette as the global error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

/// Render an evaluation error with its diagnostic code and help text.
pub fn render_evaluation_error(err: &SmoltalkError) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor()).with_width(120);
    if handler.render_report(&mut out, err).is_err() {
        return err.to_string();
    }
    out
}

/// Print a CLI error to stderr. Returns false when the error should also be
/// logged.
pub fn render_cli_error(err: &CliError) -> bool {
    match err {
        CliError::Evaluation(err) => {
            if let Some(selector) = err.selector() {
                debug!(selector, "evaluation failed");
            }
            eprint!("{}", render_evaluation_error(err));
            true
        }
        _ => false,
    }
}
