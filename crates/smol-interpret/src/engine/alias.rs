//! Expansion of aliased expressions such as `today` into `Date today`.

use smol_core::error::{Result, SmoltalkError};
use smol_core::registry::Registry;
use tracing::debug;

use super::dispatch::aliases_for;

/// Rewrites the leading alias word into `<object name> <target>`, keeping the
/// rest of the expression.
///
/// The first registry entry (in registry order) advertising the word wins.
pub fn expand_alias(expression: &str, registry: &Registry) -> Result<String> {
    let trimmed = expression.trim_start();
    let (word, tail) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    if word.is_empty() {
        return Err(SmoltalkError::UnexpectedError);
    }
    let (name, target) = registry
        .iter()
        .find_map(|(name, value)| aliases_for(value).remove(word).map(|target| (name, target)))
        .ok_or_else(|| SmoltalkError::UnrecognisedAlias(word.to_owned()))?;

    let mut expanded = format!("{} {}", name, target);
    if !tail.is_empty() {
        expanded.push(' ');
        expanded.push_str(tail);
    }
    debug!(alias = word, %expanded, "expanded alias");
    Ok(expanded)
}
