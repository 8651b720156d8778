//! Selector listing command implementation

use crate::{cli::CliConfig, CliError, Result};
use clap::Args;
use smol_core::error::SmoltalkError;
use smol_core::Value;
use smol_interpret::{all_messages, selector_listing, Interpreter};

use super::eval::{evaluate_expression, EvalArgs};

/// Arguments for the selectors command
#[derive(Debug, Clone, Args)]
pub struct SelectorsArgs {
    /// An initial object such as `Date`, or an expression
    pub expr: String,
}

/// The value whose selectors get listed. Input too short to be an
/// expression is resolved as an initial object.
pub fn selectors_target(args: &SelectorsArgs, config: &CliConfig) -> Result<Value> {
    let eval = EvalArgs {
        expr: args.expr.clone(),
        aliased: false,
    };
    match evaluate_expression(&eval, config) {
        Err(CliError::Evaluation(SmoltalkError::ExpressionTooShort(_))) => {
            let registry = config.registry()?;
            let ctx = config.context();
            Ok(Interpreter::new(&registry, &ctx).resolve(args.expr.trim())?)
        }
        other => other,
    }
}

/// Execute the selectors command
pub fn selectors_command(args: SelectorsArgs, config: &CliConfig) -> Result<()> {
    let value = selectors_target(&args, config)?;
    println!("{}", selector_listing(&all_messages(&value)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smol_core::ValueType;

    fn target(expr: &str) -> Result<Value> {
        let args = SelectorsArgs {
            expr: expr.to_string(),
        };
        selectors_target(&args, &CliConfig::default())
    }

    #[test]
    fn test_single_words_are_initial_objects() {
        assert_eq!(target("Date").unwrap().value_type(), ValueType::Date);
        assert_eq!(target("\"x y\"").unwrap(), Value::string("x y"));
    }

    #[test]
    fn test_expressions_are_evaluated() {
        assert_eq!(target("\"a b\" characters").unwrap().value_type(), ValueType::Array);
        assert!(target("Banana").is_err());
    }
}
