//! Expression evaluation command implementation

use crate::{cli::CliConfig, Result};
use clap::Args;
use smol_core::Value;
use smol_interpret::Interpreter;
use tracing::info;

use super::print_result;

/// Arguments for the eval command
#[derive(Debug, Clone, Args)]
pub struct EvalArgs {
    /// Expression to evaluate, e.g. `"hello" reversedString`
    pub expr: String,

    /// Treat the first word as an alias such as `today`
    #[arg(short, long)]
    pub aliased: bool,
}

/// Evaluate one expression against the configured registry.
pub fn evaluate_expression(args: &EvalArgs, config: &CliConfig) -> Result<Value> {
    let registry = config.registry()?;
    let ctx = config.context();
    let interpreter = Interpreter::new(&registry, &ctx);

    info!("Evaluating expression: {}", args.expr);
    let value = if args.aliased {
        interpreter.evaluate_aliased(&args.expr)?
    } else {
        interpreter.evaluate(&args.expr)?
    };
    Ok(value)
}

/// Execute the eval command
pub fn eval_command(args: EvalArgs, config: &CliConfig) -> Result<()> {
    let value = evaluate_expression(&args, config)?;
    print_result(&value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use smol_core::error::SmoltalkError;

    fn args(expr: &str, aliased: bool) -> EvalArgs {
        EvalArgs {
            expr: expr.to_string(),
            aliased,
        }
    }

    #[test]
    fn test_eval_simple_expression() {
        let value = evaluate_expression(&args("\"hello\" reversedString", false), &CliConfig::default())
            .unwrap();
        assert_eq!(value, Value::string("olleh"));
    }

    #[test]
    fn test_eval_uses_configured_objects() {
        let mut config = CliConfig::default();
        config.objects.insert("answer".into(), "42".into());

        let value = evaluate_expression(&args("answer doubleValue", false), &config).unwrap();
        assert_eq!(value, Value::double(42.0));
    }

    #[test]
    fn test_eval_respects_max_depth() {
        let mut config = CliConfig::default();
        config.runtime.max_depth = Some(0);

        let err = evaluate_expression(&args("1 adding: [2 adding: 3]", false), &config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Evaluation(SmoltalkError::NestingTooDeep { limit: 0 })
        ));
    }

    #[test]
    fn test_eval_aliased() {
        let value = evaluate_expression(&args("today year", true), &CliConfig::default()).unwrap();
        assert_eq!(value.value_type(), smol_core::ValueType::String);
    }
}
