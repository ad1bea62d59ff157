use canslim_core::EngineConfig;

use crate::cli::ConfigArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub fn run(args: &ConfigArgs, context: &Context) -> Result<CommandResult, CliError> {
    let effective = EngineConfig {
        filter: context.filter(&args.filter)?,
        ..context.config.clone()
    };
    Ok(CommandResult::ok(serde_json::to_value(&effective)?))
}

#[cfg(test)]
mod tests {
    use canslim_core::UtcDateTime;

    use super::*;
    use crate::cli::FilterArgs;

    #[test]
    fn reports_overridden_filter() {
        let context = Context {
            config: EngineConfig::default(),
            as_of: UtcDateTime::parse("2024-03-15T21:00:00Z").expect("valid timestamp"),
        };
        let args = ConfigArgs {
            filter: FilterArgs {
                min_canslim_score: Some(80.0),
                ..FilterArgs::default()
            },
        };

        let result = run(&args, &context).expect("valid");
        assert_eq!(result.data["filter"]["min_canslim_score"], 80.0);
        assert_eq!(result.data["scoring"]["min_institutional_ownership"], 25.0);
        assert_eq!(result.data["market"]["vix_stressed"], 25.0);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let context = Context {
            config: EngineConfig::default(),
            as_of: UtcDateTime::parse("2024-03-15T21:00:00Z").expect("valid timestamp"),
        };
        let args = ConfigArgs {
            filter: FilterArgs {
                min_canslim_score: Some(120.0),
                ..FilterArgs::default()
            },
        };
        assert!(matches!(run(&args, &context), Err(CliError::Validation(_))));
    }
}
