use canslim_core::{EnvelopeError, Page, ScreenCandidate, Screener};

use crate::cli::ScreenArgs;
use crate::error::CliError;

use super::{read_json, CommandResult, Context};

pub fn run(args: &ScreenArgs, context: &Context) -> Result<CommandResult, CliError> {
    let candidates: Vec<ScreenCandidate> = read_json(&args.input)?;
    let filter = context.filter(&args.filter)?;
    let screener = Screener::new(filter, context.config.scoring.clone())?;
    let page = Page::new(args.limit, args.offset)?;

    let result = screener.run(&candidates, page, context.as_of);

    let errors = result
        .rejected
        .iter()
        .map(|rejected| {
            let error = EnvelopeError::new("invalid_input", rejected.reason.clone())?
                .with_symbol(rejected.symbol.as_str());
            Ok(match &rejected.field {
                Some(field) => error.with_field(field.clone()),
                None => error,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let mut command_result = CommandResult::ok(serde_json::to_value(&result)?).with_errors(errors);
    if candidates.is_empty() {
        command_result = command_result.with_warning("input universe is empty");
    }
    Ok(command_result)
}
