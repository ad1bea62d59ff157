use canslim_core::{
    CanslimInputs, CanslimScore, CanslimScorer, ScreenCandidate, ScreenerFilter,
    StockFundamentals, StockSummary, Symbol,
};
use serde::Serialize;

use crate::cli::ScoreArgs;
use crate::error::CliError;

use super::{read_json, CommandResult, Context};

#[derive(Debug, Serialize)]
struct ScoreResponseData {
    symbol: Symbol,
    inputs: CanslimInputs,
    score: CanslimScore,
    passes_filter: bool,
    filter_applied: ScreenerFilter,
}

pub fn run(args: &ScoreArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let filter = context.filter(&args.filter)?;
    let scorer = CanslimScorer::new(context.config.scoring.clone())?;

    let inputs = inputs_from_args(args)?;
    let score = scorer.score(&inputs, &filter)?;

    let candidate = ScreenCandidate::new(symbol.clone(), inputs.clone());
    let passes_filter = filter.matches(&StockSummary::from_scored(&candidate, &score));
    let missing = 6 - inputs.available_count();

    let data = serde_json::to_value(ScoreResponseData {
        symbol,
        inputs,
        score,
        passes_filter,
        filter_applied: filter,
    })?;

    let mut result = CommandResult::ok(data);
    if missing > 0 {
        result = result.with_warning(format!(
            "{missing} of 6 metrics unavailable; those criteria scored 0"
        ));
    }
    Ok(result)
}

fn inputs_from_args(args: &ScoreArgs) -> Result<CanslimInputs, CliError> {
    let Some(path) = &args.fundamentals else {
        return Ok(CanslimInputs {
            eps_growth_quarterly: args.eps_quarterly,
            eps_growth_annual: args.eps_annual,
            distance_from_52w_high: args.distance,
            volume_ratio: args.volume_ratio,
            rs_rating: args.rs_rating,
            institutional_ownership: args.institutional,
        });
    };

    let fundamentals: StockFundamentals = read_json(path)?;
    let mut inputs = fundamentals.to_inputs()?;
    if args.rs_rating.is_some() {
        inputs.rs_rating = args.rs_rating;
    }
    if args.institutional.is_some() {
        inputs.institutional_ownership = args.institutional;
    }
    Ok(inputs)
}
