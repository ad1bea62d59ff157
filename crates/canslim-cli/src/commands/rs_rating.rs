use std::collections::BTreeMap;

use canslim_core::{rate_universe, RsRating, Symbol, UtcDateTime};
use serde::Serialize;

use crate::cli::RsRatingArgs;
use crate::error::CliError;

use super::{read_json, CommandResult, Context};

#[derive(Debug, Serialize)]
struct RsRatingResponseData {
    ratings: Vec<RsRating>,
    rated_at: UtcDateTime,
}

pub fn run(args: &RsRatingArgs, context: &Context) -> Result<CommandResult, CliError> {
    let benchmark: Vec<f64> = read_json(&args.benchmark)?;
    let raw: BTreeMap<String, Vec<f64>> = read_json(&args.input)?;

    let universe = raw
        .into_iter()
        .map(|(ticker, closes)| Ok((Symbol::parse(&ticker)?, closes)))
        .collect::<Result<BTreeMap<_, _>, CliError>>()?;

    let ratings = rate_universe(&benchmark, &universe)?;
    let unrated: Vec<&str> = ratings
        .iter()
        .filter(|rating| rating.rating.is_none())
        .map(|rating| rating.symbol.as_str())
        .collect();
    let warning = (!unrated.is_empty())
        .then(|| format!("insufficient history to rate: {}", unrated.join(",")));

    let data = serde_json::to_value(RsRatingResponseData {
        ratings,
        rated_at: context.as_of,
    })?;

    let mut result = CommandResult::ok(data);
    if let Some(warning) = warning {
        result = result.with_warning(warning);
    }
    Ok(result)
}
