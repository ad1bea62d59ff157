use canslim_core::{IndicatorSnapshot, MarketConditionClassifier};

use crate::cli::MarketArgs;
use crate::error::CliError;

use super::{read_json, CommandResult, Context};

pub fn run(args: &MarketArgs, context: &Context) -> Result<CommandResult, CliError> {
    let snapshot = snapshot_from_args(args, context)?;
    let classifier = MarketConditionClassifier::new(context.config.market.clone())?;
    let classification = classifier.classify(&snapshot, context.as_of)?;

    let mut result = CommandResult::ok(serde_json::to_value(&classification)?);
    if snapshot.sp500_above_ma200 != (snapshot.sp500_price > snapshot.sp500_ma200) {
        result = result.with_warning(
            "sp500_above_ma200 disagrees with sp500_price vs sp500_ma200; the supplied flag was used",
        );
    }
    Ok(result)
}

fn snapshot_from_args(args: &MarketArgs, context: &Context) -> Result<IndicatorSnapshot, CliError> {
    if let Some(path) = &args.input {
        return read_json(path);
    }

    let vix = args.vix.ok_or(CliError::MissingFlag { flag: "vix" })?;
    let put_call = args.put_call.ok_or(CliError::MissingFlag { flag: "put-call" })?;

    if let Some(path) = &args.closes {
        let closes: Vec<f64> = read_json(path)?;
        return Ok(IndicatorSnapshot::from_benchmark_closes(
            vix,
            &closes,
            put_call,
            context.as_of,
        )?);
    }

    let price = args
        .sp500_price
        .ok_or(CliError::MissingFlag { flag: "sp500-price" })?;
    let rsi = args
        .sp500_rsi
        .ok_or(CliError::MissingFlag { flag: "sp500-rsi" })?;
    let ma200 = args
        .sp500_ma200
        .ok_or(CliError::MissingFlag { flag: "sp500-ma200" })?;

    Ok(IndicatorSnapshot::new(
        vix,
        price,
        rsi,
        ma200,
        put_call,
        context.as_of,
    )?)
}
