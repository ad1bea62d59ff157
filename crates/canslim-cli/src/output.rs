use std::io::{self, Write};

use canslim_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_envelope(&mut out, envelope, format, pretty)
}

fn write_envelope(
    out: &mut impl Write,
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(out, envelope)?,
    }

    Ok(())
}

fn write_table(out: &mut impl Write, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "operation   : {}", envelope.meta.operation)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    if let Some(criteria) = criteria_rows(&envelope.data) {
        writeln!(out, "criteria:")?;
        for row in criteria {
            writeln!(out, "  {row}")?;
        }
    }

    writeln!(out, "data:")?;
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        writeln!(out, "  {line}")?;
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            match &error.symbol {
                Some(symbol) => writeln!(out, "  - {symbol} {}: {}", error.code, error.message)?,
                None => writeln!(out, "  - {}: {}", error.code, error.message)?,
            }
        }
    }

    Ok(())
}

/// One line per criterion when `data` carries a composite score.
fn criteria_rows(data: &Value) -> Option<Vec<String>> {
    let score = data.get("score")?;
    let rows = ["c_score", "a_score", "n_score", "s_score", "l_score", "i_score"]
        .iter()
        .filter_map(|key| score.get(*key))
        .map(|criterion| {
            let value = criterion["value"]
                .as_f64()
                .map_or_else(|| "n/a".to_owned(), |value| format!("{value:.2}"));
            format!(
                "{code} {grade} {score:>3}  value={value} threshold={threshold}",
                code = criterion["code"].as_str().unwrap_or("?"),
                grade = criterion["grade"].as_str().unwrap_or("?"),
                score = criterion["score"].as_u64().unwrap_or(0),
                threshold = criterion["threshold"],
            )
        })
        .collect::<Vec<_>>();
    (!rows.is_empty()).then_some(rows)
}
