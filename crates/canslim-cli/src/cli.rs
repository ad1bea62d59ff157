//! CLI argument definitions for canslim.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `market` | Classify the market condition from benchmark indicators |
//! | `score` | Score one stock on the six CAN-SLIM criteria |
//! | `screen` | Score, filter and rank a universe of stocks |
//! | `rs-rating` | Rate a universe's relative strength against a benchmark |
//! | `config` | Print the effective configuration |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and errors as failures |
//! | `--config` | none | YAML configuration file |
//! | `--as-of` | now | Analysis timestamp (RFC3339 UTC) |
//! | `-v` | off | Debug logging on stderr |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// CAN-SLIM scoring and market-condition classification.
#[derive(Debug, Parser)]
#[command(name = "canslim", author, version, about = "CAN-SLIM scoring engine")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// YAML file with `filter`, `scoring` and `market` sections.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Timestamp stamped on results instead of the current time.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Log evaluation details to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON envelope.
    Json,
    /// Human-readable summary.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify the market as risk-on, neutral or risk-off.
    ///
    ///   canslim market --vix 18 --sp500-price 4500 --sp500-rsi 55 --sp500-ma200 4300 --put-call 0.9
    ///   canslim market --input snapshot.json
    ///   canslim market --vix 18 --put-call 0.9 --closes spx.json
    Market(MarketArgs),

    /// Score one stock. Omitted metrics are treated as unavailable.
    ///
    ///   canslim score --symbol NVDA --eps-quarterly 30 --eps-annual 28 --distance 10 \
    ///     --volume-ratio 1.8 --rs-rating 85 --institutional 40
    ///   canslim score --symbol NVDA --fundamentals nvda.json
    Score(ScoreArgs),

    /// Score, filter and rank a universe read from a JSON array.
    ///
    ///   canslim screen --input universe.json --limit 10
    Screen(ScreenArgs),

    /// Rate relative strength for symbols against a benchmark close series.
    ///
    ///   canslim rs-rating --benchmark spx.json --input closes.json
    RsRating(RsRatingArgs),

    /// Print the effective configuration after file and flag overrides.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct MarketArgs {
    /// JSON file holding a full indicator snapshot.
    #[arg(long, conflicts_with_all = ["sp500_price", "sp500_rsi", "sp500_ma200", "closes"])]
    pub input: Option<PathBuf>,

    /// JSON array of benchmark closes, oldest first; derives price, RSI and MA200.
    #[arg(long, conflicts_with_all = ["sp500_price", "sp500_rsi", "sp500_ma200"])]
    pub closes: Option<PathBuf>,

    #[arg(long)]
    pub vix: Option<f64>,

    #[arg(long)]
    pub sp500_price: Option<f64>,

    #[arg(long)]
    pub sp500_rsi: Option<f64>,

    #[arg(long)]
    pub sp500_ma200: Option<f64>,

    #[arg(long)]
    pub put_call: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    #[arg(long)]
    pub symbol: String,

    /// JSON file with raw fundamentals; derived metrics replace the flags below.
    #[arg(long, conflicts_with_all = ["eps_quarterly", "eps_annual", "distance", "volume_ratio"])]
    pub fundamentals: Option<PathBuf>,

    /// Quarterly EPS growth, percent.
    #[arg(long, allow_negative_numbers = true)]
    pub eps_quarterly: Option<f64>,

    /// Annual EPS growth, percent.
    #[arg(long, allow_negative_numbers = true)]
    pub eps_annual: Option<f64>,

    /// Percent below the 52-week high.
    #[arg(long)]
    pub distance: Option<f64>,

    #[arg(long)]
    pub volume_ratio: Option<f64>,

    #[arg(long)]
    pub rs_rating: Option<f64>,

    /// Institutional ownership, percent of float.
    #[arg(long)]
    pub institutional: Option<f64>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// JSON array of candidates: `symbol`, optional `name`/`price` and the six metrics.
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = canslim_core::screener::DEFAULT_PAGE_LIMIT)]
    pub limit: usize,

    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct RsRatingArgs {
    /// JSON array of benchmark closes, oldest first.
    #[arg(long)]
    pub benchmark: PathBuf,

    /// JSON object mapping each symbol to its closes, oldest first.
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Screener threshold overrides; these win over the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub min_rs_rating: Option<f64>,

    #[arg(long)]
    pub min_eps_growth_quarterly: Option<f64>,

    #[arg(long)]
    pub min_eps_growth_annual: Option<f64>,

    #[arg(long)]
    pub max_distance_from_52w_high: Option<f64>,

    #[arg(long)]
    pub min_volume_ratio: Option<f64>,

    #[arg(long)]
    pub min_canslim_score: Option<f64>,
}
