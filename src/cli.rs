use clap::{Args, Parser, Subcommand};

/// Fetches market prices from Alpha Vantage and prints them as hledger
/// price directives, tables, or the raw JSON/CSV payload.
#[derive(Debug, Parser)]
#[command(name = "hledger-price-tracker", author, version, about)]
pub struct Cli {
    /// Alpha Vantage API key (overrides ALPHA_VANTAGE_API_KEY).
    #[arg(short, long, global = true)]
    pub api_key: Option<String>,

    /// Currency used when a command needs a quote currency and none is given.
    #[arg(short = 'c', long, global = true)]
    pub default_currency: Option<String>,

    /// Skip symbol currency lookups, as with the demo API key.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Load variables from this file instead of ./.env.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<String>,

    /// Log requests and decoding steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stock prices and symbol search.
    Stock {
        #[command(subcommand)]
        command: StockCommand,
    },
    /// Physical currency exchange rates.
    Currency {
        #[command(subcommand)]
        command: CurrencyCommand,
    },
    /// Digital currency exchange rates.
    Crypto {
        #[command(subcommand)]
        command: CryptoCommand,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// Historical prices of a stock.
    Price {
        symbol: String,
        #[command(flatten)]
        series: SeriesArgs,
        /// Use the adjusted series and record the adjusted close.
        #[arg(long)]
        adjusted: bool,
    },
    /// Search symbols by keywords.
    Search {
        keywords: String,
        /// json, csv, table, table-long or table-short.
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CurrencyCommand {
    /// Historical exchange rates between two currencies.
    Rate {
        from: String,
        /// Defaults to the configured default currency.
        to: Option<String>,
        #[command(flatten)]
        series: SeriesArgs,
    },
    /// Current exchange rate between two currencies.
    Current(CurrentArgs),
    /// List the known physical currencies.
    List(ListArgs),
}

#[derive(Debug, Subcommand)]
pub enum CryptoCommand {
    /// Current exchange rate of a cryptocurrency.
    Current(CurrentArgs),
    /// List the known digital currencies.
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// hledger, json, csv, table or table-long.
    #[arg(short, long, default_value = "hledger")]
    pub format: String,

    /// daily, weekly or monthly.
    #[arg(short, long, default_value = "weekly")]
    pub interval: String,

    /// First date to print (YYYY-MM-DD).
    #[arg(short, long)]
    pub begin: Option<String>,

    /// Last date to print (YYYY-MM-DD), defaults to today.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Request the full daily history instead of the latest 100 points.
    #[arg(long)]
    pub full: bool,

    /// Print the newest date first.
    #[arg(long)]
    pub reverse: bool,
}

#[derive(Debug, Args)]
pub struct CurrentArgs {
    pub from: String,
    /// Defaults to the configured default currency.
    pub to: Option<String>,
    /// hledger, json, table or table-long.
    #[arg(short, long, default_value = "hledger")]
    pub format: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// csv or table.
    #[arg(short, long, default_value = "table")]
    pub format: String,
}
