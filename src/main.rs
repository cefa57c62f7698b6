mod cli;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use hledger_price_tracker::{
    Config, Error,
    app::TextTable,
    config::load_env_file,
    services::{CurrentRateQuery, HttpPriceTracker, PriceQuery, RateQuery},
};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, CryptoCommand, CurrencyCommand, CurrentArgs, StockCommand};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {:#}", error);
            let code = error.downcast_ref::<Error>().map(Error::exit_code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,hledger_price_tracker={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<String> {
    let env_file = load_env_file(cli.env_file.as_deref())?;
    let config = build_config(&cli)?;

    let output = match cli.command {
        Command::Config => describe_config(&config, env_file),
        Command::Stock { command } => {
            stock(&HttpPriceTracker::from_config(config)?, command).await?
        }
        Command::Currency { command } => {
            currency(&HttpPriceTracker::from_config(config)?, command).await?
        }
        Command::Crypto { command } => {
            let service = HttpPriceTracker::from_config(config)?;
            match command {
                CryptoCommand::Current(args) => service.exchange_rate(&current_query(args)).await?,
                CryptoCommand::List(args) => service.crypto_list(&args.format).await?,
            }
        }
    };

    Ok(output)
}

async fn stock(service: &HttpPriceTracker, command: StockCommand) -> Result<String> {
    let output = match command {
        StockCommand::Price {
            symbol,
            series,
            adjusted,
        } => {
            let query = PriceQuery {
                symbol,
                format: series.format,
                interval: series.interval,
                begin: series.begin,
                end: series.end,
                adjusted,
                full: series.full,
                reverse: series.reverse,
            };
            service.stock_price(&query).await?
        }
        StockCommand::Search { keywords, format } => {
            service.stock_search(&keywords, &format).await?
        }
    };
    Ok(output)
}

async fn currency(service: &HttpPriceTracker, command: CurrencyCommand) -> Result<String> {
    let output = match command {
        CurrencyCommand::Rate { from, to, series } => {
            let query = RateQuery {
                from,
                to,
                format: series.format,
                interval: series.interval,
                begin: series.begin,
                end: series.end,
                full: series.full,
                reverse: series.reverse,
            };
            service.currency_rate(&query).await?
        }
        CurrencyCommand::Current(args) => service.exchange_rate(&current_query(args)).await?,
        CurrencyCommand::List(args) => service.currency_list(&args.format).await?,
    };
    Ok(output)
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env().context("failed to read configuration")?;
    if let Some(api_key) = &cli.api_key {
        config = config.with_api_key(api_key.trim());
    }
    if let Some(currency) = &cli.default_currency {
        config = config.with_default_currency(currency.trim());
    }
    if cli.debug {
        config = config.with_debug(true);
    }
    Ok(config)
}

fn current_query(args: CurrentArgs) -> CurrentRateQuery {
    CurrentRateQuery {
        from: args.from,
        to: args.to,
        format: args.format,
    }
}

fn describe_config(config: &Config, env_file: Option<PathBuf>) -> String {
    let env_file = env_file
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut table = TextTable::new(["Setting", "Value"]);
    table.push_row(["env file".to_string(), env_file]);
    table.push_row(["api key".to_string(), config.masked_api_key()]);
    table.push_row(["default currency".to_string(), config.default_currency().clone()]);
    table.push_row(["debug".to_string(), config.debug().to_string()]);
    table.push_row(["demo mode".to_string(), config.is_demo().to_string()]);
    table.push_row(["base url".to_string(), config.base_url().clone()]);
    table.push_row([
        "currency list".to_string(),
        config.physical_currency_list_url().clone(),
    ]);
    table.push_row([
        "crypto list".to_string(),
        config.digital_currency_list_url().clone(),
    ]);
    table.push_row([
        "timeout".to_string(),
        format!("{}s", config.timeout().as_secs()),
    ]);
    table.render()
}
