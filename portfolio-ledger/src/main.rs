use portfolio_ledger::{Country, Ledger, LedgerConfig, Symbol};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Portfolio Ledger - market-data smoke checks for the ledger configuration

USAGE:
    portfolio-ledger [OPTIONS] <COMMAND>

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

COMMANDS:
    lookup <COUNTRY> <SYMBOL>          Look a symbol up and show how it would be onboarded
    price <COUNTRY> <SYMBOL>...        Fetch current prices as one batch

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter

EXAMPLES:
    portfolio-ledger --config ledger.json lookup BR ITSA4
    portfolio-ledger --config ledger.json price US AAPL MSFT
"#
    );
}

enum Command {
    Lookup { country: String, symbol: String },
    Price { country: String, symbols: Vec<String> },
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    fail("--config requires a path argument");
                }
                config_path = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let command = match positional.as_slice() {
        [cmd, country, symbol] if cmd == "lookup" => Command::Lookup {
            country: country.clone(),
            symbol: symbol.clone(),
        },
        [cmd, country, symbols @ ..] if cmd == "price" && !symbols.is_empty() => Command::Price {
            country: country.clone(),
            symbols: symbols.to_vec(),
        },
        _ => {
            print_help();
            std::process::exit(1);
        }
    };

    let config = if let Some(path) = config_path {
        tracing::info!("Loading configuration from: {}", path);
        LedgerConfig::from_file(&path)?
    } else {
        tracing::info!("Using default configuration");
        LedgerConfig::default()
    };
    let ledger = Ledger::from_config(config)?;

    match command {
        Command::Lookup { country, symbol } => {
            let country = Country::try_from(country.as_str())
                .unwrap_or_else(|_| fail(&format!("unknown country {}", country)));
            let symbol = Symbol::new(symbol).unwrap_or_else(|e| fail(e));
            let asset = ledger.onboarding.ensure_asset(&symbol, country).await?;
            println!("{}", serde_json::to_string_pretty(&asset)?);
        }
        Command::Price { country, symbols } => {
            let country = Country::try_from(country.as_str())
                .unwrap_or_else(|_| fail(&format!("unknown country {}", country)));
            let symbols = symbols
                .into_iter()
                .map(Symbol::new)
                .collect::<Result<Vec<_>, _>>()
                .unwrap_or_else(|e| fail(e));
            let prices = ledger.prices.fetch_prices(&symbols, country).await;
            for symbol in &symbols {
                match prices.get(symbol) {
                    Some(price) => println!(
                        "{:<10} {:>12} {:>8.2}%",
                        symbol.as_str(),
                        price.current,
                        price.change_percent()
                    ),
                    None => println!("{:<10} {:>12}", symbol.as_str(), "unavailable"),
                }
            }
        }
    }

    Ok(())
}
