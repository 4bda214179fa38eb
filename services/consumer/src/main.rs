//! Date Consumer - command line entry point

use anyhow::Result;
use clap::Parser;
use date_consumer::ConsumerApiClient;
use rust_common::{TracingConfig, init_tracing};

const DEFAULT_DATE_TIME: &str = "05/01/2018";
const DEFAULT_PROVIDER_URI: &str = "http://localhost:9000";
const SEPARATOR: &str = "-------------------";

/// Validate a date or time using the provider API.
#[derive(Parser, Debug)]
#[command(name = "date-consumer", version, about)]
struct Args {
    /// Date or time to validate
    date_time: Option<String>,

    /// Base URI of the provider API
    provider_uri: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(
        &TracingConfig::default()
            .with_service_name("date-consumer")
            .with_log_level(args.log_level.clone()),
    );

    // Both positionals or neither; a lone argument falls back to the defaults.
    let (date_time, provider_uri, show_usage) = match (args.date_time, args.provider_uri) {
        (Some(date_time), Some(provider_uri)) => (date_time, provider_uri, false),
        _ => (
            DEFAULT_DATE_TIME.to_string(),
            DEFAULT_PROVIDER_URI.to_string(),
            true,
        ),
    };

    let client = ConsumerApiClient::new(&provider_uri)?;

    println!("{SEPARATOR}");
    println!(
        "Running consumer with args: dateTimeToValidate = {date_time}, baseUri = {}",
        client.base_url()
    );
    if show_usage {
        println!("To use with your own parameters:");
        println!("Usage: date-consumer [DateTime To Validate] [Provider Api Uri]");
        println!("Usage Example: date-consumer 01/01/2018 http://localhost:9000");
    }
    println!("{SEPARATOR}");

    println!("Validating date...");
    let response = client.validate_date_time(&date_time).await?;
    println!("{}", response.body);
    println!("...Date validation complete. Goodbye.");
    Ok(())
}
