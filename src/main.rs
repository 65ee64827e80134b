use std::ffi::OsString;
use std::process::ExitCode;

use clap::error::{ContextKind, ErrorKind};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_generator::{
    config::Config, db, generate_bookings, runner::resolve_count, services::names::NameGenerator,
};

/// Insert synthetic confirmed bookings into the bookings database.
#[derive(Parser, Debug)]
#[command(name = "booking-generator", version)]
struct Args {
    /// Number of bookings to create. Defaults to a random 1-3.
    #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
    count: Option<String>,

    /// Use the static name lists even if HUGGINGFACE_API_KEY is set.
    #[arg(long)]
    no_ai: bool,
}

/// Parse the command line. Unrecognised arguments are treated like an
/// invalid count instead of aborting the run.
fn parse_args<I, T>(argv: I) -> Args
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

    match Args::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::UnknownArgument => {
            let invalid = e
                .get(ContextKind::InvalidArg)
                .map(|arg| arg.to_string())
                .unwrap_or_default();
            tracing::warn!("Invalid count: {}, using random count", invalid);
            Args {
                count: None,
                no_ai: argv.iter().skip(1).any(|arg| arg == "--no-ai"),
            }
        }
        Err(e) => e.exit(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args(std::env::args_os());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let count = resolve_count(args.count.as_deref(), &mut rand::thread_rng());
    let names = NameGenerator::new(&config, !args.no_ai);
    tracing::info!(
        ai_names = names.uses_inference(),
        "Generating {} booking(s)",
        count
    );

    let db = match db::connect(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Connected to database");

    generate_bookings(&db, &names, count).await;

    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }

    ExitCode::SUCCESS
}
