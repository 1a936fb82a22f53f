use anyhow::Result;
use appraise_core::ApiError;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod context;

use context::AppContext;

#[derive(Parser)]
#[command(name = "appraise", about = "Client for the appraise assessment platform")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the admin, tenant, or user surface
    Login(commands::login::LoginArgs),
    /// Clear the stored session
    Logout,
    /// Show the current identity
    Whoami,
    /// List tests available to take
    Tests,
    /// List your response records
    Responses,
    /// Take a test interactively
    Take(commands::take::TakeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let ctx = AppContext::init()?;

    let result = match cli.command {
        Commands::Login(args) => commands::login::run(args, &ctx).await,
        Commands::Logout => commands::logout::run(&ctx),
        Commands::Whoami => commands::whoami::run(&ctx),
        Commands::Tests => commands::tests::run(&ctx).await,
        Commands::Responses => commands::responses::run(&ctx).await,
        Commands::Take(args) => commands::take::run(args, &ctx).await,
    };

    if let Err(err) = &result {
        if is_unauthorized(err) {
            // The backend rejected the stored token. Token and identity are
            // cleared together so the guard sends the next command to login.
            let _ = ctx.store.clear();
            eprintln!("Your session has expired. Run: appraise login <role>");
            std::process::exit(1);
        }
    }

    result
}

/// True when any error in the chain is an authentication rejection
fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized)))
}
