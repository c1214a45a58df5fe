use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pwcrypt::{DEFAULT_COST, Hasher, Settings};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
mod auth;

#[derive(Debug, clap::Args)]
struct CostArgs {
    /// Cost factor, 4..=31 (lower values are raised to 4)
    #[arg(long, env = "PWCRYPT_COST", default_value_t = DEFAULT_COST)]
    cost: u32,
}

#[derive(Debug, Parser)]
#[command(name = "pwcrypt")]
#[command(version, about = "bcrypt ($2a$) password hashing and verification.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints a settings string with a fresh random salt
    Gensalt {
        #[command(flatten)]
        cost: CostArgs,
    },

    /// Hashes a password and prints the stored record
    Hash {
        #[command(flatten)]
        cost: CostArgs,

        /// Hash against these settings instead of a fresh salt
        #[arg(long, value_name = "SETTINGS")]
        settings: Option<String>,
    },

    /// Checks a password against a stored record
    #[command(arg_required_else_help = true)]
    Verify { record: String },
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Gensalt { cost } => {
            let settings = pwcrypt::gen_salt(cost.cost)?;
            println!("{settings}");
        }
        Commands::Hash { cost, settings } => {
            let settings: Settings = match settings {
                Some(s) => s.parse().context("invalid --settings")?,
                None => pwcrypt::generate_salt(cost.cost)?,
            };
            let password = auth::read_new_password_with_confirmation()?;
            let record = Hasher::new().hash(password.as_bytes(), &settings)?;
            println!("{record}");
        }
        Commands::Verify { record } => {
            // reject a malformed record before prompting
            pwcrypt::format::parse(&record).context("invalid stored record")?;
            let password = auth::read_password()?;
            if pwcrypt::verify(password.as_bytes(), &record)? {
                println!("match");
            } else {
                println!("no match");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pwcrypt=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
