mod client;
mod commands;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use drill_common::config::DEFAULT_SERVER_URL;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "drill-cli")]
#[command(about = "Drill CLI - Practice DSA questions against a remote judge", long_about = None)]
struct Cli {
    /// Base URL of the Drill API
    #[arg(long, global = true, default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every question in the bank
    List,

    /// Show a question together with its starter code
    Question {
        /// Language for the starter code (python, c, cpp, java, js)
        #[arg(short, long, default_value = "python")]
        language: String,

        /// Question index (random when omitted)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Print the starter code for a language and question
    Starter {
        /// Language identifier
        #[arg(short, long)]
        language: String,

        /// Question index (random when omitted)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Submit a source file and compare its output with the expected output
    Run {
        /// Language identifier
        #[arg(short, long)]
        language: String,

        /// Source file to submit
        #[arg(short, long)]
        file: PathBuf,

        /// Question index
        #[arg(short, long)]
        index: usize,

        /// Custom stdin (defaults to the question's sample input)
        #[arg(short, long)]
        stdin: Option<String>,
    },

    /// Start an interactive practice session
    Session {
        /// Starting language
        #[arg(short, long, default_value = "python")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            commands::list_questions();
        }
        Commands::Question { language, index } => {
            commands::show_question(&language, index)?;
        }
        Commands::Starter { language, index } => {
            commands::print_starter(&language, index)?;
        }
        Commands::Run {
            language,
            file,
            index,
            stdin,
        } => {
            commands::run_file(&cli.server, &language, &file, index, stdin.as_deref()).await?;
        }
        Commands::Session { language } => {
            commands::interactive(&cli.server, &language).await?;
        }
    }

    Ok(())
}
