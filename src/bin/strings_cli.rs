use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use string_analyzer::{client::StringsClient, filters::FilterCriteria};

#[derive(Parser)]
#[command(
    name = "strings-cli",
    about = "Command-line client for the string analyzer HTTP API"
)]
struct Cli {
    /// Base URL of a running string analyzer server.
    #[arg(
        long,
        env = "STRING_ANALYZER_URL",
        default_value = "http://127.0.0.1:4100"
    )]
    base_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze and store a string.
    Create { value: String },
    /// Show a stored string and its properties.
    Get { value: String },
    /// Delete a stored string.
    Delete { value: String },
    /// List stored strings, optionally filtered.
    List {
        #[arg(long)]
        palindrome: Option<bool>,
        #[arg(long)]
        min_length: Option<usize>,
        #[arg(long)]
        max_length: Option<usize>,
        #[arg(long)]
        word_count: Option<usize>,
        #[arg(long)]
        contains: Option<char>,
    },
    /// List stored strings matching a plain-English description.
    Query {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let client = StringsClient::new(&cli.base_url)?;
    match cli.command {
        Command::Create { value } => print_json(&client.create(&value).await?),
        Command::Get { value } => print_json(&client.get(&value).await?),
        Command::Delete { value } => {
            client.delete(&value).await?;
            println!("deleted");
            Ok(())
        }
        Command::List {
            palindrome,
            min_length,
            max_length,
            word_count,
            contains,
        } => {
            let criteria = FilterCriteria {
                is_palindrome: palindrome,
                min_length,
                max_length,
                word_count,
                contains_character: contains,
            };
            print_json(&client.list(&criteria).await?)
        }
        Command::Query { words } => print_json(&client.query(&words.join(" ")).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render response")?;
    println!("{rendered}");
    Ok(())
}
