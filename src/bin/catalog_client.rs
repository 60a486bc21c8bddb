//! Catalog Client
//!
//! Query a running bookshelf service from the command line.
//!
//! Usage:
//!   cargo run --bin catalog_client -- all
//!   cargo run --bin catalog_client -- isbn 123-456789
//!   cargo run --bin catalog_client -- author "Harper Lee"
//!   cargo run --bin catalog_client -- --base-url http://localhost:8081 title Gatsby

use anyhow::Result;
use bookshelf_backend::client::{CatalogClient, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Catalog client for the bookshelf service
#[derive(Parser, Debug)]
#[command(name = "catalog_client")]
#[command(about = "Look up books and reviews on a running bookshelf service")]
struct Cli {
    /// Base URL of the service
    #[arg(short, long, env = "BOOKSHELF_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every book
    All,

    /// Look up one book by isbn
    Isbn { isbn: String },

    /// Search books by author (case-insensitive substring)
    Author { author: String },

    /// Search books by title (case-insensitive substring)
    Title { title: String },

    /// Show reviews for an isbn
    Reviews { isbn: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.base_url)?;

    match cli.command {
        Commands::All => print_json("All Books", &client.all_books().await?)?,
        Commands::Isbn { isbn } => print_json("Book by ISBN", &client.book_by_isbn(&isbn).await?)?,
        Commands::Author { author } => {
            print_json("Books by Author", &client.books_by_author(&author).await?)?
        }
        Commands::Title { title } => {
            print_json("Books by Title", &client.books_by_title(&title).await?)?
        }
        Commands::Reviews { isbn } => print_json("Reviews", &client.reviews(&isbn).await?)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
    println!("{}:", label);
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
