use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bakery_core::{ReceiptHeader, StoreConfig};
use bakery_pos::app::{self, CatalogListing, TicketSummary};
use bakery_pos::logging::{LogOptions, init_logging};
use bakery_pos::print::{HtmlFileSurface, PrintSurface, StdoutSurface};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Bakery counter ticket builder.
///
/// Every command restores the running ticket from the store, applies the
/// change and persists it again.
#[derive(Debug, Parser)]
#[command(name = "bakery-pos", version, about)]
struct Cli {
    /// Storage backend to use (`sqlite` or `memory`).
    #[arg(long, default_value = "sqlite", global = true)]
    backend: String,

    /// Store connection string.
    /// For SQLite this is a sqlx URL or a file path (e.g. `ticket.db`).
    #[arg(long, default_value = "sqlite:ticket.db?mode=rwc", global = true)]
    db: String,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append logs to this file as well.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the products on sale.
    Catalog,

    /// Add a product to the ticket.
    Add {
        /// Catalog index or product name.
        product: String,

        /// Units to add.
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Change the quantity of a ticket line; zero or below removes it.
    Adjust {
        /// Catalog index or product name.
        product: String,

        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Remove a line from the ticket.
    Remove {
        /// Catalog index or product name.
        product: String,
    },

    /// Show the current ticket.
    Show,

    /// Empty the ticket and delete the stored copy.
    Clear {
        /// Do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the receipt.
    Print {
        /// Write a print-ready HTML page here instead of text on stdout.
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

/// Ask on stdin; anything but an explicit yes declines.
fn confirm_on_stdin(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&LogOptions {
        verbose: cli.verbose,
        file: cli.log_file.clone(),
    })?;

    let config = StoreConfig {
        backend: cli.backend,
        connection_string: cli.db,
    };
    let registry = app::build_registry();
    let mut ticket = app::open_ticket(&registry, &config).await?;
    debug!(lines = ticket.ledger().len(), "ticket ready");

    match cli.command {
        Command::Catalog => print!("{}", CatalogListing(ticket.catalog())),
        Command::Add { product, quantity } => {
            if app::add_product(&mut ticket, &product, quantity).await {
                print!("{}", TicketSummary(&ticket));
            }
        }
        Command::Adjust { product, delta } => {
            if app::adjust_product(&mut ticket, &product, delta).await {
                print!("{}", TicketSummary(&ticket));
            }
        }
        Command::Remove { product } => {
            if app::remove_product(&mut ticket, &product).await {
                print!("{}", TicketSummary(&ticket));
            }
        }
        Command::Show => print!("{}", TicketSummary(&ticket)),
        Command::Clear { yes } => {
            let cleared = app::clear_ticket(&mut ticket, || {
                yes || confirm_on_stdin("Clear the whole ticket?")
            })
            .await;
            if cleared {
                println!("Ticket cleared");
            }
        }
        Command::Print { html } => {
            let surface: Box<dyn PrintSurface> = match html {
                Some(path) => Box::new(HtmlFileSurface { path }),
                None => Box::new(StdoutSurface),
            };
            let issued = app::issued_at(Local::now());
            app::print_ticket(&ticket, &ReceiptHeader::default(), &issued, surface.as_ref());
        }
    }

    Ok(())
}
