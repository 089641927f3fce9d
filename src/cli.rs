use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use inquire::Text;

use crate::handlers::{dispatch, list};
use crate::models::outcome::Outcome;
use crate::session::Session;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single calendar request and exit.
    Request { text: String },
    /// Interactive loop: describe events to create, modify, or delete.
    Prompt {},
    /// Show the events matching a description without acting on them.
    Search {
        text: String,
        /// Explicit lower bound (RFC3339), overriding the derived window.
        #[arg(long)]
        from: Option<DateTime<FixedOffset>>,
        /// Explicit upper bound (RFC3339), overriding the derived window.
        #[arg(long)]
        to: Option<DateTime<FixedOffset>>,
    },
}

pub async fn cli(session: Session) {
    // Fine to panic here
    let cli = Cli::parse();
    match &cli.command {
        Commands::Request { text } => {
            run_request(&session, text).await;
        }
        Commands::Prompt {} => {
            run_prompt_loop(&session).await;
        }
        Commands::Search { text, from, to } => {
            match list::search_events_in_range(&session, text, *from, *to).await {
                Ok(events) if events.is_empty() => println!("No events found."),
                Ok(events) => {
                    for event in &events {
                        println!("{}", event.describe());
                    }
                }
                Err(e) => println!("Failed to search events: {}", e),
            }
        }
    }
}

async fn run_request(session: &Session, text: &str) {
    match dispatch::process_calendar_request(session, text).await {
        Ok(Some(outcome)) => print_outcome(&outcome),
        Ok(None) => {
            println!("That doesn't look like a calendar request. Please try again with a clearer description.");
        }
        Err(e) => println!("Failed to process request: {}", e),
    }
}

async fn run_prompt_loop(session: &Session) {
    println!("=== Calendar Agent ===");
    println!("Describe the calendar event you want the agent to create, modify, or delete.");
    println!("Example: 'Schedule a meeting with John (john@email.com) tomorrow at 2 PM for 1 hour'");
    println!("Type 'quit' to exit.");

    loop {
        let input = match Text::new("Enter event description:").prompt() {
            Ok(input) => input,
            Err(_) => break,
        };
        let description = input.trim();

        if matches!(description.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("Goodbye!");
            break;
        }
        if description.is_empty() {
            println!("Please enter a valid event description.");
            continue;
        }

        run_request(session, description).await;
    }
}

fn print_outcome(outcome: &Outcome) {
    if outcome.is_success() {
        println!("Successfully executed event: {}", outcome.message());
        if let Some(link) = outcome.link() {
            println!("Calendar link: {}", link);
        }
    } else {
        println!("Failed to execute event: {}", outcome.message());
    }
}
