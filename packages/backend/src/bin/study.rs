//! Terminal flashcard client.
//!
//! Usage: `vocab-study [full|difficult]`. Reads `VOCAB_API_URL`,
//! `VOCAB_EMAIL` and `VOCAB_PASSWORD`, prompting for credentials that are
//! not set.

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use vocab_deck_backend::client::{ApiClient, ClientError};
use vocab_deck_backend::logging;
use vocab_deck_core::{DeckKind, DeckView, Rating, ReviewOutcome, Word};

const DEFAULT_API_URL: &str = "http://localhost:4000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Flip,
    Rate(Rating),
    Next,
    Previous,
    Reload,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "f" | "flip" => Some(Command::Flip),
        "1" => Some(Command::Rate(Rating::Again)),
        "2" => Some(Command::Rate(Rating::Hard)),
        "3" => Some(Command::Rate(Rating::Good)),
        "4" => Some(Command::Rate(Rating::Easy)),
        "n" | "next" => Some(Command::Next),
        "p" | "prev" | "previous" => Some(Command::Previous),
        "r" | "reload" => Some(Command::Reload),
        "q" | "quit" | "exit" => Some(Command::Quit),
        other => other.parse::<Rating>().ok().map(Command::Rate),
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    logging::init_client_tracing();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ClientError> {
    let kind = match std::env::args().nth(1) {
        Some(raw) => match raw.parse::<DeckKind>() {
            Ok(kind) => kind,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        },
        None => DeckKind::Full,
    };

    let base_url = std::env::var("VOCAB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let mut lines = BufReader::new(io::stdin()).lines();

    let email = match std::env::var("VOCAB_EMAIL") {
        Ok(value) => value,
        Err(_) => prompt(&mut lines, "email: ").await.unwrap_or_default(),
    };
    let password = match std::env::var("VOCAB_PASSWORD") {
        Ok(value) => value,
        Err(_) => prompt(&mut lines, "password: ").await.unwrap_or_default(),
    };

    let mut client = ApiClient::new(base_url)?;
    let user = client.login(&email, &password).await?;
    println!("Logged in as {}", user.email);

    let mut view = DeckView::new(kind, client.fetch_deck(kind).await?);
    let mut revealed = false;

    loop {
        let Some(word) = view.current().cloned() else {
            match kind {
                DeckKind::Difficult => println!("No difficult words left."),
                DeckKind::Full => println!("Your deck is empty."),
            }
            return Ok(());
        };

        show_card(&view, &word, revealed);

        let Some(input) = prompt(&mut lines, "> ").await else {
            return Ok(());
        };
        let Some(command) = parse_command(&input) else {
            println!("commands: [enter] flip, 1-4 or again/hard/good/easy, n, p, r, q");
            continue;
        };

        match command {
            Command::Flip => revealed = !revealed,
            Command::Next => {
                view.next();
                revealed = false;
            }
            Command::Previous => {
                view.previous();
                revealed = false;
            }
            Command::Reload => {
                view = DeckView::new(kind, client.fetch_deck(kind).await?);
                revealed = false;
            }
            Command::Quit => return Ok(()),
            Command::Rate(rating) => {
                revealed = false;
                match client.review(&word.id, rating).await {
                    Ok(updated) => match view.apply_review_result(&updated) {
                        ReviewOutcome::Removed => {
                            println!("{} left the difficult deck.", updated.word)
                        }
                        ReviewOutcome::Advanced => {
                            println!("{} is now {}.", updated.word, updated.difficulty)
                        }
                    },
                    Err(err) => {
                        tracing::warn!(error = %err, word_id = %word.id, "review failed");
                        println!("Could not save review: {err}");
                        view.skip_failed_review();
                    }
                }
            }
        }
    }
}

fn show_card(view: &DeckView, word: &Word, revealed: bool) {
    println!();
    println!(
        "[{}/{}] {}  ({}, reviewed {}x)",
        view.position() + 1,
        view.len(),
        word.word,
        word.difficulty,
        word.review_count
    );
    if revealed {
        println!("  {}", word.meaning);
        println!("  \"{}\"", word.sentence);
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Option<String> {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(label.as_bytes()).await;
    let _ = stdout.flush().await;
    lines.next_line().await.ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_shortcuts_map_to_ratings() {
        assert_eq!(parse_command("1"), Some(Command::Rate(Rating::Again)));
        assert_eq!(parse_command("4"), Some(Command::Rate(Rating::Easy)));
        assert_eq!(parse_command("good"), Some(Command::Rate(Rating::Good)));
    }

    #[test]
    fn empty_input_flips_the_card() {
        assert_eq!(parse_command(""), Some(Command::Flip));
        assert_eq!(parse_command("  "), Some(Command::Flip));
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert_eq!(parse_command("later"), None);
    }
}
