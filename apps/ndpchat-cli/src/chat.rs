//! Interactive chat loop.
//!
//! The terminal view is rebuilt from scratch after every completed turn by
//! projecting the whole transcript; live blocks (the provisional search
//! status, failure notices) are printed as they happen and replaced by the
//! next redraw. On a non-terminal stdout the redraw is skipped and the live
//! blocks are the output.

use std::io::{IsTerminal, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use ndpchat_core::projector::project;
use ndpchat_core::Role;
use ndpchat_session::{DialogueSession, Renderer};

const TITLE: &str = "Chat with NDP Catalog";
const GREETING: &str = "I'm the NDP Catalog Assistant. Need data or have questions? Just ask!";
const PROMPT: &str = "you> ";

struct StdoutRenderer;

impl Renderer for StdoutRenderer {
    fn render(&mut self, text: &str) {
        println!("\n{}\n", text);
    }
}

pub async fn run_chat(mut session: DialogueSession) -> anyhow::Result<()> {
    let interactive = std::io::stdout().is_terminal();

    println!("{}\n{}\n", TITLE, GREETING);
    print_prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut renderer = StdoutRenderer;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            print_prompt()?;
            continue;
        }

        // Failures are already rendered by the session; the log line is for
        // the operator.
        if let Err(err) = session.handle(input, &mut renderer).await {
            error!(session_id = %session.id(), %err, "turn failed");
        }

        if interactive {
            redraw(&session);
        }
        print_prompt()?;
    }

    Ok(())
}

/// Repaint the whole conversation from the projected transcript.
fn redraw(session: &DialogueSession) {
    // Clear screen, cursor home.
    print!("\x1b[2J\x1b[H");
    println!("{}\n{}", TITLE, GREETING);

    for turn in project(session.transcript()) {
        let speaker = match turn.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("\n{}> {}", speaker, turn.display_text);
    }
    println!();
}

fn print_prompt() -> std::io::Result<()> {
    print!("{}", PROMPT);
    std::io::stdout().flush()
}
