//! TalentScout CLI - terminal chat surface.
//!
//! Owns the session and the transcript: reads one line per turn from
//! stdin, forwards it to the conversation engine and prints the reply.
//! When the session ends, the collected candidate fields are printed as
//! a read-only summary.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scout_chat::engine::InterviewEngine;
use scout_chat::llm::{GroqBackend, LlmGateway, OllamaBackend, TextCompletion};
use scout_chat::types::{CandidateProfile, InterviewSession};

#[derive(Parser)]
#[command(name = "scout", version, about = "TalentScout AI hiring assistant")]
struct Cli {
    /// Override the primary chat-completion model
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the local Ollama fallback server
    #[arg(long)]
    ollama_url: Option<String>,

    /// Run without probing for a local fallback model
    #[arg(long)]
    no_fallback: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("scout=info".parse()?)
                .add_directive("warn".parse()?),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let cli = Cli::parse();

    let mut primary = GroqBackend::from_env();
    if let Some(model) = cli.model {
        primary = primary.with_model(model);
    }
    info!(model = primary.model(), "primary backend configured");

    // The fallback is probed exactly once; an unreachable Ollama means the
    // whole run continues without one.
    let fallback: Option<Box<dyn TextCompletion>> = if cli.no_fallback {
        None
    } else {
        let probe = match cli.ollama_url {
            Some(url) => OllamaBackend::probe(url, None).await,
            None => OllamaBackend::from_env().await,
        };
        match probe {
            Ok(backend) => {
                info!(model = backend.model(), "local fallback model available");
                Some(Box::new(backend))
            }
            Err(e) => {
                warn!(error = %e, "local fallback unavailable, continuing without it");
                None
            }
        }
    };

    let engine = InterviewEngine::new(LlmGateway::new(Box::new(primary), fallback));
    let mut session = InterviewSession::new();

    println!("🧠 TalentScout AI Assistant");
    println!("Your intelligent virtual recruiter. Say hi to get started (type 'exit' to leave).");
    println!();

    let stdin = io::stdin();
    prompt_user()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let user_text = line.trim();
        if user_text.is_empty() {
            prompt_user()?;
            continue;
        }

        let reply = engine.submit_turn(&mut session, user_text).await;
        println!();
        println!("{}", reply.content);
        println!();

        if session.ended {
            break;
        }
        prompt_user()?;
    }

    if !session.candidate.is_empty() {
        println!("📄 Candidate Summary");
        print!("{}", render_summary(&session.candidate));
    }

    Ok(())
}

fn prompt_user() -> Result<()> {
    print!("you> ");
    io::stdout().flush()?;
    Ok(())
}

/// Render the collected fields in collection order.
fn render_summary(candidate: &CandidateProfile) -> String {
    let mut out = String::new();
    for (key, value) in candidate.iter() {
        out.push_str(&format!("  {key}: {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_summary_preserves_order() {
        let mut candidate = CandidateProfile::new();
        candidate.set("Full Name", "Jane Doe");
        candidate.set("Email", "jane@x.com");

        let summary = render_summary(&candidate);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines, vec!["  Full Name: Jane Doe", "  Email: jane@x.com"]);
    }
}
