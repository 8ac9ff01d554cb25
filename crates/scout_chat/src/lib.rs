//! # scout_chat - Conversation engine for TalentScout
//!
//! This crate implements the hiring-assistant conversation core:
//! - Scripted intake of candidate fields (name, email, phone, experience,
//!   position, location, tech stack)
//! - Tiered technical question generation for the declared tech stack
//! - Answer generation on the following turn
//! - Universal exit keywords that end the session from any stage
//!
//! ## Key Properties
//!
//! - **Explicit state**: one [`types::InterviewSession`] value owned by the
//!   caller, mutated only by [`engine::InterviewEngine::submit_turn`]
//! - **Total gateway**: [`llm::LlmGateway::generate`] never fails; backend
//!   errors become fixed apology text
//! - **Dual provider**: remote Groq primary, optional local Ollama fallback
//!   probed once at startup
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ Chat Surface │────▶│ InterviewEngine  │────▶│  LlmGateway  │
//! └──────────────┘     └────────┬─────────┘     └──────┬───────┘
//!                               │                      │
//!                               ▼              ┌───────┴───────┐
//!                      ┌────────────────┐      ▼               ▼
//!                      │InterviewSession│  ┌────────┐    ┌──────────┐
//!                      │ stage + fields │  │  Groq  │    │  Ollama  │
//!                      └────────────────┘  └────────┘    └──────────┘
//! ```

pub mod engine;
pub mod error;
pub mod llm;
pub mod prompts;
pub mod stage;
pub mod types;

pub use engine::*;
pub use error::*;
pub use llm::*;
pub use stage::*;
pub use types::*;
