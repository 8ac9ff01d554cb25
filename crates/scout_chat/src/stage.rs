//! Intake stages and the transition table.
//!
//! The interview walks a fixed sequence of stages, each collecting one
//! candidate field. The enum replaces the string-keyed dispatch of a
//! typical scripted bot with compile-time exhaustiveness.

use serde::{Deserialize, Serialize};

/// Candidate field keys, in the order they are collected.
pub mod fields {
    pub const FULL_NAME: &str = "Full Name";
    pub const EMAIL: &str = "Email";
    pub const PHONE: &str = "Phone";
    pub const EXPERIENCE: &str = "Experience";
    pub const POSITION: &str = "Position";
    pub const LOCATION: &str = "Location";
    pub const TECH_STACK: &str = "Tech Stack";
}

/// A point in the fixed intake sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Before the first exchange; nothing is stored here
    Greeting,
    FullName,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
    /// Questions have been generated; the next turn produces answers
    Answering,
    /// Terminal stage; only the exit keywords do anything here
    Done,
}

impl Stage {
    /// The stage entered after completing this one.
    pub fn successor(self) -> Stage {
        match self {
            Self::Greeting => Self::FullName,
            Self::FullName => Self::Email,
            Self::Email => Self::Phone,
            Self::Phone => Self::Experience,
            Self::Experience => Self::Position,
            Self::Position => Self::Location,
            Self::Location => Self::TechStack,
            Self::TechStack => Self::Answering,
            Self::Answering => Self::Done,
            Self::Done => Self::Done,
        }
    }

    /// The candidate field collected while in this stage, if any.
    pub fn field_key(self) -> Option<&'static str> {
        match self {
            Self::FullName => Some(fields::FULL_NAME),
            Self::Email => Some(fields::EMAIL),
            Self::Phone => Some(fields::PHONE),
            Self::Experience => Some(fields::EXPERIENCE),
            Self::Position => Some(fields::POSITION),
            Self::Location => Some(fields::LOCATION),
            Self::TechStack => Some(fields::TECH_STACK),
            Self::Greeting | Self::Answering | Self::Done => None,
        }
    }

    /// The fixed prompt requesting this stage's field, shown on entry.
    pub fn intake_prompt(self) -> Option<&'static str> {
        match self {
            Self::FullName => Some(
                "👋 Welcome! I'm your virtual assistant from TalentScout.\n\nCan I know your **full name**?",
            ),
            Self::Email => Some("📧 What's your **email address**?"),
            Self::Phone => Some("📞 Could you share your **phone number**?"),
            Self::Experience => Some("🧑‍💻 How many **years of experience** do you have?"),
            Self::Position => Some("🎯 What **position(s)** are you applying for?"),
            Self::Location => Some("📍 Where are you **currently located**?"),
            Self::TechStack => Some(
                "💻 Please list your **tech stack** (e.g., Python, React, MongoDB)...",
            ),
            Self::Greeting | Self::Answering | Self::Done => None,
        }
    }

    /// Whether this stage only gathers a field and emits the next prompt.
    pub fn is_collecting(self) -> bool {
        !matches!(self, Self::TechStack | Self::Answering | Self::Done)
    }
}
