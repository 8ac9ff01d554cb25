//! Conversation controller for the candidate intake flow.
//!
//! One call per user turn: decide the next stage, store the collected
//! field, and produce the assistant reply. The two language-model calls
//! (question generation after the tech stack, answer generation on the
//! following turn) go through the gateway, whose output is always valid
//! reply text, so every arm here returns a string.

use crate::llm::LlmGateway;
use crate::prompts;
use crate::stage::Stage;
use crate::types::{InterviewSession, Message};

/// Inputs that end the session from any stage, compared lowercased.
pub const EXIT_KEYWORDS: [&str; 4] = ["exit", "quit", "bye", "end"];

/// Farewell shown when an exit keyword is received.
pub const FAREWELL: &str =
    "✅ Thank you for chatting with TalentScout! We'll be in touch shortly. Goodbye! 👋";

/// Catch-all reply for turns after the interview is over.
pub const REPHRASE_FALLBACK: &str =
    "❓ Hmm, I didn't quite get that. Could you please rephrase?";

/// Drives one interview session, one turn at a time.
pub struct InterviewEngine {
    gateway: LlmGateway,
}

impl InterviewEngine {
    /// Create an engine around a configured gateway.
    pub fn new(gateway: LlmGateway) -> Self {
        Self { gateway }
    }

    /// Process one user turn: mutate the session and return the reply.
    ///
    /// The session is owned by the caller (the chat surface); this is the
    /// only place it is mutated.
    pub async fn submit_turn(&self, session: &mut InterviewSession, user_text: &str) -> Message {
        let reply = self.next_reply(session, user_text).await;
        session.updated_at = chrono::Utc::now();
        Message::assistant(reply)
    }

    async fn next_reply(&self, session: &mut InterviewSession, user_text: &str) -> String {
        // The exit keywords win over all stage logic.
        if EXIT_KEYWORDS.contains(&user_text.to_lowercase().as_str()) {
            session.ended = true;
            return FAREWELL.to_string();
        }

        match session.stage {
            Stage::Greeting
            | Stage::FullName
            | Stage::Email
            | Stage::Phone
            | Stage::Experience
            | Stage::Position
            | Stage::Location => {
                if let Some(key) = session.stage.field_key() {
                    session.candidate.set(key, user_text);
                }
                session.stage = session.stage.successor();
                match session.stage.intake_prompt() {
                    Some(prompt) => prompt.to_string(),
                    // Collecting successors always carry a prompt; see the
                    // stage table tests.
                    None => REPHRASE_FALLBACK.to_string(),
                }
            }

            Stage::TechStack => {
                session
                    .candidate
                    .set(crate::stage::fields::TECH_STACK, user_text);
                session.stage = Stage::Answering;

                let prompt = prompts::technical_questions(user_text);
                let block = self.gateway.generate(&prompt).await;
                session.pending_questions = block.lines().map(str::to_string).collect();

                format!(
                    "🧪 Here are 9 questions based on your tech stack:\n\n{block}\n\n\
                     👉 Reply with anything to see the answers."
                )
            }

            Stage::Answering => {
                session.stage = Stage::Done;
                let questions = session.pending_questions.join("\n");
                let prompt = prompts::concise_answers(&questions);
                self.gateway.generate(&prompt).await
            }

            Stage::Done => REPHRASE_FALLBACK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChatError, ChatResult};
    use crate::llm::TextCompletion;
    use crate::stage::fields;
    use async_trait::async_trait;

    /// Deterministic backend answering every prompt with a fixed block.
    struct StubBackend {
        reply: &'static str,
    }

    #[async_trait]
    impl TextCompletion for StubBackend {
        async fn complete(&self, _prompt: &str) -> ChatResult<String> {
            Ok(self.reply.to_string())
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    /// Backend that always fails, for exercising the apology path.
    struct BrokenBackend;

    #[async_trait]
    impl TextCompletion for BrokenBackend {
        async fn complete(&self, _prompt: &str) -> ChatResult<String> {
            Err(ChatError::Api {
                backend: "stub",
                status: 500,
                body: "down".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn engine_with_reply(reply: &'static str) -> InterviewEngine {
        InterviewEngine::new(LlmGateway::new(Box::new(StubBackend { reply }), None))
    }

    #[tokio::test]
    async fn test_collecting_stages_advance_and_store_verbatim() {
        let engine = engine_with_reply("[Basic] q");
        let mut session = InterviewSession::new();

        // Greeting consumes the first turn without storing anything.
        let reply = engine.submit_turn(&mut session, "hi").await;
        assert_eq!(session.stage, Stage::FullName);
        assert!(session.candidate.is_empty());
        assert!(reply.content.contains("full name"));

        let reply = engine.submit_turn(&mut session, "  Jane   Doe ").await;
        assert_eq!(session.stage, Stage::Email);
        // Raw input is stored exactly as typed.
        assert_eq!(session.candidate.get(fields::FULL_NAME), Some("  Jane   Doe "));
        assert!(reply.content.contains("email"));
    }

    #[tokio::test]
    async fn test_exit_keywords_end_session_at_any_stage() {
        for keyword in ["exit", "QUIT", "Bye", "end"] {
            let engine = engine_with_reply("q");
            let mut session = InterviewSession::new();

            engine.submit_turn(&mut session, "hi").await;
            engine.submit_turn(&mut session, "Jane Doe").await;

            let reply = engine.submit_turn(&mut session, keyword).await;
            assert!(session.ended, "'{keyword}' should end the session");
            assert_eq!(reply.content, FAREWELL);
            // Exit does not touch the stage or the collected fields.
            assert_eq!(session.stage, Stage::Email);
            assert_eq!(session.candidate.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_tech_stack_turn_generates_questions() {
        let engine = engine_with_reply("[Basic] q1\n[Intermediate] q2\n[Advanced] q3");
        let mut session = InterviewSession::new();
        session.stage = Stage::TechStack;

        let reply = engine.submit_turn(&mut session, "Python, PostgreSQL").await;

        assert_eq!(session.stage, Stage::Answering);
        assert_eq!(
            session.candidate.get(fields::TECH_STACK),
            Some("Python, PostgreSQL")
        );
        assert_eq!(
            session.pending_questions,
            vec!["[Basic] q1", "[Intermediate] q2", "[Advanced] q3"]
        );
        assert!(reply.content.contains("[Basic] q1"));
        assert!(reply.content.contains("Reply with anything"));
    }

    #[tokio::test]
    async fn test_answering_turn_answers_and_finishes() {
        let engine = engine_with_reply("a1\na2\na3");
        let mut session = InterviewSession::new();
        session.stage = Stage::Answering;
        session.pending_questions = vec!["q1".to_string(), "q2".to_string()];

        // Any input triggers answer generation.
        let reply = engine.submit_turn(&mut session, "ok go").await;
        assert_eq!(session.stage, Stage::Done);
        assert_eq!(reply.content, "a1\na2\na3");
    }

    #[tokio::test]
    async fn test_done_stage_keeps_rephrasing() {
        let engine = engine_with_reply("q");
        let mut session = InterviewSession::new();
        session.stage = Stage::Done;

        for _ in 0..3 {
            let reply = engine.submit_turn(&mut session, "hello?").await;
            assert_eq!(reply.content, REPHRASE_FALLBACK);
            assert_eq!(session.stage, Stage::Done);
            assert!(!session.ended);
        }
    }

    #[tokio::test]
    async fn test_gateway_apology_is_still_a_valid_reply() {
        let engine =
            InterviewEngine::new(LlmGateway::new(Box::new(BrokenBackend), None));
        let mut session = InterviewSession::new();
        session.stage = Stage::TechStack;

        let reply = engine.submit_turn(&mut session, "Rust").await;

        // The engine forwards the apology like any other completion.
        assert_eq!(session.stage, Stage::Answering);
        assert!(reply.content.contains(crate::llm::UNAVAILABLE_APOLOGY));
        assert_eq!(
            session.pending_questions,
            vec![crate::llm::UNAVAILABLE_APOLOGY]
        );
    }
}
