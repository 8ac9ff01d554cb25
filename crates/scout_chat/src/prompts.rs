//! Prompt builders for the two gateway calls the interview makes.

/// Number of questions requested per difficulty tier.
pub const QUESTIONS_PER_TIER: usize = 3;

/// Build the tiered question-generation prompt for a declared tech stack.
///
/// Asks for 3 basic, 3 intermediate and 3 advanced questions, each line
/// prefixed with a bracketed tier label so the output can be line-split.
pub fn technical_questions(tech_stack: &str) -> String {
    format!(
        "You are an expert technical interviewer.\n\n\
         Generate {n} basic, {n} intermediate, and {n} advanced (pro-level) coding interview \
         questions for the following technologies:\n\
         {tech_stack}\n\n\
         Format:\n\
         [Basic] ...\n\
         [Intermediate] ...\n\
         [Advanced] ...",
        n = QUESTIONS_PER_TIER,
    )
}

/// Build the answer-generation prompt for a previously generated question block.
pub fn concise_answers(questions: &str) -> String {
    format!(
        "You are a senior software engineer. Provide accurate and concise answers to the \
         following questions:\n\n{questions}"
    )
}
