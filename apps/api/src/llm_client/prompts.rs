// Prompt templates sent through the LLM client.

/// Interview answer scoring prompt.
///
/// The reply shape `"<score>, <feedback>"` is parsed by
/// `interview::scoring::parse_scorer_reply`; keep the two in step.
/// Both inputs are inserted in one pass, so braces inside them stay literal.
pub fn answer_scoring_prompt(question: &str, answer: &str) -> String {
    format!(
        "\
You are an experienced interviewer evaluating a candidate's answer.

Question: {question}
Answer: {answer}

Rate the answer from 0 to 10 and give one sentence of feedback.
Reply with EXACTLY this format and nothing else:
<integer 0-10>, <one feedback sentence>"
    )
}
