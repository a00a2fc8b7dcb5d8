use crate::retrieve::Retrieved;

/// Grounding directive: answer only from the supplied context, admit when the
/// material does not cover the question, never invent content.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
Ты — дружелюбный и опытный наставник по бизнесу посуточной аренды.
Твоя задача — помочь ученику, отвечая на его вопросы просто, понятно и структурированно.
Используй только информацию из предоставленного ниже КОНТЕКСТА.
Если в КОНТЕКСТЕ нет ответа на вопрос, честно скажи, что не можешь ответить на основе имеющихся материалов, и предложи ученику переформулировать вопрос или выбрать другую тему.
Не придумывай информацию от себя.
Отвечай развернуто, объясняй сложные моменты простыми словами. Можешь использовать списки, если это уместно.";

/// User-safe fallback returned when the generation call fails.
pub const DEFAULT_FALLBACK_ANSWER: &str =
    "Извините, произошла ошибка при попытке сгенерировать ответ. Пожалуйста, попробуйте позже.";

/// Joins retrieved chunk texts, in retrieved order, double-newline separated.
/// Zero chunks yield an empty context on purpose: the directive then makes
/// the model admit it cannot answer from available material.
pub fn format_context(chunks: &[Retrieved]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Composes the user-level message carrying the grounding context and the
/// original question.
pub fn build_user_prompt(context: &str, question: &str) -> String {
    format!(
        "КОНТЕКСТ:\n---\n{}\n---\n\nВОПРОС УЧЕНИКА: {}\n\nТВОЙ ОТВЕТ НАСТАВНИКА:",
        context, question
    )
}
