/// Trigger vocabulary marking a message as a template request.
const TEMPLATE_TRIGGERS: [&str; 6] = [
    "шаблон",
    "чек-лист",
    "регламент",
    "документ",
    "инструкция",
    "вакансия",
];

/// What an incoming message asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// The user wants a pre-authored template file; `keywords` are the
    /// remaining search words after trigger words are stripped. May be empty,
    /// in which case the caller should ask for clarification.
    TemplateRequest { keywords: Vec<String> },
    /// Anything else goes to the grounded Q&A pipeline.
    OpenQuestion(String),
}

/// Classifies a message. The single decision point for "is this a template
/// request": both the menu flow and the free-text flow go through here.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();
    if !TEMPLATE_TRIGGERS.iter().any(|t| lower.contains(t)) {
        return Intent::OpenQuestion(text.to_string());
    }

    let mut stripped = lower;
    for trigger in TEMPLATE_TRIGGERS {
        stripped = stripped.replace(trigger, "");
    }
    let keywords = stripped
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();
    Intent::TemplateRequest { keywords }
}
