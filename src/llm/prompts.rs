//! Prompt templates for the coding assistant.

use crate::judge::languages;

/// Framing used when the editor attaches the user's code to a question.
pub const CODE_CONTEXT_PREFIX: &str = "\
The user is working on the following program in an online code editor. \
Answer their question about it.";

/// Build the prompt sent to the generation backend.
///
/// Without code context the message goes through untouched.
pub fn build_prompt(message: &str, code: Option<&str>, language: Option<&str>) -> String {
    let code = match code.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return message.to_string(),
    };

    let fence_lang = language
        .and_then(languages::lookup)
        .map(|entry| entry.fence)
        .unwrap_or("");
    let mut prompt = String::from(CODE_CONTEXT_PREFIX);
    prompt.push_str(&format!("\n\n```{fence_lang}\n{code}\n```\n\n"));
    prompt.push_str(message);
    prompt
}
