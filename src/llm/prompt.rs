//! Prompt text for commit message generation.

/// Instructions sent as the system message on every request.
pub const SYSTEM_PROMPT: &str = r#"You write semantic Git commit messages following the Conventional Commits specification.

Format: <type>(<optional-scope>): <subject>
Types: feat, fix, docs, style, refactor, perf, test, build, ci, chore, revert.

Rules:
- Use the imperative mood ("add", not "added").
- Keep the first line at most 72 characters.
- If the changes are significant, add a blank line and a bulleted body.
- Output only the raw commit message. Do not wrap it in markdown code blocks (```)."#;

/// Build the user message for a diff, with optional regeneration guidance.
pub fn build_user_message(diff: &str, hint: Option<&str>) -> String {
    let mut message = format!("Generate a commit message for the following diff:\n\n{diff}");

    if let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) {
        message.push_str("\n\nAdditional guidance from the user for this message:\n");
        message.push_str(hint);
    }

    message
}

/// Trim the model's reply and unwrap it if it arrived inside a code fence.
pub fn clean_response(content: &str) -> String {
    let trimmed = content.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed.to_string();
    };

    // Drop the info string (e.g. ```text) on the opening fence line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim().to_string(),
        None => body.trim().to_string(),
    }
}
