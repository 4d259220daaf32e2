use regex::Regex;
use std::sync::LazyLock;

static SELECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SELECT[\s\S]*?(?:;|$)").expect("valid regex"));

/// Pulls the first SELECT statement out of a model completion.
///
/// Everything from the first `SELECT` up to the first `;` (or the end of the
/// text) is taken, code fences are stripped and whitespace trimmed.
pub fn extract_select(text: &str) -> Option<String> {
    let found = SELECT_RE.find(text)?;
    let sql = found.as_str().replace("```", "");
    let sql = sql.trim();
    if sql.is_empty() {
        None
    } else {
        Some(sql.to_string())
    }
}
