//! Prompt text sent to the model.

/// System message for the summary step.
pub const ANALYST_PERSONA: &str = include_str!("../data/analyst_persona.txt");

pub fn sql_prompt(table_info: &str, question: &str, top_k: usize) -> String {
    format!(
        include_str!("../data/sql_prompt.txt"),
        top_k = top_k,
        table_info = table_info,
        question = question,
    )
}

pub fn summary_prompt(rows_json: &str, message: &str, platform: Option<&str>) -> String {
    let format_note = match platform {
        Some(p) if p.eq_ignore_ascii_case("slack") => "Format nicely for Slack Markdown",
        _ => "Format as plain text for a JSON API",
    };
    format!(
        "Data: {}. Summarize this for \"{}\" in 1 sentence. Note: {}.",
        rows_json, message, format_note
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_prompt_fills_placeholders() {
        let prompt = sql_prompt("CREATE TABLE campaigns (id INTEGER)", "Check ROAS", 5);
        assert!(prompt.contains("at most 5 results"));
        assert!(prompt.contains("Only use the following tables:\nCREATE TABLE campaigns (id INTEGER)"));
        assert!(prompt.ends_with("Question: Check ROAS\nSQLQuery: \n"));
    }

    #[test]
    fn test_summary_prompt_platforms() {
        let prompt = summary_prompt(r#"[{"roas":4.5}]"#, "Check ROAS", None);
        assert_eq!(
            prompt,
            r#"Data: [{"roas":4.5}]. Summarize this for "Check ROAS" in 1 sentence. Note: Format as plain text for a JSON API."#
        );
        assert!(summary_prompt("[]", "spend", Some("Slack")).contains("Slack Markdown"));
    }
}
