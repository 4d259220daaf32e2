/// Words that mark a message as a question about the ad data.
pub const DATA_KEYWORDS: [&str; 9] = [
    "roas",
    "spend",
    "cost",
    "campaign",
    "performance",
    "meta",
    "tiktok",
    "ads",
    "budget",
];

/// Reply for messages that are not about the ad data.
pub const GREETING: &str = "I'm a Data Analyst Agent. I don't know your name, but I can analyze your ad performance! Try asking:\n- 'Check ROAS'\n- 'Total Spend'";

/// Plain substring match on the lowercased message, so "roadsign" counts as "ads".
pub fn is_data_question(message: &str) -> bool {
    let lower = message.to_lowercase();
    DATA_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
