//! Canned answers used when the live pipeline fails.

use crate::db::JsonRow;
use serde_json::json;

pub const ROAS_TEXT: &str = "Top performer: Influencer_Reach (4.5 ROAS). Lowest: Winter_Promo (1.1).";
pub const SPEND_TEXT: &str = "Total Spend is approx $4,200. TikTok is the highest spend channel.";
pub const GENERIC_TEXT: &str = "I analyzed the data manually (AI connection fallback).";

pub fn fallback_text(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("roas") {
        ROAS_TEXT
    } else if lower.contains("spend") {
        SPEND_TEXT
    } else {
        GENERIC_TEXT
    }
}

/// The static backup dataset shown as chart data in backup mode.
pub fn backup_data() -> Vec<JsonRow> {
    [
        ("Summer_Sale", "Meta", 1200.5, 3.2, "Active"),
        ("Winter_Promo", "TikTok", 2500.0, 1.1, "Paused"),
        ("Influencer_Reach", "Meta", 500.0, 4.5, "Active"),
    ]
    .into_iter()
    .map(|(campaign, platform, spend, roas, status)| {
        let mut row = JsonRow::new();
        row.insert("campaign".into(), json!(campaign));
        row.insert("platform".into(), json!(platform));
        row.insert("spend".into(), json!(spend));
        row.insert("roas".into(), json!(roas));
        row.insert("status".into(), json!(status));
        row
    })
    .collect()
}
