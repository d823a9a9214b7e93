//! Diary entry data model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in an entry title
pub const MAX_TITLE_LENGTH: usize = 20;

/// Maximum number of characters in an entry body
pub const MAX_CONTENT_LENGTH: usize = 200;

/// Unique entry id - the creation timestamp in milliseconds
pub type EntryId = i64;

/// A single dated diary page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    pub content: String,
}

impl DiaryEntry {
    pub fn new(id: EntryId, date: NaiveDate, title: &str, content: &str) -> Self {
        Self {
            id,
            date,
            title: truncate_title(title),
            content: content.to_string(),
        }
    }

    /// Long-form date for page headers, e.g. "Sunday 18 October 2026"
    pub fn formatted_date(&self) -> String {
        format_page_date(self.date)
    }
}

/// Format a calendar day the way the book pages show it
pub fn format_page_date(date: NaiveDate) -> String {
    date.format("%A %-d %B %Y").to_string()
}

/// Cut a title down to `MAX_TITLE_LENGTH` characters
pub fn truncate_title(title: &str) -> String {
    title.chars().take(MAX_TITLE_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_counts_characters() {
        assert_eq!(truncate_title("short"), "short");
        assert_eq!(
            truncate_title("a title that is clearly too long"),
            "a title that is clea"
        );
        // multi-byte characters count as one each
        let paws = "🐾".repeat(25);
        assert_eq!(truncate_title(&paws).chars().count(), MAX_TITLE_LENGTH);
    }

    #[test]
    fn test_entry_json_shape() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        let entry = DiaryEntry::new(1746316800000, date, "Walk", "Long walk in the park");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], 1746316800000_i64);
        assert_eq!(json["date"], "2025-05-04");
        assert_eq!(json["title"], "Walk");
        assert_eq!(json["content"], "Long walk in the park");
    }

    #[test]
    fn test_entry_without_title_deserializes() {
        let entry: DiaryEntry =
            serde_json::from_str(r#"{"id":1,"date":"2025-05-04","content":"x"}"#).unwrap();
        assert_eq!(entry.title, "");
    }

    #[test]
    fn test_formatted_date() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        assert_eq!(format_page_date(date), "Sunday 4 May 2025");
    }
}
