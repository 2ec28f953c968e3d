use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

const WEEKDAYS_SHORT: [&str; 7] = ["Sen", "Sel", "Rab", "Kam", "Jum", "Sab", "Min"];
const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A single news item as the API returns it.
///
/// The same shape is written to the read history, so field names stay in the
/// API's camelCase form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub source: Option<ArticleSource>,
    #[serde(deserialize_with = "nullable_string")]
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub url: String,
    pub url_to_image: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub published_at: String,
}

impl Article {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn display_author(&self) -> &str {
        self.author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| self.source_name())
            .unwrap_or("Unknown")
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn has_image(&self) -> bool {
        self.url_to_image
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
    }

    pub fn display_published_at(&self) -> String {
        format_published_at(&self.published_at)
    }
}

/// Render an API timestamp in local time, Indonesian style: `Sen, 3 Juni 14.05`.
///
/// Unparsable input is returned as-is.
pub fn format_published_at(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => format_date(&dt.with_timezone(&Local)),
        Err(_) => raw.to_string(),
    }
}

pub(crate) fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!(
        "{}, {} {} {:02}.{:02}",
        WEEKDAYS_SHORT[dt.weekday().num_days_from_monday() as usize],
        dt.day(),
        MONTHS_LONG[dt.month0() as usize],
        dt.hour(),
        dt.minute()
    )
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
