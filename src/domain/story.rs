use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const DISCUSSION_URL: &str = "https://news.ycombinator.com/item?id=";

/// One Hacker News item. Missing fields decode to zero/empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoryRecord {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub score: u64,
    pub time: i64,
    pub by: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub descendants: u64,
}

impl StoryRecord {
    pub fn new(id: u64, title: String) -> Self {
        Self {
            id,
            title,
            kind: "story".to_string(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    pub fn with_author(mut self, by: String) -> Self {
        self.by = by;
        self
    }

    pub fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }

    pub fn with_descendants(mut self, descendants: u64) -> Self {
        self.descendants = descendants;
        self
    }

    pub fn with_time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    pub fn discussion_url(&self) -> String {
        format!("{}{}", DISCUSSION_URL, self.id)
    }

    /// External URL, or the discussion page when the item has none (Ask HN etc.)
    pub fn link(&self) -> String {
        if self.url.is_empty() {
            self.discussion_url()
        } else {
            self.url.clone()
        }
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}
