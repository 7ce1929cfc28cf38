use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::domain::StoryRecord;
use crate::errors::{RelayError, RelayResult};
use crate::sources::traits::StoryApi;

/// Client for the Hacker News Firebase API
pub struct HackerNewsClient {
    base_url: String,
    client: Client,
}

impl HackerNewsClient {
    pub fn new(base_url: &str, timeout: Duration) -> RelayResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn top_stories_url(&self) -> String {
        format!("{}/topstories.json", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/item/{}.json", self.base_url, id)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> RelayResult<T> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl StoryApi for HackerNewsClient {
    fn top_story_ids(&self) -> RelayResult<Vec<u64>> {
        self.get_json(&self.top_stories_url())
    }

    fn story(&self, id: u64) -> RelayResult<StoryRecord> {
        // Unknown ids come back as a literal `null`
        self.get_json::<Option<StoryRecord>>(&self.item_url(id))?
            .ok_or(RelayError::NotFound(id))
    }
}
