use std::time::Duration;

use crate::domain::StoryRecord;
use crate::errors::RelayResult;
use crate::pacing::{Clock, IntervalGate};
use crate::sources::StoryApi;

/// Minimum gap between two detail requests
pub const DETAIL_REQUEST_GAP: Duration = Duration::from_millis(100);

pub struct FetchService<A: StoryApi, K: Clock> {
    api: A,
    gate: IntervalGate<K>,
}

impl<A: StoryApi, K: Clock> FetchService<A, K> {
    pub fn new(api: A, clock: K) -> Self {
        Self {
            api,
            gate: IntervalGate::new(DETAIL_REQUEST_GAP, clock),
        }
    }

    /// Fetch the first `count` top stories in rank order.
    ///
    /// Only the listing request can fail the call. A story whose details
    /// cannot be fetched is logged and left out, so the result may be
    /// shorter than `count`.
    pub fn fetch_top_stories(&self, count: usize) -> RelayResult<Vec<StoryRecord>> {
        let ids = self.api.top_story_ids()?;
        tracing::debug!(available = ids.len(), requested = count, "Fetched top story ids");

        let mut stories = Vec::with_capacity(count.min(ids.len()));

        for id in ids.into_iter().take(count) {
            self.gate.wait();

            match self.api.story(id) {
                Ok(story) => stories.push(story),
                Err(e) => {
                    // Skip this story but keep going with the rest
                    tracing::warn!(story_id = id, error = %e, "Failed to fetch story details");
                }
            }
        }

        Ok(stories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RelayError;
    use crate::pacing::fake::FakeClock;
    use crate::sources::traits::MockStoryApi;

    fn story(id: u64) -> StoryRecord {
        StoryRecord::new(id, format!("Story {}", id))
    }

    #[test]
    fn test_truncates_to_count_in_rank_order() {
        let mut api = MockStoryApi::new();
        api.expect_top_story_ids()
            .times(1)
            .returning(|| Ok(vec![30, 10, 20, 40, 50]));
        api.expect_story().times(3).returning(|id| Ok(story(id)));

        let clock = FakeClock::new();
        let service = FetchService::new(api, &clock);
        let stories = service.fetch_top_stories(3).unwrap();

        let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn test_failed_item_is_skipped() {
        let mut api = MockStoryApi::new();
        api.expect_top_story_ids().returning(|| Ok(vec![1, 2, 3]));
        api.expect_story().times(3).returning(|id| {
            if id == 3 {
                Err(RelayError::NotFound(id))
            } else {
                Ok(story(id))
            }
        });

        let clock = FakeClock::new();
        let service = FetchService::new(api, &clock);
        let stories = service.fetch_top_stories(3).unwrap();

        let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_all_items_failing_returns_empty() {
        let mut api = MockStoryApi::new();
        api.expect_top_story_ids().returning(|| Ok(vec![1, 2]));
        api.expect_story().returning(|id| Err(RelayError::NotFound(id)));

        let clock = FakeClock::new();
        let service = FetchService::new(api, &clock);

        assert!(service.fetch_top_stories(2).unwrap().is_empty());
    }

    #[test]
    fn test_listing_failure_fails_batch() {
        let mut api = MockStoryApi::new();
        api.expect_top_story_ids()
            .returning(|| Err(RelayError::Config("listing down".to_string())));
        api.expect_story().never();

        let clock = FakeClock::new();
        let service = FetchService::new(api, &clock);

        assert!(service.fetch_top_stories(5).is_err());
    }

    #[test]
    fn test_zero_count_requests_no_details() {
        let mut api = MockStoryApi::new();
        api.expect_top_story_ids().returning(|| Ok(vec![1, 2, 3]));
        api.expect_story().never();

        let clock = FakeClock::new();
        let service = FetchService::new(api, &clock);

        assert!(service.fetch_top_stories(0).unwrap().is_empty());
    }

    #[test]
    fn test_short_listing() {
        let mut api = MockStoryApi::new();
        api.expect_top_story_ids().returning(|| Ok(vec![7]));
        api.expect_story().times(1).returning(|id| Ok(story(id)));

        let clock = FakeClock::new();
        let service = FetchService::new(api, &clock);

        assert_eq!(service.fetch_top_stories(5).unwrap().len(), 1);
    }

    #[test]
    fn test_detail_requests_are_paced() {
        let mut api = MockStoryApi::new();
        api.expect_top_story_ids().returning(|| Ok(vec![1, 2, 3]));
        api.expect_story().returning(|id| Ok(story(id)));

        let clock = FakeClock::new();
        let service = FetchService::new(api, &clock);
        service.fetch_top_stories(3).unwrap();

        assert_eq!(clock.sleeps(), vec![DETAIL_REQUEST_GAP, DETAIL_REQUEST_GAP]);
    }
}
