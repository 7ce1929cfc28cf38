use crate::domain::StoryRecord;
use crate::errors::RelayResult;

#[cfg_attr(test, mockall::automock)]
pub trait StoryApi: Send + Sync {
    /// Current top story ids, best ranked first
    fn top_story_ids(&self) -> RelayResult<Vec<u64>>;

    /// Resolve one id to its full record
    fn story(&self, id: u64) -> RelayResult<StoryRecord>;
}
