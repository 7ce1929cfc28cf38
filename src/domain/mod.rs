pub mod notification;
pub mod story;

pub use notification::{format_story, Notification};
pub use story::StoryRecord;
