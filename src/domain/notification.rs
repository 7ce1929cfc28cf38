use html_escape::{encode_double_quoted_attribute, encode_text};

use super::StoryRecord;

/// A story rendered for Telegram's HTML parse mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub story_id: u64,
    pub title: String,
    pub text: String,
}

impl Notification {
    pub fn from_story(story: &StoryRecord) -> Self {
        Self {
            story_id: story.id,
            title: story.title.clone(),
            text: format_story(story),
        }
    }
}

/// Render one story as an HTML message block.
///
/// Upstream title and author are untrusted and escaped before embedding;
/// only `<`, `>` and `&` are significant to the parser in text nodes.
pub fn format_story(story: &StoryRecord) -> String {
    let title = encode_text(&story.title);
    let author = encode_text(&story.by);
    let link = story.link();
    let link = encode_double_quoted_attribute(&link);

    format!(
        "<b>{}</b>\n\n🔗 <a href=\"{}\">Read more</a>\n👤 Author: {}\n👍 Score: {}\n💬 Comments: {}\n\n",
        title, link, author, story.score, story.descendants
    )
}
