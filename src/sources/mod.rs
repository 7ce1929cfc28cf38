pub mod hacker_news;
pub mod traits;

pub use hacker_news::HackerNewsClient;
pub use traits::StoryApi;
