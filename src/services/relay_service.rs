use std::time::Duration;

use crate::domain::Notification;
use crate::pacing::{Clock, IntervalGate};
use crate::services::fetch_service::FetchService;
use crate::services::notification_service::MessageSender;
use crate::sources::StoryApi;

/// Minimum gap between two sends, to stay under the Bot API rate limits
pub const SEND_GAP: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub sent: usize,
    pub failed: usize,
}

/// One fetch, format and send pass over the top stories
pub struct RelayService<A: StoryApi, S: MessageSender, K: Clock> {
    fetcher: FetchService<A, K>,
    sender: S,
    send_gate: IntervalGate<K>,
    story_count: usize,
}

impl<A: StoryApi, S: MessageSender, K: Clock + Clone> RelayService<A, S, K> {
    pub fn new(api: A, sender: S, clock: K, story_count: usize) -> Self {
        Self {
            fetcher: FetchService::new(api, clock.clone()),
            sender,
            send_gate: IntervalGate::new(SEND_GAP, clock),
            story_count,
        }
    }
}

impl<A: StoryApi, S: MessageSender, K: Clock> RelayService<A, S, K> {
    /// Run the pipeline once. Never fails: a listing error ends the run
    /// early and each failed send is logged and skipped.
    pub fn run_once(&self) -> RunSummary {
        tracing::info!(count = self.story_count, "Fetching top stories");

        let stories = match self.fetcher.fetch_top_stories(self.story_count) {
            Ok(stories) => stories,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch top stories; skipping this run");
                return RunSummary::default();
            }
        };

        let mut summary = RunSummary {
            fetched: stories.len(),
            ..Default::default()
        };

        for story in &stories {
            let notification = Notification::from_story(story);

            self.send_gate.wait();
            match self.sender.send(&notification.text) {
                Ok(()) => {
                    tracing::info!(
                        story_id = notification.story_id,
                        title = %notification.title,
                        "Sent story"
                    );
                    summary.sent += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        story_id = notification.story_id,
                        error = %e,
                        "Failed to send story"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            fetched = summary.fetched,
            sent = summary.sent,
            failed = summary.failed,
            "Relay run complete"
        );

        summary
    }
}
