use channels::{ChannelClient, ParseMode};

use crate::config::Config;
use crate::errors::RelayResult;

#[cfg_attr(test, mockall::automock)]
pub trait MessageSender {
    /// Deliver one formatted message
    fn send(&self, text: &str) -> RelayResult<()>;
}

/// Publishes messages to a Telegram channel
pub struct NotificationService {
    client: ChannelClient,
    channel_id: String,
}

impl NotificationService {
    pub fn new(config: &Config) -> RelayResult<Self> {
        let client = ChannelClient::new(
            &config.telegram_api_url,
            &config.channel.token,
            config.http_timeout,
        )?;

        Ok(Self {
            client,
            channel_id: config.channel.channel_id.clone(),
        })
    }
}

impl MessageSender for NotificationService {
    fn send(&self, text: &str) -> RelayResult<()> {
        self.client.send_message(&self.channel_id, text, ParseMode::Html)?;
        Ok(())
    }
}

/// Prints messages instead of sending them
#[derive(Debug, Default)]
pub struct DryRunSender;

impl MessageSender for DryRunSender {
    fn send(&self, text: &str) -> RelayResult<()> {
        println!("[DRY RUN]\n{}", text);
        Ok(())
    }
}
