pub mod fetch_service;
pub mod notification_service;
pub mod relay_service;

pub use fetch_service::FetchService;
pub use notification_service::{DryRunSender, MessageSender, NotificationService};
pub use relay_service::{RelayService, RunSummary};
