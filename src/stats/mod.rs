pub mod manager;
pub mod requests;

pub use manager::{StatsManager, UsageSnapshot};
pub use requests::{CommandRequest, LanguageRequest, LegacyRequest, StatsRequest};
