pub mod adapters;
pub mod config;
pub mod content;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::ServerConfig;

pub use adapters::http::{build_router, serve, AppState};
pub use adapters::mail_relay::HttpMailRelay;
pub use adapters::site_client::SiteClient;
pub use config::MailConfig;
pub use content::Catalog;
pub use core::submission::{FormKind, SubmissionEngine};
pub use utils::error::{Result, SiteError};
