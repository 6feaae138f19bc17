pub mod autoplay;
pub mod carousel;
pub mod compose;
pub mod rotation;
pub mod submission;
pub mod timer;
pub mod toast;

pub use crate::domain::model::{Attachment, ContactSubmission, JobApplication, OutboundEmail};
pub use crate::domain::ports::{ConfigProvider, MailTransport};
pub use crate::utils::error::Result;
