use crate::core::submission::FormKind;
use crate::core::timer::{lock, Timer};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOAST_DURATION: Duration = Duration::from_secs(5);

pub const CONNECTION_FAILURE_MESSAGE: &str = "Failed to send message. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

impl Toast {
    pub fn success(form: FormKind) -> Self {
        let message = match form {
            FormKind::Contact => {
                "Thank you! Your message has been sent successfully. We will get back to you soon."
            }
            FormKind::Careers => {
                "Thank you! Your application has been received successfully. Our team will review it and get back to you."
            }
        };
        Self {
            kind: ToastKind::Success,
            title: "Success".to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(form: FormKind, message: impl Into<String>) -> Self {
        let title = match form {
            FormKind::Contact => "Message Failed",
            FormKind::Careers => "Application Failed",
        };
        Self {
            kind: ToastKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ToastKind::Success
    }
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Toast>,
    generation: u64,
}

/// Single-slot toast area. A new toast replaces the old one and restarts the
/// dismiss timer.
pub struct Toaster {
    slot: Arc<Mutex<Slot>>,
    timer: Mutex<Option<Timer>>,
    duration: Duration,
}

impl Toaster {
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            timer: Mutex::new(None),
            duration,
        }
    }

    pub fn show(&self, toast: Toast) {
        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.current = Some(toast);
            slot.generation
        };

        let slot = self.slot.clone();
        let timer = Timer::after(self.duration, move || {
            let mut slot = lock(&slot);
            // a newer toast owns the slot now
            if slot.generation == generation {
                slot.current = None;
            }
        });
        *lock(&self.timer) = Some(timer);
    }

    pub fn dismiss(&self) {
        lock(&self.slot).current = None;
        lock(&self.timer).take();
    }

    pub fn current(&self) -> Option<Toast> {
        lock(&self.slot).current.clone()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_toast_auto_dismisses() {
        let toaster = Toaster::new();
        toaster.show(Toast::success(FormKind::Contact));

        sleep(Duration::from_millis(4_900)).await;
        assert!(toaster.current().is_some());

        sleep(Duration::from_millis(200)).await;
        assert!(toaster.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_can_be_dismissed_early() {
        let toaster = Toaster::new();
        toaster.show(Toast::error(FormKind::Careers, "Missing required fields"));
        sleep(Duration::from_secs(1)).await;

        toaster.dismiss();
        assert!(toaster.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_toast_restarts_timer() {
        let toaster = Toaster::new();
        toaster.show(Toast::error(FormKind::Contact, "first"));
        sleep(Duration::from_secs(3)).await;

        toaster.show(Toast::success(FormKind::Contact));
        sleep(Duration::from_secs(3)).await;
        let current = toaster.current().expect("second toast still showing");
        assert!(current.is_success());

        sleep(Duration::from_millis(2_100)).await;
        assert!(toaster.current().is_none());
    }

    #[test]
    fn test_titles_follow_form() {
        assert_eq!(Toast::error(FormKind::Contact, "x").title, "Message Failed");
        assert_eq!(Toast::error(FormKind::Careers, "x").title, "Application Failed");
        assert_eq!(Toast::success(FormKind::Careers).title, "Success");
    }
}
