use std::time::Duration;
use std::time::Instant;

pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    pub created_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, text: &str, created_at: Instant) -> Toast {
        return Toast {
            kind,
            text: text.to_string(),
            created_at,
        };
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        return now.saturating_duration_since(self.created_at) >= TOAST_DURATION;
    }
}
