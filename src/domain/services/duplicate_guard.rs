#[cfg(test)]
#[path = "duplicate_guard_test.rs"]
mod tests;

use std::time::Duration;
use std::time::Instant;

use crate::domain::models::ChatPayload;

/// A submission as the user sees it: the text echoed into the transcript and
/// what goes over the wire. Two chips sharing an action differ by their echo.
#[derive(Clone, Debug, PartialEq)]
struct Submission {
    echo: Option<String>,
    payload: ChatPayload,
}

/// Drops a submission identical to the previous accepted one when it arrives
/// within `window`, absorbing double clicks and double enters.
pub struct DuplicateGuard {
    window: Duration,
    last: Option<(Submission, Instant)>,
}

impl DuplicateGuard {
    pub fn new(window: Duration) -> DuplicateGuard {
        return DuplicateGuard { window, last: None };
    }

    /// Returns true when the submission may go ahead, recording it as the
    /// latest accepted one.
    pub fn accept(&mut self, echo: Option<&str>, payload: &ChatPayload, now: Instant) -> bool {
        let submission = Submission {
            echo: echo.map(|echo| return echo.to_string()),
            payload: payload.clone(),
        };

        if let Some((last_submission, last_at)) = &self.last {
            if *last_submission == submission
                && now.saturating_duration_since(*last_at) < self.window
            {
                return false;
            }
        }

        self.last = Some((submission, now));
        return true;
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
