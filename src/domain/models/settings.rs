use std::time::Duration;

use regex::Regex;

/// Presentation heuristics applied by the session controller.
#[derive(Clone, Debug)]
pub struct SessionSettings {
    /// Identical submissions inside this window are dropped.
    pub duplicate_window: Duration,
    /// Matched against the last reply of a response to detect a finished booking.
    pub confirmation_pattern: Regex,
}
