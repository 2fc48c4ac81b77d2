use std::time::Duration;

use crate::Result;
use crate::error::Error;

/// Default delay between settlement polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default number of polls before giving up, roughly two minutes of waiting.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;

/// Bounds on how long a submission is watched for confirmation.
///
/// Exhausting the budget is not a failure: the trade may still settle, the
/// orchestrator just stops watching and reports what it last saw.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollPolicy {
    interval: Duration,
    max_attempts: u32,
}

impl PollPolicy {
    /// Builds a policy, rejecting a zero attempt budget outright since it
    /// would return [`Unconfirmed`](crate::swap::SwapOutcome::Unconfirmed)
    /// without ever asking the relay.
    pub fn new(interval: Duration, max_attempts: u32) -> Result<Self> {
        if max_attempts == 0 {
            return Err(Error::validation("poll budget must allow at least one attempt"));
        }
        Ok(Self {
            interval,
            max_attempts,
        })
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, PollPolicy};
    use crate::Kind;

    #[test]
    fn default_budget_watches_for_about_two_minutes() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval(), DEFAULT_POLL_INTERVAL);
        assert_eq!(policy.max_attempts(), DEFAULT_MAX_POLL_ATTEMPTS);
        assert_eq!(
            policy.interval() * policy.max_attempts(),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let err = PollPolicy::new(Duration::from_secs(1), 0).expect_err("zero attempts is invalid");
        assert_eq!(err.kind(), Kind::Validation);

        let policy = PollPolicy::new(Duration::ZERO, 1).expect("zero interval is fine");
        assert_eq!(policy.max_attempts(), 1);
    }
}
