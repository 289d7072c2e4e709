use chrono::{DateTime, Utc};
use mockall::automock;

/// Injected time source so lifecycle rules can be tested against a
/// controlled clock instead of wall-clock reads.
#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
