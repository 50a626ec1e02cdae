use chrono::NaiveDateTime;

/// Source of "now" for the scheduler. Injected so cycles can be driven with a
/// fixed instant in tests instead of real sleeps.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the server's local zone. Meetings store naive
/// date/time, so imminence is compared in the same unspecified zone.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
