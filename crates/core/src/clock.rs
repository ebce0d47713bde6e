//! Time source used for expiry decisions

use chrono::{DateTime, Utc};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. On wasm32 this reads `Date.now()` through chrono's `wasmbind`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(any(test, feature = "tests"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "tests"))]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, Utc};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock that only moves when told to. Clones share the same instant.
    #[derive(Clone, Debug)]
    pub struct ManualClock {
        now: Rc<Cell<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Rc::new(Cell::new(start)),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }

        pub fn set(&self, instant: DateTime<Utc>) {
            self.now.set(instant);
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new(Utc::now())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}
