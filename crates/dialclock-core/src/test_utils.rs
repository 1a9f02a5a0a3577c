use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use dialclock_proto::ports::time_source::TimeSource;

/// [`TimeSource`] returning a settable instant and counting reads.
#[derive(Debug)]
pub struct FixedTime {
    current: Mutex<DateTime<Local>>,
    reads:   AtomicUsize,
}

impl FixedTime {
    pub fn new(current: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(current),
            reads:   AtomicUsize::new(0),
        }
    }

    /// A fixed local time of day on 2026-10-19.
    pub fn at(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self::new(local(hours, minutes, seconds))
    }

    pub fn set(&self, hours: u32, minutes: u32, seconds: u32) {
        if let Ok(mut current) = self.current.lock() {
            *current = local(hours, minutes, seconds);
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> DateTime<Local> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

fn local(hours: u32, minutes: u32, seconds: u32) -> DateTime<Local> {
    let naive = NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|date| date.and_hms_opt(hours, minutes, seconds))
        .expect("valid test time");

    Local
        .from_local_datetime(&naive)
        .earliest()
        .expect("representable local time")
}
