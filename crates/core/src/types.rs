/// Credits are the in-app unit of spend. Never negative.
pub type Credits = u32;

/// Wall-clock durations reported to clients are whole milliseconds.
pub type Millis = u64;
