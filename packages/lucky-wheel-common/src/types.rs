use cosmwasm_schema::cw_serde;
use cosmwasm_std::Timestamp;

/// Day of the week the draw runs on.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Days since Monday (Monday = 0, Sunday = 6).
    pub fn days_from_monday(self) -> u8 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

/// Weekly draw slot. Seconds are always zero.
#[cw_serde]
pub struct DrawTime {
    pub weekday: Weekday,
    pub hour: u8,
    pub minute: u8,
    /// Offset of the deployment's local time from UTC, in seconds.
    pub utc_offset_seconds: i32,
}

impl Default for DrawTime {
    /// Saturday 20:00 UTC.
    fn default() -> Self {
        DrawTime {
            weekday: Weekday::Saturday,
            hour: 20,
            minute: 0,
            utc_offset_seconds: 0,
        }
    }
}

/// Countdown display triple.
///
/// `hours` is the hour-of-day part of the remaining time: it wraps at 24 and
/// does not carry whole days, so 9 days and 3 hours reads as `hours: 3`.
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub struct Remaining {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    pub fn from_seconds(total: u64) -> Self {
        Remaining {
            hours: (total / 3600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// One purchased slot on the wheel.
#[cw_serde]
pub struct Entry {
    pub participant_id: String,
    pub display_name: String,
    pub created_at: Timestamp,
}

/// Lifecycle of a spin session.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Resolved,
}

impl SpinPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SpinPhase::Idle => "idle",
            SpinPhase::Spinning => "spinning",
            SpinPhase::Resolved => "resolved",
        }
    }
}

/// What the entry ledger needs from the draw engine to file a new entry.
#[cw_serde]
pub struct CycleInfo {
    pub cycle: u64,
    pub phase: SpinPhase,
}

impl CycleInfo {
    /// Cycle a newly bought entry belongs to. Once the current cycle's wheel
    /// has started turning, new entries go to the next draw.
    pub fn open_cycle(&self) -> u64 {
        match self.phase {
            SpinPhase::Idle => self.cycle,
            SpinPhase::Spinning | SpinPhase::Resolved => self.cycle + 1,
        }
    }
}
