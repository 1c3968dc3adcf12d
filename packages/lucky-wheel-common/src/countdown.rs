use cosmwasm_std::Timestamp;

use crate::types::{DrawTime, Remaining};

pub const DAY_SECONDS: u64 = 86_400;
pub const WEEK_SECONDS: u64 = 7 * DAY_SECONDS;

/// 1970-01-01 was a Thursday.
const EPOCH_DAYS_FROM_MONDAY: i64 = 3;

/// Next occurrence of the weekly draw slot at or after `now`.
///
/// The slot is evaluated in the deployment's local time
/// (`utc_offset_seconds`). If this week's slot is already behind `now` the
/// same slot one week later is returned; a slot equal to `now` is returned
/// as is, which reads as zero time remaining. Sub-second precision of `now`
/// is ignored.
pub fn next_draw_instant(now: Timestamp, draw_time: &DrawTime) -> Timestamp {
    let day = DAY_SECONDS as i64;
    let offset = i64::from(draw_time.utc_offset_seconds);
    let local_now = now.seconds() as i64 + offset;

    let today = local_now.div_euclid(day);
    let today_from_monday = (today + EPOCH_DAYS_FROM_MONDAY).rem_euclid(7);
    let days_ahead =
        (i64::from(draw_time.weekday.days_from_monday()) - today_from_monday).rem_euclid(7);

    let mut local_target = (today + days_ahead) * day
        + i64::from(draw_time.hour) * 3600
        + i64::from(draw_time.minute) * 60;
    if local_target < local_now {
        local_target += WEEK_SECONDS as i64;
    }

    Timestamp::from_seconds((local_target - offset).max(0) as u64)
}

/// Whole seconds from `now` until `target`, zero once the target is reached.
pub fn seconds_until(now: Timestamp, target: Timestamp) -> u64 {
    target.seconds().saturating_sub(now.seconds())
}

/// Countdown display for the next draw slot as seen from `now`.
pub fn time_left(now: Timestamp, draw_time: &DrawTime) -> Remaining {
    Remaining::from_seconds(seconds_until(now, next_draw_instant(now, draw_time)))
}

/// Move a target that is no longer in the future forward by whole weeks
/// until it lies strictly after `now`.
pub fn advance_past(target: Timestamp, now: Timestamp) -> Timestamp {
    if target.seconds() > now.seconds() {
        return target;
    }
    let weeks = (now.seconds() - target.seconds()) / WEEK_SECONDS + 1;
    target.plus_seconds(weeks * WEEK_SECONDS)
}
