pub mod animation;
pub mod countdown;
pub mod selection;
pub mod types;

pub use animation::rotation_at;
pub use countdown::{advance_past, next_draw_instant, seconds_until, time_left, WEEK_SECONDS};
pub use selection::{
    lookup_angle, rest_angle, select_winner_index, spin_magnitude_from_seed, spin_seed,
    FULL_ROTATION_DEGREES,
};
pub use types::{CycleInfo, DrawTime, Entry, Remaining, SpinPhase, Weekday};
