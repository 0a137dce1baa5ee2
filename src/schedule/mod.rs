pub mod types;
pub mod pairing;
pub mod slot_utils;
pub mod generator;

pub use types::{Pairing, ScheduleRequest, Slot};
pub use pairing::build_pairings;
pub use slot_utils::{calculate_time_slots, format_time_of_day, parse_time_of_day, weekday_index};
pub use generator::{assemble_matches, generate_schedule};
