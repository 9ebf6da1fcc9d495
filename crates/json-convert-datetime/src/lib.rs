//! Zone-kind-aware date-time and calendar-date codecs.
//!
//! [`TimeKindConverter`] normalizes date-time values to a target zone kind
//! on both read and write, with a fixed reference-zone fallback for wire
//! values that carry no zone information. [`ShortDateConverter`] maps
//! date-bearing values to `YYYY-MM-DD` strings with deterministic
//! floor-to-day truncation.

mod kind;
mod short_date;
mod time_kind;

pub use kind::ZoneKind;
pub use short_date::ShortDateConverter;
pub use time_kind::TimeKindConverter;
