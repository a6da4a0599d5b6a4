pub mod seat;
pub mod booking;

pub use seat::{Placement, SeatCode, SeatError};
pub use booking::{BookingRecord, SequenceEntry, SortKey};
