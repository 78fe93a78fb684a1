//! Domain models for the health tracker.

mod contact;
mod patient;
mod user;
mod vitals;

pub use contact::*;
pub use patient::*;
pub use user::*;
pub use vitals::*;

/// Id stamped on a newly added record: creation time in milliseconds.
///
/// Two records added within the same millisecond share an id.
pub fn timestamp_id() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
