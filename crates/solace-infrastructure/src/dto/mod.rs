//! Persistence DTOs.

mod user_record;

pub use user_record::{USER_RECORD_VERSION, UserRecordV1};
