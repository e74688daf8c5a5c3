pub mod types;
pub mod validate;
pub mod write;

pub use types::{FlattenedRow, InstructorRow, RawScheduleRow, ScheduleRow};
pub use validate::{require_columns, FEED_COLUMNS};
pub use write::write_schedule;
