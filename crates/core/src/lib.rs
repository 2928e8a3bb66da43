pub mod existing;
pub mod field;
pub mod grade;
pub mod record;

pub use existing::{ExistingValues, BROWN_ORIGINAL, COLOR_ORIGINAL, TYPE_ORIGINAL};
pub use field::Field;
pub use record::GradingRecord;
