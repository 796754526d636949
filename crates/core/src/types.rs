/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date of a training session (`YYYY-MM-DD` on the wire).
pub type TrainingDate = chrono::NaiveDate;
