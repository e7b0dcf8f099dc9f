pub mod query;
pub mod uploads;
