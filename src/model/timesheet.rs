use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Timesheet {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 3)]
    pub employee_id: i64,

    #[schema(example = "2025-02-10T08:00:00", value_type = String, format = "date-time")]
    pub start_time: NaiveDateTime,

    #[schema(example = "2025-02-10T17:00:00", value_type = String, format = "date-time")]
    pub end_time: NaiveDateTime,

    #[schema(example = "Leadership in meetings", nullable = true)]
    pub notes: Option<String>,
}

/// A timesheet row joined with the employee it belongs to.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimesheetRow {
    pub id: i64,
    pub employee_id: i64,

    #[schema(value_type = String, format = "date-time")]
    pub start_time: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub end_time: NaiveDateTime,

    #[schema(nullable = true)]
    pub notes: Option<String>,

    #[schema(example = "Nour Abou Khalil")]
    pub full_name: String,
}
