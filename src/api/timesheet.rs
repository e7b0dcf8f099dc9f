use crate::{
    model::employee::EmployeeRef,
    model::timesheet::{Timesheet, TimesheetRow},
    utils::query::{Filter, SqlValue, like_pattern},
    validate::validate_timesheet,
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct TimesheetQuery {
    /// Substring match against the joined employee full_name.
    pub search: Option<String>,
    #[serde(rename = "employeeId")]
    pub employee_id: Option<i64>,
}

/// Calendar projection of a timesheet row, date-only on both ends.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarEvent {
    #[schema(example = "3")]
    pub id: String,
    #[schema(example = "Nour Abou Khalil - Leadership in meetings")]
    pub title: String,
    #[schema(example = "2025-02-10")]
    pub start: String,
    #[schema(example = "2025-02-10")]
    pub end: String,
}

impl CalendarEvent {
    fn from_row(row: &TimesheetRow) -> Self {
        let title = match &row.notes {
            Some(notes) if !notes.is_empty() => format!("{} - {}", row.full_name, notes),
            _ => row.full_name.clone(),
        };
        Self {
            id: row.id.to_string(),
            title,
            start: row.start_time.date().to_string(),
            end: row.end_time.date().to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TimesheetListResponse {
    pub data: Vec<TimesheetRow>,
    /// Full employee list for filter population.
    pub employees: Vec<EmployeeRef>,
    pub events: Vec<CalendarEvent>,
}

#[derive(Serialize, ToSchema)]
pub struct TimesheetResponse {
    pub timesheet: Timesheet,
    /// Full employee list for the picker.
    pub employees: Vec<EmployeeRef>,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct SaveTimesheet {
    /// Present means update, absent means insert.
    pub id: Option<i64>,
    #[schema(example = 3)]
    pub employee_id: i64,
    #[schema(example = "2025-02-10T08:00:00", value_type = String, format = "date-time")]
    pub start_time: NaiveDateTime,
    #[schema(example = "2025-02-10T17:00:00", value_type = String, format = "date-time")]
    pub end_time: NaiveDateTime,
    #[schema(nullable = true)]
    pub notes: Option<String>,
}

/// The optional id is resolved to an explicit operation up front, so a
/// malformed id can never fall through to an insert (it fails typed
/// deserialization before reaching this point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimesheetWrite {
    Create,
    Update(i64),
}

impl TimesheetWrite {
    fn from_id(id: Option<i64>) -> Self {
        match id {
            Some(id) => Self::Update(id),
            None => Self::Create,
        }
    }
}

async fn employee_refs(pool: &SqlitePool) -> Result<Vec<EmployeeRef>, actix_web::Error> {
    sqlx::query_as::<_, EmployeeRef>("SELECT id, full_name FROM employees")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch employee list");
            ErrorInternalServerError("Database error")
        })
}

#[utoipa::path(
    get,
    path = "/api/timesheets",
    params(TimesheetQuery),
    responses(
        (status = 200, description = "Timesheets joined with employee names", body = TimesheetListResponse)
    ),
    tag = "Timesheet"
)]
pub async fn list_timesheets(
    pool: web::Data<SqlitePool>,
    query: web::Query<TimesheetQuery>,
) -> actix_web::Result<impl Responder> {
    let mut filter = Filter::new();

    if let Some(search) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        filter.push(
            "employees.full_name LIKE ?",
            [SqlValue::String(like_pattern(search))],
        );
    }

    if let Some(employee_id) = query.employee_id {
        filter.push("employees.id = ?", [SqlValue::I64(employee_id)]);
    }

    let sql = format!(
        r#"
        SELECT timesheets.id, timesheets.employee_id, timesheets.start_time,
               timesheets.end_time, timesheets.notes, employees.full_name
        FROM timesheets
        JOIN employees ON timesheets.employee_id = employees.id
        {}
        "#,
        filter.where_clause()
    );
    debug!(sql = %sql, "Fetching timesheets");

    let mut data_query = sqlx::query_as::<_, TimesheetRow>(&sql);
    for b in &filter.bindings {
        data_query = match b {
            SqlValue::String(v) => data_query.bind(v.clone()),
            SqlValue::I64(v) => data_query.bind(*v),
        };
    }

    let rows = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %sql, "Failed to fetch timesheets");
        ErrorInternalServerError("Database error")
    })?;

    let events = rows.iter().map(CalendarEvent::from_row).collect();
    let employees = employee_refs(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(TimesheetListResponse {
        data: rows,
        employees,
        events,
    }))
}

#[utoipa::path(
    get,
    path = "/api/timesheets/{id}",
    params(
        ("id", Path, description = "Timesheet ID")
    ),
    responses(
        (status = 200, description = "Timesheet with employee picker list", body = TimesheetResponse),
        (status = 404, description = "Timesheet not found")
    ),
    tag = "Timesheet"
)]
pub async fn get_timesheet(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let timesheet_id = path.into_inner();

    let timesheet = sqlx::query_as::<_, Timesheet>("SELECT * FROM timesheets WHERE id = ?")
        .bind(timesheet_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, timesheet_id, "Failed to fetch timesheet");
            ErrorInternalServerError("Database error")
        })?;

    let Some(timesheet) = timesheet else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Timesheet not found"
        })));
    };

    let employees = employee_refs(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(TimesheetResponse {
        timesheet,
        employees,
    }))
}

/// Combined create/update handler, keyed by the optional id.
#[utoipa::path(
    post,
    path = "/api/timesheets",
    request_body = SaveTimesheet,
    responses(
        (status = 200, description = "Timesheet updated"),
        (status = 201, description = "Timesheet created"),
        (status = 404, description = "Timesheet not found"),
        (status = 422, description = "Validation failed", body = Object, example = json!({
            "error": "End Time must be after Start Time."
        }))
    ),
    tag = "Timesheet"
)]
pub async fn save_timesheet(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SaveTimesheet>,
) -> actix_web::Result<impl Responder> {
    if let Some(message) = validate_timesheet(payload.start_time, payload.end_time) {
        return Ok(HttpResponse::UnprocessableEntity().json(json!({ "error": message })));
    }

    match TimesheetWrite::from_id(payload.id) {
        TimesheetWrite::Update(id) => {
            let result = sqlx::query(
                r#"
                UPDATE timesheets
                SET employee_id = ?, start_time = ?, end_time = ?, notes = ?
                WHERE id = ?
                "#,
            )
            .bind(payload.employee_id)
            .bind(payload.start_time)
            .bind(payload.end_time)
            .bind(&payload.notes)
            .bind(id)
            .execute(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, timesheet_id = id, "Failed to update timesheet");
                ErrorInternalServerError("Database error")
            })?;

            if result.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "Timesheet not found"
                })));
            }

            Ok(HttpResponse::Ok().json(json!({
                "message": "Timesheet updated successfully"
            })))
        }
        TimesheetWrite::Create => {
            let result = sqlx::query(
                r#"
                INSERT INTO timesheets (employee_id, start_time, end_time, notes)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(payload.employee_id)
            .bind(payload.start_time)
            .bind(payload.end_time)
            .bind(&payload.notes)
            .execute(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create timesheet");
                ErrorInternalServerError("Database error")
            })?;

            Ok(HttpResponse::Created().json(json!({
                "message": "Timesheet created successfully",
                "id": result.last_insert_rowid()
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn optional_id_maps_to_tagged_write() {
        assert_eq!(TimesheetWrite::from_id(None), TimesheetWrite::Create);
        assert_eq!(TimesheetWrite::from_id(Some(7)), TimesheetWrite::Update(7));
    }

    #[test]
    fn event_title_appends_notes_when_present() {
        let row = TimesheetRow {
            id: 3,
            employee_id: 3,
            start_time: NaiveDate::from_ymd_opt(2025, 2, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            end_time: NaiveDate::from_ymd_opt(2025, 2, 11)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap(),
            notes: Some("Leadership in meetings".into()),
            full_name: "Nour Abou Khalil".into(),
        };

        let event = CalendarEvent::from_row(&row);
        assert_eq!(event.id, "3");
        assert_eq!(event.title, "Nour Abou Khalil - Leadership in meetings");
        assert_eq!(event.start, "2025-02-10");
        assert_eq!(event.end, "2025-02-11");

        let bare = TimesheetRow { notes: None, ..row };
        assert_eq!(CalendarEvent::from_row(&bare).title, "Nour Abou Khalil");
    }
}
