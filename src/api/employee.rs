use crate::{
    config::Config,
    model::employee::Employee,
    utils::query::{EmployeeSort, Filter, Pagination, SortOrder, SqlValue, like_pattern},
    utils::uploads::{self, StoredFile},
    validate::{EmployeeFields, validate_employee},
};
use actix_multipart::Multipart;
use actix_web::{
    HttpResponse, Responder,
    error::{ErrorBadRequest, ErrorInternalServerError},
    web,
};
use chrono::{NaiveDate, Utc};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Nour Abou Khalil")]
    pub full_name: String,
    #[schema(example = "nour.khalil@gmail.com", format = "email")]
    pub email: String,
    #[schema(example = "+96171111555")]
    pub phone: String,
    #[schema(example = "1995-11-23", value_type = String, format = "date")]
    pub date_of_birth: NaiveDate,
    #[schema(example = "QA Engineer")]
    pub job_position: String,
    #[schema(example = "Quality Assurance")]
    pub department: String,
    #[schema(example = 1900.0)]
    pub salary: f64,
    #[schema(example = "2023-05-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Substring match against full_name or email.
    pub search: Option<String>,
    /// One of date_of_birth, salary, start_date, end_date. Anything else
    /// leaves the listing unsorted.
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// "asc" or "desc", defaults to "asc".
    pub order: Option<String>,
    pub page: Option<u32>,
    /// Rows per page, default 5, capped at 100.
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 5)]
    pub per_page: u32,
    #[schema(example = 10)]
    pub total: i64,
    #[schema(example = 2)]
    pub total_pages: u32,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let per_page = query.page_size.unwrap_or(5).clamp(1, 100);

    let mut filter = Filter::new();
    if let Some(search) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let like = like_pattern(search);
        filter.push(
            "(full_name LIKE ? OR email LIKE ?)",
            [SqlValue::String(like.clone()), SqlValue::String(like)],
        );
    }

    let count_sql = format!("SELECT COUNT(*) FROM employees {}", filter.where_clause());
    debug!(sql = %count_sql, "Counting employees");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &filter.bindings {
        count_query = match b {
            SqlValue::String(v) => count_query.bind(v.clone()),
            SqlValue::I64(v) => count_query.bind(*v),
        };
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count employees");
        ErrorInternalServerError("Database error")
    })?;

    let pagination = Pagination::clamp(query.page.unwrap_or(1), per_page, total);

    let mut data_sql = format!("SELECT * FROM employees {}", filter.where_clause());
    if let Some(sort) = query.sort_by.as_deref().and_then(EmployeeSort::parse) {
        let order = SortOrder::parse(query.order.as_deref().unwrap_or(""));
        data_sql.push_str(&format!(" ORDER BY {} {}", sort.column(), order.as_sql()));
    }
    data_sql.push_str(" LIMIT ? OFFSET ?");
    debug!(sql = %data_sql, page = pagination.page, per_page, "Fetching employees");

    let mut data_query = sqlx::query_as::<_, Employee>(&data_sql);
    for b in &filter.bindings {
        data_query = match b {
            SqlValue::String(v) => data_query.bind(v.clone()),
            SqlValue::I64(v) => data_query.bind(*v),
        };
    }
    data_query = data_query.bind(per_page as i64).bind(pagination.offset());

    let employees = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch employees");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: employees,
        page: pagination.page,
        per_page,
        total,
        total_pages: pagination.total_pages,
    }))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created"),
        (status = 422, description = "Validation failed", body = Object, example = json!({
            "errors": { "salary": "Salary must be a positive number and 500$ minimum." }
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let errors = validate_employee(
        &EmployeeFields {
            full_name: &payload.full_name,
            email: &payload.email,
            phone: &payload.phone,
            salary: Some(payload.salary),
            date_of_birth: Some(payload.date_of_birth),
        },
        Utc::now().date_naive(),
    );
    if !errors.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(json!({ "errors": errors })));
    }

    sqlx::query(
        r#"
        INSERT INTO employees
        (full_name, email, phone, date_of_birth, job_position, department, salary, start_date, end_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(payload.date_of_birth)
    .bind(&payload.job_position)
    .bind(&payload.department)
    .bind(payload.salary)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create employee");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee created successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to fetch employee");
            ErrorInternalServerError("Database error")
        })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

// Multipart file parts and the storage folder each lands in.
const FILE_FIELDS: &[(&str, &str)] = &[
    ("photo", "photos"),
    ("document_cv", "docs"),
    ("document_id", "docs"),
];

const REQUIRED_FIELDS: &[&str] = &[
    "full_name",
    "email",
    "phone",
    "date_of_birth",
    "job_position",
    "department",
    "salary",
    "start_date",
];

struct PendingFile {
    column: &'static str,
    folder: &'static str,
    original_name: String,
    bytes: Vec<u8>,
}

fn parse_date(text: &HashMap<String, String>, field: &str) -> actix_web::Result<NaiveDate> {
    text.get(field)
        .ok_or_else(|| ErrorBadRequest("Missing required form fields"))?
        .parse()
        .map_err(|_| ErrorBadRequest(format!("Invalid date in field '{}'", field)))
}

/// Full-field edit. File parts are optional; an omitted or empty part
/// leaves the stored path for that column untouched (COALESCE), a
/// supplied one replaces only its own column.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee updated"),
        (status = 400, description = "Missing required form fields"),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    path: web::Path<i64>,
    mut payload: Multipart,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let mut text: HashMap<String, String> = HashMap::new();
    let mut pending: Vec<PendingFile> = Vec::new();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().to_string();
        let file_name = field
            .content_disposition()
            .get_filename()
            .map(|s| s.to_string());

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
        }

        if let Some(&(column, folder)) = FILE_FIELDS.iter().find(|(f, _)| *f == name) {
            // Empty file inputs arrive as zero-length parts; skip them so
            // the previously stored path survives.
            match file_name {
                Some(original) if !data.is_empty() && !original.is_empty() => {
                    pending.push(PendingFile {
                        column,
                        folder,
                        original_name: original,
                        bytes: data,
                    });
                }
                _ => {}
            }
        } else {
            let value = String::from_utf8(data)
                .map_err(|_| ErrorBadRequest("Form fields must be UTF-8"))?;
            text.insert(name, value);
        }
    }

    if REQUIRED_FIELDS
        .iter()
        .any(|f| text.get(*f).map(|v| v.trim().is_empty()).unwrap_or(true))
    {
        return Err(ErrorBadRequest("Missing required form fields"));
    }

    let full_name = &text["full_name"];
    let email = &text["email"];
    let phone = &text["phone"];
    let job_position = &text["job_position"];
    let department = &text["department"];
    let salary: Option<f64> = text["salary"].trim().parse().ok();
    let date_of_birth = parse_date(&text, "date_of_birth")?;
    let start_date = parse_date(&text, "start_date")?;
    let end_date: Option<NaiveDate> = match text.get("end_date").map(|s| s.trim()) {
        Some(s) if !s.is_empty() => Some(
            s.parse()
                .map_err(|_| ErrorBadRequest("Invalid date in field 'end_date'"))?,
        ),
        _ => None,
    };

    let errors = validate_employee(
        &EmployeeFields {
            full_name,
            email,
            phone,
            salary,
            date_of_birth: Some(date_of_birth),
        },
        Utc::now().date_naive(),
    );
    if !errors.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(json!({ "errors": errors })));
    }
    let salary = salary.ok_or_else(|| ErrorBadRequest("Missing required form fields"))?;

    // Files are written only after validation so a rejected form never
    // leaves anything on disk.
    let upload_dir = Path::new(&config.upload_dir);
    let mut stored: Vec<(&'static str, StoredFile)> = Vec::new();
    for file in &pending {
        let s = uploads::store(upload_dir, file.folder, &file.original_name, &file.bytes)
            .map_err(|e| {
                error!(error = %e, field = file.column, "Failed to store uploaded file");
                for (_, f) in &stored {
                    uploads::discard(f);
                }
                ErrorInternalServerError("Failed to store uploaded file")
            })?;
        stored.push((file.column, s));
    }

    let path_for = |column: &str| -> Option<String> {
        stored
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, s)| s.public_path.clone())
    };

    let result = sqlx::query(
        r#"
        UPDATE employees SET
            full_name = ?, email = ?, phone = ?, date_of_birth = ?,
            job_position = ?, department = ?, salary = ?, start_date = ?, end_date = ?,
            photo = COALESCE(?, photo),
            document_cv = COALESCE(?, document_cv),
            document_id = COALESCE(?, document_id)
        WHERE id = ?
        "#,
    )
    .bind(full_name)
    .bind(email)
    .bind(phone)
    .bind(date_of_birth)
    .bind(job_position)
    .bind(department)
    .bind(salary)
    .bind(start_date)
    .bind(end_date)
    .bind(path_for("photo"))
    .bind(path_for("document_cv"))
    .bind(path_for("document_id"))
    .bind(employee_id)
    .execute(pool.get_ref())
    .await;

    let affected = match result {
        Ok(res) => res.rows_affected(),
        Err(e) => {
            error!(error = %e, employee_id, "Failed to update employee");
            // The row write failed, so the freshly written files would be
            // orphans. Remove them.
            for (_, f) in &stored {
                uploads::discard(f);
            }
            return Err(ErrorInternalServerError("Database error"));
        }
    };

    if affected == 0 {
        for (_, f) in &stored {
            uploads::discard(f);
        }
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully"
    })))
}
