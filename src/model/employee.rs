use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 3,
        "full_name": "Nour Abou Khalil",
        "email": "nour.khalil@gmail.com",
        "phone": "+96171111555",
        "date_of_birth": "1995-11-23",
        "job_position": "QA Engineer",
        "department": "Quality Assurance",
        "salary": 1900.0,
        "start_date": "2023-05-01",
        "end_date": null,
        "photo": "/uploads/photos/1708012345678-nour.jpg",
        "document_cv": "uploads/docs/nour_cv.pdf",
        "document_id": "uploads/docs/nour_id.pdf"
    })
)]
pub struct Employee {
    #[schema(example = 3)]
    pub id: i64,

    #[schema(example = "Nour Abou Khalil")]
    pub full_name: String,

    #[schema(example = "nour.khalil@gmail.com")]
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

    /// None while the employee is still employed.
    #[schema(example = json!(null), value_type = Option<String>, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,

    #[schema(nullable = true)]
    pub photo: Option<String>,

    #[schema(nullable = true)]
    pub document_cv: Option<String>,

    #[schema(nullable = true)]
    pub document_id: Option<String>,
}

/// Slim projection for pickers and filter dropdowns.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeRef {
    pub id: i64,
    #[schema(example = "Nour Abou Khalil")]
    pub full_name: String,
}
