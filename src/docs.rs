use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::api::timesheet::{
    CalendarEvent, SaveTimesheet, TimesheetListResponse, TimesheetResponse,
};
use crate::model::employee::{Employee, EmployeeRef};
use crate::model::timesheet::{Timesheet, TimesheetRow};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "1.0.0",
        description = r#"
## HR Records

Internal HR record keeping: employee profiles with uploaded attachments
(photo, CV, ID document) and timesheet entries with a calendar projection.

### Key Features
- **Employees**: create, view, edit (with file uploads), and a listing
  with search, allow-listed sorting and pagination
- **Timesheets**: combined create/update keyed by an optional id, listing
  joined with employee names, filterable by name or employee

### Response Format
- JSON-based RESTful responses
- Pagination metadata on the employee listing

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,

        crate::api::timesheet::list_timesheets,
        crate::api::timesheet::get_timesheet,
        crate::api::timesheet::save_timesheet,
    ),
    components(
        schemas(
            Employee,
            EmployeeRef,
            CreateEmployee,
            EmployeeListResponse,
            Timesheet,
            TimesheetRow,
            CalendarEvent,
            SaveTimesheet,
            TimesheetListResponse,
            TimesheetResponse,
        )
    ),
    tags(
        (name = "Employee", description = "Employee record APIs"),
        (name = "Timesheet", description = "Timesheet APIs"),
    )
)]
pub struct ApiDoc;
