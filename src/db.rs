use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use tracing::info;

pub async fn init_db(database_url: &str) -> SqlitePool {
    SqlitePool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            date_of_birth DATE NOT NULL,
            job_position TEXT NOT NULL,
            department TEXT NOT NULL,
            salary REAL NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE,
            photo TEXT,
            document_cv TEXT,
            document_id TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS timesheets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            start_time DATETIME NOT NULL,
            end_time DATETIME NOT NULL,
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// (full_name, email, phone, date_of_birth, job_position, department, salary,
//  start_date, photo, document_cv, document_id)
const DEMO_EMPLOYEES: &[(&str, &str, &str, &str, &str, &str, f64, &str, &str, &str, &str)] = &[
    (
        "Layla Hammoud", "layla.hammoud@gmail.com", "+96171111333", "1991-07-12",
        "UI/UX Designer", "Design", 2100.0, "2021-09-15",
        "https://randomuser.me/api/portraits/women/45.jpg",
        "uploads/docs/layla_cv.pdf", "uploads/docs/layla_id.pdf",
    ),
    (
        "Karim Nassar", "karim.nassar@gmail.com", "+96171111444", "1988-03-08",
        "Project Manager", "Management", 3200.0, "2020-01-10",
        "https://randomuser.me/api/portraits/men/52.jpg",
        "uploads/docs/karim_cv.pdf", "uploads/docs/karim_id.pdf",
    ),
    (
        "Nour Abou Khalil", "nour.khalil@gmail.com", "+96171111555", "1995-11-23",
        "QA Engineer", "Quality Assurance", 1900.0, "2023-05-01",
        "https://randomuser.me/api/portraits/women/68.jpg",
        "uploads/docs/nour_cv.pdf", "uploads/docs/nour_id.pdf",
    ),
    (
        "Omar Saad", "omar.saad@gmail.com", "+96171111666", "1990-02-14",
        "DevOps Engineer", "IT", 2700.0, "2019-07-20",
        "https://randomuser.me/api/portraits/men/35.jpg",
        "uploads/docs/omar_cv.pdf", "uploads/docs/omar_id.pdf",
    ),
    (
        "Jana Mroueh", "jana.mroueh@gmail.com", "+96171111777", "1996-10-05",
        "Data Analyst", "Analytics", 2300.0, "2022-11-11",
        "https://randomuser.me/api/portraits/women/12.jpg",
        "uploads/docs/jana_cv.pdf", "uploads/docs/jana_id.pdf",
    ),
    (
        "Rami Sleiman", "rami.sleiman@gmail.com", "+96171111888", "1987-06-17",
        "Backend Developer", "IT", 2500.0, "2021-03-22",
        "https://randomuser.me/api/portraits/men/60.jpg",
        "uploads/docs/rami_cv.pdf", "uploads/docs/rami_id.pdf",
    ),
    (
        "Hana Chami", "hana.chami@gmail.com", "+96171111999", "1993-12-30",
        "Marketing Specialist", "Marketing", 2200.0, "2020-08-18",
        "https://randomuser.me/api/portraits/women/80.jpg",
        "uploads/docs/hana_cv.pdf", "uploads/docs/hana_id.pdf",
    ),
    (
        "Tarek Haddad", "tarek.haddad@gmail.com", "+96171111000", "1985-01-19",
        "Financial Analyst", "Finance", 3100.0, "2018-04-10",
        "https://randomuser.me/api/portraits/men/70.jpg",
        "uploads/docs/tarek_cv.pdf", "uploads/docs/tarek_id.pdf",
    ),
    (
        "Samar Fares", "samar.fares@gmail.com", "+96171111111", "1994-09-02",
        "HR Officer", "Human Resources", 2000.0, "2023-01-03",
        "https://randomuser.me/api/portraits/women/56.jpg",
        "uploads/docs/samar_cv.pdf", "uploads/docs/samar_id.pdf",
    ),
    (
        "Fadi Khoury", "fadi.khoury@gmail.com", "+96171111223", "1992-04-04",
        "Frontend Developer", "IT", 2400.0, "2022-06-06",
        "https://randomuser.me/api/portraits/men/48.jpg",
        "uploads/docs/fadi_cv.pdf", "uploads/docs/fadi_id.pdf",
    ),
];

const DEMO_TIMESHEET_NOTES: &[&str] = &[
    "Excellent start to the week",
    "Creative contributions expected",
    "Leadership in meetings",
    "A great one to be",
    "Focused on dashboard report",
    "Deployment tasks scheduled",
    "Marketing plan presentation",
    "Finance report analysis",
    "Team onboarding support",
    "Front-end refactor in progress",
];

/// Inserts the demo dataset. Does nothing when employees already exist.
pub async fn seed_demo_data(pool: &SqlitePool) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    for &(full_name, email, phone, dob, job_position, department, salary, start_date, photo, cv, id_doc) in
        DEMO_EMPLOYEES
    {
        let dob: NaiveDate = dob.parse()?;
        let start_date: NaiveDate = start_date.parse()?;

        sqlx::query(
            r#"
            INSERT INTO employees
            (full_name, email, phone, date_of_birth, job_position, department, salary, start_date, end_date, photo, document_cv, document_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?, ?)
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(dob)
        .bind(job_position)
        .bind(department)
        .bind(salary)
        .bind(start_date)
        .bind(photo)
        .bind(cv)
        .bind(id_doc)
        .execute(pool)
        .await?;
    }

    let start = NaiveDateTime::parse_from_str("2025-02-10 08:00:00", "%Y-%m-%d %H:%M:%S")?;
    let end = NaiveDateTime::parse_from_str("2025-02-10 17:00:00", "%Y-%m-%d %H:%M:%S")?;

    for (i, notes) in DEMO_TIMESHEET_NOTES.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO timesheets (employee_id, start_time, end_time, notes)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind((i + 1) as i64)
        .bind(start)
        .bind(end)
        .bind(*notes)
        .execute(pool)
        .await?;
    }

    info!(employees = DEMO_EMPLOYEES.len(), "Seeded demo data");
    Ok(())
}
