//! Field validation for the employee and timesheet forms. Handlers call
//! these before touching the database; the queries themselves enforce
//! nothing. Every call recomputes the full error set from scratch.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

pub type FieldErrors = BTreeMap<&'static str, String>;

pub struct EmployeeFields<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    /// None when the submitted value did not parse as a number.
    pub salary: Option<f64>,
    pub date_of_birth: Option<NaiveDate>,
}

/// `nonspace@nonspace.nonspace`
fn email_shape(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Optional leading `+`, then 8-15 digits.
fn phone_shape(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    let len = digits.chars().count();
    (8..=15).contains(&len) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Whole years between `dob` and `today`, counting a birthday not yet
/// reached this year as one year less.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - dob.year();
    let birthday_reached = (today.month(), today.day()) >= (dob.month(), dob.day());
    if birthday_reached { years } else { years - 1 }
}

pub fn validate_employee(fields: &EmployeeFields<'_>, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if fields.full_name.trim().chars().count() < 3 {
        errors.insert("full_name", "Full name must be at least 3 characters.".into());
    }

    if !email_shape(fields.email.trim()) {
        errors.insert("email", "Invalid email format.".into());
    }

    if !phone_shape(fields.phone.trim()) {
        errors.insert("phone", "Phone number must be 8-15 digits.".into());
    }

    match fields.salary {
        Some(s) if s >= 500.0 => {}
        _ => {
            errors.insert(
                "salary",
                "Salary must be a positive number and 500$ minimum.".into(),
            );
        }
    }

    if let Some(dob) = fields.date_of_birth {
        if age_on(dob, today) < 18 {
            errors.insert(
                "date_of_birth",
                "Employee must be at least 18 years old.".into(),
            );
        }
    }

    errors
}

pub fn validate_timesheet(start: NaiveDateTime, end: NaiveDateTime) -> Option<&'static str> {
    if end <= start {
        Some("End Time must be after Start Time.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ok_fields() -> EmployeeFields<'static> {
        EmployeeFields {
            full_name: "Nour Abou Khalil",
            email: "nour.khalil@gmail.com",
            phone: "+96171111555",
            salary: Some(1900.0),
            date_of_birth: Some(d(1995, 11, 23)),
        }
    }

    #[test]
    fn valid_employee_has_no_errors() {
        assert!(validate_employee(&ok_fields(), d(2026, 8, 24)).is_empty());
    }

    #[test]
    fn eighteenth_birthday_today_passes() {
        let today = d(2026, 8, 24);
        let mut f = ok_fields();
        f.date_of_birth = Some(d(2008, 8, 24));
        assert_eq!(age_on(d(2008, 8, 24), today), 18);
        assert!(!validate_employee(&f, today).contains_key("date_of_birth"));
    }

    #[test]
    fn day_before_eighteenth_birthday_fails() {
        let today = d(2026, 8, 24);
        let mut f = ok_fields();
        f.date_of_birth = Some(d(2008, 8, 25));
        assert_eq!(age_on(d(2008, 8, 25), today), 17);
        assert!(validate_employee(&f, today).contains_key("date_of_birth"));
    }

    #[test]
    fn short_name_rejected() {
        let mut f = ok_fields();
        f.full_name = "  Al ";
        assert!(validate_employee(&f, d(2026, 8, 24)).contains_key("full_name"));
    }

    #[test]
    fn email_shapes() {
        assert!(email_shape("a@b.c"));
        assert!(!email_shape("plainaddress"));
        assert!(!email_shape("a@b"));
        assert!(!email_shape("a@.c"));
        assert!(!email_shape("a b@c.d"));
        assert!(!email_shape("@b.c"));
    }

    #[test]
    fn phone_shapes() {
        assert!(phone_shape("96171111555"));
        assert!(phone_shape("+96171111555"));
        assert!(phone_shape("12345678"));
        assert!(!phone_shape("1234567"));
        assert!(!phone_shape("1234567890123456"));
        assert!(!phone_shape("+961-71-111"));
        assert!(!phone_shape("letters12"));
    }

    #[test]
    fn salary_floor_is_500() {
        let mut f = ok_fields();
        f.salary = Some(500.0);
        assert!(!validate_employee(&f, d(2026, 8, 24)).contains_key("salary"));
        f.salary = Some(499.99);
        assert!(validate_employee(&f, d(2026, 8, 24)).contains_key("salary"));
        f.salary = None;
        assert!(validate_employee(&f, d(2026, 8, 24)).contains_key("salary"));
    }

    #[test]
    fn timesheet_end_must_be_strictly_after_start() {
        let start = d(2025, 2, 10).and_hms_opt(8, 0, 0).unwrap();
        assert!(validate_timesheet(start, start).is_some());
        let one_minute_later = d(2025, 2, 10).and_hms_opt(8, 1, 0).unwrap();
        assert!(validate_timesheet(start, one_minute_later).is_none());
        let earlier = d(2025, 2, 10).and_hms_opt(7, 0, 0).unwrap();
        assert!(validate_timesheet(start, earlier).is_some());
    }
}
