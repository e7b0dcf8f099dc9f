//! Listing query assembly: dynamic WHERE clauses with bound values,
//! allow-listed sort columns and last-page clamping.

/// Bindable value for dynamically assembled WHERE clauses.
#[derive(Debug, Clone)]
pub enum SqlValue {
    String(String),
    I64(i64),
}

/// Accumulates `AND`-joined conditions together with their bindings.
/// Condition text is fixed at the call site; user input only ever lands
/// in the bindings.
#[derive(Debug, Default)]
pub struct Filter {
    conditions: Vec<&'static str>,
    pub bindings: Vec<SqlValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: &'static str, values: impl IntoIterator<Item = SqlValue>) {
        self.conditions.push(condition);
        self.bindings.extend(values);
    }

    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }
}

/// Sort direction. Anything other than "desc" (case-insensitive) is "asc".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Sortable employee columns. Sort clauses cannot be parameterized, so
/// only these enum-derived names are ever spliced into SQL text; an
/// unrecognized field parses to `None` and the listing stays unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSort {
    DateOfBirth,
    Salary,
    StartDate,
    EndDate,
}

impl EmployeeSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date_of_birth" => Some(Self::DateOfBirth),
            "salary" => Some(Self::Salary),
            "start_date" => Some(Self::StartDate),
            "end_date" => Some(Self::EndDate),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::DateOfBirth => "date_of_birth",
            Self::Salary => "salary",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
        }
    }
}

/// Resolved page window. Out-of-range requests clamp, they never error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn clamp(requested: u32, per_page: u32, total: i64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = (total.max(0) as u64).div_ceil(per_page as u64).max(1) as u32;
        let page = requested.max(1).min(total_pages);
        Self {
            page,
            per_page,
            total_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }
}

/// `%term%` pattern for case-insensitive substring matching via LIKE.
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}
