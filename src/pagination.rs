use crate::errors::FieldError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Result<Self, FieldError> {
        if page < 1 {
            return Err(FieldError::new("page", "page must be >= 1"));
        }

        if page_size < 1 {
            return Err(FieldError::new("page_size", "page_size must be >= 1"));
        }

        if page_size > MAX_PAGE_SIZE {
            return Err(FieldError::new(
                "page_size",
                format!("page_size must be <= {MAX_PAGE_SIZE}"),
            ));
        }

        let pagination = Self { page, page_size };

        if pagination.checked_offset().is_none() {
            return Err(FieldError::new("page", "page is out of range"));
        }

        Ok(pagination)
    }

    pub fn from_query(query: PaginationQuery) -> Result<Self, FieldError> {
        let page = get_page_param(query.page).map_err(|e| FieldError::new("page", e))?;
        let page_size =
            get_page_size_param(query.page_size).map_err(|e| FieldError::new("page_size", e))?;

        Self::new(page, page_size)
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }

    fn checked_offset(&self) -> Option<i64> {
        (self.page - 1).checked_mul(self.page_size)
    }
}

pub fn get_page_param(param: Option<String>) -> Result<i64, &'static str> {
    let Some(page) = param else {
        return Ok(DEFAULT_PAGE);
    };

    let page: i64 = page
        .trim()
        .parse()
        .map_err(|_| "page must be integer")?;

    if page < 1 {
        return Err("page must be >= 1");
    }

    Ok(page)
}

pub fn get_page_size_param(param: Option<String>) -> Result<i64, &'static str> {
    let Some(page_size) = param else {
        return Ok(DEFAULT_PAGE_SIZE);
    };

    let page_size: i64 = page_size
        .trim()
        .parse()
        .map_err(|_| "page_size must be integer")?;

    if page_size < 1 {
        return Err("page_size must be >= 1");
    }

    if page_size > MAX_PAGE_SIZE {
        return Err("page_size must be <= 100");
    }

    Ok(page_size)
}
