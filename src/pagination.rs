//! Page arithmetic for the task list.

use crate::error::AppError;

/// One page of a listing plus what is needed to render "page N of M".
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: i64,
    pub per_page: i64,
    /// Number of items across all pages.
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        Self {
            items,
            page,
            per_page,
            total,
        }
    }

    pub fn total_pages(&self) -> i64 {
        total_pages(self.total, self.per_page)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if per_page > 0 {
        (total + per_page - 1) / per_page
    } else {
        0
    }
}

/// Checks a requested page against the item count and returns the row offset.
///
/// Page 1 always exists, even when empty. Any other page must fall inside
/// `1..=total_pages`.
pub fn offset_for(page: i64, per_page: i64, total: i64) -> Result<i64, AppError> {
    if per_page < 1 {
        return Err(AppError::InternalServerError(
            "Page size must be positive".into(),
        ));
    }
    if page < 1 || (page > 1 && page > total_pages(total, per_page)) {
        return Err(AppError::NotFound(format!("Page {} does not exist", page)));
    }
    Ok((page - 1) * per_page)
}
