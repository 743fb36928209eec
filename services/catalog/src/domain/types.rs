use serde::Serialize;

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year: i32,
}

/// Validated values for an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl BookInput {
    /// Enforce what the table enforces: non-empty text and an integer year.
    pub fn parse(title: String, author: String, year: &str) -> Result<Self, CatalogError> {
        if title.trim().is_empty() {
            return Err(CatalogError::MissingField("title"));
        }
        if author.trim().is_empty() {
            return Err(CatalogError::MissingField("author"));
        }
        let year = year.trim().parse().map_err(|_| CatalogError::InvalidYear)?;
        Ok(Self {
            title,
            author,
            year,
        })
    }
}
