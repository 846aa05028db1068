//! Book records and their create/update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Default and maximum page size for `GET /books`
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: Uuid,
    #[schema(example = "The Rust Programming Language")]
    pub title: String,
    #[schema(example = "Steve Klabnik")]
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 2018)]
    pub published_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(data: BookCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            author: data.author,
            description: data.description,
            published_year: data.published_year,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; fields absent from `data` are left untouched.
    pub fn apply(&mut self, data: BookUpdate) {
        if let Some(title) = data.title {
            self.title = title;
        }
        if let Some(author) = data.author {
            self.author = author;
        }
        if let Some(description) = data.description {
            self.description = Some(description);
        }
        if let Some(year) = data.published_year {
            self.published_year = Some(year);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookCreate {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1, max = 256))]
    pub author: String,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 9999))]
    pub published_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookUpdate {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub author: Option<String>,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 9999))]
    pub published_year: Option<i32>,
}

/// Pagination for `GET /books`
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    pub fn clamped_limit(&self) -> u32 {
        self.limit.min(MAX_PAGE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BookCreate {
        BookCreate {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            description: None,
            published_year: Some(1965),
        }
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut book = Book::new(sample());
        let created = book.created_at;
        book.apply(BookUpdate {
            title: Some("Dune Messiah".into()),
            ..Default::default()
        });
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.published_year, Some(1965));
        assert_eq!(book.created_at, created);
        assert!(book.updated_at >= created);
    }

    #[test]
    fn test_create_validation() {
        assert!(sample().validate().is_ok());
        let mut bad = sample();
        bad.title = String::new();
        assert!(bad.validate().is_err());
        let mut bad_year = sample();
        bad_year.published_year = Some(-5);
        assert!(bad_year.validate().is_err());
    }

    #[test]
    fn test_pagination_defaults_and_cap() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, DEFAULT_PAGE_LIMIT);
        let big = Pagination {
            skip: 0,
            limit: 5000,
        };
        assert_eq!(big.clamped_limit(), MAX_PAGE_LIMIT);
    }
}
