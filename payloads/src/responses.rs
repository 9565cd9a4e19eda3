use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    BlogPostId, DocumentId, EmploymentType, JobId, JobStatus, PostStatus,
    UserId,
};

/// Paging metadata returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Builds metadata with `total_pages = ceil(total_items / per_page)`.
    pub fn new(page: u32, per_page: u32, total_items: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total_items.div_ceil(per_page as u64) as u32
        };
        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of a resource collection, exactly as the backend computed
/// it. The client never re-pages or re-sorts `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub uploaded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub content: String,
    /// Set once the post is published; drafts have no public timestamp.
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
    pub posted_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

/// Result of a mass-delete. `deleted` may be smaller than the number of
/// requested ids when some were already gone or not deletable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    pub deleted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
}

/// Wire shape of a 4xx validation failure:
/// `{"errors": {"field": ["msg", ...]}}`. The reserved key `general`
/// carries errors not attributable to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_of_items_over_per_page() {
        assert_eq!(Pagination::new(1, 20, 25).total_pages, 2);
        assert_eq!(Pagination::new(1, 20, 40).total_pages, 2);
        assert_eq!(Pagination::new(1, 20, 41).total_pages, 3);
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
    }

    #[test]
    fn page_navigation_flags() {
        let first_of_two = Pagination::new(1, 20, 25);
        assert!(!first_of_two.has_previous());
        assert!(first_of_two.has_next());

        let last = Pagination::new(2, 20, 25);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn error_body_round_trips_field_messages() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"errors": {"email": ["Format email tidak valid"],
                           "general": ["Sesi berakhir"]}}"#,
        )
        .unwrap();

        assert_eq!(
            body.errors["email"],
            vec!["Format email tidak valid".to_string()]
        );
        assert_eq!(body.errors.len(), 2);
    }

    #[test]
    fn page_deserializes_with_pagination_metadata() {
        let page: Page<serde_json::Value> = serde_json::from_str(
            r#"{"items": [{"x": 1}],
                "pagination": {"page": 1, "per_page": 20,
                               "total_items": 1, "total_pages": 1}}"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination, Pagination::new(1, 20, 1));
    }
}
