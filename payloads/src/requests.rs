use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EmploymentType, JobStatus, PostStatus, SortOrder};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Query parameters for a paged list endpoint.
///
/// The backend owns all paging, sorting, and filtering; this struct only
/// describes what to ask for. Parameters that are unset or empty are
/// *absent* from the request — an empty string never means "no filter",
/// it is simply not sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Free-text filter.
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    /// Resource-specific filters, e.g. `status=published`.
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.min(MAX_PER_PAGE));
        self
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn sort(mut self, by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(by.into());
        self.sort_order = Some(order);
        self
    }

    pub fn filter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// The parameter pairs that are actually transmitted, in canonical
    /// order: the fixed fields first, then resource filters in key
    /// order. Empty values are dropped, so two logically-equal parameter
    /// sets always produce identical output no matter how they were
    /// assembled.
    pub fn normalized(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(q) = non_empty(self.q.as_deref()) {
            pairs.push(("q".to_string(), q.to_string()));
        }
        if let Some(sort_by) = non_empty(self.sort_by.as_deref()) {
            pairs.push(("sort_by".to_string(), sort_by.to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order".to_string(), order.as_str().to_string()));
        }
        for (key, value) in &self.filters {
            if let Some(value) = non_empty(Some(value)) {
                pairs.push((key.clone(), value.to_string()));
            }
        }
        pairs
    }

    /// Canonical serialization used as the per-resource part of a cache
    /// key. Stable across field-assembly order and absent/empty fields.
    pub fn cache_key(&self) -> String {
        let pairs: Vec<String> = self
            .normalized()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        pairs.join("&")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Body of `DELETE /{resource}/mass-delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDelete {
    pub ids: Vec<Uuid>,
}

/// Metadata and contents for a document upload. Transmitted as a
/// multipart form: one text part per metadata field plus the file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDocument {
    pub title: String,
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDocument {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBlogPost {
    pub title: String,
    pub slug: String,
    pub status: PostStatus,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_drops_absent_and_empty_values() {
        let params = ListParams::default()
            .page(1)
            .query("")
            .filter("status", "   ")
            .filter("employment_type", "contract");

        assert_eq!(
            params.normalized(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("employment_type".to_string(), "contract".to_string()),
            ]
        );
    }

    #[test]
    fn cache_key_is_stable_across_assembly_order() {
        let a = ListParams::default()
            .filter("status", "open")
            .filter("employment_type", "full-time")
            .page(2)
            .per_page(20);
        let b = ListParams::default()
            .per_page(20)
            .page(2)
            .filter("employment_type", "full-time")
            .filter("status", "open");

        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(
            a.cache_key(),
            "page=2&per_page=20&employment_type=full-time&status=open"
        );
    }

    #[test]
    fn cache_key_ignores_semantically_absent_fields() {
        let explicit_empties = ListParams {
            q: Some(String::new()),
            sort_by: Some("".to_string()),
            ..ListParams::default()
        }
        .page(1);
        let plain = ListParams::default().page(1);

        assert_eq!(explicit_empties.cache_key(), plain.cache_key());
    }

    #[test]
    fn sort_pairs_serialize_in_canonical_order() {
        let params = ListParams::default()
            .sort("posted_at", SortOrder::Desc)
            .page(1);

        assert_eq!(
            params.cache_key(),
            "page=1&sort_by=posted_at&sort_order=desc"
        );
    }

    #[test]
    fn per_page_is_clamped() {
        let params = ListParams::default().per_page(10_000);
        assert_eq!(params.per_page, Some(MAX_PER_PAGE));
    }
}
