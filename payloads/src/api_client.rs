use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Serialize;

use crate::{BlogPostId, DocumentId, JobId, requests, responses};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn get_with_params(
        &self,
        path: &str,
        params: &requests::ListParams,
    ) -> ReqwestResult {
        let request = self
            .inner_client
            .get(self.format_url(path))
            .query(&params.normalized());

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn delete_with_body(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ReqwestResult {
        let request =
            self.inner_client.delete(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ApiError> {
        let response = self.get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<responses::UserProfile, ApiError> {
        let response = self.post("login", details).await?;
        ok_body(response).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.empty_post("logout").await?;
        ok_empty(response).await
    }

    /// Get the currently authenticated user, or `ApiError::Auth` if the
    /// session is missing or expired.
    pub async fn current_user(
        &self,
    ) -> Result<responses::UserProfile, ApiError> {
        let response = self.get("me").await?;
        ok_body(response).await
    }

    // Documents

    pub async fn list_documents(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Page<responses::Document>, ApiError> {
        let response = self.get_with_params("documents", params).await?;
        ok_body(response).await
    }

    pub async fn get_document(
        &self,
        id: &DocumentId,
    ) -> Result<responses::Document, ApiError> {
        let response = self.get(&format!("documents/{id}")).await?;
        ok_body(response).await
    }

    /// Upload a document as a multipart form: metadata text parts plus
    /// the file part.
    pub async fn upload_document(
        &self,
        details: &requests::UploadDocument,
    ) -> Result<responses::Document, ApiError> {
        let file_part = reqwest::multipart::Part::bytes(details.data.clone())
            .file_name(details.file_name.clone())
            .mime_str(&details.mime_type)?;
        let form = reqwest::multipart::Form::new()
            .text("title", details.title.clone())
            .part("file", file_part);

        let request = self
            .inner_client
            .post(self.format_url("documents"))
            .multipart(form);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request.send().await?;
        ok_body(response).await
    }

    pub async fn update_document(
        &self,
        id: &DocumentId,
        details: &requests::UpdateDocument,
    ) -> Result<responses::Document, ApiError> {
        let response = self.put(&format!("documents/{id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_document(
        &self,
        id: &DocumentId,
    ) -> Result<(), ApiError> {
        let response = self.delete(&format!("documents/{id}")).await?;
        ok_empty(response).await
    }

    pub async fn bulk_delete_documents(
        &self,
        details: &requests::BulkDelete,
    ) -> Result<responses::BulkDeleteResult, ApiError> {
        let response = self
            .delete_with_body("documents/mass-delete", details)
            .await?;
        ok_body(response).await
    }

    /// Fetch the raw bytes of a stored document. The caller is
    /// responsible for materializing them as a file save.
    pub async fn download_document(
        &self,
        id: &DocumentId,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self.get(&format!("documents/{id}/download")).await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(classify_response(status, &response.text().await?));
        }
        Ok(response.bytes().await?.to_vec())
    }

    // Blog posts. The admin list (`blog-posts`) and the public list
    // (`posts`) are two views over the same entity; mutations must
    // invalidate both namespaces on the caller's side.

    pub async fn list_blog_posts(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Page<responses::BlogPost>, ApiError> {
        let response = self.get_with_params("blog-posts", params).await?;
        ok_body(response).await
    }

    pub async fn list_published_posts(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Page<responses::BlogPost>, ApiError> {
        let response = self.get_with_params("posts", params).await?;
        ok_body(response).await
    }

    pub async fn get_blog_post(
        &self,
        id: &BlogPostId,
    ) -> Result<responses::BlogPost, ApiError> {
        let response = self.get(&format!("blog-posts/{id}")).await?;
        ok_body(response).await
    }

    pub async fn create_blog_post(
        &self,
        details: &requests::CreateBlogPost,
    ) -> Result<responses::BlogPost, ApiError> {
        let response = self.post("blog-posts", details).await?;
        ok_body(response).await
    }

    pub async fn update_blog_post(
        &self,
        id: &BlogPostId,
        details: &requests::UpdateBlogPost,
    ) -> Result<responses::BlogPost, ApiError> {
        let response = self.put(&format!("blog-posts/{id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_blog_post(
        &self,
        id: &BlogPostId,
    ) -> Result<(), ApiError> {
        let response = self.delete(&format!("blog-posts/{id}")).await?;
        ok_empty(response).await
    }

    pub async fn bulk_delete_blog_posts(
        &self,
        details: &requests::BulkDelete,
    ) -> Result<responses::BulkDeleteResult, ApiError> {
        let response = self
            .delete_with_body("blog-posts/mass-delete", details)
            .await?;
        ok_body(response).await
    }

    // Jobs

    pub async fn list_jobs(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Page<responses::Job>, ApiError> {
        let response = self.get_with_params("jobs", params).await?;
        ok_body(response).await
    }

    pub async fn get_job(
        &self,
        id: &JobId,
    ) -> Result<responses::Job, ApiError> {
        let response = self.get(&format!("jobs/{id}")).await?;
        ok_body(response).await
    }

    pub async fn create_job(
        &self,
        details: &requests::CreateJob,
    ) -> Result<responses::Job, ApiError> {
        let response = self.post("jobs", details).await?;
        ok_body(response).await
    }

    pub async fn update_job(
        &self,
        id: &JobId,
        details: &requests::UpdateJob,
    ) -> Result<responses::Job, ApiError> {
        let response = self.put(&format!("jobs/{id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        let response = self.delete(&format!("jobs/{id}")).await?;
        ok_empty(response).await
    }

    pub async fn bulk_delete_jobs(
        &self,
        details: &requests::BulkDelete,
    ) -> Result<responses::BulkDeleteResult, ApiError> {
        let response =
            self.delete_with_body("jobs/mass-delete", details).await?;
        ok_body(response).await
    }
}

/// The reserved field name for errors not attributable to a single
/// input field.
pub const GENERAL_FIELD: &str = "general";

/// Per-field validation messages from a 4xx response. Every reported
/// field is kept, whether or not the UI has a matching input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// First message for a field, which is what forms display.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn general(&self) -> Option<&str> {
        self.first(GENERAL_FIELD)
    }

    /// Field names other than the reserved `general` key.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.errors
            .keys()
            .map(String::as_str)
            .filter(|field| *field != GENERAL_FIELD)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<responses::ErrorBody> for FieldErrors {
    fn from(body: responses::ErrorBody) -> Self {
        Self {
            errors: body.errors,
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            if let Some(message) = messages.first() {
                if !first {
                    write!(f, "; ")?;
                }
                if field == GENERAL_FIELD {
                    write!(f, "{message}")?;
                } else {
                    write!(f, "{field}: {message}")?;
                }
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never reached the server or no response came back.
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    /// 4xx with parseable per-field messages.
    #[error("{0}")]
    Validation(FieldErrors),
    /// 401 or 403.
    #[error("You are not authorized to do that.")]
    Auth(StatusCode),
    /// 404.
    #[error("Not found.")]
    NotFound,
    /// 5xx.
    #[error("Server error: {1}")]
    Server(StatusCode, String),
    /// Any other non-success response, containing response text.
    #[error("{1}")]
    Api(StatusCode, String),
}

impl ApiError {
    /// Whether a retry can plausibly succeed. Client errors are
    /// terminal; transport failures and 5xx are transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server(..))
    }
}

/// Map a non-success response onto the error taxonomy. 4xx bodies are
/// probed for the `{"errors": {...}}` validation shape.
pub fn classify_response(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::Auth(status)
        }
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ if status.is_server_error() => {
            ApiError::Server(status, body.trim().to_string())
        }
        _ if status.is_client_error() => {
            match serde_json::from_str::<responses::ErrorBody>(body) {
                Ok(parsed) if !parsed.errors.is_empty() => {
                    ApiError::Validation(parsed.into())
                }
                _ => ApiError::Api(status, body.trim().to_string()),
            }
        }
        _ => ApiError::Api(status, body.trim().to_string()),
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    if !response.status().is_success() {
        let status = response.status();
        return Err(classify_response(status, &response.text().await?));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty (or message-only) response is OK, returning an
/// ApiError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ApiError> {
    if !response.status().is_success() {
        let status = response.status();
        return Err(classify_response(status, &response.text().await?));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_classify_as_auth() {
        assert!(matches!(
            classify_response(StatusCode::UNAUTHORIZED, ""),
            ApiError::Auth(StatusCode::UNAUTHORIZED)
        ));
        assert!(matches!(
            classify_response(StatusCode::FORBIDDEN, ""),
            ApiError::Auth(StatusCode::FORBIDDEN)
        ));
    }

    #[test]
    fn not_found_classifies_as_not_found() {
        assert!(matches!(
            classify_response(StatusCode::NOT_FOUND, "gone"),
            ApiError::NotFound
        ));
    }

    #[test]
    fn server_errors_are_retryable() {
        let err =
            classify_response(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, ApiError::Server(..)));
        assert!(err.is_retryable());
    }

    #[test]
    fn field_error_bodies_classify_as_validation() {
        let err = classify_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors": {"email": ["Format email tidak valid"]}}"#,
        );
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.first("email"), Some("Format email tidak valid"));
        assert_eq!(fields.first("title"), None);
    }

    #[test]
    fn malformed_4xx_bodies_fall_back_to_api_error() {
        let err = classify_response(StatusCode::BAD_REQUEST, "not json");
        assert!(matches!(err, ApiError::Api(StatusCode::BAD_REQUEST, _)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn general_key_is_separated_from_field_errors() {
        let fields = FieldErrors {
            errors: BTreeMap::from([
                ("general".to_string(), vec!["Sesi berakhir".to_string()]),
                ("email".to_string(), vec!["Wajib diisi".to_string()]),
            ]),
        };

        assert_eq!(fields.general(), Some("Sesi berakhir"));
        assert_eq!(fields.field_names().collect::<Vec<_>>(), vec!["email"]);
        assert_eq!(fields.to_string(), "email: Wajib diisi; Sesi berakhir");
    }
}
