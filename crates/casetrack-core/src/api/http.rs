use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ApiError, TestOps};
use crate::builder::NewTestRun;
use crate::config::Config;
use crate::model::{Project, TestCase, TestRun, TestSuite};
use crate::session::Session;
use crate::status::CaseStatus;

/// Reqwest-backed client for the test-management REST API.
///
/// # Example
///
/// ```no_run
/// use casetrack_core::api::HttpClient;
///
/// let client = HttpClient::new("http://localhost:3000").with_token("token");
/// ```
pub struct HttpClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpClient {
    /// Creates a client against the given base URL, without credentials.
    /// Only `login` works unauthenticated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            client: Client::new(),
        }
    }

    /// Creates a client from configuration (base URL plus optional token).
    pub fn from_config(config: &Config) -> Self {
        let client = Self::new(config.api.base_url.clone());
        match &config.api.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    /// Sets the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Adopts a session's token.
    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.access_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header("authorization", format!("Bearer {token}")),
            None => req,
        }
    }

    async fn check(&self, response: Response, what: &str) -> Result<Response, ApiError> {
        let status = response.status();

        if status == 401 || status == 403 {
            return Err(ApiError::Unauthorized);
        }

        if status == 404 {
            return Err(ApiError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.authorize(self.client.get(self.url(path))).send().await?;
        let response = self.check(response, what).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        let response = self.check(response, what).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> Result<T, ApiError> {
        debug!(path, "PATCH");
        let response = self
            .authorize(self.client.patch(self.url(path)))
            .json(body)
            .send()
            .await?;
        let response = self.check(response, what).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

#[derive(Serialize)]
struct StatusPatch {
    status: &'static str,
}

#[async_trait]
impl TestOps for HttpClient {
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = LoginRequest { email, password };
        let response: LoginResponse = self.post_json("/auth/login", &body, "login").await?;
        Ok(Session::new(response.access_token))
    }

    async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json("/projects", "projects").await
    }

    async fn project(&self, project_id: u64) -> Result<Project, ApiError> {
        self.get_json(
            &format!("/projects/{project_id}"),
            &format!("project {project_id}"),
        )
        .await
    }

    async fn suites(&self, project_id: u64) -> Result<Vec<TestSuite>, ApiError> {
        self.get_json(
            &format!("/projects/{project_id}/test-suites"),
            &format!("project {project_id}"),
        )
        .await
    }

    async fn cases(&self, suite_id: u64) -> Result<Vec<TestCase>, ApiError> {
        self.get_json(
            &format!("/test-suites/{suite_id}/test-cases"),
            &format!("test suite {suite_id}"),
        )
        .await
    }

    async fn runs(&self, project_id: u64) -> Result<Vec<TestRun>, ApiError> {
        self.get_json(
            &format!("/projects/{project_id}/test-runs"),
            &format!("project {project_id}"),
        )
        .await
    }

    async fn run(&self, project_id: u64, run_id: u64) -> Result<TestRun, ApiError> {
        self.get_json(
            &format!("/projects/{project_id}/test-runs/{run_id}"),
            &format!("test run {run_id}"),
        )
        .await
    }

    async fn create_run(
        &self,
        project_id: u64,
        payload: &NewTestRun,
    ) -> Result<TestRun, ApiError> {
        self.post_json(
            &format!("/projects/{project_id}/test-runs"),
            payload,
            &format!("project {project_id}"),
        )
        .await
    }

    async fn set_case_status(
        &self,
        project_id: u64,
        case_id: u64,
        status: CaseStatus,
    ) -> Result<(), ApiError> {
        let body = StatusPatch {
            status: status.as_str(),
        };
        debug!(project_id, case_id, status = status.as_str(), "PATCH case status");
        let response = self
            .authorize(
                self.client
                    .patch(self.url(&format!("/projects/{project_id}/test-cases/{case_id}/status"))),
            )
            .json(&body)
            .send()
            .await?;
        // The body of a status patch is not interesting, only success is.
        self.check(response, &format!("test case {case_id}")).await?;
        Ok(())
    }

    async fn complete_run(&self, project_id: u64, run_id: u64) -> Result<TestRun, ApiError> {
        let body = StatusPatch {
            status: "COMPLETED",
        };
        self.patch_json(
            &format!("/projects/{project_id}/test-runs/{run_id}"),
            &body,
            &format!("test run {run_id}"),
        )
        .await
    }

    async fn add_case_to_run(
        &self,
        project_id: u64,
        run_id: u64,
        case_id: u64,
    ) -> Result<TestRun, ApiError> {
        let body = serde_json::json!({});
        self.post_json(
            &format!("/projects/{project_id}/test-runs/{run_id}/add-test-case/{case_id}"),
            &body,
            &format!("test run {run_id}"),
        )
        .await
    }

    async fn delete_run(&self, project_id: u64, run_id: u64) -> Result<(), ApiError> {
        debug!(project_id, run_id, "DELETE test run");
        let response = self
            .authorize(
                self.client
                    .delete(self.url(&format!("/projects/{project_id}/test-runs/{run_id}"))),
            )
            .send()
            .await?;
        self.check(response, &format!("test run {run_id}")).await?;
        Ok(())
    }

    async fn export_run(&self, project_id: u64, run_id: u64) -> Result<Vec<u8>, ApiError> {
        debug!(project_id, run_id, "GET export document");
        let response = self
            .authorize(self.client.get(
                self.url(&format!("/projects/{project_id}/test-runs/{run_id}/export")),
            ))
            .send()
            .await?;
        let response = self.check(response, &format!("test run {run_id}")).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_url_trailing_slash_removed() {
        let client = HttpClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_with_session() {
        let session = Session::new("abc");
        let client = HttpClient::new("http://localhost:3000").with_session(&session);
        assert_eq!(client.token.as_deref(), Some("abc"));
    }
}
