//! Smoke test of a running API, over HTTP.
//!
//! Walks an article through its whole lifecycle and reports the status of each call.

use reqwest::{Client, Method, StatusCode};
use serde_json::json;

use crate::model::Article;

#[derive(thiserror::Error, Debug)]
pub enum SmokeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: &'static str,
    pub status: u16,
    pub ok: bool,
}

#[derive(Debug, Default, Clone)]
pub struct SmokeReport {
    pub steps: Vec<StepOutcome>,
}

impl SmokeReport {
    pub fn success(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|x| x.ok)
    }

    fn record(&mut self, step: &'static str, status: StatusCode, expected: StatusCode) -> bool {
        let ok = status == expected;
        if ok {
            tracing::info!("{step}: {status}");
        } else {
            tracing::error!("{step}: got {status}, expected {expected}");
        }

        self.steps.push(StepOutcome {
            step,
            status: status.as_u16(),
            ok,
        });
        ok
    }
}

pub struct SmokeClient {
    client: Client,
    base_url: String,
}

impl SmokeClient {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8000/api`
    pub fn new(client: Client, base_url: &str) -> Self {
        SmokeClient {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn run(&self) -> Result<SmokeReport, SmokeError> {
        let mut report = SmokeReport::default();

        let response = self
            .client
            .post(self.url("/articles/"))
            .json(&json!({
                "title": "My First Blog Post",
                "content": "This is the content of my first blog post.",
                "author": "John Doe"
            }))
            .send()
            .await?;
        if !report.record("create", response.status(), StatusCode::CREATED) {
            return Ok(report);
        }
        let article: Article = response.json().await?;
        let detail = format!("/articles/{}/", article.id);

        let status = self.call(Method::GET, "/articles/").await?;
        report.record("list", status, StatusCode::OK);

        let status = self.call(Method::GET, &detail).await?;
        report.record("retrieve", status, StatusCode::OK);

        let status = self
            .client
            .put(self.url(&detail))
            .json(&json!({
                "title": "Updated Blog Post Title",
                "content": "This is the updated content of the blog post.",
                "author": "John Doe"
            }))
            .send()
            .await?
            .status();
        report.record("update", status, StatusCode::OK);

        let status = self.call(Method::GET, "/articles/stats/").await?;
        report.record("stats", status, StatusCode::OK);

        let status = self.call(Method::DELETE, &detail).await?;
        report.record("delete", status, StatusCode::NO_CONTENT);

        Ok(report)
    }

    async fn call(&self, method: Method, path: &str) -> Result<StatusCode, SmokeError> {
        Ok(self
            .client
            .request(method, self.url(path))
            .send()
            .await?
            .status())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
