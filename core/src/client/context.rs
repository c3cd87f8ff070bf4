use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::HttpConfig;
use crate::error::ClientError;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Shared HTTP plumbing for the per-resource REST wrappers.
#[derive(Clone)]
pub struct RestContext {
    http: reqwest::Client,
    base_url: String,
}

impl RestContext {
    pub fn new(base_url: &str, cfg: &HttpConfig) -> Result<Self, ClientError> {
        if base_url.trim().is_empty() {
            return Err(ClientError::BaseUrl("empty server url".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .build()
            .map_err(|source| ClientError::Http {
                url: base_url.to_string(),
                source,
            })?;
        Ok(RestContext {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(target: "harvester.client", method = "GET", url = %url, "request");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        decode_json(url, resp).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(target: "harvester.client", method = "PUT", url = %url, "request");
        let resp = self
            .http
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        decode_json(url, resp).await
    }

    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(target: "harvester.client", method = "PUT", url = %url, "request");
        let resp = self
            .http
            .put(&url)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        decode_json(url, resp).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(target: "harvester.client", method = "POST", url = %url, "request");
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        decode_json(url, resp).await
    }

    pub(crate) async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(target: "harvester.client", method = "POST", url = %url, file = file_name, "upload");
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        decode_json(url, resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.url(path);
        tracing::debug!(target: "harvester.client", method = "DELETE", url = %url, "request");
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        expect_success(url, resp).await?;
        Ok(())
    }

    pub(crate) async fn get_text(&self, path: &str) -> Result<String, ClientError> {
        let url = self.url(path);
        tracing::debug!(target: "harvester.client", method = "GET", url = %url, "request");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        let resp = expect_success(url.clone(), resp).await?;
        resp.text()
            .await
            .map_err(|source| ClientError::Http { url, source })
    }
}

async fn expect_success(
    url: String,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(target: "harvester.client", status = status.as_u16(), url = %url, "request failed");
    Err(ClientError::Status {
        status: status.as_u16(),
        url,
        body: preview_body(&body),
    })
}

async fn decode_json<T: DeserializeOwned>(
    url: String,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let resp = expect_success(url.clone(), resp).await?;
    resp.json::<T>()
        .await
        .map_err(|source| ClientError::Decode { url, source })
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let ctx = RestContext::new("http://localhost:8080/rest/harvester/", &HttpConfig::default())
            .unwrap();
        assert_eq!(ctx.base_url(), "http://localhost:8080/rest/harvester");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            RestContext::new("  ", &HttpConfig::default()),
            Err(ClientError::BaseUrl(_))
        ));
    }

    #[test]
    fn preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= BODY_PREVIEW_LIMIT + 3);
        assert_eq!(preview_body("   "), "<empty body>");
    }
}
