use crate::config::DetectorEndpoint;
use crate::models::Detection;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors from a detector backend
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Reply from one detector backend
#[derive(Debug, Default, Deserialize)]
pub struct DetectorReply {
    #[serde(default)]
    pub detections: Vec<Detection>,
    /// Base64 image with boxes drawn by the backend, when it provides one
    #[serde(default)]
    pub annotated_image: Option<String>,
}

/// Client for the external object-detection backends.
///
/// Each configured endpoint is one independently trained detector variant
/// (e.g. a western fast-food model and an Indian food model). The caller
/// fans the image out to all of them and fuses the results.
pub struct DetectorClient {
    client: Client,
    endpoints: Vec<DetectorEndpoint>,
    confidence_threshold: f64,
}

impl DetectorClient {
    pub fn new(
        endpoints: Vec<DetectorEndpoint>,
        confidence_threshold: f64,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoints,
            confidence_threshold,
        }
    }

    pub fn endpoints(&self) -> &[DetectorEndpoint] {
        &self.endpoints
    }

    /// Run one detector endpoint against the image
    pub async fn detect(
        &self,
        endpoint: &DetectorEndpoint,
        image_base64: &str,
    ) -> Result<DetectorReply, DetectorError> {
        let payload = json!({
            "image": image_base64,
            "confidence": self.confidence_threshold,
        });

        let response = self
            .client
            .post(&endpoint.url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DetectorError::ApiError(format!(
                "detector '{}' failed: {}",
                endpoint.name,
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let mut reply: DetectorReply = serde_json::from_value(body)
            .map_err(|e| DetectorError::InvalidResponse(format!("failed to parse reply: {}", e)))?;

        // Backends are asked to filter, but enforce the floor locally too
        reply
            .detections
            .retain(|d| d.confidence >= self.confidence_threshold);

        Ok(reply)
    }

    /// Run every configured detector (or just the named one). A failing
    /// detector contributes an empty list so fusion still sees the rest;
    /// the first annotated image offered by any backend is kept.
    pub async fn detect_all(
        &self,
        image_base64: &str,
        only: Option<&str>,
    ) -> (Vec<Vec<Detection>>, Option<String>) {
        let mut lists = Vec::new();
        let mut annotated = None;

        for endpoint in &self.endpoints {
            if let Some(name) = only {
                if endpoint.name != name {
                    continue;
                }
            }

            match self.detect(endpoint, image_base64).await {
                Ok(reply) => {
                    tracing::debug!(
                        "Detector '{}' returned {} detections",
                        endpoint.name,
                        reply.detections.len()
                    );
                    if annotated.is_none() {
                        annotated = reply.annotated_image;
                    }
                    lists.push(reply.detections);
                }
                Err(e) => {
                    tracing::warn!(
                        "Detector '{}' unavailable, continuing without it: {}",
                        endpoint.name,
                        e
                    );
                    lists.push(vec![]);
                }
            }
        }

        (lists, annotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(name: &str, url: &str) -> DetectorEndpoint {
        DetectorEndpoint {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_detect_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "detections": [
                {"label": "idli", "confidence": 0.82, "bbox": [1.0, 2.0, 3.0, 4.0]},
                {"label": "noise", "confidence": 0.1, "bbox": [0.0, 0.0, 1.0, 1.0]}
            ]
        });

        let _mock = server
            .mock("POST", "/detect")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = DetectorClient::new(
            vec![endpoint("indian", &format!("{}/detect", server.url()))],
            0.4,
            5,
        );

        let target = client.endpoints()[0].clone();
        let reply = client.detect(&target, "aW1hZ2U=").await.unwrap();

        // Sub-threshold detection is dropped locally
        assert_eq!(reply.detections.len(), 1);
        assert_eq!(reply.detections[0].label, "idli");
    }

    #[tokio::test]
    async fn test_detect_all_degrades_on_failure() {
        let mut server = mockito::Server::new_async().await;
        let ok_body = serde_json::json!({
            "detections": [
                {"label": "hamburger", "confidence": 0.9, "bbox": [0.0, 0.0, 5.0, 5.0]}
            ],
            "annotated_image": "Zm9v"
        });

        let _ok = server
            .mock("POST", "/western")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ok_body.to_string())
            .create_async()
            .await;
        let _down = server
            .mock("POST", "/indian")
            .with_status(503)
            .create_async()
            .await;

        let client = DetectorClient::new(
            vec![
                endpoint("western", &format!("{}/western", server.url())),
                endpoint("indian", &format!("{}/indian", server.url())),
            ],
            0.4,
            5,
        );

        let (lists, annotated) = client.detect_all("aW1hZ2U=", None).await;

        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].len(), 1);
        assert!(lists[1].is_empty());
        assert_eq!(annotated.as_deref(), Some("Zm9v"));
    }

    #[tokio::test]
    async fn test_detect_all_respects_named_detector() {
        let client = DetectorClient::new(
            vec![
                endpoint("western", "http://127.0.0.1:1/western"),
                endpoint("indian", "http://127.0.0.1:1/indian"),
            ],
            0.4,
            1,
        );

        // Both endpoints are unreachable; only the named one is attempted
        let (lists, _) = client.detect_all("aW1hZ2U=", Some("indian")).await;
        assert_eq!(lists.len(), 1);
    }
}
