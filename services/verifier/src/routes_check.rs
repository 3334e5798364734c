use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use newscheck::{CheckRequest, SchemaError, VerificationResult};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::state::SharedState;

pub async fn check_news(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<VerificationResult>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        warn!(status = %rejection.status(), error = %rejection.body_text(), "check-news: bad request body");
        ApiError::from(rejection)
    })?;
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4);
    info!(request_id = %request_id, chars = req.statement.chars().count(), "check-news: received");

    let raw = state
        .provider
        .complete(SYSTEM_PROMPT, &user_prompt(&req.statement))
        .await
        .map_err(|e| {
            warn!(request_id = %request_id, error = %e, "check-news: provider failed");
            ApiError::from(e)
        })?;

    let result = parse_model_output(&raw).map_err(|e| {
        warn!(request_id = %request_id, error = %e, output = %raw, "check-news: unparseable model output");
        ApiError::unparseable_model_output()
    })?;

    info!(request_id = %request_id, verdict = %result.verdict, confidence = result.confidence, "check-news: answered");
    Ok(Json(result))
}

/// The model must hand back exactly the success body, with a whole-number
/// confidence.
pub fn parse_model_output(raw: &str) -> Result<VerificationResult, SchemaError> {
    let result = VerificationResult::from_json(raw.trim().as_bytes())?;
    result.require_integral_confidence()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PARSE_FAILURE_DETAIL;
    use crate::provider::{FactCheckProvider, ProviderError, ProviderInfo};
    use crate::state::AppState;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use newscheck::{CheckError, RequestState, Verdict, VerificationClient};
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    type Reply = Box<dyn Fn() -> Result<String, ProviderError> + Send + Sync>;

    struct StubProvider {
        reply: Reply,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl FactCheckProvider for StubProvider {
        async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(user_prompt.to_string());
            (self.reply)()
        }

        fn info(&self) -> ProviderInfo {
            ProviderInfo {
                name: "stub".to_string(),
                base_url: "stub://".to_string(),
                model: "stub".to_string(),
            }
        }
    }

    const MODEL_OUTPUT: &str = r#"{"result":"FAKE","confidence":92,"explanation":"No credible source confirms this.","sources":[{"title":"NASA Press Office","url":"https://nasa.gov/press"}]}"#;

    async fn spawn_verifier(reply: Reply) -> (String, Arc<Mutex<Vec<String>>>, JoinHandle<()>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let provider = StubProvider { reply, prompts: prompts.clone() };
        let app = crate::router(Arc::new(AppState::new(Box::new(provider))));
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), prompts, handle)
    }

    async fn post_statement(base: &str, statement: &str) -> (StatusCode, serde_json::Value) {
        let resp = reqwest::Client::new()
            .post(format!("{base}/check-news"))
            .json(&serde_json::json!({ "statement": statement }))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    #[test]
    fn test_parse_model_output() {
        let r = parse_model_output(&format!("\n  {MODEL_OUTPUT}\n")).unwrap();
        assert_eq!(r.verdict, Verdict::Fake);
        assert!(parse_model_output("```json\n{}\n```").is_err());
        assert!(parse_model_output(r#"{"result":"REAL","confidence":70.5,"explanation":"x","sources":[]}"#).is_err());
        assert!(parse_model_output(r#"{"result":"REAL","confidence":70.0,"explanation":"x","sources":[]}"#).is_ok());
    }

    #[tokio::test]
    async fn test_check_news_success() {
        let (base, prompts, handle) = spawn_verifier(Box::new(|| Ok(MODEL_OUTPUT.to_string()))).await;

        let (status, body) = post_statement(&base, "NASA confirms aliens on Mars").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "FAKE");
        assert_eq!(body["confidence"], 92);
        assert!(body["confidence"].is_i64());
        assert_eq!(body["sources"][0]["url"], "https://nasa.gov/press");
        assert_eq!(
            prompts.lock().unwrap().as_slice(),
            ["Here is the news statement to verify: \"NASA confirms aliens on Mars\""]
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_missing_api_key_is_500() {
        let (base, _, handle) = spawn_verifier(Box::new(|| Err(ProviderError::MissingApiKey))).await;
        let (status, body) = post_statement(&base, "x").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "API key for Perplexity is not set.");
        handle.abort();
    }

    #[tokio::test]
    async fn test_upstream_failure_is_503() {
        let (base, _, handle) =
            spawn_verifier(Box::new(|| Err(ProviderError::Upstream("connection reset".into())))).await;
        let (status, body) = post_statement(&base, "x").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["detail"], "Error communicating with Perplexity API: connection reset");
        handle.abort();
    }

    #[tokio::test]
    async fn test_garbage_model_output_is_500() {
        let (base, _, handle) = spawn_verifier(Box::new(|| Ok("I think it's fake.".to_string()))).await;
        let (status, body) = post_statement(&base, "x").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], PARSE_FAILURE_DETAIL);
        handle.abort();
    }

    #[tokio::test]
    async fn test_bad_request_body_has_detail() {
        let (base, prompts, handle) = spawn_verifier(Box::new(|| Ok(MODEL_OUTPUT.to_string()))).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/check-news"))
            .json(&serde_json::json!({ "text": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("statement"));

        let resp = reqwest::Client::new()
            .post(format!("{base}/check-news"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["detail"].is_string());

        assert!(prompts.lock().unwrap().is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_client_sees_bad_request_detail() {
        let (base, _, handle) = spawn_verifier(Box::new(|| Ok(MODEL_OUTPUT.to_string()))).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/check-news"))
            .json(&serde_json::json!({ "statement": 7 }))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.bytes().await.unwrap().to_vec();
        let err = newscheck::classify(&newscheck::RawResponse { status, body: bytes }).unwrap_err();
        assert!(matches!(err, CheckError::Server(_)));
        handle.abort();
    }

    #[tokio::test]
    async fn test_health() {
        let (base, _, handle) = spawn_verifier(Box::new(|| Ok(MODEL_OUTPUT.to_string()))).await;
        let body: serde_json::Value = reqwest::get(format!("{base}/")).await.unwrap().json().await.unwrap();
        assert_eq!(body["status"], "ok");
        handle.abort();
    }

    #[tokio::test]
    async fn test_client_against_service() {
        let (base, _, handle) = spawn_verifier(Box::new(|| Ok(MODEL_OUTPUT.to_string()))).await;
        let mut client = VerificationClient::new(base);
        let state = client.submit_raw(" NASA confirms aliens on Mars ").await.unwrap();
        let result = state.result().expect("succeeded");
        assert_eq!(result.verdict, Verdict::Fake);
        assert_eq!(result.confidence, 92.0);
        assert_eq!(result.sources.len(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_client_sees_service_detail() {
        let (base, _, handle) = spawn_verifier(Box::new(|| Err(ProviderError::MissingApiKey))).await;
        let mut client = VerificationClient::new(base);
        let state = client.submit_raw("x").await.unwrap();
        assert_eq!(
            state,
            RequestState::Failed(CheckError::Server("API key for Perplexity is not set.".into()))
        );
        handle.abort();
    }
}
