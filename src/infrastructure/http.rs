//! Provider/VCS HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::application::errors::HttpStatusError;

pub const USER_AGENT: &str = "patchpilot";

/// 요청 단위 타임아웃이 걸린 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout_secs: u64) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// 요청을 전송하고 본문을 문자열로 돌려준다.
/// 실패 상태 코드는 응답 본문을 담은 `HttpStatusError`로 표준화한다.
pub async fn send_text(service: &'static str, action: &str, request: RequestBuilder) -> Result<String> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{service}: failed to {action}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("{service}: failed to read {action} response body"))?;

    if !status.is_success() {
        return Err(HttpStatusError {
            service,
            status: status.as_u16(),
            body,
        })
        .with_context(|| format!("{service}: failed to {action}"));
    }

    Ok(body)
}

/// JSON 응답을 기대하는 요청을 전송하고 타입으로 역직렬화한다.
pub async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    action: &str,
    request: RequestBuilder,
) -> Result<T> {
    let body = send_text(service, action, request).await?;
    serde_json::from_str(&body)
        .with_context(|| format!("{service}: invalid JSON response while trying to {action}: {body}"))
}
