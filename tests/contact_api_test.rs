use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use saar_site::{build_router, AppState, HttpMailRelay, MailConfig, SubmissionEngine};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router_for(relay: &MockServer) -> Result<axum::Router> {
    let config = MailConfig::new(relay.base_url(), "re_live", "forms@saargroup.com")
        .with_inbox("info@saargroup.com");
    let transport = HttpMailRelay::new(&config)?;
    let engine = SubmissionEngine::new(Arc::new(transport), Arc::new(config))?;
    Ok(build_router(AppState::new(engine), &[]))
}

async fn post_contact(router: axum::Router, body: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;

    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

/// 聯絡表單經由 relay 寄出一封信
#[tokio::test]
async fn test_contact_form_is_relayed() -> Result<()> {
    let relay = MockServer::start();
    let relay_mock = relay.mock(|when, then| {
        when.method(POST)
            .path("/emails")
            .header("authorization", "Bearer re_live")
            .json_body_partial(
                r#"{
                    "from": "\"Jane Doe\" <forms@saargroup.com>",
                    "to": ["info@saargroup.com"],
                    "reply_to": "jane@example.com",
                    "subject": "Chiller plant redesign"
                }"#,
            );
        then.status(200).json_body(json!({ "id": "msg_1" }));
    });

    let (status, body) = post_contact(
        router_for(&relay)?,
        r#"{"name":"Jane Doe","email":"jane@example.com","subject":"Chiller plant redesign","message":"We need a quote."}"#,
    )
    .await?;

    relay_mock.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    Ok(())
}

#[tokio::test]
async fn test_markup_in_message_is_escaped_in_html_body() -> Result<()> {
    let relay = MockServer::start();
    let relay_mock = relay.mock(|when, then| {
        when.method(POST)
            .path("/emails")
            .body_contains("&lt;script&gt;")
            .body_contains("New Contact Message");
        then.status(200);
    });

    let (status, _) = post_contact(
        router_for(&relay)?,
        r#"{"name":"Jane","email":"jane@example.com","message":"<script>alert(1)</script>"}"#,
    )
    .await?;

    relay_mock.assert();
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

/// 伺服器只檢查必填欄位，格式檢查留給瀏覽器表單
#[tokio::test]
async fn test_unusual_but_present_addresses_are_relayed() -> Result<()> {
    let relay = MockServer::start();
    let relay_mock = relay.mock(|when, then| {
        when.method(POST).path("/emails");
        then.status(200);
    });

    for address in ["ops@localhost", "josé@example.com"] {
        let (status, body) = post_contact(
            router_for(&relay)?,
            &json!({ "name": "Jane", "email": address, "message": "Hi" }).to_string(),
        )
        .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    relay_mock.assert_hits(2);
    Ok(())
}

/// relay 回傳錯誤時只回覆通用訊息
#[tokio::test]
async fn test_relay_rejection_returns_generic_failure() -> Result<()> {
    let relay = MockServer::start();
    relay.mock(|when, then| {
        when.method(POST).path("/emails");
        then.status(403).body("domain not verified: saargroup.com");
    });

    let (status, body) = post_contact(
        router_for(&relay)?,
        r#"{"name":"Jane","email":"jane@example.com","message":"Hi"}"#,
    )
    .await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Failed to send your message. Please try again later." })
    );
    Ok(())
}
