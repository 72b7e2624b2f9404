use super::mock::MockTransport;
use super::*;
use crate::error::ApiErrorKind;
use serde_json::json;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

const BASE: &str = "https://school.example/api";

fn client() -> (ApiClient<Rc<MockTransport>>, Rc<MockTransport>) {
    let mock = Rc::new(MockTransport::new());
    (ApiClient::new(format!("{}/", BASE), mock.clone()), mock)
}

// =========================================================
// 请求构建测试
// =========================================================

#[tokio::test]
async fn test_get_joins_base_and_query() {
    let (client, mock) = client();
    mock.mock_response(
        HttpMethod::Get,
        &format!("{}/teacher/all?page=0&size=10", BASE),
        200,
        json!({"content": [], "totalPages": 0}),
    );

    let value = client
        .get("/teacher/all", &[("page", "0".into()), ("size", "10".into())])
        .await
        .unwrap();

    assert_eq!(value["totalPages"], json!(0));
    assert_eq!(
        mock.sent_urls(),
        vec![format!("GET {}/teacher/all?page=0&size=10", BASE)]
    );
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (client, mock) = client();
    mock.mock_response(
        HttpMethod::Post,
        &format!("{}/student/add", BASE),
        200,
        json!("Student added"),
    );

    let value = client
        .post("/student/add", json!({"regNo": "S1"}))
        .await
        .unwrap();
    assert_eq!(value, json!("Student added"));

    let sent = mock.requests.borrow();
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"regNo":"S1"}"#));
    assert_eq!(
        sent[0].headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_put_and_delete_use_their_methods() {
    let (client, mock) = client();
    mock.mock_response(HttpMethod::Put, &format!("{}/teacher/update/3", BASE), 200, json!({}));
    mock.mock_response(HttpMethod::Delete, &format!("{}/subject/4", BASE), 200, json!(""));

    client.put("/teacher/update/3", json!({})).await.unwrap();
    let deleted = client.delete("/subject/4").await.unwrap();

    assert_eq!(deleted, serde_json::Value::Null);
    assert_eq!(
        mock.sent_urls(),
        vec![
            format!("PUT {}/teacher/update/3", BASE),
            format!("DELETE {}/subject/4", BASE),
        ]
    );
    assert!(mock.requests.borrow()[1].body.is_none());
}

// =========================================================
// 错误处理测试
// =========================================================

#[tokio::test]
async fn test_non_2xx_becomes_error_with_server_text() {
    let (client, mock) = client();
    mock.mock_response(
        HttpMethod::Post,
        &format!("{}/teacher/add", BASE),
        400,
        json!("Employee ID already exists"),
    );

    let err = client.post("/teacher/add", json!({})).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Rejected);
    assert_eq!(err.message, "Employee ID already exists");
    assert_eq!(err.spans(), ["api.post"]);
}

#[tokio::test]
async fn test_unmocked_path_is_not_found() {
    let (client, _mock) = client();
    let err = client.get("/nowhere", &[]).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let (client, mock) = client();
    mock.set_offline(true);
    let err = client.get("/subject/all", &[]).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_401_fires_unauthorized_hook() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let mock = Rc::new(MockTransport::new());
    let client = ApiClient::new(BASE, mock.clone()).with_unauthorized_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    mock.mock_response(HttpMethod::Get, &format!("{}/subject/all", BASE), 401, json!(""));
    mock.mock_response(HttpMethod::Get, &format!("{}/teacher/all", BASE), 403, json!(""));

    assert!(client.get("/subject/all", &[]).await.unwrap_err().is_unauthorized());
    let forbidden = client.get("/teacher/all", &[]).await.unwrap_err();

    assert_eq!(forbidden.kind, ApiErrorKind::Forbidden);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// =========================================================
// 业务接口测试
// =========================================================

#[tokio::test]
async fn test_login_returns_role() {
    let (client, mock) = client();
    mock.mock_response(
        HttpMethod::Post,
        &format!("{}{}", BASE, LOGIN_PATH),
        200,
        json!({"role": "Admin", "message": "Login successful"}),
    );

    let role = client
        .login(&LoginRequest {
            reg_no: "A1".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(role, Role::Admin);
    assert_eq!(
        mock.requests.borrow()[0].body.as_deref(),
        Some(r#"{"regNo":"A1","password":"pw"}"#)
    );
}

#[tokio::test]
async fn test_login_without_role_is_decode_error() {
    let (client, mock) = client();
    mock.mock_response(
        HttpMethod::Post,
        &format!("{}{}", BASE, LOGIN_PATH),
        200,
        json!({"message": "ok"}),
    );

    let err = client
        .login(&LoginRequest {
            reg_no: "A1".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
    assert_eq!(err.spans(), ["auth.login"]);
}

#[tokio::test]
async fn test_logout_posts_to_logout_path() {
    let (client, mock) = client();
    mock.mock_response(
        HttpMethod::Post,
        &format!("{}{}", BASE, LOGOUT_PATH),
        200,
        json!("Logged out"),
    );
    client.logout().await.unwrap();
    assert_eq!(
        mock.sent_urls(),
        vec![format!("POST {}{}", BASE, LOGOUT_PATH)]
    );
}

#[tokio::test]
async fn test_fetch_page_accepts_bare_array() {
    let (client, mock) = client();
    mock.mock_response(
        HttpMethod::Get,
        &format!("{}/subject/all", BASE),
        200,
        json!([{"id": 1, "name": "Maths"}]),
    );

    let page = client
        .fetch_page(&ApiRequest::get("/subject/all").named("subject.list"))
        .await
        .unwrap();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.content[0]["name"], json!("Maths"));
}
