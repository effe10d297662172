//! End-to-end tests for the placeholder posts adapter against a stub server.

use coursework::domain::ports::{PostsApi, PostsApiError};
use coursework::domain::{PostDraft, PostsError, PostsService};
use coursework::outbound::placeholder::JsonPlaceholderClient;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> JsonPlaceholderClient {
    let endpoint = Url::parse(&server.uri()).expect("mock server URI parses");
    JsonPlaceholderClient::new(endpoint).expect("client builds")
}

fn post_json(id: u64, title: &str) -> serde_json::Value {
    json!({ "userId": 1, "id": id, "title": title, "body": format!("{title} body") })
}

#[rstest]
#[tokio::test]
async fn list_sends_the_limit_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_json(1, "first"),
            post_json(2, "second"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client_for(&server)
        .list_posts(Some(5))
        .await
        .expect("list succeeds");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "first");
    assert_eq!(posts[1].body, "second body");
}

#[rstest]
#[tokio::test]
async fn list_without_limit_omits_the_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param_is_missing("_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(1, "only")])))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client_for(&server)
        .list_posts(None)
        .await
        .expect("list succeeds");

    assert_eq!(posts.len(), 1);
}

#[rstest]
#[tokio::test]
async fn create_posts_the_draft_with_the_placeholder_author() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({ "title": "Hello", "body": "World", "userId": 1 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 101,
            "userId": 1,
            "title": "Hello",
            "body": "World",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = PostDraft::new("Hello", "World").expect("valid draft");
    let post = client_for(&server)
        .create_post(&draft)
        .await
        .expect("create succeeds");

    assert_eq!(post.id, 101);
    assert_eq!(post.title, "Hello");
}

#[rstest]
#[tokio::test]
async fn service_never_sends_blank_drafts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let service = PostsService::new(Arc::new(client_for(&server)));
    let error = service
        .create("   ", "World")
        .await
        .expect_err("blank title is refused");

    assert!(matches!(error, PostsError::Draft(_)));
}

#[rstest]
#[case::server_error(500, "{\"error\": \"boom\"}", "{\"error\": \"boom\"}")]
#[case::not_found(404, "", "empty body")]
#[tokio::test]
async fn non_success_statuses_map_to_status_errors(
    #[case] status: u16,
    #[case] body: &str,
    #[case] expected_message: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_posts(Some(5))
        .await
        .expect_err("status is not a success");

    assert_eq!(error, PostsApiError::status(status, expected_message));
}

#[rstest]
#[tokio::test]
async fn malformed_json_maps_to_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_posts(None)
        .await
        .expect_err("body is not JSON");

    assert!(matches!(error, PostsApiError::Decode { .. }));
}

#[rstest]
#[tokio::test]
async fn unreachable_hosts_map_to_transport_errors() {
    let endpoint = Url::parse("http://127.0.0.1:1").expect("URL parses");
    let client = JsonPlaceholderClient::new(endpoint).expect("client builds");

    let error = client
        .list_posts(Some(1))
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(error, PostsApiError::Transport { .. }));
}

#[rstest]
#[tokio::test]
async fn slow_responses_map_to_timeouts_when_a_timeout_is_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([post_json(1, "late")]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let endpoint = Url::parse(&server.uri()).expect("mock server URI parses");
    let client = JsonPlaceholderClient::with_timeout(endpoint, Some(Duration::from_millis(50)))
        .expect("client builds");

    let error = client
        .list_posts(Some(1))
        .await
        .expect_err("response arrives after the timeout");

    assert!(matches!(error, PostsApiError::Timeout { .. }));
}
