use std::time::Duration;

use docgrab_core::FileKind;
use docgrab_engine::{ContentRule, FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings::default()).expect("client")
}

#[tokio::test]
async fn fetcher_returns_body_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/download/", server.uri());
    let output = fetcher()
        .fetch(&url, ContentRule::Any)
        .await
        .expect("fetch ok");

    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, output.metadata.original_url);
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(output.metadata.byte_len, 15);
    assert_eq!(output.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing.pdf", server.uri());
    let err = fetcher()
        .fetch(&url, ContentRule::Kind(FileKind::Pdf))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_rejects_success_statuses_other_than_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/partial.zip"))
        .respond_with(ResponseTemplate::new(206).set_body_raw("PK", "application/zip"))
        .mount(&server)
        .await;

    let url = format!("{}/partial.zip", server.uri());
    let err = fetcher()
        .fetch(&url, ContentRule::Kind(FileKind::Zip))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(206));
}

#[tokio::test]
async fn fetcher_rejects_unexpected_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manual.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>login</html>", "text/html"))
        .mount(&server)
        .await;

    let url = format!("{}/manual.pdf", server.uri());
    let err = fetcher()
        .fetch(&url, ContentRule::Kind(FileKind::Pdf))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).expect("client");
    let url = format!("{}/slow", server.uri());

    let err = fetcher.fetch(&url, ContentRule::Any).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_unparseable_url() {
    let err = fetcher()
        .fetch("not a url", ContentRule::Any)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn content_type_with_non_ascii_parameter_is_still_matched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/brochure.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/pdf; name=\"é.pdf\"")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
        )
        .mount(&server)
        .await;

    let url = format!("{}/files/brochure.pdf", server.uri());
    let output = fetcher()
        .fetch(&url, ContentRule::Kind(FileKind::Pdf))
        .await
        .expect("non-ascii parameter accepted");

    let content_type = output.metadata.content_type.unwrap();
    assert!(content_type.starts_with("application/pdf"));
    assert!(content_type.contains("name="));
    assert_eq!(output.bytes, b"%PDF-1.4");
}
