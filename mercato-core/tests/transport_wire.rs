use httpmock::prelude::*;
use mercato_core::transport::{HttpTransport, ReqwestTransport, TransportOutcome, TransportRequest};

#[tokio::test]
async fn success_returns_raw_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/quote").query_param("symbol", "DIA");
            then.status(200).body(r#"{"c":430.1}"#);
        })
        .await;

    let transport = ReqwestTransport::new();
    let out = transport
        .send(TransportRequest::get(
            server.url("/quote?symbol=DIA"),
        ))
        .await;

    mock.assert_async().await;
    match out {
        TransportOutcome::Success { body } => assert_eq!(body, r#"{"c":430.1}"#),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_is_classified_not_raised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/quote");
            then.status(429).body("slow down");
        })
        .await;

    let transport = ReqwestTransport::new();
    let out = transport.send(TransportRequest::get(server.url("/quote"))).await;

    assert!(matches!(out, TransportOutcome::HttpError { status: 429 }));
}

#[tokio::test]
async fn headers_and_post_body_are_forwarded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rpc")
                .header("content-type", "application/json")
                .header("x-probe", "1")
                .body(r#"{"method":"getBalance"}"#);
            then.status(200).body("{}");
        })
        .await;

    let transport = ReqwestTransport::new();
    let out = transport
        .send(
            TransportRequest::post_json(server.url("/rpc"), r#"{"method":"getBalance"}"#)
                .header("x-probe", "1"),
        )
        .await;

    mock.assert_async().await;
    assert!(out.is_success());
}

#[tokio::test]
async fn unreachable_origin_is_a_failure_value() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let transport = ReqwestTransport::new();
    let out = transport
        .send(TransportRequest::get(format!("http://127.0.0.1:{port}/")))
        .await;

    assert!(matches!(out, TransportOutcome::Failure { .. }));
}
