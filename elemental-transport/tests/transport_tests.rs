//! Integration tests for the HTTP transport
//!
//! These tests run a local mockito server and verify the headers, bodies
//! and decoding behavior of real HTTP exchanges.

use elemental_transport::header::CONTENT_TYPE;
use elemental_transport::{
    ClientConfig, Credentials, Error, HeaderValue, HttpTransport, Request, ResponseBody,
};
use mockito::{Matcher, Server};
use rstest::rstest;
use serde_json::json;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

fn transport(server: &Server) -> HttpTransport {
    HttpTransport::new(ClientConfig::new(server.url())).unwrap()
}

#[tokio::test]
async fn test_get_sends_default_accept_and_decodes_xml() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/live_events/7")
        .match_header("accept", "application/xml")
        .match_header("x-auth-user", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/xml; charset=utf-8")
        .with_body(
            r#"<live_event href="/live_events/7">
                 <name>Studio</name>
                 <input><id>1</id></input>
                 <input><id>2</id></input>
               </live_event>"#,
        )
        .create_async()
        .await;

    let body = transport(&server)
        .send(Request::get("/api/live_events/7"))
        .await
        .expect("request should succeed");

    mock.assert_async().await;
    assert_eq!(
        body,
        ResponseBody::Xml(json!({"live_event": {
            "$": {"href": "/live_events/7"},
            "name": "Studio",
            "input": [{"id": "1"}, {"id": "2"}]
        }}))
    );
}

#[tokio::test]
async fn test_body_is_rendered_as_xml() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/live_events/3/adjust_audio_gain")
        .match_header("content-type", "application/xml")
        .match_body(Matcher::Exact(format!("{}<gain>-6</gain>", XML_DECL)))
        .with_status(200)
        .create_async()
        .await;

    let body = transport(&server)
        .send(Request::post("/api/live_events/3/adjust_audio_gain").body(json!({"gain": -6})))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body, ResponseBody::Raw(String::new()));
}

#[tokio::test]
async fn test_explicit_content_type_sends_body_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/presets/4")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(r#"{"name":"HD"}"#.to_string()))
        .with_status(200)
        .create_async()
        .await;

    transport(&server)
        .send(
            Request::put("/api/presets/4")
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(json!({"name": "HD"})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_credentials_add_auth_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/live_events/5/start")
        .match_header("x-auth-user", "u")
        .match_header("x-auth-expires", Matcher::Regex(r"^\d+$".to_string()))
        .match_header("x-auth-key", Matcher::Regex("^[0-9a-f]{32}$".to_string()))
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .create_async()
        .await;

    let config = ClientConfig::new(server.url()).with_credentials(Credentials::new("u", "k"));
    HttpTransport::new(config)
        .unwrap()
        .send(Request::post("/api/live_events/5/start"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/schedules")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("filter".into(), "a b".into()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    transport(&server)
        .send(Request::get("/api/schedules").query("page", "2").query("filter", "a b"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_rejects_with_raw_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/live_events/99")
        .with_status(404)
        .with_header("content-type", "application/xml")
        .with_body("<errors><error>Not found</error></errors>")
        .create_async()
        .await;

    let err = transport(&server)
        .send(Request::get("/api/live_events/99"))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status_code, body } => {
            assert_eq!(status_code, 404);
            assert_eq!(body, "<errors><error>Not found</error></errors>");
        }
        other => panic!("Expected Error::HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_300_rejects() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/presets")
        .with_status(300)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let config = ClientConfig::new(server.url()).with_parse_json(true);
    let err = HttpTransport::new(config)
        .unwrap()
        .send(Request::get("/api/presets"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(300));
    assert_eq!(err.body(), Some(r#"{"ok":true}"#));
}

#[rstest]
#[case("POST", 302)]
#[case("GET", 301)]
#[case("GET", 307)]
#[tokio::test]
async fn test_redirects_are_rejected_not_followed(#[case] method: &str, #[case] status: usize) {
    let mut server = Server::new_async().await;
    let _redirect = server
        .mock(method, "/api/live_events/5/start")
        .with_status(status)
        .with_header("location", "/elsewhere")
        .with_body("moved")
        .create_async()
        .await;
    let target = server
        .mock("GET", "/elsewhere")
        .with_status(200)
        .with_body("followed")
        .expect(0)
        .create_async()
        .await;

    let request = Request::new(method.parse().unwrap(), "/api/live_events/5/start");
    let err = transport(&server).send(request).await.unwrap_err();

    match err {
        Error::HttpStatus { status_code, body } => {
            assert_eq!(status_code as usize, status);
            assert_eq!(body, "moved");
        }
        other => panic!("Expected Error::HttpStatus, got {:?}", other),
    }
    target.assert_async().await;
}

#[tokio::test]
async fn test_json_parsing_depends_on_configuration() {
    let payload = r#"{"status":"running","pct_complete":40}"#;
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/live_events/1/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(payload)
        .expect(2)
        .create_async()
        .await;

    let raw = transport(&server)
        .send(Request::get("/api/live_events/1/status"))
        .await
        .unwrap();
    assert_eq!(raw, ResponseBody::Raw(payload.to_string()));

    let config = ClientConfig::new(server.url()).with_parse_json(true);
    let parsed = HttpTransport::new(config)
        .unwrap()
        .send(Request::get("/api/live_events/1/status"))
        .await
        .unwrap();
    assert_eq!(
        parsed,
        ResponseBody::Json(json!({"status": "running", "pct_complete": 40}))
    );
}

#[tokio::test]
async fn test_malformed_xml_rejects_with_status_and_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/presets/1")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body("<preset><name>HD</preset>")
        .create_async()
        .await;

    let err = transport(&server)
        .send(Request::get("/api/presets/1"))
        .await
        .unwrap_err();

    match err {
        Error::XmlDecode { status_code, body, .. } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, "<preset><name>HD</preset>");
        }
        other => panic!("Expected Error::XmlDecode, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let transport = HttpTransport::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();
    let err = transport.send(Request::get("/api/presets")).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}
