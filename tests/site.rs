//! Router-level tests: every page must render (or degrade) with no
//! integrations configured and both upstream APIs unreachable.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;

use shawsite::app::build_router;
use shawsite::core::config::{AppConfig, BunnyConfig, Config, TeslaConfig};

fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
            max_upload_bytes: 1024 * 1024,
        },
        bunny: BunnyConfig {
            storage_url: "http://127.0.0.1:9".to_string(),
            storage_zone: None,
            access_key: None,
            pull_zone_url: "https://cdn.example.com".to_string(),
            portfolio_path: "portfolio".to_string(),
        },
        tesla: TeslaConfig {
            client_id: None,
            client_secret: None,
            refresh_token: None,
            redirect_uri: None,
            auth_base_url: "http://127.0.0.1:9".to_string(),
            fleet_base_url: "http://127.0.0.1:9".to_string(),
            vehicle_name: None,
            partner_domain: "example.com".to_string(),
            public_key_path: "does-not-exist.pem".to_string(),
        },
    }
}

fn server(config: Config) -> TestServer {
    TestServer::new(build_router(&config)).unwrap()
}

#[tokio::test]
async fn test_home_page_renders() {
    let server = server(test_config());
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("<html"));
}

#[tokio::test]
async fn test_static_pages_render() {
    let server = server(test_config());
    for path in ["/links", "/privacy-policy"] {
        let response = server.get(path).await;
        response.assert_status_ok();
    }
}

#[tokio::test]
async fn test_gallery_renders_empty_without_storage() {
    let server = server(test_config());

    for path in ["/photography", "/portfolio"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        assert!(response.text().contains("Nothing here yet"));
    }
}

#[tokio::test]
async fn test_gallery_renders_empty_when_storage_unreachable() {
    let mut config = test_config();
    // Configured but pointing at a closed local port
    config.bunny.storage_zone = Some("zone".to_string());
    config.bunny.access_key = Some("key".to_string());
    let server = server(config);

    let response = server.get("/photography").await;
    response.assert_status_ok();
    assert!(response.text().contains("Nothing here yet"));
}

#[tokio::test]
async fn test_tesla_status_degrades_to_error_json() {
    let server = server(test_config());

    let response = server.get("/api/tesla/status").await;
    response.assert_status_ok();

    let status: serde_json::Value = response.json();
    assert_eq!(status["state"], "error");
    assert!(status["battery_level"].is_null());
}

#[tokio::test]
async fn test_tesla_page_renders_despite_failed_fetch() {
    let server = server(test_config());
    let response = server.get("/tesla").await;
    response.assert_status_ok();
    assert!(response.text().contains("error"));
}

#[tokio::test]
async fn test_upload_rejects_disallowed_extension() {
    let server = server(test_config());

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"hello".to_vec())
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_upload_without_file_is_bad_request() {
    let server = server(test_config());

    let form = MultipartForm::new().add_text("description", "no file attached");

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_partner_key_missing_is_not_found() {
    let server = server(test_config());
    let response = server
        .get("/.well-known/appspecific/com.tesla.3p.public-key.pem")
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_partner_key_served_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let pem_path = dir.path().join("com.tesla.3p.public-key.pem");
    std::fs::write(&pem_path, "-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----\n")
        .unwrap();

    let mut config = test_config();
    config.tesla.public_key_path = pem_path.to_string_lossy().into_owned();
    let server = server(config);

    let response = server
        .get("/.well-known/appspecific/com.tesla.3p.public-key.pem")
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("BEGIN PUBLIC KEY"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = server(test_config());
    let response = server.get("/").await;
    assert!(response.headers().contains_key("x-request-id"));
}
