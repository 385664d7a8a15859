//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let server = &config.server;
    let base = server.api_base();

    let mut router = Router::new()
        // Service descriptor
        .route(&base, get(handlers::service_descriptor))
        .route(&format!("{}/", base), get(handlers::service_descriptor))
        // Toolchain info passthroughs
        .route(&format!("{}/help", base), get(handlers::toolchain_help))
        .route(
            &format!("{}/is", base),
            get(handlers::toolchain_instruction_set),
        )
        .route(
            &format!("{}/instruction-set", base),
            get(handlers::toolchain_instruction_set),
        )
        .route(&format!("{}/version", base), get(handlers::toolchain_version))
        // Examples
        .route(&format!("{}/example", base), get(handlers::random_example))
        // Programs
        .route(&format!("{}/verify", base), post(handlers::verify_program))
        .route(&format!("{}/compile", base), post(handlers::compile_program));

    // Web frontend
    if let Some(static_dir) = &server.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    // Build router with middleware
    router
        .layer(DefaultBodyLimit::max(server.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origin))
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(e) => {
            // No allowed origin at all rather than a wildcard
            tracing::warn!("ignoring invalid CORS origin {:?}: {}", origin, e);
            layer
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::api::rest::state::testing::state_with_script;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bproc_toolchain::{Envelope, EnvelopeKind};
    use std::path::Path;
    use tower::ServiceExt;

    /// `$1` is the action flag, `$2` the artifact, `$3` the format flag.
    const TOOLCHAIN: &str = r#"
case "$1" in
  --help) echo 'usage: bproc-cli [options]' ;;
  --instruction-set) echo 'NOP ADD SUB JMP HALT' ;;
  --version) echo 'bproc-cli 1.0' ;;
  --verify) cat "$2" ;;
  --compile) printf '%s:' "$3"; cat "$2" ;;
esac
"#;

    fn app(scratch: &Path) -> Router {
        create_router(state_with_script(TOOLCHAIN, scratch))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Envelope) {
        let resp = app.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn workspace_entries(scratch: &Path) -> usize {
        std::fs::read_dir(scratch.join("workspace"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn descriptor_does_not_call_toolchain() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        for uri in ["/api", "/api/"] {
            let (status, envelope) = send(&app, get_req(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(envelope.kind, EnvelopeKind::Info);
            assert!(envelope.message.contains("/api/verify"));
        }
    }

    #[tokio::test]
    async fn info_routes_forward_flags() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        let cases = [
            ("/api/help", "usage: bproc-cli [options]\n"),
            ("/api/is", "NOP ADD SUB JMP HALT\n"),
            ("/api/instruction-set", "NOP ADD SUB JMP HALT\n"),
            ("/api/version", "bproc-cli 1.0\n"),
        ];
        for (uri, expected) in cases {
            let (status, envelope) = send(&app, get_req(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(envelope, Envelope::info(expected));
        }
    }

    #[tokio::test]
    async fn verify_returns_toolchain_output() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        let (status, envelope) =
            send(&app, post_json("/api/verify", serde_json::json!({"program": "NOP"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope, Envelope::info("NOP"));
    }

    #[tokio::test]
    async fn verify_ignores_type() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        for body in [
            serde_json::json!({"program": "NOP"}),
            serde_json::json!({"program": "NOP", "type": "xyz"}),
            serde_json::json!({"program": "NOP", "type": 12}),
        ] {
            let (status, envelope) = send(&app, post_json("/api/verify", body)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(envelope, Envelope::info("NOP"));
        }
    }

    #[tokio::test]
    async fn compile_passes_format() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        let (status, envelope) = send(
            &app,
            post_json(
                "/api/compile",
                serde_json::json!({"program": "NOP", "type": "bin"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope, Envelope::info("--bin:NOP"));
    }

    #[tokio::test]
    async fn compile_rejects_unknown_type() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        let (status, envelope) = send(
            &app,
            post_json(
                "/api/compile",
                serde_json::json!({"program": "NOP", "type": "xyz"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.kind, EnvelopeKind::Error);
        assert!(envelope.message.contains("xyz type is not allowed"));
        assert_eq!(workspace_entries(scratch.path()), 0);
    }

    #[tokio::test]
    async fn compile_requires_type() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        let (status, envelope) =
            send(&app, post_json("/api/compile", serde_json::json!({"program": "NOP"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.message, "type is required");
    }

    #[tokio::test]
    async fn missing_program_is_bad_request() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        for uri in ["/api/verify", "/api/compile"] {
            let (status, envelope) =
                send(&app, post_json(uri, serde_json::json!({"type": "bin"}))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(envelope.is_error());
            assert!(envelope.message.contains("program"));
        }
        assert!(!scratch.path().join("workspace").exists());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        let request = Request::builder()
            .method("POST")
            .uri("/api/verify")
            .header("content-type", "application/json")
            .body(Body::from("{\"program\": "))
            .unwrap();
        let (status, envelope) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(envelope.is_error());
    }

    #[tokio::test]
    async fn example_reads_configured_directory() {
        let scratch = tempfile::tempdir().unwrap();
        let examples = scratch.path().join("examples");
        std::fs::create_dir(&examples).unwrap();
        std::fs::write(examples.join("halt.bpasm"), "HALT\n").unwrap();
        let app = app(scratch.path());

        let (status, envelope) = send(&app, get_req("/api/example")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope, Envelope::info("HALT\n"));
    }

    #[tokio::test]
    async fn missing_examples_directory_is_in_band_error() {
        let scratch = tempfile::tempdir().unwrap();
        let app = app(scratch.path());

        let (status, envelope) = send(&app, get_req("/api/example")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.kind, EnvelopeKind::Error);
        assert!(envelope.message.contains("examples"));
    }

    #[tokio::test]
    async fn concurrent_verifies_are_isolated() {
        let scratch = tempfile::tempdir().unwrap();
        let app = create_router(state_with_script(
            r#"sleep 0.05; cat "$2""#,
            scratch.path(),
        ));

        let requests = (0..12).map(|i| {
            let app = app.clone();
            async move {
                let program = format!("PROGRAM {}", i);
                let (status, envelope) = send(
                    &app,
                    post_json("/api/verify", serde_json::json!({"program": program})),
                )
                .await;
                (program, status, envelope)
            }
        });
        let handles: Vec<_> = requests.map(tokio::spawn).collect();

        for handle in handles {
            let (program, status, envelope) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(envelope, Envelope::info(program));
        }
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let scratch = tempfile::tempdir().unwrap();
        let mut state = state_with_script(TOOLCHAIN, scratch.path());
        let mut config = (*state.config).clone();
        config.server.max_body_size = 64;
        state.config = std::sync::Arc::new(config);
        let app = create_router(state);

        let program = "NOP\n".repeat(64);
        let (status, envelope) =
            send(&app, post_json("/api/verify", serde_json::json!({"program": program}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(envelope.is_error());
        assert!(!scratch.path().join("workspace").exists());
    }

    #[tokio::test]
    async fn static_assets_served_outside_prefix() {
        let scratch = tempfile::tempdir().unwrap();
        let assets = scratch.path().join("web");
        std::fs::create_dir(&assets).unwrap();
        std::fs::write(assets.join("index.html"), "<h1>bproc</h1>").unwrap();

        let mut state = state_with_script(TOOLCHAIN, scratch.path());
        let mut config = (*state.config).clone();
        config.server.static_dir = Some(assets);
        state.config = std::sync::Arc::new(config);
        let app = create_router(state);

        let resp = app.oneshot(get_req("/index.html")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>bproc</h1>");
    }
}
