pub mod root;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jsearch::handlers::handle_job_search;
use crate::resume::handlers::handle_parse_resume;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api = Router::new()
        // Job Search
        .route("/job-search", get(handle_job_search))
        // Resume Parser
        .route(
            "/resume/parse",
            post(handle_parse_resume).layer(DefaultBodyLimit::max(upload_limit)),
        );

    Router::new()
        .route("/", get(root::root_handler))
        .route("/health", get(root::health_handler))
        .nest("/api", api)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::RawQuery,
        http::{header, HeaderMap, Request, StatusCode},
        response::IntoResponse,
        Json,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::jsearch::JSearchClient;
    use crate::resume::extract::tests::build_docx;
    use crate::resume::extractor::HeuristicExtractor;

    const BOUNDARY: &str = "----job-search-api-test-boundary";

    fn test_state(base_url: &str) -> AppState {
        let config = Config::for_tests(base_url);
        AppState {
            jsearch: JSearchClient::new(&config).unwrap(),
            extractor: Arc::new(HeuristicExtractor),
            config,
        }
    }

    /// Serves `app` on an ephemeral local port and returns its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A base URL nothing listens on.
    async fn dead_upstream() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn upload_request(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/resume/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn sample_upstream_payload() -> Value {
        json!({
            "status": "OK",
            "request_id": "7c3e-41f2",
            "parameters": {"query": "developer jobs in chicago", "page": 1, "num_pages": 1},
            "data": [{
                "job_id": "abc==",
                "employer_name": "Acme Café",
                "employer_logo": null,
                "job_title": "Rust Developer",
                "job_is_remote": true,
                "job_min_salary": 120000.5,
                "job_highlights": {"Qualifications": ["3+ years Rust", "SQL"]}
            }]
        })
    }

    #[tokio::test]
    async fn test_root_returns_welcome_message() {
        let app = build_router(test_state(&dead_upstream().await));
        let (status, body) = send(app, get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Welcome to the Job Search API. Use /docs to view the API documentation."})
        );
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(&dead_upstream().await));
        let (status, body) = send(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "job-search-api");
    }

    #[tokio::test]
    async fn test_job_search_echoes_upstream_json_unchanged() {
        let upstream = Router::new().route(
            "/search",
            get(|| async { Json(sample_upstream_payload()) }),
        );
        let app = build_router(test_state(&spawn_upstream(upstream).await));

        let (status, body) = send(
            app,
            get_request("/api/job-search?query=developer%20jobs%20in%20chicago"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, sample_upstream_payload());
    }

    #[tokio::test]
    async fn test_job_search_keeps_upstream_bytes_and_key_order() {
        const RAW: &str = r#"{"status":"OK","request_id":"x","parameters":{"query":"rust","page":1},"data":[{"job_title":"T","employer_name":"E"}]}"#;
        let upstream = Router::new().route(
            "/search",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], RAW) }),
        );
        let app = build_router(test_state(&spawn_upstream(upstream).await));

        let response = app
            .oneshot(get_request("/api/job-search?query=rust"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], RAW.as_bytes());
    }

    #[tokio::test]
    async fn test_job_search_forwards_encoded_query_defaults_and_headers() {
        let upstream = Router::new().route(
            "/search",
            get(|RawQuery(query): RawQuery, headers: HeaderMap| async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                };
                Json(json!({
                    "raw_query": query,
                    "key": header("x-rapidapi-key"),
                    "host": header("x-rapidapi-host"),
                }))
            }),
        );
        let app = build_router(test_state(&spawn_upstream(upstream).await));

        // "C++ & Go / remote" as the client would send it
        let (status, body) = send(
            app,
            get_request("/api/job-search?query=C%2B%2B%20%26%20Go%20%2F%20remote&page=2"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["raw_query"],
            "query=C%2B%2B%20%26%20Go%20%2F%20remote&page=2&num_pages=1&country=us&date_posted=all"
        );
        assert_eq!(body["key"], "test-key");
        assert_eq!(body["host"], "jsearch.p.rapidapi.com");
    }

    #[tokio::test]
    async fn test_job_search_mirrors_upstream_error_status() {
        let upstream = Router::new().route(
            "/search",
            get(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"message": "You have exceeded the rate limit per second"})),
                )
                    .into_response()
            }),
        );
        let app = build_router(test_state(&spawn_upstream(upstream).await));

        let (status, body) = send(app, get_request("/api/job-search?query=rust")).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["message"], "You have exceeded the rate limit per second");
    }

    #[tokio::test]
    async fn test_job_search_non_json_body_is_bad_gateway() {
        let upstream = Router::new().route("/search", get(|| async { "<html>oops</html>" }));
        let app = build_router(test_state(&spawn_upstream(upstream).await));

        let (status, body) = send(app, get_request("/api/job-search?query=rust")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_INVALID_RESPONSE");
    }

    #[tokio::test]
    async fn test_job_search_unreachable_upstream_is_bad_gateway() {
        let app = build_router(test_state(&dead_upstream().await));
        let (status, body) = send(app, get_request("/api/job-search?query=rust")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_job_search_rejects_blank_or_missing_query() {
        let base = dead_upstream().await;

        let (status, body) = send(
            build_router(test_state(&base)),
            get_request("/api/job-search?query=%20%20"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send(build_router(test_state(&base)), get_request("/api/job-search")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("query"));

        let (status, body) = send(
            build_router(test_state(&base)),
            get_request("/api/job-search?query=rust&page=first"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_parse_plain_text_resume() {
        let app = build_router(test_state(&dead_upstream().await));
        let resume = "Jane Doe\nAustin, TX | jane@example.com | +1 512-555-0199\n\n\
                      Skills\nRust, PostgreSQL, Teamwork\n\n\
                      Experience\nBackend Engineer at Initech | 2019 - 2023\n- Shipped billing APIs\n";

        let (status, body) = send(
            app,
            upload_request("file", "jane.txt", "text/plain", resume.as_bytes()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["basic_info"]["name"], "Jane Doe");
        assert_eq!(body["basic_info"]["email"], "jane@example.com");
        assert_eq!(body["basic_info"]["phone"], "+1 512-555-0199");
        assert_eq!(body["basic_info"]["location"], "Austin, TX");
        assert_eq!(body["soft_skills"], json!(["Teamwork"]));
        assert_eq!(body["experience"][0]["company"], "Initech");
        assert_eq!(body["experience"][0]["duration"], "2019 - 2023");
        assert_eq!(body["years_of_experience"], 4);
    }

    #[tokio::test]
    async fn test_parse_docx_resume() {
        let app = build_router(test_state(&dead_upstream().await));
        let docx = build_docx(&[
            "John Smith",
            "john.smith@example.org",
            "Education",
            "Master of Science in Data Science",
            "University of Michigan, 2020",
            "Certifications",
            "Google Data Analytics Certificate",
        ]);

        let (status, body) = send(
            app,
            upload_request(
                "file",
                "john.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                &docx,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["basic_info"]["name"], "John Smith");
        assert_eq!(body["education"][0]["degree"], "Master of Science in Data Science");
        assert_eq!(body["education"][0]["institution"], "University of Michigan");
        assert_eq!(body["education"][0]["year"], "2020");
        assert_eq!(body["certifications"], json!(["Google Data Analytics Certificate"]));
    }

    #[tokio::test]
    async fn test_parse_rejects_legacy_doc() {
        let app = build_router(test_state(&dead_upstream().await));
        let (status, body) = send(
            app,
            upload_request("file", "cv.doc", "application/msword", b"binary"),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_parse_requires_file_field() {
        let app = build_router(test_state(&dead_upstream().await));
        let (status, body) = send(
            app,
            upload_request("attachment", "cv.txt", "text/plain", b"Jane Doe"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_parse_rejects_empty_text() {
        let app = build_router(test_state(&dead_upstream().await));
        let (status, body) = send(app, upload_request("file", "cv.txt", "text/plain", b" \n\n ")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_parse_rejects_oversized_upload() {
        let app = build_router(test_state(&dead_upstream().await));
        // one byte over the 1 MB test limit, still inside the body limit
        let big = vec![b'a'; 1024 * 1024 + 1];
        let (status, body) = send(app, upload_request("file", "cv.txt", "text/plain", &big)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_parse_body_over_router_limit_uses_error_envelope() {
        let app = build_router(test_state(&dead_upstream().await));
        let huge = vec![b'a'; 2 * 1024 * 1024];
        let (status, body) = send(app, upload_request("file", "cv.txt", "text/plain", &huge)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_parse_rejects_non_multipart_body() {
        let app = build_router(test_state(&dead_upstream().await));
        let request = Request::builder()
            .method("POST")
            .uri("/api/resume/parse")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"file":"cv"}"#))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
