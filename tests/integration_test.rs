//! Integration tests for page fetching and full audit runs.
//!
//! These tests use a mock HTTP server (`httptest`) and never make real network
//! requests.

#[cfg(test)]
mod tests {
    use httptest::{matchers::*, responders::*, Expectation, Server};

    use seo_audit::config::MAX_RESPONSE_BODY_SIZE;
    use seo_audit::fetch::fetch_page;
    use seo_audit::initialization::init_client;
    use seo_audit::{run_audit, AnalyzerKind, AuditOutcome, Config, FetchError};

    const PAGE: &str = r#"<html><head>
        <title>Mock server landing page</title>
        <meta name="viewport" content="width=device-width">
        </head><body><h1>Landing</h1><p>Hello from the mock server.</p>
        <a href="/one">First page</a><a href="/two">Second page</a><a href="/three">Third page</a>
        </body></html>"#;

    fn config_for(url: String) -> Config {
        Config {
            url,
            timeout_seconds: 5,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/page"),
                request::headers(contains(key("accept"))),
                request::headers(contains(key("user-agent"))),
            ])
            .respond_with(status_code(200).body(PAGE)),
        );

        let url = format!("http://{}/page", server.addr());
        let client = init_client(&config_for(url.clone())).expect("client");
        let page = fetch_page(&client, &url).await.expect("fetch should succeed");

        assert_eq!(page.status, 200);
        assert_eq!(page.final_url, url);
        assert!(page.markup.contains("Mock server landing page"));
    }

    #[tokio::test]
    async fn test_fetch_page_404_is_http_status_error() {
        let server = Server::run();
        // Client errors are not retried: exactly one request
        server.expect(
            Expectation::matching(request::method_path("GET", "/missing"))
                .times(1)
                .respond_with(status_code(404).body("Not Found")),
        );

        let url = format!("http://{}/missing", server.addr());
        let client = init_client(&config_for(url.clone())).expect("client");
        let error = fetch_page(&client, &url).await.expect_err("404 should fail");

        assert_eq!(error, FetchError::HttpStatus(404));
        assert_eq!(error.kind(), "http_status");
    }

    #[tokio::test]
    async fn test_fetch_page_follows_redirects() {
        let server = Server::run();
        let final_url = format!("http://{}/final", server.addr());

        server.expect(
            Expectation::matching(request::method_path("GET", "/old"))
                .respond_with(status_code(301).append_header("Location", final_url.as_str())),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/final"))
                .respond_with(status_code(200).body(PAGE)),
        );

        let url = format!("http://{}/old", server.addr());
        let client = init_client(&config_for(url.clone())).expect("client");
        let page = fetch_page(&client, &url).await.expect("redirect should be followed");

        assert_eq!(page.final_url, final_url);
    }

    #[tokio::test]
    async fn test_fetch_page_redirect_limit_is_network_error() {
        let server = Server::run();
        let target = format!("http://{}/elsewhere", server.addr());
        // Redirect-limit failures are not retried: exactly one request
        server.expect(
            Expectation::matching(request::method_path("GET", "/start"))
                .times(1)
                .respond_with(status_code(302).append_header("Location", target.as_str())),
        );

        let url = format!("http://{}/start", server.addr());
        let config = Config {
            max_redirects: 0,
            ..config_for(url.clone())
        };
        let client = init_client(&config).expect("client");
        let error = fetch_page(&client, &url).await.expect_err("redirect limit");

        assert!(matches!(error, FetchError::Network(_)), "got {error:?}");
    }

    #[tokio::test]
    async fn test_fetch_page_oversized_body_is_network_error() {
        let server = Server::run();
        // Oversized bodies are not retried: exactly one request
        server.expect(
            Expectation::matching(request::method_path("GET", "/huge"))
                .times(1)
                .respond_with(status_code(200).body("x".repeat(MAX_RESPONSE_BODY_SIZE + 1))),
        );

        let url = format!("http://{}/huge", server.addr());
        let client = init_client(&config_for(url.clone())).expect("client");
        let error = fetch_page(&client, &url).await.expect_err("body over the cap");

        match error {
            FetchError::Network(message) => assert!(
                message.starts_with("response body exceeds"),
                "unexpected message: {message}"
            ),
            other => panic!("expected a network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_body_at_cap_is_accepted() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/full"))
                .respond_with(status_code(200).body("y".repeat(MAX_RESPONSE_BODY_SIZE))),
        );

        let url = format!("http://{}/full", server.addr());
        let client = init_client(&config_for(url.clone())).expect("client");
        let page = fetch_page(&client, &url).await.expect("body at the cap");
        assert_eq!(page.markup.len(), MAX_RESPONSE_BODY_SIZE);
    }

    #[tokio::test]
    async fn test_run_audit_fetches_and_audits() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/landing"))
                .respond_with(status_code(200).body(PAGE)),
        );

        let url = format!("http://{}/landing", server.addr());
        let config = Config {
            analyzers: vec![AnalyzerKind::Meta, AnalyzerKind::Links],
            ..config_for(url.clone())
        };
        let outcome = run_audit(&config).await.expect("run should complete");

        let report = match outcome {
            AuditOutcome::Completed(report) => report,
            other => panic!("expected a completed report, got {other:?}"),
        };
        assert_eq!(report.url, url);
        assert_eq!(report.results.len(), 2);

        let links = report.result(AnalyzerKind::Links).unwrap();
        assert_eq!(links.metric_u64("internalLinks"), Some(3));
        assert_eq!(links.score, 100);

        let meta = report.result(AnalyzerKind::Meta).unwrap();
        assert!(meta.issues.iter().any(|issue| issue.category() == "Security"));
    }

    #[tokio::test]
    async fn test_run_audit_reports_fetch_failure() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/gone"))
                .respond_with(status_code(410)),
        );

        let url = format!("http://{}/gone", server.addr());
        let outcome = run_audit(&config_for(url.clone())).await.expect("run should complete");

        match outcome {
            AuditOutcome::Failed(failed) => {
                assert_eq!(failed.url, url);
                assert_eq!(failed.kind, "http_status");
                assert!(failed.message.contains("410"));
            }
            other => panic!("expected a failed report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_audit_rejects_invalid_url() {
        let config = config_for("ftp://example.com/file".to_string());
        let error = run_audit(&config).await.expect_err("ftp is unsupported");
        assert!(format!("{error:#}").contains("Unsupported URL scheme"));
    }
}
