use crate::common::{html, mount_page, test_settings};
use sitescribe::config::CrawlConfig;
use sitescribe::crawler::{crawl, traverse, HttpSession, LinkFilter};
use sitescribe::output::{TextRenderer, PAGE_DELIMITER};
use sitescribe::{run, NormalizationPolicy, ScribeError, SkipReason};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_small_site_transcribed_in_depth_first_order() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Home text</p><a href="/p1">One</a><a href="/p2">Two</a>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/p1",
        r#"<p>Page one</p><a href="/">Home</a><a href="/p2">Two</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/p2", "<p>Page two</p>", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("site.txt");
    let settings = test_settings(&output, 2, 10);

    let stats = run(&settings, &format!("{}/", server.uri()))
        .await
        .expect("Run failed");

    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.pages_failed, 0);
    assert_eq!(stats.skipped_for(SkipReason::BudgetExhausted), 0);

    let text = std::fs::read_to_string(&output).unwrap();
    let sections: Vec<&str> = text.split(PAGE_DELIMITER).collect();
    assert_eq!(sections.len(), 3);
    assert!(sections[0].starts_with("Home text"));
    assert!(sections[1].starts_with("Page one"));
    assert!(sections[2].starts_with("Page two"));
}

#[tokio::test]
async fn test_page_budget_of_one_fetches_only_seed() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Seed only</p><a href="/p1">One</a><a href="/p2">Two</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/p1", "<p>Page one</p>", 0).await;
    mount_page(&server, "/p2", "<p>Page two</p>", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("seed.txt");
    let settings = test_settings(&output, 2, 1);

    let stats = run(&settings, &format!("{}/", server.uri())).await.unwrap();

    assert_eq!(stats.pages_fetched, 1);
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Seed only"));
    assert!(!text.contains(PAGE_DELIMITER));
}

#[tokio::test]
async fn test_invalid_seed_produces_no_document() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.pdf");
    let settings = test_settings(&output, 2, 10);

    let result = run(&settings, "not a url").await;

    match result {
        Err(ScribeError::InvalidSeedUrl { input, .. }) => assert_eq!(input, "not a url"),
        other => panic!("Expected InvalidSeedUrl, got {:?}", other.map(|s| s.pages_fetched)),
    }
    assert!(!output.exists());

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_slow_page_times_out_and_traversal_continues() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Root</p><a href="/slow">Slow</a><a href="/p2">Two</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<p>Too late</p>").set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    mount_page(&server, "/p2", "<p>After the slow page</p>", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("slow.txt");
    let mut settings = test_settings(&output, 2, 2);
    settings.crawler.navigation_timeout_secs = 1;

    let stats = run(&settings, &format!("{}/", server.uri())).await.unwrap();

    // The timed-out page does not consume the budget of two
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.pages_failed, 1);
    assert!(stats.failures[0].url.ends_with("/slow"));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Root"));
    assert!(text.contains("After the slow page"));
    assert!(!text.contains("Too late"));
}

#[tokio::test]
async fn test_error_status_and_non_html_are_isolated() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Root</p><a href="/missing">Gone</a><a href="/api">Data</a><a href="/ok">Ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"not": "html"}"#)
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", r#"<p>Fine</p><a href="/missing">Gone</a>"#, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("mixed.txt");
    let stats = run(&test_settings(&output, 3, 10), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.pages_failed, 2);

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text, format!("Root\nGoneDataOk{}Fine\nGone", PAGE_DELIMITER));
}

#[tokio::test]
async fn test_cross_origin_links_not_followed_by_default() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    mount_page(
        &site,
        "/",
        &format!(r#"<p>Home</p><a href="{}/elsewhere">Away</a>"#, other.uri()),
        1,
    )
    .await;
    mount_page(&other, "/elsewhere", "<p>Other site</p>", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("home.txt");
    let stats = run(&test_settings(&output, 2, 10), &format!("{}/", site.uri()))
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.links_rejected, 1);
}

#[tokio::test]
async fn test_cross_origin_allowed_when_configured() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    mount_page(
        &site,
        "/",
        &format!(r#"<p>Home</p><a href="{}/elsewhere">Away</a>"#, other.uri()),
        1,
    )
    .await;
    mount_page(&other, "/elsewhere", "<p>Other site</p>", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("both.txt");
    let mut settings = test_settings(&output, 2, 10);
    settings.crawler.same_origin = false;

    let stats = run(&settings, &format!("{}/", site.uri())).await.unwrap();

    assert_eq!(stats.pages_fetched, 2);
    assert!(std::fs::read_to_string(&output)
        .unwrap()
        .contains("Other site"));
}

#[tokio::test]
async fn test_blocked_extensions_never_requested() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Files</p><a href="/report.pdf">PDF</a><a href="/photo.JPG">Photo</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/report.pdf", "", 0).await;
    mount_page(&server, "/photo.JPG", "", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("files.txt");
    let stats = run(&test_settings(&output, 2, 10), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.links_rejected, 2);
}

#[tokio::test]
async fn test_redirected_page_resolves_links_from_final_location() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<p>Root</p><a href="/old">Old</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/docs/new"),
        )
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/docs/new",
        r#"<p>Moved here</p><a href="child">Child</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/docs/child", "<p>Child page</p>", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("redirect.txt");
    let stats = run(&test_settings(&output, 3, 10), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 3);
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Moved here"));
    assert!(text.contains("Child page"));
}

#[tokio::test]
async fn test_redirect_into_linked_page_fetches_it_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<p>Root</p><a href="/a">A</a><a href="/b">B</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/b"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/b", "<p>Landing page</p>", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("landing.txt");
    let stats = run(&test_settings(&output, 2, 10), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.skipped_for(SkipReason::AlreadyVisited), 1);

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text.matches("Landing page").count(), 1);
}

#[tokio::test]
async fn test_canonical_policy_crawls_trailing_slash_site() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/docs/",
        r#"<p>Docs index</p><a href="intro">Intro</a>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/docs/intro",
        r#"<p>Introduction</p><a href="/docs">Back</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/docs", "<p>Never served</p>", 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("docs.txt");
    let mut settings = test_settings(&output, 3, 10);
    settings.crawler.normalization = NormalizationPolicy::Canonical;

    let stats = run(&settings, &format!("{}/docs/", server.uri()))
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.pages_failed, 0);

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text, format!("Docs index\nIntro{}Introduction\nBack", PAGE_DELIMITER));
}

#[tokio::test]
async fn test_crawl_closes_http_session() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<p>Only</p>", 1).await;

    let seed = url::Url::parse(&format!("{}/", server.uri())).unwrap();
    let config = CrawlConfig::new(seed);
    let filter = LinkFilter::with_default_blocklist(&config.seed, true).unwrap();
    let mut session = HttpSession::new(&Default::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("only.txt");

    let stats = crawl(
        &config,
        &filter,
        &mut session,
        &TextRenderer::default(),
        &output,
    )
    .await
    .unwrap();

    assert_eq!(stats.pages_fetched, 1);
    assert!(session.is_closed());
}

#[tokio::test]
async fn test_traverse_is_deterministic_against_same_site() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/b">B</a><a href="/a">A</a><a href="/c">C</a>"#,
        2,
    )
    .await;
    mount_page(&server, "/a", r#"<p>A</p><a href="/c">C</a>"#, 2).await;
    mount_page(&server, "/b", r#"<p>B</p><a href="/a">A</a>"#, 2).await;
    mount_page(&server, "/c", "<p>C</p>", 2).await;

    let seed = url::Url::parse(&format!("{}/", server.uri())).unwrap();
    let config = CrawlConfig::new(seed);
    let filter = LinkFilter::with_default_blocklist(&config.seed, true).unwrap();

    let mut first_session = HttpSession::new(&Default::default()).unwrap();
    let first = traverse(&config, &filter, &mut first_session).await;
    let mut second_session = HttpSession::new(&Default::default()).unwrap();
    let second = traverse(&config, &filter, &mut second_session).await;

    assert_eq!(first.corpus.joined_text(), second.corpus.joined_text());

    let order: Vec<&str> = first
        .corpus
        .entries()
        .iter()
        .map(|entry| entry.url.path())
        .collect();
    assert_eq!(order, vec!["/", "/b", "/a", "/c"]);
}
