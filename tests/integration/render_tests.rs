use crate::common::{mount_page, test_settings};
use sitescribe::config::{OutputFormat, PageLayout};
use sitescribe::run;
use wiremock::MockServer;

async fn two_page_site() -> MockServer {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<h1>Welcome</h1><p>Caf&eacute; menu</p><a href="/about">About</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/about", "<p>About this site</p>", 1).await;
    server
}

#[tokio::test]
async fn test_pdf_document_written() {
    let server = two_page_site().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.pdf");

    let stats = run(&test_settings(&output, 2, 10), &format!("{}/", server.uri()))
        .await
        .unwrap();
    assert_eq!(stats.pages_fetched, 2);

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn test_pdf_page_per_entry_layout() {
    let server = two_page_site().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("pages.pdf");

    let mut settings = test_settings(&output, 2, 10);
    settings.output.layout = PageLayout::PagePerEntry;

    run(&settings, &format!("{}/", server.uri())).await.unwrap();

    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_markdown_document_written() {
    let server = two_page_site().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("transcript.out");

    let mut settings = test_settings(&output, 2, 10);
    settings.output.format = Some(OutputFormat::Markdown);
    settings.output.layout = PageLayout::PagePerEntry;

    run(&settings, &format!("{}/", server.uri())).await.unwrap();

    let md = std::fs::read_to_string(&output).unwrap();
    assert!(md.starts_with("# Transcript of "));
    assert!(md.contains("- **Pages**: 2"));
    assert!(md.contains("Welcome\nCafé menu\nAbout"));

    let first = md.find("## 1.").unwrap();
    let second = md.find("## 2.").unwrap();
    assert!(first < second);
    assert!(md[second..].contains("About this site"));
}

#[tokio::test]
async fn test_failing_seed_still_renders_empty_document() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("empty.txt");

    let stats = run(&test_settings(&output, 2, 10), &format!("{}/", server.uri()))
        .await
        .unwrap();

    assert_eq!(stats.pages_fetched, 0);
    assert_eq!(stats.pages_failed, 1);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}
