use sitescribe::config::Settings;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An HTML response with the given body markup
pub fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(
            format!("<html><body>{}</body></html>", body),
            "text/html; charset=utf-8",
        )
}

/// Mounts an HTML page that is expected to be fetched `times` times
pub async fn mount_page(server: &MockServer, route: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Settings with short timeouts, writing to `output`
pub fn test_settings(output: &Path, max_depth: u32, max_pages: u32) -> Settings {
    let mut settings = Settings::default();
    settings.crawler.max_depth = max_depth;
    settings.crawler.max_pages = max_pages;
    settings.crawler.navigation_timeout_secs = 5;
    settings.session.user_agent = "sitescribe-test/1.0".to_string();
    settings.output.path = output.to_path_buf();
    settings
}
