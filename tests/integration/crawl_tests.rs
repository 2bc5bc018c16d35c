//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use chrono::Utc;
use tempfile::tempdir;
use webcrawler::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use webcrawler::output::{generate_markdown_summary, CrawlStatistics, CrawlSummary};
use webcrawler::{CrawlOutcome, Crawler, MediaKind, Page, PageState, Storage};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given number of fetchers
fn create_test_config(fetchers: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            fetchers,
            request_timeout: 10,
            connect_timeout: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        output: OutputConfig { summary_path: None },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

fn find<'a>(pages: &'a [Page], url: &str) -> &'a Page {
    pages
        .iter()
        .find(|p| p.url() == url)
        .unwrap_or_else(|| panic!("no page for {}", url))
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            <a href="/about">About</a>
            <a href="http://external.test/page">External</a>
            <a href="/missing">Broken</a>
            <img src="logo.png">
        </body></html>"#,
    )
    .await;
    mount_html(
        &mock_server,
        "/about",
        r#"<html><head><title>About</title></head><body><a href="/">Home</a></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut crawler = Crawler::new(&create_test_config(2)).unwrap();
    let outcome = crawler.crawl(&base_url).await.unwrap();
    assert_eq!(outcome, CrawlOutcome::Complete);

    let pages = crawler.pages();
    assert_eq!(pages.len(), 3);
    assert!(pages.iter().all(|p| p.state == PageState::Ready));

    let home = find(&pages, &base_url);
    assert_eq!(home.status_code, 200);
    assert_eq!(home.title.as_deref(), Some("Home"));
    assert!(home.external_links.contains("http://external.test/page"));
    assert_eq!(home.media_of(MediaKind::Image).map(|s| s.len()), Some(1));
    assert_eq!(home.media_count(), 1);

    let missing = find(&pages, &format!("{}/missing", base_url));
    assert_eq!(missing.status_code, 404);
    assert!(missing.raw_markup.is_none());

    assert_eq!(
        find(&pages, &format!("{}/about", base_url)).title.as_deref(),
        Some("About")
    );

    // Only the three site pages were requested
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(html("<html><body></body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut crawler = Crawler::new(&create_test_config(1)).unwrap();
    crawler.crawl(&mock_server.uri()).await.unwrap();

    assert_eq!(crawler.pages()[0].status_code, 200);
}

#[tokio::test]
async fn test_content_type_handling() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/archive.zip">Archive</a>
            <a href="/notes.txt">Notes</a>
        </body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/archive.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x50u8, 0x4b, 0x03, 0x04], "application/zip"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/hidden">not html</a>"#.to_string(), "text/plain"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut crawler = Crawler::new(&create_test_config(2)).unwrap();
    crawler.crawl(&base_url).await.unwrap();

    let pages = crawler.pages();
    assert_eq!(pages.len(), 3);

    let zip = find(&pages, &format!("{}/archive.zip", base_url));
    assert_eq!(zip.status_code, 200);
    assert_eq!(zip.mime_type.as_deref(), Some("application/zip"));
    assert!(zip.raw_markup.is_none());
    assert!(zip.internal_links.is_empty());

    let notes = find(&pages, &format!("{}/notes.txt", base_url));
    assert_eq!(notes.mime_type.as_deref(), Some("text/plain"));
    assert!(notes.raw_markup.is_none());
}

#[tokio::test]
async fn test_many_pages_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    const PAGES: usize = 25;

    let links: String = (0..PAGES)
        .map(|i| format!(r#"<a href="/page{}/">{}</a>"#, i, i))
        .collect();
    mount_html(&mock_server, "/", &format!("<html><body>{}</body></html>", links)).await;

    // Every page links to its neighbours and back home
    for i in 0..PAGES {
        let body = format!(
            r#"<html><body><a href="/page{}">next</a><a href="{}/">home</a><a href="/page{}#top">anchor</a></body></html>"#,
            (i + 1) % PAGES,
            base_url,
            (i + 2) % PAGES
        );
        mount_html(&mock_server, &format!("/page{}", i), &body).await;
    }

    let mut crawler = Crawler::new(&create_test_config(5)).unwrap();
    let outcome = crawler.crawl(&base_url).await.unwrap();

    assert_eq!(outcome, CrawlOutcome::Complete);
    assert_eq!(crawler.pages().len(), PAGES + 1);
    assert!(!crawler.storage().has_pending());

    // Each mock expects exactly one hit; verified when the server drops
    mock_server.verify().await;
}

#[tokio::test]
async fn test_redirect_followed_under_requested_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/", r#"<html><body><a href="/old">Old</a></body></html>"#).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/new",
        "<html><head><title>New</title></head><body></body></html>",
    )
    .await;

    let mut crawler = Crawler::new(&create_test_config(1)).unwrap();
    crawler.crawl(&base_url).await.unwrap();

    let pages = crawler.pages();
    assert_eq!(pages.len(), 2);
    let old = find(&pages, &format!("{}/old", base_url));
    assert_eq!(old.status_code, 200);
    assert_eq!(old.title.as_deref(), Some("New"));
}

#[tokio::test]
async fn test_connection_failure_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Same host on a port nobody listens on: internal, but unreachable
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="http://127.0.0.1:1/down">Down</a></body></html>"#,
    )
    .await;

    let mut crawler = Crawler::new(&create_test_config(2)).unwrap();
    let outcome = crawler.crawl(&base_url).await.unwrap();
    assert_eq!(outcome, CrawlOutcome::Complete);

    let pages = crawler.pages();
    assert_eq!(pages.len(), 2);
    let down = find(&pages, "http://127.0.0.1:1/down");
    assert_eq!(down.status_code, 0);
    assert!(down.mime_type.is_none());
    assert_eq!(down.state, PageState::Ready);
}

#[tokio::test]
async fn test_summary_report_written() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body><a href="/gone">Gone</a></body></html>"#,
    )
    .await;

    let mut crawler = Crawler::new(&create_test_config(1)).unwrap();
    let started_at = Utc::now();
    let outcome = crawler.crawl(&base_url).await.unwrap();
    let pages = crawler.pages();

    let summary = CrawlSummary::new(
        base_url.as_str(),
        started_at,
        Utc::now(),
        outcome,
        crawler.fetchers(),
        CrawlStatistics::from_pages(&pages),
    );

    let dir = tempdir().unwrap();
    let report = dir.path().join("summary.md");
    generate_markdown_summary(&summary, &pages, &report).unwrap();

    let content = std::fs::read_to_string(&report).unwrap();
    assert!(content.contains(&format!("- **Seed**: {}", base_url)));
    assert!(content.contains("- **Outcome**: complete"));
    assert!(content.contains("- **Total Pages**: 2"));
    assert!(content.contains(&format!("| {}/gone | 404 |", base_url)));
}
