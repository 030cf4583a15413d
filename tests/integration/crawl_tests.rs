//! Integration tests for the harvester
//!
//! These tests use wiremock to serve search and product pages and run the
//! fetcher, the crawl loop and the export end-to-end.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wb_harvest::config::{
    Config, CrawlerConfig, HttpConfig, OutputConfig, OutputFormat, SiteConfig,
};
use wb_harvest::crawler::{
    build_http_client, fetch_document, fetch_url, Coordinator, FetchResult,
};
use wb_harvest::{crawl, CrawlOutcome};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/catalog/0/search.aspx";

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, output_dir: &str) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            search_path: SEARCH_PATH.to_string(),
            query: "пальто".to_string(),
            sort: "popular".to_string(),
        },
        crawler: CrawlerConfig {
            max_pages: 5,
            min_delay_ms: 0,
            max_delay_ms: 0,
        },
        output: OutputConfig {
            directory: output_dir.to_string(),
            format: OutputFormat::Csv,
            ..OutputConfig::default()
        },
        ..Config::default()
    }
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn search_page(cards: &[(&str, &str)]) -> String {
    let tiles: String = cards
        .iter()
        .map(|(id, href)| {
            format!(
                r#"<article class="product-card" data-nm-id="{id}">
                     <a class="product-card__main" href="{href}">card</a>
                   </article>"#
            )
        })
        .collect();
    format!("<html><body><div class=\"catalog\">{tiles}</div></body></html>")
}

fn product_page(title: &str, price: &str, rating: &str, country: &str) -> String {
    format!(
        r#"<html><body>
            <h1 class="product-page__title">{title}</h1>
            <span class="price-block__final-price">{price}</span>
            <table class="product-params">
              <tr><th>Состав</th><td>шерсть</td></tr>
              <tr><th>Страна производства</th><td>{country}</td></tr>
            </table>
            <span class="product-page__rating">{rating}</span>
            <p>12 отзывов</p>
        </body></html>"#
    )
}

async fn mount_search_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", page))
        .and(query_param("sort", "popular"))
        .respond_with(html_response(body))
        .mount(server)
        .await;
}

async fn mount_product(server: &MockServer, product_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(product_path))
        .respond_with(html_response(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_success_and_http_error() {
    let mock_server = MockServer::start().await;
    let client = build_http_client(&Default::default()).expect("client");

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_response("<html><body><h1>ok</h1></body></html>".into()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blocked"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let ok = fetch_url(&client, &format!("{}/ok", mock_server.uri()), &[]).await;
    assert!(matches!(ok, FetchResult::Success { status_code: 200, .. }));

    let blocked = fetch_url(&client, &format!("{}/blocked", mock_server.uri()), &[]).await;
    assert!(matches!(blocked, FetchResult::HttpError { status_code: 403 }));

    let doc = fetch_document(&client, &format!("{}/blocked", mock_server.uri()), &[]).await;
    assert!(doc.is_none());
}

#[tokio::test]
async fn test_fetch_network_error_is_absorbed() {
    let client = build_http_client(&Default::default()).expect("client");

    // Port 9 on localhost is closed in test environments
    let result = fetch_url(&client, "http://127.0.0.1:9/", &[]).await;
    assert!(matches!(result, FetchResult::NetworkError { .. }));

    let doc = fetch_document(&client, "http://127.0.0.1:9/", &[]).await;
    assert!(doc.is_none());
}

#[tokio::test]
async fn test_fetch_sends_query_params() {
    let mock_server = MockServer::start().await;
    let client = build_http_client(&Default::default()).expect("client");

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("search", "пальто"))
        .and(query_param("page", "2"))
        .respond_with(html_response("<html></html>".into()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = vec![("search", "пальто".to_string()), ("page", "2".to_string())];
    let doc = fetch_document(&client, &format!("{}/search", mock_server.uri()), &params).await;
    assert!(doc.is_some());
}

/// Accepts one connection and returns the raw request head
///
/// wiremock splits header values on commas, so the browser-like
/// User-Agent and Accept values are checked against the raw text.
async fn capture_one_request(listener: TcpListener) -> String {
    let (mut socket, _) = listener.accept().await.expect("accept");
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];

    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.expect("read");
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
    }

    let body = "<html></html>";
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await.expect("write");
    socket.shutdown().await.ok();

    String::from_utf8_lossy(&raw).to_lowercase()
}

#[tokio::test]
async fn test_fetch_sends_browser_header_values() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = tokio::spawn(capture_one_request(listener));

    let http = HttpConfig::default();
    let client = build_http_client(&http).expect("client");
    let doc = fetch_document(&client, &format!("http://{}/search", addr), &[]).await;
    assert!(doc.is_some());

    let request = server.await.expect("server task");
    assert!(http.user_agent.contains("Chrome/121"));
    assert!(request.contains(&format!("user-agent: {}\r\n", http.user_agent.to_lowercase())));
    assert!(request.contains(&format!("\r\naccept: {}\r\n", http.accept.to_lowercase())));
    assert!(request.contains(&format!(
        "accept-language: {}\r\n",
        http.accept_language.to_lowercase()
    )));
}

#[tokio::test]
async fn test_crawl_stops_at_empty_page_and_exports() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search_page(
        &mock_server,
        "1",
        search_page(&[
            ("101", "/catalog/101/detail.aspx"),
            ("102", "/catalog/102/detail.aspx"),
            ("103", "/catalog/103/detail.aspx"),
        ]),
    )
    .await;
    mount_search_page(&mock_server, "2", search_page(&[])).await;

    // Page 3 must never be requested
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "3"))
        .respond_with(html_response(search_page(&[("999", "/catalog/999/detail.aspx")])))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_product(
        &mock_server,
        "/catalog/101/detail.aspx",
        product_page("Пальто А", "9 000 ₽", "4,7", "Россия"),
    )
    .await;
    mount_product(
        &mock_server,
        "/catalog/102/detail.aspx",
        product_page("Пальто Б", "11 000 ₽", "4,7", "Россия"),
    )
    .await;
    // 103 is not mounted: wiremock answers 404 and the card is dropped

    let output_dir = tempfile::tempdir().expect("tempdir");
    let config = create_test_config(&base_url, &output_dir.path().to_string_lossy());

    let coordinator = Coordinator::new(config.clone()).expect("coordinator");
    let report = coordinator.run().await;
    assert_eq!(report.pages_scanned, 1);
    assert_eq!(report.cards_seen, 3);
    assert_eq!(report.products_dropped, 1);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].article_id.as_deref(), Some("101"));
    assert_eq!(
        report.records[0].product_url,
        format!("{}/catalog/101/detail.aspx", base_url)
    );
    assert_eq!(report.records[0].price, Some(9000));
    assert_eq!(report.records[0].feedback_count, Some(12));

    let outcome = crawl(config).await.expect("crawl");
    let summary = match outcome {
        CrawlOutcome::Exported(summary) => summary,
        CrawlOutcome::NothingCollected => panic!("expected records"),
    };
    assert_eq!(summary.full_rows, 2);
    assert_eq!(summary.filtered_rows, 1);

    let full = std::fs::read_to_string(&summary.full_path).expect("full export");
    let mut reader = csv::Reader::from_reader(full.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.len(), 13);
    assert!(!headers.iter().any(|h| h == "Страна производства"));
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.len() == 13));

    let filtered = std::fs::read_to_string(&summary.filtered_path).expect("filtered export");
    assert!(filtered.contains("Пальто А"));
    assert!(!filtered.contains("Пальто Б"));
}

#[tokio::test]
async fn test_failed_search_page_collects_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let output_dir = tempfile::tempdir().expect("tempdir");
    let config = create_test_config(&mock_server.uri(), &output_dir.path().to_string_lossy());

    let outcome = crawl(config).await.expect("crawl");
    assert!(matches!(outcome, CrawlOutcome::NothingCollected));

    // No files are written when nothing was collected
    let written = std::fs::read_dir(output_dir.path()).expect("read dir").count();
    assert_eq!(written, 0);
}

#[tokio::test]
async fn test_card_without_link_never_fetched() {
    let mock_server = MockServer::start().await;

    mount_search_page(
        &mock_server,
        "1",
        r#"<html><body>
            <div class="product-card" data-nm-id="1"><span>без ссылки</span></div>
            <div class="product-card" data-nm-id="2">
              <a class="product-card__link" href="/catalog/2/detail.aspx">ok</a>
            </div>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_search_page(&mock_server, "2", search_page(&[])).await;

    Mock::given(method("GET"))
        .and(path("/catalog/2/detail.aspx"))
        .respond_with(html_response(product_page("Пальто", "5 000 ₽", "5,0", "Китай")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output_dir = tempfile::tempdir().expect("tempdir");
    let config = create_test_config(&mock_server.uri(), &output_dir.path().to_string_lossy());

    let report = Coordinator::new(config).expect("coordinator").run().await;
    assert_eq!(report.cards_seen, 1);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].country_of_origin.as_deref(), Some("Китай"));
}
