//! Spider check tests

use crate::common::{html_page, spider};
use sitesentry::{run_check, CheckOutcome, ContentCondition};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_clean_site_with_cycle() {
    let mock_server = MockServer::start().await;

    // Each page links back to the root; every page must still be fetched
    // exactly once.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="a.html">a</a><a href="b.html">b</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(html_page(r#"<html><body><a href="/">home</a></body></html>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b.html"))
        .respond_with(html_page(
            r#"<html><body><a href="/">home</a><a href="a.html">a</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = run_check(&spider(&format!("{}/", mock_server.uri()))).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_child_failure_wrapped_with_parent() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="a.html">a</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let outcome = run_check(&spider(&format!("{}/", base))).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "{base}/ has error: Invalid status: {base}/a.html required: 200, received: 404 <br />",
            base = base
        ))
    );
}

#[tokio::test]
async fn test_root_failure_reported_verbatim() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let outcome = run_check(&spider(&format!("{}/", base))).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "Invalid status: {}/ required: 200, received: 404 ",
            base
        ))
    );
}

#[tokio::test]
async fn test_failures_follow_visit_order() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // The root links a healthy page and a broken one; the healthy page
    // links another broken one. Pages discovered from the root are visited
    // before pages they discover, so the root's own broken child is
    // reported first.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="a.html">a</a><a href="bad-b.html">b</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(html_page(
            r#"<html><body><a href="bad-c.html">c</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bad-b.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bad-c.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let outcome = run_check(&spider(&format!("{}/", base))).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "{base}/ has error: Invalid status: {base}/bad-b.html required: 200, received: 404 <br />\
             {base}/a.html has error: Invalid status: {base}/bad-c.html required: 200, received: 500 <br />",
            base = base
        ))
    );
}

#[tokio::test]
async fn test_same_host_links_outside_base_are_crawled() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // The crawl covers the whole host, not just URLs under the base path.
    Mock::given(method("GET"))
        .and(path("/section/"))
        .respond_with(html_page(
            r#"<html><body><a href="/outside.html">out</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/outside.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = run_check(&spider(&format!("{}/section/", base))).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "{base}/section/ has error: Invalid status: {base}/outside.html required: 200, received: 404 <br />",
            base = base
        ))
    );
}

#[tokio::test]
async fn test_foreign_host_links_not_crawled() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!(
            r#"<html><body><a href="{}/foreign.html">away</a></body></html>"#,
            other_server.uri()
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/foreign.html"))
        .respond_with(html_page("<html>foreign</html>"))
        .expect(0)
        .mount(&other_server)
        .await;

    let outcome = run_check(&spider(&format!("{}/", mock_server.uri()))).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_do_not_follow_blocks_expansion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="private/secret.html">secret</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/private/secret.html"))
        .respond_with(html_page("<html>secret</html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut spec = spider(&format!("{}/", mock_server.uri()));
    spec.do_not_follow = "*private*".to_string();

    let outcome = run_check(&spec).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_broken_link_probe_ignores_do_not_follow() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="flagged.html">flagged</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    // Probed once during the root's link scan, never visited as a page
    Mock::given(method("GET"))
        .and(path("/flagged.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut spec = spider(&format!("{}/", base));
    spec.check_broken_links = true;
    spec.do_not_follow = "*flagged*".to_string();

    let outcome = run_check(&spec).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "{base}/ has error: Invalid status: {base}/flagged.html required: 200, received: 404 <br />",
            base = base
        ))
    );
}

#[tokio::test]
async fn test_probed_pages_are_still_visited() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="bad.html">bad</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    // A link probe does not count as a visit: the page is fetched once by
    // the root's scan and again when the crawl reaches it, and each fetch
    // contributes its own report segment.
    Mock::given(method("GET"))
        .and(path("/bad.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut spec = spider(&format!("{}/", base));
    spec.check_broken_links = true;

    let outcome = run_check(&spec).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "{base}/ has error: Invalid status: {base}/bad.html required: 200, received: 500 <br />\
             {base}/ has error: Invalid status: {base}/bad.html required: 200, received: 500 <br />",
            base = base
        ))
    );
}

#[tokio::test]
async fn test_crawl_with_link_scans_reports_all_failures() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // Scans enabled across a three-level site. Wrapped scan aggregates
    // keep their trailing separator, so those segments end with a doubled
    // one. Pages reached by a probe are crawled again afterwards.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="has-broken.html">a</a><a href="missing.html">b</a><a href="deeper.html">c</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/has-broken.html"))
        .respond_with(html_page(
            r#"<html><body><a href="gone.html">gone</a></body></html>"#,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/deeper.html"))
        .respond_with(html_page(
            r#"<html><body><a href="last.html">last</a></body></html>"#,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/last.html"))
        .respond_with(html_page(
            r#"<html><body><a href="not-found.html">n</a></body></html>"#,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/not-found.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut spec = spider(&format!("{}/", base));
    spec.check_broken_links = true;

    let outcome = run_check(&spec).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "{base}/ has error: Invalid status: {base}/missing.html required: 200, received: 500 <br />\
             {base}/ has error: {base}/has-broken.html has error: Invalid status: {base}/gone.html required: 200, received: 500 <br /><br />\
             {base}/ has error: Invalid status: {base}/missing.html required: 200, received: 500 <br />\
             {base}/has-broken.html has error: Invalid status: {base}/gone.html required: 200, received: 500 <br />\
             {base}/deeper.html has error: {base}/last.html has error: Invalid status: {base}/not-found.html required: 200, received: 500 <br /><br />\
             {base}/last.html has error: Invalid status: {base}/not-found.html required: 200, received: 500 <br />",
            base = base
        ))
    );
}

#[tokio::test]
async fn test_fragment_variants_visited_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="a.html">plain</a><a href="a.html#section">anchored</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(html_page("<html>a</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = run_check(&spider(&format!("{}/", mock_server.uri()))).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_failed_condition_blocks_expansion() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>MARKER<a href="a.html">a</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    // Passes the status check but fails the condition; its links must not
    // be followed.
    Mock::given(method("GET"))
        .and(path("/a.html"))
        .respond_with(html_page(
            r#"<html><body><a href="b.html">b</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b.html"))
        .respond_with(html_page("<html><body>MARKER</body></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut spec = spider(&format!("{}/", base));
    spec.condition = ContentCondition::Contains("MARKER".to_string());

    let outcome = run_check(&spec).await;
    assert_eq!(
        outcome,
        CheckOutcome::Failure(format!(
            "{base}/ has error: Invalid content: {base}/a.html doesn't contain: MARKER<br />",
            base = base
        ))
    );
}
