use std::path::PathBuf;
use std::time::Duration;

use aurarecon::api::{self, ResponseBody, ScanRequest};
use aurarecon::config::HttpConfig;
use aurarecon::ir::{ParamProvenance, RiskLevel, SessionType};
use aurarecon::scanner::Scanner;
use aurarecon::ScanOptions;
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn scanner() -> Scanner {
    Scanner::new(HttpConfig {
        timeout_secs: 5,
        ..HttpConfig::default()
    })
    .unwrap()
}

fn page_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/s/", server.uri())).unwrap()
}

async fn mount_page(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/s/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_script(server: &MockServer, at: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_page_is_a_successful_empty_scan() {
    let server = MockServer::start().await;
    mount_page(&server, "<html><body>Welcome</body></html>").await;

    let result = scanner().scan(&page_url(&server)).await.unwrap();

    assert!(result.success);
    assert_eq!(result.raw_matches, 0);
    assert!(result.controllers.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.vulnerabilities.is_empty());
    assert_eq!(result.js_files_scanned, 0);
    assert_eq!(result.page_size, "<html><body>Welcome</body></html>".len());
}

#[tokio::test]
async fn one_failed_script_is_one_warning() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<html>
            <script src="/static/first.js"></script>
            <script src="/static/missing.js"></script>
            <script src="/static/second.js"></script>
        </html>"#,
    )
    .await;
    mount_script(&server, "/static/first.js", "x('aura://AlphaController/ACTION$getAlpha')").await;
    mount_script(&server, "/static/second.js", "x('aura://BetaController/ACTION$getBeta')").await;
    // No mock for missing.js: wiremock answers 404.

    let result = scanner().scan(&page_url(&server)).await.unwrap();

    assert_eq!(result.js_files_scanned, 3);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("/static/missing.js"));
    assert!(result.warnings[0].contains("404"));

    let names: Vec<_> = result
        .controllers
        .iter()
        .map(|a| a.action.name.as_str())
        .collect();
    assert_eq!(names, vec!["getAlpha", "getBeta"]);
    assert_eq!(result.raw_matches, result.controllers.len());
}

#[tokio::test]
async fn script_timeout_is_a_warning_not_a_failure() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<script src="/slow.js"></script><script src="/fast.js"></script>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("aura://SlowController/ACTION$getSlow")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_script(&server, "/fast.js", "aura://FastController/ACTION$getFast").await;

    let scanner = Scanner::new(HttpConfig {
        timeout_secs: 1,
        ..HttpConfig::default()
    })
    .unwrap();
    let result = scanner.scan(&page_url(&server)).await.unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("/slow.js"));
    assert_eq!(result.controllers.len(), 1);
    assert_eq!(result.controllers[0].action.controller, "FastController");
}

#[tokio::test]
async fn unreachable_script_host_is_a_warning() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<script src="http://127.0.0.1:1/x.js"></script><script src="/ok.js"></script>"#,
    )
    .await;
    mount_script(&server, "/ok.js", "aura://OkController/ACTION$getOk").await;

    let result = scanner().scan(&page_url(&server)).await.unwrap();

    assert!(result.success);
    assert_eq!(result.js_files_scanned, 2);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("http://127.0.0.1:1/x.js"));
    assert_eq!(result.controllers.len(), 1);
    assert_eq!(result.controllers[0].action.controller, "OkController");
}

#[tokio::test]
async fn page_metadata_wins_over_script_metadata() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<script>var cfg = {"fwuid":"PAGE_FWUID"};</script><script src="/app.js"></script>"#,
    )
    .await;
    mount_script(
        &server,
        "/app.js",
        r#"{"fwuid":"SCRIPT_FWUID","app":"siteforce:communityApp"}; aura.token = 'guest-token';"#,
    )
    .await;

    let result = scanner().scan(&page_url(&server)).await.unwrap();

    assert_eq!(result.metadata.fwuid.as_deref(), Some("PAGE_FWUID"));
    assert_eq!(result.metadata.token.as_deref(), Some("guest-token"));
    assert_eq!(result.metadata.app.as_deref(), Some("siteforce:communityApp"));
    assert_eq!(result.metadata.scanned_url, page_url(&server).as_str());
}

#[tokio::test]
async fn parameters_only_fill_when_empty() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<script>
            var a = cmp.get("aura://WidgetController/ACTION$saveWidget");
            a.setParams({ widgetId: wid });
            register("aura://WidgetController/ACTION$loadGadget");
        </script>
        <script src="/gadget.js"></script>"#,
    )
    .await;
    mount_script(
        &server,
        "/gadget.js",
        r#"var g = cmp.get("c.loadGadget"); g.setParams({ gadgetId: gid, verbose: true });
           var s = cmp.get("aura://WidgetController/ACTION$saveWidget"); s.setParams({ bogus: 1 });"#,
    )
    .await;

    let result = scanner().scan(&page_url(&server)).await.unwrap();
    let by_name = |name: &str| {
        result
            .controllers
            .iter()
            .find(|a| a.action.name == name)
            .unwrap()
    };

    let save = by_name("saveWidget");
    let save_params: Vec<_> = save.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(save_params, vec!["widgetId"]);

    let load = by_name("loadGadget");
    let load_params: Vec<_> = load
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.param_type.as_str()))
        .collect();
    assert_eq!(load_params, vec![("gadgetId", "Id"), ("verbose", "Boolean")]);
    assert!(load
        .parameters
        .iter()
        .all(|p| p.provenance == ParamProvenance::Context));
    assert_eq!(result.raw_matches, 2);
}

#[tokio::test]
async fn known_and_unknown_actions_are_classified() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"aura://RecordUiController/ACTION$deleteRecord
           aura://FooController/ACTION$deleteWidget
           apex://RecordUiController/ACTION$deleteRecord"#,
    )
    .await;

    let result = scanner().scan(&page_url(&server)).await.unwrap();
    assert_eq!(result.raw_matches, 2);

    let known = &result.controllers[0];
    assert!(known.is_known);
    assert_eq!(known.risk_level, RiskLevel::Critical);
    assert_eq!(known.parameters.len(), 1);
    assert_eq!(known.parameters[0].provenance, ParamProvenance::Known);

    let unknown = &result.controllers[1];
    assert!(!unknown.is_known);
    assert_eq!(unknown.risk_level, RiskLevel::Critical);
}

#[tokio::test]
async fn session_cookies_are_replayed_on_script_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s/"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "BrowserId=xyz; Path=/; Secure")
                .append_header("set-cookie", "renderCtx=abc; HttpOnly")
                .set_body_string(r#"<script src="/needs-cookie.js"></script>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/needs-cookie.js"))
        .and(header("cookie", "BrowserId=xyz; renderCtx=abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("aura://CartController/ACTION$getCart"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = scanner().scan(&page_url(&server)).await.unwrap();

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(result.guest_session.cookies.len(), 2);
    assert_eq!(result.guest_session.raw_header, "BrowserId=xyz; renderCtx=abc");
    assert_eq!(result.guest_session.session_type, SessionType::Guest);
    assert_eq!(result.controllers[0].action.name, "getCart");
}

#[tokio::test]
async fn findings_merge_across_page_and_scripts() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        r#"<script>parent.postMessage(state, "*");</script><script src="/msg.js"></script>"#,
    )
    .await;
    mount_script(
        &server,
        "/msg.js",
        r#"top.postMessage(a, '*'); top.postMessage(b, "*");"#,
    )
    .await;

    let result = scanner().scan(&page_url(&server)).await.unwrap();

    assert_eq!(result.vulnerabilities.len(), 1);
    let finding = &result.vulnerabilities[0];
    assert_eq!(finding.id, "AURA-001");
    assert_eq!(finding.occurrence_count, 3);
    assert!(finding.matched_excerpt.contains("state"));
}

#[tokio::test]
async fn redirects_are_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/s/"))
        .mount(&server)
        .await;
    mount_page(&server, "aura://NavigationController/ACTION$getUrl").await;

    let start = Url::parse(&format!("{}/start", server.uri())).unwrap();
    let result = scanner().scan(&start).await.unwrap();
    assert_eq!(result.raw_matches, 1);
}

#[tokio::test]
async fn upstream_failure_is_502_with_duration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let response = api::handle(ScanRequest::new(page_url(&server).as_str()), &scanner()).await;

    assert_eq!(response.status, 502);
    match &response.body {
        ResponseBody::Err(body) => {
            assert!(!body.success);
            assert!(body.error.contains("503"), "{}", body.error);
            assert!(body.scan_duration.is_some());
        }
        ResponseBody::Ok(_) => panic!("expected failure"),
    }
}

#[tokio::test]
async fn invalid_input_never_touches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ftp = page_url(&server).as_str().replacen("http", "ftp", 1);
    for raw in [ftp.as_str(), "not a url", ""] {
        let response = api::handle(ScanRequest::new(raw), &scanner()).await;
        assert_eq!(response.status, 400, "input {raw:?}");
        assert!(!response.is_success());
    }
}

#[tokio::test]
async fn successful_envelope_serializes_for_the_boundary() {
    let server = MockServer::start().await;
    mount_page(&server, "aura://LookupController/ACTION$lookup").await;

    let response = api::handle(ScanRequest::new(page_url(&server).as_str()), &scanner()).await;
    assert_eq!(response.status, 200);

    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["rawMatches"], 1);
    assert_eq!(json["controllers"][0]["controller"], "LookupController");
    assert_eq!(json["guestSession"]["sessionType"], "unknown");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn library_scan_applies_policy() {
    let server = MockServer::start().await;
    mount_page(&server, "<script>el.innerHTML = data;</script>").await;

    let options = ScanOptions {
        config_path: Some(PathBuf::from("/nonexistent/.aurarecon.toml")),
        ..ScanOptions::default()
    };
    let report = aurarecon::scan(page_url(&server).as_str(), &options)
        .await
        .unwrap();

    // A medium finding stays under the default high threshold.
    assert!(report.verdict.pass);
    assert_eq!(report.result.vulnerabilities[0].id, "AURA-007");
}
