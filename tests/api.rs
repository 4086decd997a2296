use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use charmscrape::config::Config;
use charmscrape::routes::{AppState, configure};

async fn call(config: Config, req: test::TestRequest) -> (StatusCode, Value) {
    let state = web::Data::new(AppState::new(config).unwrap());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn scrape_req(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/api/scrape").set_json(body)
}

async fn upstream(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[actix_web::test]
async fn missing_url_is_bad_request() {
    let (status, body) = call(Config::default(), scrape_req(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing 'url'" }));
}

#[actix_web::test]
async fn non_string_url_is_bad_request() {
    let (status, body) = call(Config::default(), scrape_req(json!({ "url": ["x"] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing 'url'");
}

#[actix_web::test]
async fn unparseable_url_is_bad_request() {
    let (status, body) = call(Config::default(), scrape_req(json!({ "url": "csgoskins.gg/items" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid URL." }));
}

#[actix_web::test]
async fn other_host_is_rejected_by_name() {
    let req = scrape_req(json!({ "url": "https://steamcommunity.com/market/listings/730/x" }));
    let (status, body) = call(Config::default(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Only csgoskins.gg is allowed." }));
}

#[actix_web::test]
async fn garbage_body_is_internal_error() {
    let req = test::TestRequest::post()
        .uri("/api/scrape")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let (status, body) = call(Config::default(), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn upstream_404_is_mirrored() {
    let server = upstream(404, "gone").await;
    let req = scrape_req(json!({ "url": format!("{}/tournaments/2025-blast-austin/charm", server.uri()) }));

    let (status, body) = call(Config::for_origin(&server.uri()).unwrap(), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Fetch failed with 404" }));
}

#[actix_web::test]
async fn unreachable_upstream_is_internal_error() {
    let config = Config::for_origin("http://127.0.0.1:1").unwrap();
    let req = scrape_req(json!({ "url": "http://127.0.0.1:1/items/charm-s1mple" }));

    let (status, body) = call(config, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn page_is_extracted_and_deduplicated() {
    let server = MockServer::start().await;
    let page = format!(
        r#"<html><body><div class="grid">
             <div class="card"><a href="/items/charm-donk">Donk</a></div>
             <div class="card">
               <a href="{uri}/items/charm-donk"><h3 class="card-title">Donk</h3></a>
               <span>$4.20</span>
             </div>
             <article>
               <a href="/items/charm-s1mple"><img src="/img/s1mple.png"></a>
               <h2>S1mple</h2><p>Price $ 12.50</p><span class="rarity">Remarkable</span>
             </article>
           </div></body></html>"#,
        uri = server.uri()
    );
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;

    let req = scrape_req(json!({ "url": format!("{}/tournaments/2025-blast-austin/charm", server.uri()) }));
    let (status, body) = call(Config::for_origin(&server.uri()).unwrap(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert!(body["externalMarketLink"].is_null());

    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["link"], format!("{}/items/charm-donk", server.uri()));
    assert_eq!(items[0]["title"], "Donk");
    assert_eq!(items[0]["price"], 4.2);
    assert_eq!(items[0]["priceText"], "$4.20");
    assert_eq!(
        items[0]["externalMarketLink"],
        "https://steamcommunity.com/market/listings/730/Souvenir%20Charm%20%7C%20Donk"
    );

    assert_eq!(items[1]["title"], "S1mple");
    assert_eq!(items[1]["image"], "/img/s1mple.png");
    assert_eq!(items[1]["price"], 12.5);
    assert_eq!(items[1]["rarity"], "Remarkable");
    assert!(items[1]["popularity"].is_null());
}

#[actix_web::test]
async fn top_level_market_link_comes_from_request_url() {
    let server = upstream(200, "<html><body><p>nothing here</p></body></html>").await;
    let req = scrape_req(json!({ "url": format!("{}/items/charm-m0nesy", server.uri()) }));

    let (status, body) = call(Config::for_origin(&server.uri()).unwrap(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["items"], json!([]));
    assert_eq!(
        body["externalMarketLink"],
        "https://steamcommunity.com/market/listings/730/Souvenir%20Charm%20%7C%20M0nesy"
    );
}

#[actix_web::test]
async fn export_applies_view_and_sets_download_headers() {
    let state = web::Data::new(AppState::new(Config::default()).unwrap());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let item = |title: &str, price: Option<f64>| {
        json!({
            "title": title,
            "link": format!("https://csgoskins.gg/items/charm-{}", title.to_lowercase()),
            "image": null,
            "price": price,
            "priceText": price.map(|p| format!("${p:.2}")),
            "rarity": null,
            "popularity": null,
            "rating": null,
            "externalMarketLink": null,
        })
    };
    let req = test::TestRequest::post()
        .uri("/api/export")
        .set_json(json!({
            "items": [item("Ropz", Some(1.5)), item("Donk, Gold", Some(9.0)), item("Zywoo", None)],
            "query": "o",
            "sortKey": "price",
            "sortDir": "asc",
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "text/csv; charset=utf-8");
    assert_eq!(
        resp.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"charms.csv\""
    );

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Title,URL,Price,PriceText,Rarity,Popularity,Rating,Image");
    assert_eq!(lines[1], "Zywoo,https://csgoskins.gg/items/charm-zywoo,,,,,,");
    assert_eq!(lines[2], "Ropz,https://csgoskins.gg/items/charm-ropz,1.5,$1.50,,,,");
    assert_eq!(lines[3], "\"Donk, Gold\",\"https://csgoskins.gg/items/charm-donk, gold\",9,$9.00,,,,");
    assert_eq!(lines.len(), 4);
}

#[actix_web::test]
async fn healthz_and_dashboard() {
    let state = web::Data::new(AppState::new(Config::default()).unwrap());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, web::Bytes::from_static(b"ok"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "text/html; charset=utf-8");
    let html = test::read_body(resp).await;
    assert!(std::str::from_utf8(&html).unwrap().contains("/api/scrape"));
}
