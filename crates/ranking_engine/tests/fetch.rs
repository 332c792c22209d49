use std::net::TcpListener;
use std::time::Duration;

use pretty_assertions::assert_eq;
use ranking_core::{Category, ErrorKind};
use ranking_engine::{FailureKind, FetchSettings, RankingFetcher, ReqwestRankingFetcher};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RANKING_PATH: &str = "/services/api/IchibaItem/Ranking/20220601";

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        endpoint: format!("{}{}", server.uri(), RANKING_PATH),
        application_id: "test-app".to_string(),
        affiliate_id: Some("test-affiliate".to_string()),
        ..FetchSettings::default()
    }
}

fn item(rank: u32, name: &str) -> serde_json::Value {
    json!({
        "rank": rank,
        "itemName": name,
        "itemUrl": format!("https://item.rakuten.co.jp/shop/{rank}/"),
        "itemPrice": 1980 + rank,
        "mediumImageUrls": [format!("https://thumbnail.image.rakuten.co.jp/{rank}.jpg")],
        "shopName": "Example Shop",
        "affiliateUrl": format!("https://hb.afl.rakuten.co.jp/{rank}"),
    })
}

#[tokio::test]
async fn fetcher_sends_genre_and_returns_ranked_products() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANKING_PATH))
        .and(query_param("applicationId", "test-app"))
        .and(query_param("affiliateId", "test-affiliate"))
        .and(query_param("genreId", "100371"))
        .and(query_param("format", "json"))
        .and(query_param("formatVersion", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [item(1, "coat"), item(2, "scarf"), item(3, "boots")],
            "title": "ranking",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestRankingFetcher::new(settings_for(&server));
    let products = fetcher.fetch(Category::Fashion).await.expect("fetch ok");

    let ranks: Vec<u32> = products.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert_eq!(products[0].name, "coat");
    assert_eq!(products[0].price, 1981);
    assert_eq!(products[0].shop_name, "Example Shop");
    assert_eq!(products[2].affiliate_url, "https://hb.afl.rakuten.co.jp/3");
    assert_eq!(
        products[1].image_urls,
        vec!["https://thumbnail.image.rakuten.co.jp/2.jpg".to_string()]
    );
}

#[tokio::test]
async fn all_category_uses_reserved_genre() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANKING_PATH))
        .and(query_param("genreId", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestRankingFetcher::new(settings_for(&server));
    let products = fetcher.fetch(Category::All).await.expect("empty ranking is ok");
    assert!(products.is_empty());
}

#[tokio::test]
async fn fetcher_maps_http_status_to_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANKING_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "wrong_parameter",
            "error_description": "specify valid applicationId",
        })))
        .mount(&server)
        .await;

    let fetcher = ReqwestRankingFetcher::new(settings_for(&server));
    let err = fetcher.fetch(Category::Food).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.error_kind(), ErrorKind::Network);
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANKING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "Items": [] })),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let fetcher = ReqwestRankingFetcher::new(settings);
    let err = fetcher.fetch(Category::Sweets).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.error_kind(), ErrorKind::Network);
    assert!(!err.message.contains("test-app"));
}

#[tokio::test]
async fn fetcher_rejects_out_of_order_ranks_as_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANKING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [item(1, "a"), item(3, "c"), item(2, "b")],
        })))
        .mount(&server)
        .await;

    let fetcher = ReqwestRankingFetcher::new(settings_for(&server));
    let err = fetcher.fetch(Category::Toys).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
    assert_eq!(err.error_kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANKING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..settings_for(&server)
    };
    let fetcher = ReqwestRankingFetcher::new(settings);
    let err = fetcher.fetch(Category::Books).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 16,
            actual: Some(64)
        }
    );
}

#[tokio::test]
async fn invalid_endpoint_fails_without_request() {
    let settings = FetchSettings {
        endpoint: "not a url".to_string(),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestRankingFetcher::new(settings);
    let err = fetcher.fetch(Category::Gift).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing listens on a port freed from a dropped listener.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = FetchSettings {
        endpoint: format!("http://{addr}{RANKING_PATH}"),
        application_id: "test-app".to_string(),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestRankingFetcher::new(settings);
    let err = fetcher.fetch(Category::Baby).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(err.error_kind(), ErrorKind::Network);
}
