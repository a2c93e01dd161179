//! Integration tests for the news API client against a mock server.
//!
//! Each test stands up its own wiremock server and points a `NewsClient`
//! at it, exercising the full request/parse/filter path end-to-end.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use slowpoke::news::{Category, NewsClient};

fn client_for(server: &MockServer) -> NewsClient {
    NewsClient::new(
        reqwest::Client::new(),
        SecretString::from("test-api-key"),
        "us",
    )
    .with_base_url(server.uri())
}

#[tokio::test]
async fn fetch_preserves_response_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "results": [
                {"title": "First", "link": "https://example.com/1"},
                {"title": "Second", "link": "https://example.com/2"},
                {"title": "Third", "link": "https://example.com/3"}
            ]
        })))
        .mount(&server)
        .await;

    let articles = client_for(&server).fetch(Category::World).await.unwrap();
    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn fetch_drops_whitespace_only_titles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "results": [
                {"title": "Kept", "link": "https://example.com/kept"},
                {"title": "   ", "link": "https://example.com/blank-title"},
                {"title": "No link", "link": "  "}
            ]
        })))
        .mount(&server)
        .await;

    let articles = client_for(&server).fetch(Category::Business).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Kept");
}

#[tokio::test]
async fn fetch_keeps_optional_fields_when_present() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/1/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "results": [{
                "title": "Full record",
                "link": "https://example.com/full",
                "description": "All fields populated",
                "image_url": "https://example.com/img.jpg",
                "source_id": "example_wire",
                "pubDate": "2024-06-01 12:00:00"
            }]
        })))
        .mount(&server)
        .await;

    let articles = client_for(&server)
        .fetch(Category::Lifestyle)
        .await
        .unwrap();
    let a = &articles[0];
    assert_eq!(a.description.as_deref(), Some("All fields populated"));
    assert_eq!(a.source_id.as_deref(), Some("example_wire"));
    assert_eq!(a.pub_date.as_deref(), Some("2024-06-01 12:00:00"));
}

#[tokio::test]
async fn each_category_maps_to_its_query_value() {
    // One server per category keeps the matchers unambiguous.
    for category in Category::ALL {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/1/news"))
            .and(query_param("apikey", "test-api-key"))
            .and(query_param("country", "us"))
            .and(query_param("category", category.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "results": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).fetch(category).await.unwrap();
    }
}
