use reqwest::Client;
use serde_json::json;
use speculoos::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use blog_api::smoke::SmokeClient;

use crate::helpers::spawn_app;

mod helpers;

#[tokio::test]
async fn smoke_test_passes_against_the_api() {
    let app = spawn_app().await;

    let report = SmokeClient::new(Client::new(), &app.address)
        .run()
        .await
        .unwrap();

    let steps = report.steps.iter().map(|x| x.step).collect::<Vec<_>>();
    assert_that!(steps).is_equal_to(vec![
        "create", "list", "retrieve", "update", "stats", "delete",
    ]);
    assert_that!(report.success()).is_true();
}

#[tokio::test]
async fn smoke_test_stops_when_create_fails() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/articles/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"title": ["This field is required."]})))
        .expect(1)
        .mount(&mock)
        .await;

    let report = SmokeClient::new(Client::new(), &format!("{}/api/", mock.uri()))
        .run()
        .await
        .unwrap();

    assert_that!(report.steps).has_length(1);
    assert_that!(report.steps[0].status).is_equal_to(400u16);
    assert_that!(report.success()).is_false();
}

#[tokio::test]
async fn smoke_test_reports_failed_steps() {
    let mock = MockServer::start().await;
    let article = json!({
        "id": 7,
        "title": "My First Blog Post",
        "content": "This is the content of my first blog post.",
        "author": "John Doe",
        "created_at": "2024-01-01T10:00:00Z",
        "updated_at": "2024-01-01T10:00:00Z",
        "is_published": false
    });

    Mock::given(method("POST"))
        .and(path("/api/articles/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(article.clone()))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/articles/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([article])))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/articles/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(article.clone()))
        .mount(&mock)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/articles/7/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/articles/stats/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"total": 1, "published": 0, "drafts": 1})),
        )
        .mount(&mock)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/articles/7/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    let report = SmokeClient::new(Client::new(), &format!("{}/api", mock.uri()))
        .run()
        .await
        .unwrap();

    let failed = report
        .steps
        .iter()
        .filter(|x| !x.ok)
        .map(|x| x.step)
        .collect::<Vec<_>>();
    assert_that!(report.steps).has_length(6);
    assert_that!(failed).is_equal_to(vec!["update"]);
    assert_that!(report.success()).is_false();
}
