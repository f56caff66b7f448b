mod common;

use axum::http::StatusCode;
use common::{TestApp, portfolio_body};
use serde_json::json;

#[tokio::test]
async fn owner_reads_and_others_are_limited_to_public_portfolios() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;

    let (owner, owner_id) = app.register("Ada", "ada@example.com").await;
    let (stranger, _) = app.register("Bob", "bob@example.com").await;

    let private_id = app
        .create_portfolio(&owner, &template_id, portfolio_body("Private", &["a"], false))
        .await;
    let public_id = app
        .create_portfolio(&owner, &template_id, portfolio_body("Public", &["a"], true))
        .await;

    let (status, body) = app
        .send("GET", &format!("/api/portfolios/{private_id}"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Private");
    assert_eq!(body["owner"]["id"], owner_id.as_str());
    assert_eq!(body["template"]["id"], template_id.as_str());

    let (status, body) = app
        .send("GET", &format!("/api/portfolios/{private_id}"), Some(&stranger), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized to access this portfolio");

    let (status, body) = app
        .send("GET", &format!("/api/portfolios/{public_id}"), Some(&stranger), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Public");

    // public does not mean writable
    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/portfolios/{public_id}"),
            Some(&stranger),
            Some(json!({ "title": "Hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("DELETE", &format!("/api/portfolios/{public_id}"), Some(&stranger), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "GET",
            &format!("/api/portfolios/{public_id}/download/zip"),
            Some(&stranger),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_only_shows_own_portfolios_with_template_summary() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;
    let (ada, _) = app.register("Ada", "ada@example.com").await;
    let (bob, _) = app.register("Bob", "bob@example.com").await;

    app.create_portfolio(&ada, &template_id, portfolio_body("One", &[], false))
        .await;
    app.create_portfolio(&bob, &template_id, portfolio_body("Other", &[], true))
        .await;

    let (status, body) = app.send("GET", "/api/portfolios", Some(&ada), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("list is an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "One");
    assert_eq!(items[0]["template"]["name"], "Cards");
}

#[tokio::test]
async fn update_merges_fields_and_delete_makes_it_disappear() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_portfolio(&owner, &template_id, portfolio_body("Draft", &["a", "b"], false))
        .await;
    let uri = format!("/api/portfolios/{id}");

    let (status, body) = app
        .send("PUT", &uri, Some(&owner), Some(json!({ "title": "Final", "isPublic": true })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Final");
    assert_eq!(body["isPublic"], true);
    assert_eq!(body["projects"][1]["name"], "b");

    let (status, _) = app
        .send("PUT", &uri, Some(&owner), Some(json!({ "title": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.send("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Portfolio deleted successfully");

    let (status, body) = app.send("GET", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Portfolio not found");
}

#[tokio::test]
async fn malformed_ids_and_unknown_templates() {
    let app = TestApp::spawn().await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;

    let (status, _) = app
        .send("GET", "/api/portfolios/not-a-uuid", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut body = portfolio_body("Orphan", &[], false);
    body["templateId"] = json!(uuid::Uuid::new_v4());
    let (status, body) = app
        .send("POST", "/api/portfolios", Some(&owner), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Template not found");
}

#[tokio::test]
async fn premium_templates_need_a_premium_account() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let premium_id = app.create_template(&admin, true).await;
    let (user, _) = app.register("Ada", "ada@example.com").await;

    let mut body = portfolio_body("Fancy", &[], false);
    body["templateId"] = json!(premium_id);
    let (status, resp) = app
        .send("POST", "/api/portfolios", Some(&user), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(resp["message"], "This template requires a premium account");

    let (status, _) = app
        .send(
            "POST",
            "/api/payments",
            Some(&user),
            Some(json!({ "templateId": premium_id, "amount": 9.99 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send("POST", "/api/portfolios", Some(&user), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
