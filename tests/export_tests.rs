mod common;

use axum::{body::to_bytes, http::StatusCode, http::header};
use common::{FakePdf, TestApp, portfolio_body};
use std::io::{Cursor, Read};
use zip::ZipArchive;

#[tokio::test]
async fn zip_export_contains_the_rendered_site_and_cleans_up() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_portfolio(
            &owner,
            &template_id,
            portfolio_body("My Site", &["Zeta", "Alpha", "Mid"], false),
        )
        .await;

    let resp = app
        .raw(
            "GET",
            &format!("/api/portfolios/{id}/download/zip"),
            Some(&owner),
            axum::body::Body::empty(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"My Site.zip\""
    );
    let declared: usize = resp.headers()[header::CONTENT_LENGTH]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.len(), declared);
    assert_eq!(app.staging_entries(), 0);

    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["index.html", "script.js", "style.css"]);

    let mut html = String::new();
    archive
        .by_name("index.html")
        .unwrap()
        .read_to_string(&mut html)
        .unwrap();
    assert!(html.contains("<h1>Ada Lovelace</h1>"));
    assert_eq!(html.matches("<li ").count(), 3);
    let zeta = html.find(r#"<li data-n="1">Zeta</li>"#).unwrap();
    let alpha = html.find(r#"<li data-n="2">Alpha</li>"#).unwrap();
    let mid = html.find(r#"<li data-n="3">Mid</li>"#).unwrap();
    assert!(zeta < alpha && alpha < mid);

    let mut css = String::new();
    archive
        .by_name("style.css")
        .unwrap()
        .read_to_string(&mut css)
        .unwrap();
    assert_eq!(css, "body { color: #123; }");
}

#[tokio::test]
async fn dropping_an_unread_zip_body_removes_staging() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_portfolio(&owner, &template_id, portfolio_body("Gone", &["a"], false))
        .await;

    let resp = app
        .raw(
            "GET",
            &format!("/api/portfolios/{id}/download/zip"),
            Some(&owner),
            axum::body::Body::empty(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(app.staging_entries(), 1);

    drop(resp);
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn pdf_export_inlines_assets_and_leaves_nothing_behind() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_portfolio(&owner, &template_id, portfolio_body("CV", &["a"], false))
        .await;

    let resp = app
        .raw(
            "GET",
            &format!("/api/portfolios/{id}/download/pdf"),
            Some(&owner),
            axum::body::Body::empty(),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"CV.pdf\""
    );
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let documents = app.pdf.documents.lock().unwrap();
    assert_eq!(documents.len(), 1);
    let (path, html) = &documents[0];
    assert!(path.ends_with("index.html"));
    assert!(html.contains("<title>CV</title>"));
    assert!(html.contains("body { color: #123; }"));
    assert!(html.contains("console.log('hi');"));
    assert!(html.contains("<h1>Ada Lovelace</h1>"));
    assert!(!path.exists());
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn pdf_renderer_failure_is_a_masked_500_without_artifacts() {
    let pdf = FakePdf {
        fail: true,
        ..FakePdf::default()
    };
    let app = TestApp::spawn_with(pdf, |_| {}).await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_portfolio(&owner, &template_id, portfolio_body("CV", &[], false))
        .await;

    let (status, body) = app
        .send("GET", &format!("/api/portfolios/{id}/download/pdf"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server Error");
    assert_eq!(app.pdf.documents.lock().unwrap().len(), 1);
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn export_without_a_template_is_a_bad_request() {
    let app = TestApp::spawn().await;
    let admin = app.admin().await;
    let template_id = app.create_template(&admin, false).await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_portfolio(&owner, &template_id, portfolio_body("Orphan", &[], false))
        .await;

    let (status, body) = app
        .send("DELETE", &format!("/api/templates/{template_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Template removed");

    for kind in ["zip", "pdf"] {
        let (status, body) = app
            .send(
                "GET",
                &format!("/api/portfolios/{id}/download/{kind}"),
                Some(&owner),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Template not found for this portfolio");
    }
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn exporting_a_missing_portfolio_is_404() {
    let app = TestApp::spawn().await;
    let (owner, _) = app.register("Ada", "ada@example.com").await;
    let missing = uuid::Uuid::new_v4();
    let (status, _) = app
        .send(
            "GET",
            &format!("/api/portfolios/{missing}/download/zip"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
