#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use portagen::config::Config;
use portagen::db::Storage;
use portagen::error::PortagenError;
use portagen::export::PdfRenderer;
use portagen::router::{PortagenState, portagen_router};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Records what it was asked to print instead of launching a browser.
#[derive(Default)]
pub struct FakePdf {
    pub fail: bool,
    pub documents: Mutex<Vec<(PathBuf, String)>>,
}

impl PdfRenderer for FakePdf {
    fn render(&self, document: &Path) -> Result<Vec<u8>, PortagenError> {
        let html = std::fs::read_to_string(document)?;
        self.documents
            .lock()
            .expect("fake pdf lock poisoned")
            .push((document.to_path_buf(), html));
        if self.fail {
            return Err(PortagenError::Pdf("browser crashed".to_string()));
        }
        Ok(b"%PDF-1.4 fake".to_vec())
    }
}

pub struct TestApp {
    pub router: Router,
    pub storage: Storage,
    pub pdf: Arc<FakePdf>,
    pub staging: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(FakePdf::default(), |_| {}).await
    }

    pub async fn spawn_with(pdf: FakePdf, tweak: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let database_url = format!("sqlite:{}", dir.path().join("portagen.sqlite").display());
        let staging = dir.path().join("staging");

        let mut cfg = Config {
            database_url,
            jwt_secret: "test-secret".to_string(),
            admin_emails: vec![ADMIN_EMAIL.to_string()],
            seed_templates: false,
            ..Config::default()
        };
        cfg.export.staging_dir = staging.clone();
        tweak(&mut cfg);

        let storage = Storage::connect(&cfg.database_url)
            .await
            .expect("failed to open database");
        let pdf = Arc::new(pdf);
        let state = PortagenState::new(storage.clone(), cfg, pdf.clone())
            .expect("failed to build state");

        Self {
            router: portagen_router(state),
            storage,
            pdf,
            staging,
            _dir: dir,
        }
    }

    pub async fn raw(&self, method: &str, uri: &str, token: Option<&str>, body: Body) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed")
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let resp = self.raw(method, uri, token, body).await;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not json")
        };
        (status, value)
    }

    /// Registers an account and returns `(token, user id)`.
    pub async fn register(&self, name: &str, email: &str) -> (String, String) {
        let (status, body) = self
            .send(
                "POST",
                "/api/users/register",
                None,
                Some(json!({ "name": name, "email": email, "password": "secret123" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (
            body["token"].as_str().expect("token missing").to_string(),
            body["id"].as_str().expect("id missing").to_string(),
        )
    }

    pub async fn admin(&self) -> String {
        self.register("Admin", ADMIN_EMAIL).await.0
    }

    pub async fn create_template(&self, admin_token: &str, is_premium: bool) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/templates",
                Some(admin_token),
                Some(json!({
                    "name": "Cards",
                    "description": "Project cards",
                    "previewUrl": "https://example.com/cards.png",
                    "isPremium": is_premium,
                    "files": {
                        "html": PROJECTS_HTML,
                        "css": "body { color: #123; }",
                        "js": "console.log('hi');"
                    }
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "template create failed: {body}");
        body["id"].as_str().expect("id missing").to_string()
    }

    pub async fn create_portfolio(&self, token: &str, template_id: &str, body: Value) -> String {
        let mut payload = body;
        payload["templateId"] = json!(template_id);
        let (status, body) = self
            .send("POST", "/api/portfolios", Some(token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED, "portfolio create failed: {body}");
        body["id"].as_str().expect("id missing").to_string()
    }

    pub fn staging_entries(&self) -> usize {
        match std::fs::read_dir(&self.staging) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

pub const PROJECTS_HTML: &str = r#"<h1>{{personalInfo.fullName}}</h1>
<ol>{{#each projects}}<li data-n="{{add @index 1}}">{{name}}</li>{{/each}}</ol>"#;

pub fn portfolio_body(title: &str, projects: &[&str], is_public: bool) -> Value {
    let projects: Vec<Value> = projects
        .iter()
        .map(|name| json!({ "name": name, "description": "", "link": "" }))
        .collect();
    json!({
        "title": title,
        "personalInfo": {
            "fullName": "Ada Lovelace",
            "title": "Engineer",
            "about": "Writes programs",
            "contact": { "email": "ada@example.com" }
        },
        "projects": projects,
        "skills": ["rust"],
        "isPublic": is_public
    })
}
