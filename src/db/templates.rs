use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::db::models::Template;
use crate::db::sqlite::Storage;
use crate::error::PortagenError;
use crate::types::TemplateFiles;
use crate::types::forms::TemplateForm;

const TEMPLATE_COLUMNS: &str =
    "id, name, description, preview_url, is_premium, html, css, js, created_at";

impl Storage {
    /// Newest first.
    pub async fn list_templates(&self) -> Result<Vec<Template>, PortagenError> {
        let rows = sqlx::query(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(self.pool())
        .await?;
        rows.into_iter().map(Self::row_to_template).collect()
    }

    pub async fn find_template(&self, id: Uuid) -> Result<Option<Template>, PortagenError> {
        let row = sqlx::query(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        row.map(Self::row_to_template).transpose()
    }

    pub async fn count_templates(&self) -> Result<i64, PortagenError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM templates")
            .fetch_one(self.pool())
            .await?;
        Ok(rec.0)
    }

    pub async fn insert_template(&self, form: TemplateForm) -> Result<Template, PortagenError> {
        let template = Template {
            id: Uuid::new_v4(),
            name: form.name,
            description: form.description,
            preview_url: form.preview_url,
            is_premium: form.is_premium,
            files: form.files,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO templates (id, name, description, preview_url, is_premium, html, css, js, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.preview_url)
        .bind(template.is_premium)
        .bind(&template.files.html)
        .bind(&template.files.css)
        .bind(&template.files.js)
        .bind(template.created_at)
        .execute(self.pool())
        .await?;

        Ok(template)
    }

    /// Update every field except id and creation time.
    pub async fn update_template(&self, template: &Template) -> Result<(), PortagenError> {
        sqlx::query(
            r#"UPDATE templates SET
                name = ?,
                description = ?,
                preview_url = ?,
                is_premium = ?,
                html = ?,
                css = ?,
                js = ?
              WHERE id = ?"#,
        )
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.preview_url)
        .bind(template.is_premium)
        .bind(&template.files.html)
        .bind(&template.files.css)
        .bind(&template.files.js)
        .bind(template.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Returns false when no row matched.
    pub async fn delete_template(&self, id: Uuid) -> Result<bool, PortagenError> {
        let res = sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub(crate) fn row_to_template(row: SqliteRow) -> Result<Template, PortagenError> {
        let id: Uuid = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: String = row.try_get("description")?;
        let preview_url: String = row.try_get("preview_url")?;
        let is_premium: bool = row.try_get("is_premium")?;
        let html: String = row.try_get("html")?;
        let css: String = row.try_get("css")?;
        let js: String = row.try_get("js")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Template {
            id,
            name,
            description,
            preview_url,
            is_premium,
            files: TemplateFiles { html, css, js },
            created_at,
        })
    }
}
