use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::db::models::{Portfolio, PortfolioListItem, TemplateSummary};
use crate::db::sqlite::Storage;
use crate::error::PortagenError;
use crate::types::PortfolioContent;

const PORTFOLIO_COLUMNS: &str = "p.id, p.user_id, p.template_id, p.title, p.personal_info, \
     p.education, p.experience, p.projects, p.skills, p.is_public, p.created_at, p.updated_at";

impl Storage {
    pub async fn insert_portfolio(
        &self,
        user_id: Uuid,
        template_id: Uuid,
        content: PortfolioContent,
    ) -> Result<Portfolio, PortagenError> {
        let now = Utc::now();
        let portfolio = Portfolio {
            id: Uuid::new_v4(),
            user_id,
            template_id: Some(template_id),
            content,
            created_at: now,
            updated_at: now,
        };

        let c = &portfolio.content;
        sqlx::query(
            r#"INSERT INTO portfolios (
                id, user_id, template_id, title, personal_info, education,
                experience, projects, skills, is_public, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(portfolio.id)
        .bind(portfolio.user_id)
        .bind(portfolio.template_id)
        .bind(&c.title)
        .bind(serde_json::to_string(&c.personal_info)?)
        .bind(serde_json::to_string(&c.education)?)
        .bind(serde_json::to_string(&c.experience)?)
        .bind(serde_json::to_string(&c.projects)?)
        .bind(serde_json::to_string(&c.skills)?)
        .bind(c.is_public)
        .bind(portfolio.created_at)
        .bind(portfolio.updated_at)
        .execute(self.pool())
        .await?;

        Ok(portfolio)
    }

    /// The user's portfolios, newest first, each with a short template summary.
    pub async fn list_portfolios_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PortfolioListItem>, PortagenError> {
        let rows = sqlx::query(&format!(
            r#"SELECT {PORTFOLIO_COLUMNS}, t.name AS template_name, t.preview_url AS template_preview_url
               FROM portfolios p
               LEFT JOIN templates t ON t.id = p.template_id
               WHERE p.user_id = ?
               ORDER BY p.created_at DESC, p.rowid DESC"#
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                let template_name: Option<String> = row.try_get("template_name")?;
                let template_preview_url: Option<String> = row.try_get("template_preview_url")?;
                let portfolio = Self::row_to_portfolio(&row)?;
                let template = match (portfolio.template_id, template_name, template_preview_url) {
                    (Some(id), Some(name), Some(preview_url)) => Some(TemplateSummary {
                        id,
                        name,
                        preview_url,
                    }),
                    _ => None,
                };
                Ok(PortfolioListItem {
                    portfolio,
                    template,
                })
            })
            .collect()
    }

    pub async fn find_portfolio(&self, id: Uuid) -> Result<Option<Portfolio>, PortagenError> {
        let row = sqlx::query(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios p WHERE p.id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        row.as_ref().map(Self::row_to_portfolio).transpose()
    }

    /// Persist template reference and content; bumps `updated_at`.
    pub async fn update_portfolio(&self, portfolio: &mut Portfolio) -> Result<(), PortagenError> {
        portfolio.updated_at = Utc::now();
        let c = &portfolio.content;
        sqlx::query(
            r#"UPDATE portfolios SET
                template_id = ?,
                title = ?,
                personal_info = ?,
                education = ?,
                experience = ?,
                projects = ?,
                skills = ?,
                is_public = ?,
                updated_at = ?
              WHERE id = ?"#,
        )
        .bind(portfolio.template_id)
        .bind(&c.title)
        .bind(serde_json::to_string(&c.personal_info)?)
        .bind(serde_json::to_string(&c.education)?)
        .bind(serde_json::to_string(&c.experience)?)
        .bind(serde_json::to_string(&c.projects)?)
        .bind(serde_json::to_string(&c.skills)?)
        .bind(c.is_public)
        .bind(portfolio.updated_at)
        .bind(portfolio.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn delete_portfolio(&self, id: Uuid) -> Result<bool, PortagenError> {
        let res = sqlx::query("DELETE FROM portfolios WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    fn row_to_portfolio(row: &SqliteRow) -> Result<Portfolio, PortagenError> {
        let id: Uuid = row.try_get("id")?;
        let user_id: Uuid = row.try_get("user_id")?;
        let template_id: Option<Uuid> = row.try_get("template_id")?;
        let title: String = row.try_get("title")?;
        let is_public: bool = row.try_get("is_public")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

        let content = PortfolioContent {
            title,
            personal_info: json_column(row, "personal_info")?,
            education: json_column(row, "education")?,
            experience: json_column(row, "experience")?,
            projects: json_column(row, "projects")?,
            skills: json_column(row, "skills")?,
            is_public,
        };

        Ok(Portfolio {
            id,
            user_id,
            template_id,
            content,
            created_at,
            updated_at,
        })
    }
}

fn json_column<T: DeserializeOwned>(row: &SqliteRow, column: &str) -> Result<T, PortagenError> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(|e| sqlx::Error::Decode(Box::new(e)).into())
}
