//! Who may do what with portfolios and templates.

use crate::db::{Portfolio, Template, User};
use crate::error::PortagenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioAction {
    View,
    Update,
    Delete,
    Download,
}

impl PortfolioAction {
    fn denied(self) -> &'static str {
        match self {
            PortfolioAction::View => "Not authorized to access this portfolio",
            PortfolioAction::Update => "Not authorized to update this portfolio",
            PortfolioAction::Delete => "Not authorized to delete this portfolio",
            PortfolioAction::Download => "Not authorized to download this portfolio",
        }
    }
}

/// Owners may do anything; others may only view public portfolios.
pub fn authorize(
    portfolio: &Portfolio,
    user: &User,
    action: PortfolioAction,
) -> Result<(), PortagenError> {
    let is_owner = portfolio.user_id == user.id;
    let public_view = action == PortfolioAction::View && portfolio.content.is_public;
    if is_owner || public_view {
        Ok(())
    } else {
        Err(PortagenError::Forbidden(action.denied()))
    }
}

pub fn ensure_template_usable(template: &Template, user: &User) -> Result<(), PortagenError> {
    if template.is_premium && !user.is_premium {
        return Err(PortagenError::Forbidden(
            "This template requires a premium account",
        ));
    }
    Ok(())
}

pub fn ensure_admin(user: &User) -> Result<(), PortagenError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(PortagenError::Forbidden("Not authorized as an admin"))
    }
}
