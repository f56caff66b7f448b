pub mod health;
pub mod payments;
pub mod portfolios;
pub mod templates;
pub mod users;

use uuid::Uuid;

use crate::error::PortagenError;

/// Path ids that do not parse can never match a row.
pub(crate) fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, PortagenError> {
    Uuid::parse_str(raw).map_err(|_| PortagenError::NotFound(not_found))
}
