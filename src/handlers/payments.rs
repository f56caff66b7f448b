use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::db::Payment;
use crate::db::models::PaymentView;
use crate::error::PortagenError;
use crate::middleware::{AuthUser, ValidatedJson};
use crate::router::PortagenState;
use crate::types::forms::PaymentForm;

/// POST /api/payments
///
/// Simulated checkout: always succeeds and upgrades the caller to premium.
pub async fn create_payment(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
    ValidatedJson(form): ValidatedJson<PaymentForm>,
) -> Result<(StatusCode, Json<Payment>), PortagenError> {
    if let Some(template_id) = form.template_id
        && state.storage.find_template(template_id).await?.is_none()
    {
        return Err(PortagenError::BadRequest("Template not found".to_string()));
    }

    let payment = state
        .storage
        .record_simulated_payment(user.id, form.template_id, form.amount)
        .await?;
    info!(
        user_id = %user.id,
        payment_id = %payment.id,
        amount = payment.amount,
        "simulated payment completed, user upgraded to premium"
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/payments
pub async fn list_payments(
    State(state): State<PortagenState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PaymentView>>, PortagenError> {
    Ok(Json(state.storage.list_payments_for_user(user.id).await?))
}
