use chrono::Utc;
use uuid::Uuid;

use crate::db::models::{Payment, PaymentStatus, PaymentView};
use crate::db::sqlite::Storage;
use crate::error::PortagenError;

impl Storage {
    /// Record a payment and upgrade the payer in one transaction.
    ///
    /// There is no gateway behind this: the row is written as `pending` and
    /// immediately flipped to `completed`.
    pub async fn record_simulated_payment(
        &self,
        user_id: Uuid,
        template_id: Option<Uuid>,
        amount: f64,
    ) -> Result<Payment, PortagenError> {
        let mut payment = Payment {
            id: Uuid::new_v4(),
            user_id,
            template_id,
            amount,
            payment_status: PaymentStatus::Pending,
            payment_date: Utc::now(),
        };

        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r#"INSERT INTO payments (id, user_id, template_id, amount, payment_status, payment_date)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payment.id)
        .bind(payment.user_id)
        .bind(payment.template_id)
        .bind(payment.amount)
        .bind(payment.payment_status)
        .bind(payment.payment_date)
        .execute(&mut *tx)
        .await?;

        payment.payment_status = PaymentStatus::Completed;
        sqlx::query("UPDATE payments SET payment_status = ? WHERE id = ?")
            .bind(payment.payment_status)
            .bind(payment.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET is_premium = 1, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(payment)
    }

    /// The user's payments, newest first, with the template name when it still exists.
    pub async fn list_payments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PaymentView>, PortagenError> {
        let rows = sqlx::query_as::<_, PaymentView>(
            r#"SELECT p.id, p.user_id, p.template_id, p.amount, p.payment_status, p.payment_date,
                      t.name AS template_name
               FROM payments p
               LEFT JOIN templates t ON t.id = p.template_id
               WHERE p.user_id = ?
               ORDER BY p.payment_date DESC, p.rowid DESC"#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }
}
