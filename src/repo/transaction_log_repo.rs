use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct TransactionLogEntry {
    pub merchant_id: String,
    pub transaction_id: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub payment_method: String,
    pub gateway: String,
    pub status: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredTransaction {
    pub id: i64,
    pub merchant_id: String,
    pub transaction_id: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub payment_method: String,
    pub gateway: String,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Append-only audit log. Writes are best-effort at the call sites: a failed
/// append must never change a payment outcome.
#[async_trait::async_trait]
pub trait TransactionLog: Send + Sync {
    async fn record(&self, entry: TransactionLogEntry) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct TransactionLogRepo {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl TransactionLog for TransactionLogRepo {
    async fn record(&self, entry: TransactionLogEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transaction_log (
                merchant_id, transaction_id, amount_minor, currency,
                payment_method, gateway, status, error_message
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.merchant_id)
        .bind(entry.transaction_id)
        .bind(entry.amount_minor)
        .bind(entry.currency)
        .bind(entry.payment_method)
        .bind(entry.gateway)
        .bind(entry.status)
        .bind(entry.error_message)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl TransactionLogRepo {
    pub async fn list_recent(&self, merchant_id: &str, limit: i64) -> anyhow::Result<Vec<StoredTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, merchant_id, transaction_id, amount_minor, currency,
                   payment_method, gateway, status, error_message, created_at
            FROM transaction_log
            WHERE merchant_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(merchant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| StoredTransaction {
                id: r.get("id"),
                merchant_id: r.get("merchant_id"),
                transaction_id: r.get("transaction_id"),
                amount_minor: r.get("amount_minor"),
                currency: r.get("currency"),
                payment_method: r.get("payment_method"),
                gateway: r.get("gateway"),
                status: r.get("status"),
                error_message: r.get("error_message"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
