use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

#[derive(Debug, Clone)]
pub struct DeviceHeartbeat {
    pub device_id: String,
    pub merchant_id: String,
    pub status: String,
    pub last_ping_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct DevicesRepo {
    pub pool: PgPool,
}

impl DevicesRepo {
    pub async fn latest_active(&self, merchant_id: &str) -> anyhow::Result<Option<DeviceHeartbeat>> {
        let row = sqlx::query(
            r#"
            SELECT device_id, merchant_id, status, last_ping_at
            FROM device_heartbeats
            WHERE merchant_id = $1 AND status = 'active'
            ORDER BY last_ping_at DESC
            LIMIT 1
            "#,
        )
        .bind(merchant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| DeviceHeartbeat {
            device_id: r.get("device_id"),
            merchant_id: r.get("merchant_id"),
            status: r.get("status"),
            last_ping_at: r.get("last_ping_at"),
        }))
    }

    pub async fn record_ping(&self, device_id: &str, merchant_id: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO device_heartbeats (device_id, merchant_id, status, last_ping_at)
            VALUES ($1, $2, 'active', now())
            ON CONFLICT (device_id)
            DO UPDATE SET last_ping_at = now(), status = 'active'
            "#,
        )
        .bind(device_id)
        .bind(merchant_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
