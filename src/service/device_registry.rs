use crate::invoke::{FunctionInvoker, InvokeRequest};
use crate::repo::devices_repo::{DeviceHeartbeat, DevicesRepo};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Strict `<`: a ping exactly at the freshness boundary counts as stale.
pub fn is_fresh(last_ping_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now.signed_duration_since(last_ping_at) < window
}

pub struct DeviceRegistry {
    invoker: Arc<dyn FunctionInvoker>,
    connected: RwLock<Option<String>>,
    freshness: Duration,
}

impl DeviceRegistry {
    pub fn new(invoker: Arc<dyn FunctionInvoker>, freshness_secs: i64) -> Self {
        Self {
            invoker,
            connected: RwLock::new(None),
            freshness: Duration::seconds(freshness_secs),
        }
    }

    pub async fn is_device_connected(&self) -> bool {
        self.connected.read().await.is_some()
    }

    pub async fn connected_device(&self) -> Option<String> {
        self.connected.read().await.clone()
    }

    pub async fn apply_heartbeat(&self, heartbeat: Option<&DeviceHeartbeat>, now: DateTime<Utc>) {
        let connected = heartbeat
            .filter(|hb| is_fresh(hb.last_ping_at, now, self.freshness))
            .map(|hb| hb.device_id.clone());
        *self.connected.write().await = connected;
    }

    /// Any query failure is swallowed and reported as "not connected": a
    /// false positive here would offer a payment path that cannot work.
    pub async fn check_connected_devices(&self, repo: &DevicesRepo, merchant_id: &str) {
        match repo.latest_active(merchant_id).await {
            Ok(heartbeat) => self.apply_heartbeat(heartbeat.as_ref(), Utc::now()).await,
            Err(err) => {
                tracing::warn!("device liveness query failed: {}", err);
                *self.connected.write().await = None;
            }
        }
    }

    pub async fn register_wallet(&self, merchant_id: &str, wallet_type: &str, wallet_id: &str) -> bool {
        let device_id = generate_device_id();
        let response = self
            .invoker
            .invoke(
                "wallet-connect",
                InvokeRequest {
                    merchant_id: merchant_id.to_string(),
                    endpoint: "register".to_string(),
                    data: json!({
                        "deviceId": device_id,
                        "walletType": wallet_type,
                        "walletId": wallet_id,
                    }),
                },
            )
            .await;

        match response {
            Ok(resp) if resp.success => {
                *self.connected.write().await = Some(device_id);
                true
            }
            Ok(resp) => {
                tracing::warn!(
                    "wallet registration rejected: {}",
                    resp.error.unwrap_or_else(|| "no error reported".to_string())
                );
                false
            }
            Err(err) => {
                tracing::warn!("wallet registration failed: {}", err);
                false
            }
        }
    }
}

fn generate_device_id() -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("wd-{}-{:04}", Utc::now().timestamp_millis(), suffix)
}

pub struct DeviceWatcher {
    pub registry: Arc<DeviceRegistry>,
    pub devices_repo: DevicesRepo,
    pub merchant_id: String,
    pub interval: std::time::Duration,
}

impl DeviceWatcher {
    pub async fn run(self) {
        loop {
            self.registry
                .check_connected_devices(&self.devices_repo, &self.merchant_id)
                .await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
