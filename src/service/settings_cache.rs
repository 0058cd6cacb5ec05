use crate::domain::credentials::FeatureFlags;
use crate::repo::credentials_repo::CredentialsRepo;
use redis::AsyncCommands;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct SettingsPersistence {
    pub redis_client: redis::Client,
    pub credentials_repo: CredentialsRepo,
}

/// Feature-flag cache with an in-memory fast path. Toggles write memory
/// first, then the redis fast cache in-call, then fire-and-forget the remote
/// flag upsert (write-behind: memory and remote may transiently diverge,
/// readers trust memory).
pub struct SettingsCache {
    flags: RwLock<FeatureFlags>,
    merchant_id: RwLock<Option<String>>,
    persistence: Option<Arc<SettingsPersistence>>,
}

impl SettingsCache {
    pub fn new(persistence: SettingsPersistence) -> Self {
        Self {
            flags: RwLock::new(FeatureFlags::default()),
            merchant_id: RwLock::new(None),
            persistence: Some(Arc::new(persistence)),
        }
    }

    pub fn detached() -> Self {
        Self {
            flags: RwLock::new(FeatureFlags::default()),
            merchant_id: RwLock::new(None),
            persistence: None,
        }
    }

    pub async fn is_bridge_enabled(&self) -> bool {
        self.flags.read().await.use_bridge
    }

    pub async fn is_cbdc_enabled(&self) -> bool {
        self.flags.read().await.use_cbdc
    }

    pub async fn flags(&self) -> FeatureFlags {
        *self.flags.read().await
    }

    pub async fn toggle_bridge(&self, enabled: bool) {
        let flags = {
            let mut flags = self.flags.write().await;
            flags.use_bridge = enabled;
            *flags
        };
        self.persist(flags).await;
    }

    pub async fn toggle_cbdc(&self, enabled: bool) {
        let flags = {
            let mut flags = self.flags.write().await;
            flags.use_cbdc = enabled;
            *flags
        };
        self.persist(flags).await;
    }

    /// Overwrites memory and the fast cache from the stored record when one
    /// exists; a merchant with no stored record keeps the current flags.
    pub async fn load_from_remote(&self, merchant_id: &str) {
        *self.merchant_id.write().await = Some(merchant_id.to_string());

        let Some(persistence) = &self.persistence else {
            return;
        };

        match persistence.credentials_repo.fetch(merchant_id).await {
            Ok(Some(row)) => {
                *self.flags.write().await = row.flags;
                if let Err(err) = write_fast_cache(persistence, merchant_id, row.flags).await {
                    tracing::warn!("settings fast-cache write failed: {}", err);
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("settings load from remote failed: {}", err);
            }
        }
    }

    async fn persist(&self, flags: FeatureFlags) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        let Some(merchant_id) = self.merchant_id.read().await.clone() else {
            tracing::warn!("flag toggle before load_from_remote, skipping persistence");
            return;
        };

        if let Err(err) = write_fast_cache(persistence, &merchant_id, flags).await {
            tracing::warn!("settings fast-cache write failed: {}", err);
        }

        let persistence = persistence.clone();
        tokio::spawn(async move {
            if let Err(err) = persistence
                .credentials_repo
                .update_flags(&merchant_id, &flags)
                .await
            {
                tracing::warn!("settings remote persistence failed: {}", err);
            }
        });
    }
}

fn fast_cache_key(merchant_id: &str) -> String {
    format!("settings:{}:flags", merchant_id)
}

async fn write_fast_cache(
    persistence: &SettingsPersistence,
    merchant_id: &str,
    flags: FeatureFlags,
) -> anyhow::Result<()> {
    let mut conn = persistence
        .redis_client
        .get_multiplexed_async_connection()
        .await?;
    let payload = serde_json::to_string(&flags)?;
    let _: () = conn.set(fast_cache_key(merchant_id), payload).await?;
    Ok(())
}
