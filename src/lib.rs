use std::sync::Arc;

pub mod bridge;
pub mod config;
pub mod domain {
    pub mod checkout;
    pub mod credentials;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod cbdc;
        pub mod checkout;
        pub mod credentials;
        pub mod devices;
        pub mod ops;
        pub mod settings;
        pub mod transactions;
        pub mod webhooks;
    }
    pub mod middleware {
        pub mod admin_auth;
    }
}
pub mod invoke;
pub mod pending;
pub mod repo {
    pub mod credentials_repo;
    pub mod devices_repo;
    pub mod transaction_log_repo;
    pub mod wallet_credentials_repo;
}
pub mod service {
    pub mod checkout_service;
    pub mod credential_store;
    pub mod device_registry;
    pub mod settings_cache;
    pub mod wallet_capabilities;
}

#[derive(Clone)]
pub struct AppState {
    pub checkout_service: service::checkout_service::CheckoutService,
    pub settings_cache: Arc<service::settings_cache::SettingsCache>,
    pub credential_store: Arc<service::credential_store::CredentialStore>,
    pub device_registry: Arc<service::device_registry::DeviceRegistry>,
    pub cloud_gateway: Arc<gateways::cloud::CloudGateway>,
    pub cbdc_gateway: Arc<gateways::cbdc::CbdcGateway>,
    pub transaction_log_repo: repo::transaction_log_repo::TransactionLogRepo,
    pub devices_repo: repo::devices_repo::DevicesRepo,
    pub wallet_capabilities: service::wallet_capabilities::WalletCapabilities,
    pub merchant_id: String,
    pub pool: sqlx::PgPool,
    pub redis_client: redis::Client,
}
