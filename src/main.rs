use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use checkout_gateway::bridge::http::HttpBridge;
use checkout_gateway::config::AppConfig;
use checkout_gateway::gateways::bridge::BridgeGateway;
use checkout_gateway::gateways::cbdc::CbdcGateway;
use checkout_gateway::gateways::cloud::CloudGateway;
use checkout_gateway::invoke::http::HttpFunctionInvoker;
use checkout_gateway::invoke::FunctionInvoker;
use checkout_gateway::repo::credentials_repo::CredentialsRepo;
use checkout_gateway::repo::devices_repo::DevicesRepo;
use checkout_gateway::repo::transaction_log_repo::{TransactionLog, TransactionLogRepo};
use checkout_gateway::repo::wallet_credentials_repo::WalletCredentialsRepo;
use checkout_gateway::service::checkout_service::CheckoutService;
use checkout_gateway::service::credential_store::CredentialStore;
use checkout_gateway::service::device_registry::{DeviceRegistry, DeviceWatcher};
use checkout_gateway::service::settings_cache::{SettingsCache, SettingsPersistence};
use checkout_gateway::service::wallet_capabilities::WalletCapabilities;
use checkout_gateway::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_client = redis::Client::open(cfg.redis_url.clone())?;

    let credentials_repo = CredentialsRepo { pool: pool.clone() };
    let wallet_credentials_repo = WalletCredentialsRepo { pool: pool.clone() };
    let devices_repo = DevicesRepo { pool: pool.clone() };
    let transaction_log_repo = TransactionLogRepo { pool: pool.clone() };
    let transaction_log: Arc<dyn TransactionLog> = Arc::new(transaction_log_repo.clone());

    let invoker: Arc<dyn FunctionInvoker> = Arc::new(HttpFunctionInvoker {
        base_url: cfg.functions_base_url.clone(),
        api_key: cfg.functions_api_key.clone(),
        timeout_ms: cfg.invoke_timeout_ms,
        client: reqwest::Client::new(),
    });

    let tap_bridge = Arc::new(HttpBridge {
        base_url: cfg.bridge_base_url.clone(),
        timeout_ms: cfg.invoke_timeout_ms,
        client: reqwest::Client::new(),
    });

    let credential_store = Arc::new(CredentialStore::new(
        credentials_repo.clone(),
        wallet_credentials_repo,
    ));

    let settings_cache = Arc::new(SettingsCache::new(SettingsPersistence {
        redis_client: redis::Client::open(cfg.redis_url.clone())?,
        credentials_repo: credentials_repo.clone(),
    }));
    settings_cache.load_from_remote(&cfg.merchant_id).await;
    let _ = credential_store.load(&cfg.merchant_id).await;

    let bridge_gateway = Arc::new(BridgeGateway::new(tap_bridge, transaction_log.clone()));
    if settings_cache.is_bridge_enabled().await {
        match bridge_gateway.initialize(&cfg.merchant_id).await {
            Ok(true) => tracing::info!("bridge initialized"),
            Ok(false) => tracing::warn!("bridge declined initialization"),
            Err(err) => tracing::warn!("bridge initialization failed: {}", err),
        }
    }

    let cloud_gateway = Arc::new(CloudGateway::new(
        invoker.clone(),
        transaction_log.clone(),
        std::time::Duration::from_secs(cfg.pending_timeout_secs),
    ));
    let cbdc_gateway = Arc::new(CbdcGateway::new(invoker.clone(), transaction_log.clone()));

    let device_registry = Arc::new(DeviceRegistry::new(invoker, cfg.device_freshness_secs));
    let watcher = DeviceWatcher {
        registry: device_registry.clone(),
        devices_repo: devices_repo.clone(),
        merchant_id: cfg.merchant_id.clone(),
        interval: std::time::Duration::from_secs(cfg.device_poll_interval_secs),
    };
    tokio::spawn(watcher.run());

    let checkout_service = CheckoutService {
        settings: settings_cache.clone(),
        bridge_gateway,
        cloud_gateway: cloud_gateway.clone(),
        cbdc_gateway: cbdc_gateway.clone(),
    };

    let state = AppState {
        checkout_service,
        settings_cache,
        credential_store,
        device_registry,
        cloud_gateway,
        cbdc_gateway,
        transaction_log_repo,
        devices_repo,
        wallet_capabilities: WalletCapabilities::from_env(),
        merchant_id: cfg.merchant_id.clone(),
        pool,
        redis_client,
    };

    let admin_key = cfg.internal_api_key.clone();
    let admin_routes = Router::new()
        .route(
            "/settings/bridge",
            put(checkout_gateway::http::handlers::settings::toggle_bridge),
        )
        .route(
            "/settings/cbdc",
            put(checkout_gateway::http::handlers::settings::toggle_cbdc),
        )
        .route(
            "/credentials",
            get(checkout_gateway::http::handlers::credentials::get_credentials)
                .put(checkout_gateway::http::handlers::credentials::save_credentials),
        )
        .route(
            "/devices/wallet",
            post(checkout_gateway::http::handlers::devices::register_wallet),
        )
        .layer(from_fn_with_state(
            admin_key,
            checkout_gateway::http::middleware::admin_auth::require_internal_api_key,
        ));

    let app = Router::new()
        .route("/health", get(checkout_gateway::http::handlers::checkout::health))
        .route(
            "/checkout",
            post(checkout_gateway::http::handlers::checkout::process_payment),
        )
        .route(
            "/webhooks/payment-completion",
            post(checkout_gateway::http::handlers::webhooks::payment_completion),
        )
        .route(
            "/cbdc/transactions/:transaction_id/status",
            get(checkout_gateway::http::handlers::cbdc::transaction_status),
        )
        .route(
            "/cbdc/transactions/:transaction_id/cancel",
            post(checkout_gateway::http::handlers::cbdc::cancel_payment),
        )
        .route(
            "/settings",
            get(checkout_gateway::http::handlers::settings::get_settings),
        )
        .route(
            "/devices/status",
            get(checkout_gateway::http::handlers::devices::device_status),
        )
        .route(
            "/devices/ping",
            post(checkout_gateway::http::handlers::devices::device_ping),
        )
        .route(
            "/merchants/:merchant_id/transactions",
            get(checkout_gateway::http::handlers::transactions::list_transactions),
        )
        .route("/ops/readiness", get(checkout_gateway::http::handlers::ops::readiness))
        .route("/ops/liveness", get(checkout_gateway::http::handlers::ops::liveness))
        .merge(admin_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
