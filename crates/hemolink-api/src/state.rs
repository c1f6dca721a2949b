//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use hemolink_auth::jwt::{JwtDecoder, JwtEncoder};
use hemolink_core::config::AppConfig;
use hemolink_database::repositories::{
    BloodRequestRepository, DonorRepository, NotificationRepository,
};
use hemolink_realtime::{FanoutDispatcher, SessionRegistry};
use hemolink_service::{
    DonorMatcher, NotificationService, RequestLifecycleService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// JWT token encoder (development tooling)
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Live WebSocket channel registry
    pub registry: Arc<SessionRegistry>,
    /// Notification fan-out dispatcher
    pub dispatcher: Arc<FanoutDispatcher>,
    /// Request lifecycle service
    pub lifecycle: Arc<RequestLifecycleService>,
    /// Notification feed service
    pub notifications: Arc<NotificationService>,
}

impl AppState {
    /// Wire the full dependency graph from a config and a ready pool.
    pub fn build(config: Arc<AppConfig>, db_pool: PgPool) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let request_repo = Arc::new(BloodRequestRepository::new(db_pool.clone()));
        let donor_repo = Arc::new(DonorRepository::new(db_pool.clone()));
        let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));

        let registry = Arc::new(SessionRegistry::new(config.realtime.clone()));
        let dispatcher = Arc::new(FanoutDispatcher::new(
            notification_repo.clone(),
            registry.clone(),
        ));

        let lifecycle = Arc::new(RequestLifecycleService::new(
            request_repo,
            DonorMatcher::new(donor_repo),
            dispatcher.clone(),
        ));
        let notifications = Arc::new(NotificationService::new(notification_repo));

        Self {
            config,
            db_pool,
            jwt_encoder,
            jwt_decoder,
            registry,
            dispatcher,
            lifecycle,
            notifications,
        }
    }
}
