//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database, PaymentProvider};
use crate::services::{
    AuthService, CartService, CatalogService, CheckoutService, FeedbackService,
    PurchaseQueryService, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub cart_service: Arc<dyn CartService>,
    pub checkout_service: Arc<dyn CheckoutService>,
    pub purchase_service: Arc<dyn PurchaseQueryService>,
    pub feedback_service: Arc<dyn FeedbackService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from infrastructure and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        provider: Arc<dyn PaymentProvider>,
        config: Config,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), provider, config);

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            catalog_service: container.catalog(),
            cart_service: container.carts(),
            checkout_service: container.checkout(),
            purchase_service: container.purchases(),
            feedback_service: container.feedback(),
            cache,
            database,
        }
    }
}
