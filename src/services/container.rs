//! Service Container - Centralized service access.
//!
//! Wires every application service to the shared Unit of Work and the
//! injected payment provider, so handlers depend on traits only.

use std::sync::Arc;

use super::{
    AuthService, CartService, CatalogService, CheckoutService, FeedbackService,
    PurchaseQueryService, UserService,
};
use crate::config::Config;
use crate::infra::{PaymentProvider, Persistence};

/// Concrete service container
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    catalog_service: Arc<dyn CatalogService>,
    cart_service: Arc<dyn CartService>,
    checkout_service: Arc<dyn CheckoutService>,
    purchase_service: Arc<dyn PurchaseQueryService>,
    feedback_service: Arc<dyn FeedbackService>,
}

impl Services {
    /// Create service container from a database connection, a payment
    /// provider, and config.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        provider: Arc<dyn PaymentProvider>,
        config: Config,
    ) -> Self {
        use super::{
            Authenticator, CartManager, CatalogManager, CheckoutManager, CheckoutUrls,
            FeedbackManager, PurchaseReporter, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));
        let urls = CheckoutUrls {
            success_url: config.checkout_success_url(),
            cancel_url: config.checkout_cancel_url(),
            client_url: config.client_url.clone(),
        };

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            catalog_service: Arc::new(CatalogManager::new(uow.clone())),
            cart_service: Arc::new(CartManager::new(uow.clone())),
            checkout_service: Arc::new(CheckoutManager::new(
                uow.clone(),
                provider.clone(),
                urls,
            )),
            purchase_service: Arc::new(PurchaseReporter::new(uow.clone(), provider)),
            feedback_service: Arc::new(FeedbackManager::new(uow)),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    pub fn carts(&self) -> Arc<dyn CartService> {
        self.cart_service.clone()
    }

    pub fn checkout(&self) -> Arc<dyn CheckoutService> {
        self.checkout_service.clone()
    }

    pub fn purchases(&self) -> Arc<dyn PurchaseQueryService> {
        self.purchase_service.clone()
    }

    pub fn feedback(&self) -> Arc<dyn FeedbackService> {
        self.feedback_service.clone()
    }
}
