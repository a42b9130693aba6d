pub mod auth;
pub mod common;
pub mod health;
pub mod purchase_orders;
pub mod users;
pub mod vendors;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{
    purchase_orders::PurchaseOrderService, users::UserService, vendors::VendorService,
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub vendors: Arc<VendorService>,
    pub purchase_orders: Arc<PurchaseOrderService>,
    pub users: Arc<UserService>,
}

impl AppServices {
    /// Build the service container shared by all handlers.
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        let vendors = Arc::new(VendorService::new(db_pool.clone(), event_sender.clone()));
        let purchase_orders = Arc::new(PurchaseOrderService::new(db_pool.clone(), event_sender));
        let users = Arc::new(UserService::new(db_pool));

        Self {
            vendors,
            purchase_orders,
            users,
        }
    }
}
