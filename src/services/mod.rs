pub mod metrics;
pub mod purchase_orders;
pub mod users;
pub mod vendors;
