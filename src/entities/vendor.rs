use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A supplier tracked with four rolling performance metrics.
///
/// The metric fields are derived state. They are rewritten by
/// `services::metrics` after every purchase-order write and are never
/// accepted from clients.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Vendor)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vendor_code: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub contact_details: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order::Entity")]
    PurchaseOrders,
    #[sea_orm(has_many = "super::historical_performance::Entity")]
    HistoricalPerformance,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl Related<super::historical_performance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoricalPerformance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
