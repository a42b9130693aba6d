use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Append-only snapshot of a vendor's four derived metrics at a point in
/// time. Kept for schema parity with the upstream system; nothing in this
/// service writes snapshots.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = HistoricalPerformance)]
#[sea_orm(table_name = "historical_performance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub vendor_code: String,
    pub date: DateTime<Utc>,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorCode",
        to = "super::vendor::Column::VendorCode",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Vendor,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
