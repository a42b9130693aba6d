use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A purchase order placed with a vendor.
///
/// `delivery_date` is the scheduled date; `delivered_date` is stamped the
/// first time the order is saved as completed. `acknowledgment_date` is set
/// through the acknowledge endpoint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = PurchaseOrder)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub po_number: String,
    pub vendor_code: String,
    pub order_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    #[schema(value_type = Object)]
    pub items: Json,
    pub status: PurchaseOrderStatus,
    pub quality_rating: Option<f64>,
    pub issue_date: DateTime<Utc>,
    pub acknowledgment_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
}

/// Lifecycle status of a purchase order, stored as a string column.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

impl std::str::FromStr for PurchaseOrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            other => Err(format!(
                "'{other}' is not a valid status (expected one of: pending, completed, canceled)"
            )),
        }
    }
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
