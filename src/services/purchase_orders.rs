use crate::{
    db::DbPool,
    entities::{
        purchase_order::{self, Entity as PurchaseOrderEntity, PurchaseOrderStatus},
        vendor::Entity as VendorEntity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::metrics,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request/response types for the purchase order service

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseOrderRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Purchase order number must be between 1 and 50 characters"
    ))]
    pub po_number: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Vendor code must be between 1 and 50 characters"
    ))]
    pub vendor_code: String,
    pub order_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    #[schema(value_type = Object)]
    pub items: serde_json::Value,
    /// One of: pending, completed, canceled
    pub status: String,
    pub quality_rating: Option<f64>,
    pub issue_date: DateTime<Utc>,
    pub acknowledgment_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePurchaseOrderRequest {
    #[validate(length(min = 1, max = 50))]
    pub vendor_code: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    #[schema(value_type = Object)]
    pub items: Option<serde_json::Value>,
    /// One of: pending, completed, canceled
    pub status: Option<String>,
    pub quality_rating: Option<f64>,
    pub issue_date: Option<DateTime<Utc>>,
    pub acknowledgment_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AcknowledgePurchaseOrderRequest {
    pub acknowledgment_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseOrderListResponse {
    pub purchase_orders: Vec<purchase_order::Model>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

fn parse_status(value: &str) -> Result<PurchaseOrderStatus, ServiceError> {
    PurchaseOrderStatus::from_str(value).map_err(ServiceError::ValidationError)
}

/// Service for managing purchase orders.
///
/// Every successful write runs the vendor metric recalculation inside the
/// same transaction before committing, so the derived fields on the vendor
/// row never lag the order set they summarize.
#[derive(Clone)]
pub struct PurchaseOrderService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl PurchaseOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new purchase order and recomputes the owning vendor's
    /// metrics.
    #[instrument(skip(self, request), fields(po_number = %request.po_number, vendor_code = %request.vendor_code))]
    pub async fn create_purchase_order(
        &self,
        request: CreatePurchaseOrderRequest,
    ) -> Result<purchase_order::Model, ServiceError> {
        let status = parse_status(&request.status)?;

        let txn = self.db_pool.begin().await?;

        let vendor_exists = VendorEntity::find_by_id(request.vendor_code.clone())
            .one(&txn)
            .await?
            .is_some();
        if !vendor_exists {
            return Err(ServiceError::ValidationError(format!(
                "vendor '{}' does not exist",
                request.vendor_code
            )));
        }

        let duplicate = PurchaseOrderEntity::find_by_id(request.po_number.clone())
            .one(&txn)
            .await?
            .is_some();
        if duplicate {
            return Err(ServiceError::ValidationError(format!(
                "po_number '{}' is already in use",
                request.po_number
            )));
        }

        // Completed orders get their actual completion timestamp stamped
        // exactly once.
        let delivered_date = match (status, request.delivered_date) {
            (PurchaseOrderStatus::Completed, None) => Some(Utc::now()),
            (_, delivered_date) => delivered_date,
        };

        let active = purchase_order::ActiveModel {
            po_number: Set(request.po_number),
            vendor_code: Set(request.vendor_code.clone()),
            order_date: Set(request.order_date),
            delivery_date: Set(request.delivery_date),
            items: Set(request.items),
            status: Set(status),
            quality_rating: Set(request.quality_rating),
            issue_date: Set(request.issue_date),
            acknowledgment_date: Set(request.acknowledgment_date),
            delivered_date: Set(delivered_date),
        };
        let created = active.insert(&txn).await?;

        metrics::recalculate_vendor_metrics(&txn, &request.vendor_code).await?;
        txn.commit().await?;

        info!(po_number = %created.po_number, "purchase order created");
        self.send_order_events(
            Event::PurchaseOrderCreated(created.po_number.clone()),
            &request.vendor_code,
        )
        .await;

        Ok(created)
    }

    /// Retrieves one purchase order by number.
    #[instrument(skip(self))]
    pub async fn get_purchase_order(
        &self,
        po_number: &str,
    ) -> Result<Option<purchase_order::Model>, ServiceError> {
        let order = PurchaseOrderEntity::find_by_id(po_number.to_owned())
            .one(&*self.db_pool)
            .await?;
        Ok(order)
    }

    /// Lists purchase orders ordered by number, optionally filtered to one
    /// vendor.
    #[instrument(skip(self))]
    pub async fn list_purchase_orders(
        &self,
        page: u64,
        per_page: u64,
        vendor_code: Option<&str>,
    ) -> Result<PurchaseOrderListResponse, ServiceError> {
        let mut query = PurchaseOrderEntity::find().order_by_asc(purchase_order::Column::PoNumber);
        if let Some(vendor_code) = vendor_code {
            query = query.filter(purchase_order::Column::VendorCode.eq(vendor_code));
        }

        let paginator = query.paginate(&*self.db_pool, per_page.max(1));
        let total = paginator.num_items().await?;
        let purchase_orders = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PurchaseOrderListResponse {
            purchase_orders,
            total,
            page,
            per_page,
        })
    }

    /// Applies a partial update to a purchase order and recomputes the
    /// owning vendor's metrics.
    #[instrument(skip(self, request))]
    pub async fn update_purchase_order(
        &self,
        po_number: &str,
        request: UpdatePurchaseOrderRequest,
    ) -> Result<purchase_order::Model, ServiceError> {
        let status = request.status.as_deref().map(parse_status).transpose()?;

        let txn = self.db_pool.begin().await?;

        let order = PurchaseOrderEntity::find_by_id(po_number.to_owned())
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order '{po_number}' not found"))
            })?;

        let vendor_code = match request.vendor_code {
            Some(vendor_code) => {
                let exists = VendorEntity::find_by_id(vendor_code.clone())
                    .one(&txn)
                    .await?
                    .is_some();
                if !exists {
                    return Err(ServiceError::ValidationError(format!(
                        "vendor '{vendor_code}' does not exist"
                    )));
                }
                vendor_code
            }
            None => order.vendor_code.clone(),
        };

        let new_status = status.unwrap_or(order.status);
        // Stamp the completion timestamp the first time the order lands in
        // completed; later saves leave it untouched.
        let delivered_date = match (new_status, order.delivered_date, request.delivered_date) {
            (_, _, Some(explicit)) => Some(explicit),
            (PurchaseOrderStatus::Completed, None, None) => Some(Utc::now()),
            (_, existing, None) => existing,
        };

        let mut active: purchase_order::ActiveModel = order.into();
        active.vendor_code = Set(vendor_code.clone());
        active.status = Set(new_status);
        active.delivered_date = Set(delivered_date);
        if let Some(order_date) = request.order_date {
            active.order_date = Set(order_date);
        }
        if let Some(delivery_date) = request.delivery_date {
            active.delivery_date = Set(Some(delivery_date));
        }
        if let Some(items) = request.items {
            active.items = Set(items);
        }
        if let Some(quality_rating) = request.quality_rating {
            active.quality_rating = Set(Some(quality_rating));
        }
        if let Some(issue_date) = request.issue_date {
            active.issue_date = Set(issue_date);
        }
        if let Some(acknowledgment_date) = request.acknowledgment_date {
            active.acknowledgment_date = Set(Some(acknowledgment_date));
        }
        let updated = active.update(&txn).await?;

        metrics::recalculate_vendor_metrics(&txn, &vendor_code).await?;
        txn.commit().await?;

        info!(po_number, "purchase order updated");
        self.send_order_events(
            Event::PurchaseOrderUpdated(po_number.to_owned()),
            &vendor_code,
        )
        .await;

        Ok(updated)
    }

    /// Stores the client-supplied acknowledgment date verbatim and
    /// recomputes the owning vendor's metrics.
    #[instrument(skip(self, request))]
    pub async fn acknowledge_purchase_order(
        &self,
        po_number: &str,
        request: AcknowledgePurchaseOrderRequest,
    ) -> Result<purchase_order::Model, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = PurchaseOrderEntity::find_by_id(po_number.to_owned())
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order '{po_number}' not found"))
            })?;

        let vendor_code = order.vendor_code.clone();
        let mut active: purchase_order::ActiveModel = order.into();
        active.acknowledgment_date = Set(Some(request.acknowledgment_date));
        let updated = active.update(&txn).await?;

        metrics::recalculate_vendor_metrics(&txn, &vendor_code).await?;
        txn.commit().await?;

        info!(po_number, "purchase order acknowledged");
        self.send_order_events(
            Event::PurchaseOrderAcknowledged(po_number.to_owned()),
            &vendor_code,
        )
        .await;

        Ok(updated)
    }

    /// Deletes a purchase order. Vendor metrics are left as last computed;
    /// they refresh on the vendor's next order write.
    #[instrument(skip(self))]
    pub async fn delete_purchase_order(&self, po_number: &str) -> Result<(), ServiceError> {
        let result = PurchaseOrderEntity::delete_by_id(po_number.to_owned())
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Purchase order '{po_number}' not found"
            )));
        }

        info!(po_number, "purchase order deleted");
        if let Err(e) = self
            .event_sender
            .send(Event::PurchaseOrderDeleted(po_number.to_owned()))
            .await
        {
            warn!(error = %e, "failed to send purchase order deleted event");
        }

        Ok(())
    }

    async fn send_order_events(&self, event: Event, vendor_code: &str) {
        if let Err(e) = self.event_sender.send(event).await {
            warn!(error = %e, "failed to send purchase order event");
        }
        if let Err(e) = self
            .event_sender
            .send(Event::VendorMetricsRecalculated {
                vendor_code: vendor_code.to_owned(),
            })
            .await
        {
            warn!(error = %e, "failed to send metrics recalculated event");
        }
    }
}
