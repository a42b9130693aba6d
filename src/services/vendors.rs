use crate::{
    db::DbPool,
    entities::vendor::{self, Entity as VendorEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{
    ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request/response types for the vendor service

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVendorRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Vendor code must be between 1 and 50 characters"
    ))]
    pub vendor_code: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub contact_details: String,
    pub address: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVendorRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: Option<String>,
    pub contact_details: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorListResponse {
    pub vendors: Vec<vendor::Model>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Read-only projection of the four derived metrics.
#[derive(Debug, Serialize, ToSchema)]
pub struct PerformanceResponse {
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

impl From<vendor::Model> for PerformanceResponse {
    fn from(vendor: vendor::Model) -> Self {
        Self {
            on_time_delivery_rate: vendor.on_time_delivery_rate,
            quality_rating_avg: vendor.quality_rating_avg,
            average_response_time: vendor.average_response_time,
            fulfillment_rate: vendor.fulfillment_rate,
        }
    }
}

/// Service for managing vendors.
#[derive(Clone)]
pub struct VendorService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl VendorService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a new vendor with all derived metrics at zero.
    #[instrument(skip(self, request), fields(vendor_code = %request.vendor_code))]
    pub async fn create_vendor(
        &self,
        request: CreateVendorRequest,
    ) -> Result<vendor::Model, ServiceError> {
        let db = &*self.db_pool;

        let existing = VendorEntity::find_by_id(request.vendor_code.clone())
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "vendor_code '{}' is already in use",
                request.vendor_code
            )));
        }

        let active = vendor::ActiveModel {
            vendor_code: Set(request.vendor_code),
            name: Set(request.name),
            contact_details: Set(request.contact_details),
            address: Set(request.address),
            on_time_delivery_rate: Set(0.0),
            quality_rating_avg: Set(0.0),
            average_response_time: Set(0.0),
            fulfillment_rate: Set(0.0),
        };
        let created = active.insert(db).await?;

        info!(vendor_code = %created.vendor_code, "vendor created");
        if let Err(e) = self
            .event_sender
            .send(Event::VendorCreated(created.vendor_code.clone()))
            .await
        {
            warn!(error = %e, "failed to send vendor created event");
        }

        Ok(created)
    }

    /// Retrieves one vendor by code.
    #[instrument(skip(self))]
    pub async fn get_vendor(&self, vendor_code: &str) -> Result<Option<vendor::Model>, ServiceError> {
        let vendor = VendorEntity::find_by_id(vendor_code.to_owned())
            .one(&*self.db_pool)
            .await?;
        Ok(vendor)
    }

    /// Lists vendors ordered by code, one page at a time.
    #[instrument(skip(self))]
    pub async fn list_vendors(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<VendorListResponse, ServiceError> {
        let paginator = VendorEntity::find()
            .order_by_asc(vendor::Column::VendorCode)
            .paginate(&*self.db_pool, per_page.max(1));

        let total = paginator.num_items().await?;
        let vendors = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(VendorListResponse {
            vendors,
            total,
            page,
            per_page,
        })
    }

    /// Applies a partial update to a vendor. Derived metrics are not
    /// client-writable and cannot be touched here.
    #[instrument(skip(self, request))]
    pub async fn update_vendor(
        &self,
        vendor_code: &str,
        request: UpdateVendorRequest,
    ) -> Result<vendor::Model, ServiceError> {
        let db = &*self.db_pool;

        let vendor = VendorEntity::find_by_id(vendor_code.to_owned())
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vendor '{vendor_code}' not found")))?;

        let mut active: vendor::ActiveModel = vendor.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(contact_details) = request.contact_details {
            active.contact_details = Set(contact_details);
        }
        if let Some(address) = request.address {
            active.address = Set(address);
        }
        let updated = active.update(db).await?;

        info!(vendor_code, "vendor updated");
        if let Err(e) = self
            .event_sender
            .send(Event::VendorUpdated(vendor_code.to_owned()))
            .await
        {
            warn!(error = %e, "failed to send vendor updated event");
        }

        Ok(updated)
    }

    /// Deletes a vendor. The purchase orders referencing it are removed by
    /// the cascading foreign key.
    #[instrument(skip(self))]
    pub async fn delete_vendor(&self, vendor_code: &str) -> Result<(), ServiceError> {
        let result = VendorEntity::delete_by_id(vendor_code.to_owned())
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Vendor '{vendor_code}' not found"
            )));
        }

        info!(vendor_code, "vendor deleted");
        if let Err(e) = self
            .event_sender
            .send(Event::VendorDeleted(vendor_code.to_owned()))
            .await
        {
            warn!(error = %e, "failed to send vendor deleted event");
        }

        Ok(())
    }

    /// Returns only the four derived metrics for one vendor.
    #[instrument(skip(self))]
    pub async fn get_performance(
        &self,
        vendor_code: &str,
    ) -> Result<PerformanceResponse, ServiceError> {
        let vendor = VendorEntity::find_by_id(vendor_code.to_owned())
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vendor '{vendor_code}' not found")))?;

        Ok(vendor.into())
    }
}
