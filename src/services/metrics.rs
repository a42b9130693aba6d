//! Vendor performance metric recalculation.
//!
//! Invoked after every successful purchase-order create, update, and
//! acknowledge. `recalculate_vendor_metrics` takes any `ConnectionTrait`
//! so callers run it inside the transaction that performed the triggering
//! write; concurrent saves for one vendor then serialize at the database
//! instead of overwriting each other's aggregates.

use crate::entities::{
    purchase_order::{self, PurchaseOrderStatus},
    vendor,
};
use crate::errors::ServiceError;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;

/// Fraction of completed orders delivered on or before their scheduled
/// delivery date. Orders missing either date never count as on-time.
/// 0 when the vendor has no completed orders.
pub fn on_time_delivery_rate(orders: &[purchase_order::Model]) -> f64 {
    let completed: Vec<_> = orders
        .iter()
        .filter(|o| o.status == PurchaseOrderStatus::Completed)
        .collect();
    if completed.is_empty() {
        return 0.0;
    }

    let on_time = completed
        .iter()
        .filter(|o| {
            matches!(
                (o.delivery_date, o.delivered_date),
                (Some(due), Some(actual)) if due >= actual
            )
        })
        .count();

    on_time as f64 / completed.len() as f64
}

/// Mean quality rating over completed orders that carry one; 0 if none do.
pub fn quality_rating_avg(orders: &[purchase_order::Model]) -> f64 {
    let ratings: Vec<f64> = orders
        .iter()
        .filter(|o| o.status == PurchaseOrderStatus::Completed)
        .filter_map(|o| o.quality_rating)
        .collect();
    if ratings.is_empty() {
        return 0.0;
    }

    ratings.iter().sum::<f64>() / ratings.len() as f64
}

/// Mean of |acknowledgment_date − issue_date| in seconds over the vendor's
/// acknowledged orders; 0 if none are acknowledged.
pub fn average_response_time(orders: &[purchase_order::Model]) -> f64 {
    let intervals: Vec<f64> = orders
        .iter()
        .filter_map(|o| {
            o.acknowledgment_date
                .map(|ack| ((ack - o.issue_date).num_milliseconds() as f64 / 1000.0).abs())
        })
        .collect();
    if intervals.is_empty() {
        return 0.0;
    }

    intervals.iter().sum::<f64>() / intervals.len() as f64
}

/// Fraction of the vendor's orders, regardless of status, that reached
/// completed. 0 when the vendor has no orders at all.
pub fn fulfillment_rate(orders: &[purchase_order::Model]) -> f64 {
    if orders.is_empty() {
        return 0.0;
    }

    let completed = orders
        .iter()
        .filter(|o| o.status == PurchaseOrderStatus::Completed)
        .count();

    completed as f64 / orders.len() as f64
}

/// Reloads the vendor's full order set and rewrites the four derived fields
/// on the vendor row. Always persists, even when no value changed.
pub async fn recalculate_vendor_metrics<C>(
    db: &C,
    vendor_code: &str,
) -> Result<vendor::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let vendor = vendor::Entity::find_by_id(vendor_code.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Vendor '{vendor_code}' not found")))?;

    let orders = purchase_order::Entity::find()
        .filter(purchase_order::Column::VendorCode.eq(vendor_code))
        .all(db)
        .await?;

    let mut active: vendor::ActiveModel = vendor.into();
    active.on_time_delivery_rate = Set(on_time_delivery_rate(&orders));
    active.quality_rating_avg = Set(quality_rating_avg(&orders));
    active.average_response_time = Set(average_response_time(&orders));
    active.fulfillment_rate = Set(fulfillment_rate(&orders));
    let updated = active.update(db).await?;

    debug!(
        vendor_code,
        on_time_delivery_rate = updated.on_time_delivery_rate,
        quality_rating_avg = updated.quality_rating_avg,
        average_response_time = updated.average_response_time,
        fulfillment_rate = updated.fulfillment_rate,
        "vendor metrics recalculated"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use serde_json::json;

    fn base_date() -> DateTime<Utc> {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    fn order(po_number: &str, status: PurchaseOrderStatus) -> purchase_order::Model {
        purchase_order::Model {
            po_number: po_number.to_string(),
            vendor_code: "V001".to_string(),
            order_date: base_date(),
            delivery_date: None,
            items: json!([{"sku": "WIDGET-1", "qty": 10}]),
            status,
            quality_rating: None,
            issue_date: base_date(),
            acknowledgment_date: None,
            delivered_date: None,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn one_early_one_late_delivery_splits_the_rate() {
        let due = base_date();
        let mut early = order("PO-1", PurchaseOrderStatus::Completed);
        early.delivery_date = Some(due);
        early.delivered_date = Some(due - Duration::hours(1));
        early.quality_rating = Some(4.0);

        let mut late = order("PO-2", PurchaseOrderStatus::Completed);
        late.delivery_date = Some(due);
        late.delivered_date = Some(due + Duration::hours(1));
        late.quality_rating = Some(2.0);

        let orders = vec![early, late];
        assert_close(on_time_delivery_rate(&orders), 0.5);
        assert_close(quality_rating_avg(&orders), 3.0);
    }

    #[test]
    fn no_completed_orders_yield_zero_rates() {
        let orders = vec![
            order("PO-1", PurchaseOrderStatus::Pending),
            order("PO-2", PurchaseOrderStatus::Canceled),
        ];
        assert_close(on_time_delivery_rate(&orders), 0.0);
        assert_close(quality_rating_avg(&orders), 0.0);
    }

    #[test]
    fn no_orders_at_all_yield_zero_fulfillment() {
        assert_close(fulfillment_rate(&[]), 0.0);
        assert_close(on_time_delivery_rate(&[]), 0.0);
        assert_close(quality_rating_avg(&[]), 0.0);
        assert_close(average_response_time(&[]), 0.0);
    }

    #[test]
    fn fulfillment_counts_every_status_in_the_denominator() {
        let orders = vec![
            order("PO-1", PurchaseOrderStatus::Completed),
            order("PO-2", PurchaseOrderStatus::Pending),
            order("PO-3", PurchaseOrderStatus::Canceled),
            order("PO-4", PurchaseOrderStatus::Completed),
        ];
        assert_close(fulfillment_rate(&orders), 0.5);
    }

    #[test]
    fn completed_order_without_delivery_dates_is_not_on_time() {
        let mut no_due = order("PO-1", PurchaseOrderStatus::Completed);
        no_due.delivered_date = Some(base_date());

        let mut no_actual = order("PO-2", PurchaseOrderStatus::Completed);
        no_actual.delivery_date = Some(base_date());

        assert_close(on_time_delivery_rate(&[no_due, no_actual]), 0.0);
    }

    #[test]
    fn unrated_completed_orders_are_excluded_from_the_average() {
        let mut rated = order("PO-1", PurchaseOrderStatus::Completed);
        rated.quality_rating = Some(5.0);
        let unrated = order("PO-2", PurchaseOrderStatus::Completed);
        let mut pending_rated = order("PO-3", PurchaseOrderStatus::Pending);
        pending_rated.quality_rating = Some(1.0);

        assert_close(quality_rating_avg(&[rated, unrated, pending_rated]), 5.0);
    }

    #[test]
    fn single_acknowledged_order_six_hundred_seconds() {
        let mut acked = order("PO-1", PurchaseOrderStatus::Pending);
        acked.acknowledgment_date = Some(acked.issue_date + Duration::seconds(600));

        let unacked = order("PO-2", PurchaseOrderStatus::Pending);

        assert_close(average_response_time(&[acked, unacked]), 600.0);
    }

    #[test]
    fn negative_interval_counts_by_absolute_value() {
        let mut before_issue = order("PO-1", PurchaseOrderStatus::Pending);
        before_issue.acknowledgment_date = Some(before_issue.issue_date - Duration::seconds(300));

        let mut after_issue = order("PO-2", PurchaseOrderStatus::Pending);
        after_issue.acknowledgment_date = Some(after_issue.issue_date + Duration::seconds(100));

        assert_close(average_response_time(&[before_issue, after_issue]), 200.0);
    }
}
