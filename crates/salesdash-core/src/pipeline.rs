//! The aggregation pipeline: raw source records in, every dashboard table out.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{
    normalize_top_sellers, revenue_by_category, revenue_by_location, revenue_by_month,
    sales_by_category, sales_by_location, sales_by_month_and_location, seller_summary,
    top_sellers, total_revenue, total_sales, CategoryRevenue, CategorySales, LocationRevenue,
    LocationSales, MonthlyLocationSales, MonthlyRevenue, SellerMeasure, SellerSummary,
};
use crate::filters::{available_sellers, filter_by_sellers};
use crate::transactions::{normalize_transactions, RawTransaction};
use crate::CoreError;

/// Presentation-side selections applied after the source fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    /// Seller names to keep; empty keeps everyone.
    pub sellers: Vec<String>,
    /// Size of the two seller rankings, clamped to 2..=10.
    pub top_sellers: usize,
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self {
            sellers: Vec::new(),
            top_sellers: normalize_top_sellers(None),
        }
    }
}

/// Every aggregate and scalar the three dashboard views render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total_revenue: Decimal,
    pub total_sales: usize,
    /// Sellers present before seller filtering, first-seen order.
    pub available_sellers: Vec<String>,
    pub revenue_by_location: Vec<LocationRevenue>,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub sales_by_location: Vec<LocationSales>,
    pub sales_by_month_and_location: Vec<MonthlyLocationSales>,
    pub sales_by_category: Vec<CategorySales>,
    pub sellers: Vec<SellerSummary>,
    pub top_sellers_by_revenue: Vec<SellerSummary>,
    pub top_sellers_by_sales: Vec<SellerSummary>,
}

/// Normalize `raw`, apply the seller filter, and compute every aggregate.
///
/// An empty input, or a seller filter that matches nobody, produces empty
/// tables and zero scalars rather than an error.
///
/// # Errors
///
/// Propagates [`CoreError::MalformedDate`] and [`CoreError::NegativePrice`]
/// from normalization; the whole invocation fails.
pub fn build_dashboard(
    raw: Vec<RawTransaction>,
    request: &DashboardRequest,
) -> Result<Dashboard, CoreError> {
    let fetched = raw.len();
    let transactions = normalize_transactions(raw)?;
    let available = available_sellers(&transactions);
    let transactions = filter_by_sellers(transactions, &request.sellers);

    tracing::debug!(
        fetched,
        kept = transactions.len(),
        seller_filter = request.sellers.len(),
        "building dashboard aggregates"
    );

    let top_n = normalize_top_sellers(Some(request.top_sellers));
    let sellers = seller_summary(&transactions);

    Ok(Dashboard {
        total_revenue: total_revenue(&transactions),
        total_sales: total_sales(&transactions),
        available_sellers: available,
        revenue_by_location: revenue_by_location(&transactions),
        revenue_by_month: revenue_by_month(&transactions),
        revenue_by_category: revenue_by_category(&transactions),
        sales_by_location: sales_by_location(&transactions),
        sales_by_month_and_location: sales_by_month_and_location(&transactions),
        sales_by_category: sales_by_category(&transactions),
        top_sellers_by_revenue: top_sellers(&sellers, top_n, SellerMeasure::Revenue),
        top_sellers_by_sales: top_sellers(&sellers, top_n, SellerMeasure::Sales),
        sellers,
    })
}
