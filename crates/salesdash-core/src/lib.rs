pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod filters;
pub mod format;
pub mod pipeline;
pub mod transactions;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{
    normalize_top_sellers, revenue_by_category, revenue_by_location, revenue_by_month,
    sales_by_category, sales_by_location, sales_by_month_and_location, seller_summary,
    top_sellers, total_revenue, total_sales, CategoryRevenue, CategorySales, LocationRevenue,
    LocationSales, MonthlyLocationSales, MonthlyRevenue, SellerMeasure, SellerSummary,
    DEFAULT_TOP_SELLERS, MAX_TOP_SELLERS, MIN_TOP_SELLERS, TOP_LOCATIONS,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_SOURCE_URL};
pub use filters::{available_sellers, filter_by_sellers, Region, SourceQuery, Year};
pub use format::{format_count, format_currency, format_magnitude};
pub use pipeline::{build_dashboard, Dashboard, DashboardRequest};
pub use transactions::{
    normalize_transactions, parse_purchase_date, RawTransaction, Transaction,
    PURCHASE_DATE_FORMAT,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed purchase date {value:?} at record {index}: expected dd/mm/yyyy")]
    MalformedDate { index: usize, value: String },

    #[error("negative price {price} at record {index}")]
    NegativePrice {
        index: usize,
        price: rust_decimal::Decimal,
    },

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("invalid year {0}: expected {min}..={max}", min = Year::MIN, max = Year::MAX)]
    InvalidYear(i32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
