//! Grouping aggregators and scalar summaries over a transaction set.
//!
//! Every aggregator emits one row per distinct key. Keys are collected in
//! first-seen order and the descending sorts are stable, so ties keep that
//! order. An empty input always yields an empty output.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::transactions::Transaction;

pub const MIN_TOP_SELLERS: usize = 2;
pub const MAX_TOP_SELLERS: usize = 10;
pub const DEFAULT_TOP_SELLERS: usize = 5;

/// Number of rows shown in the "top locations" views.
pub const TOP_LOCATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRevenue {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// First day of the month.
    pub month: NaiveDate,
    pub year: i32,
    /// English month name, e.g. `"January"`.
    pub month_name: String,
    /// `YYYY-MM`.
    pub period: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSales {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub sales: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyLocationSales {
    pub month: NaiveDate,
    pub period: String,
    pub location: String,
    pub sales: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerSummary {
    pub seller: String,
    pub revenue: Decimal,
    pub sales: usize,
}

/// Which seller measure a top-N ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerMeasure {
    Revenue,
    Sales,
}

/// Group `transactions` by `key`, folding each record into an accumulator.
///
/// Returns `(key, accumulator, first record of the group)` in first-seen key
/// order.
fn group_first_seen<'a, K, A, FK, FA>(
    transactions: &'a [Transaction],
    key: FK,
    mut fold: FA,
) -> Vec<(K, A, &'a Transaction)>
where
    K: Eq + Hash + Clone,
    A: Default,
    FK: Fn(&Transaction) -> K,
    FA: FnMut(&mut A, &Transaction),
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, A, &Transaction)> = Vec::new();

    for tx in transactions {
        let k = key(tx);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, A::default(), tx));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, tx);
    }

    groups
}

fn add_price(acc: &mut Decimal, tx: &Transaction) {
    *acc += tx.price;
}

fn add_one(acc: &mut usize, _tx: &Transaction) {
    *acc += 1;
}

/// Sum of `price` per location, highest revenue first.
#[must_use]
pub fn revenue_by_location(transactions: &[Transaction]) -> Vec<LocationRevenue> {
    let mut rows: Vec<LocationRevenue> =
        group_first_seen(transactions, |tx| tx.location.clone(), add_price)
            .into_iter()
            .map(|(location, revenue, first)| LocationRevenue {
                location,
                latitude: first.latitude,
                longitude: first.longitude,
                revenue,
            })
            .collect();
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows
}

/// Sum of `price` per calendar month, oldest month first.
#[must_use]
pub fn revenue_by_month(transactions: &[Transaction]) -> Vec<MonthlyRevenue> {
    let mut months: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in transactions {
        *months.entry(tx.purchase_month()).or_default() += tx.price;
    }

    months
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue {
            month,
            year: month.year(),
            month_name: month.format("%B").to_string(),
            period: month.format("%Y-%m").to_string(),
            revenue,
        })
        .collect()
}

/// Sum of `price` per product category, highest revenue first.
#[must_use]
pub fn revenue_by_category(transactions: &[Transaction]) -> Vec<CategoryRevenue> {
    let mut rows: Vec<CategoryRevenue> =
        group_first_seen(transactions, |tx| tx.product_category.clone(), add_price)
            .into_iter()
            .map(|(category, revenue, _)| CategoryRevenue { category, revenue })
            .collect();
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows
}

/// Number of sales per location, most sales first.
#[must_use]
pub fn sales_by_location(transactions: &[Transaction]) -> Vec<LocationSales> {
    let mut rows: Vec<LocationSales> =
        group_first_seen(transactions, |tx| tx.location.clone(), add_one)
            .into_iter()
            .map(|(location, sales, first)| LocationSales {
                location,
                latitude: first.latitude,
                longitude: first.longitude,
                sales,
            })
            .collect();
    rows.sort_by(|a, b| b.sales.cmp(&a.sales));
    rows
}

/// Number of sales per observed (month, location) pair, ordered by month and
/// then location. Pairs with no sales are not materialized.
#[must_use]
pub fn sales_by_month_and_location(transactions: &[Transaction]) -> Vec<MonthlyLocationSales> {
    let mut rows: Vec<MonthlyLocationSales> = group_first_seen(
        transactions,
        |tx| (tx.purchase_month(), tx.location.clone()),
        add_one,
    )
    .into_iter()
    .map(|((month, location), sales, _)| MonthlyLocationSales {
        month,
        period: month.format("%Y-%m").to_string(),
        location,
        sales,
    })
    .collect();
    rows.sort_by(|a, b| (a.month, &a.location).cmp(&(b.month, &b.location)));
    rows
}

/// Number of sales per product category, most sales first.
#[must_use]
pub fn sales_by_category(transactions: &[Transaction]) -> Vec<CategorySales> {
    let mut rows: Vec<CategorySales> =
        group_first_seen(transactions, |tx| tx.product_category.clone(), add_one)
            .into_iter()
            .map(|(category, sales, _)| CategorySales { category, sales })
            .collect();
    rows.sort_by(|a, b| b.sales.cmp(&a.sales));
    rows
}

/// Revenue and sale count per seller in one pass, in first-seen order.
///
/// Callers rank the rows with [`top_sellers`].
#[must_use]
pub fn seller_summary(transactions: &[Transaction]) -> Vec<SellerSummary> {
    group_first_seen(
        transactions,
        |tx| tx.seller.clone(),
        |acc: &mut (Decimal, usize), tx| {
            acc.0 += tx.price;
            acc.1 += 1;
        },
    )
    .into_iter()
    .map(|(seller, (revenue, sales), _)| SellerSummary {
        seller,
        revenue,
        sales,
    })
    .collect()
}

/// The `n` highest-ranked sellers by `measure`. Ties keep input order.
#[must_use]
pub fn top_sellers(
    summary: &[SellerSummary],
    n: usize,
    measure: SellerMeasure,
) -> Vec<SellerSummary> {
    let mut ranked = summary.to_vec();
    match measure {
        SellerMeasure::Revenue => ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue)),
        SellerMeasure::Sales => ranked.sort_by(|a, b| b.sales.cmp(&a.sales)),
    }
    ranked.truncate(n);
    ranked
}

/// Clamp a caller-supplied top-N to [`MIN_TOP_SELLERS`]..=[`MAX_TOP_SELLERS`],
/// defaulting to [`DEFAULT_TOP_SELLERS`].
#[must_use]
pub fn normalize_top_sellers(n: Option<usize>) -> usize {
    n.unwrap_or(DEFAULT_TOP_SELLERS)
        .clamp(MIN_TOP_SELLERS, MAX_TOP_SELLERS)
}

/// Sum of `price` over all transactions; zero for an empty set.
#[must_use]
pub fn total_revenue(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(|tx| tx.price).sum()
}

/// Number of transactions.
#[must_use]
pub fn total_sales(transactions: &[Transaction]) -> usize {
    transactions.len()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
