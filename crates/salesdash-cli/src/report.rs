//! Text and JSON renderings of the three dashboard views.
//!
//! Each `render_*` function returns the full view as a `String` so the
//! binary only has to print it.

use std::fmt::Write as _;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use salesdash_core::{
    format_count, format_currency, CategoryRevenue, CategorySales, Dashboard, LocationRevenue,
    LocationSales, MonthlyLocationSales, MonthlyRevenue, SellerSummary, TOP_LOCATIONS,
};
use serde::Serialize;

const BAR_WIDTH: usize = 30;

fn metrics(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "Revenue:         {}", format_currency(dashboard.total_revenue));
    let _ = writeln!(out, "Number of sales: {}", format_count(dashboard.total_sales));
    out.push('\n');
}

/// Horizontal bar proportional to `value / max`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

fn decimal_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[allow(clippy::cast_precision_loss)]
fn count_f64(value: usize) -> f64 {
    value as f64
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "== {title}");
}

fn empty_note(out: &mut String) {
    let _ = writeln!(out, "(no sales match the current filters)");
    out.push('\n');
}

/// Revenue view: metrics, revenue by location, top locations, monthly
/// revenue, revenue by category.
pub(crate) fn render_revenue(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    metrics(&mut out, dashboard);

    section(&mut out, "Revenue by location");
    if dashboard.revenue_by_location.is_empty() {
        empty_note(&mut out);
    } else {
        let _ = writeln!(out, "{:<10}{:>10}{:>10}{:>16}", "LOCATION", "LAT", "LON", "REVENUE");
        for row in &dashboard.revenue_by_location {
            let _ = writeln!(
                out,
                "{:<10}{:>10.2}{:>10.2}{:>16.2}",
                row.location, row.latitude, row.longitude, row.revenue
            );
        }
        out.push('\n');

        section(&mut out, &format!("Top {TOP_LOCATIONS} locations (revenue)"));
        let top: Vec<&LocationRevenue> =
            dashboard.revenue_by_location.iter().take(TOP_LOCATIONS).collect();
        let max = top.first().map_or(0.0, |r| decimal_f64(r.revenue));
        for row in top {
            let _ = writeln!(
                out,
                "{:<10}{:>16.2}  {}",
                row.location,
                row.revenue,
                bar(decimal_f64(row.revenue), max)
            );
        }
        out.push('\n');
    }

    section(&mut out, "Monthly revenue");
    if dashboard.revenue_by_month.is_empty() {
        empty_note(&mut out);
    } else {
        let _ = writeln!(out, "{:<6}{:<12}{:>16}", "YEAR", "MONTH", "REVENUE");
        for MonthlyRevenue {
            year,
            month_name,
            revenue,
            ..
        } in &dashboard.revenue_by_month
        {
            let _ = writeln!(out, "{year:<6}{month_name:<12}{revenue:>16.2}");
        }
        out.push('\n');
    }

    section(&mut out, "Revenue by category");
    if dashboard.revenue_by_category.is_empty() {
        empty_note(&mut out);
    } else {
        let max = dashboard
            .revenue_by_category
            .first()
            .map_or(0.0, |r| decimal_f64(r.revenue));
        for CategoryRevenue { category, revenue } in &dashboard.revenue_by_category {
            let _ = writeln!(
                out,
                "{category:<24}{revenue:>16.2}  {}",
                bar(decimal_f64(*revenue), max)
            );
        }
        out.push('\n');
    }

    out
}

/// Sales-count view: metrics, sales by location, top locations, monthly
/// sales per location, sales by category.
pub(crate) fn render_sales(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    metrics(&mut out, dashboard);

    section(&mut out, "Sales by location");
    if dashboard.sales_by_location.is_empty() {
        empty_note(&mut out);
    } else {
        let _ = writeln!(out, "{:<10}{:>10}{:>10}{:>10}", "LOCATION", "LAT", "LON", "SALES");
        for row in &dashboard.sales_by_location {
            let _ = writeln!(
                out,
                "{:<10}{:>10.2}{:>10.2}{:>10}",
                row.location, row.latitude, row.longitude, row.sales
            );
        }
        out.push('\n');

        section(&mut out, &format!("Top {TOP_LOCATIONS} locations (sales)"));
        let top: Vec<&LocationSales> =
            dashboard.sales_by_location.iter().take(TOP_LOCATIONS).collect();
        let max = top.first().map_or(0.0, |r| count_f64(r.sales));
        for row in top {
            let _ = writeln!(
                out,
                "{:<10}{:>10}  {}",
                row.location,
                row.sales,
                bar(count_f64(row.sales), max)
            );
        }
        out.push('\n');
    }

    section(&mut out, "Monthly sales by location");
    if dashboard.sales_by_month_and_location.is_empty() {
        empty_note(&mut out);
    } else {
        let _ = writeln!(out, "{:<10}{:<10}{:>10}", "MONTH", "LOCATION", "SALES");
        for MonthlyLocationSales {
            period,
            location,
            sales,
            ..
        } in &dashboard.sales_by_month_and_location
        {
            let _ = writeln!(out, "{period:<10}{location:<10}{sales:>10}");
        }
        out.push('\n');
    }

    section(&mut out, "Sales by category");
    if dashboard.sales_by_category.is_empty() {
        empty_note(&mut out);
    } else {
        let max = dashboard
            .sales_by_category
            .first()
            .map_or(0.0, |r| count_f64(r.sales));
        for CategorySales { category, sales } in &dashboard.sales_by_category {
            let _ = writeln!(
                out,
                "{category:<24}{sales:>10}  {}",
                bar(count_f64(*sales), max)
            );
        }
        out.push('\n');
    }

    out
}

/// Seller view: metrics plus the two top-N rankings.
pub(crate) fn render_sellers(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    metrics(&mut out, dashboard);

    let by_revenue = &dashboard.top_sellers_by_revenue;
    section(&mut out, &format!("Top {} sellers (revenue)", by_revenue.len()));
    if by_revenue.is_empty() {
        empty_note(&mut out);
    } else {
        let max = decimal_f64(by_revenue[0].revenue);
        for SellerSummary { seller, revenue, .. } in by_revenue {
            let _ = writeln!(
                out,
                "{seller:<24}{revenue:>16.2}  {}",
                bar(decimal_f64(*revenue), max)
            );
        }
        out.push('\n');
    }

    let by_sales = &dashboard.top_sellers_by_sales;
    section(&mut out, &format!("Top {} sellers (sales)", by_sales.len()));
    if by_sales.is_empty() {
        empty_note(&mut out);
    } else {
        let max = count_f64(by_sales[0].sales);
        for SellerSummary { seller, sales, .. } in by_sales {
            let _ = writeln!(
                out,
                "{seller:<24}{sales:>10}  {}",
                bar(count_f64(*sales), max)
            );
        }
        out.push('\n');
    }

    out
}

/// One seller per line, in the order they first appear in the data.
pub(crate) fn render_seller_list(dashboard: &Dashboard) -> String {
    if dashboard.available_sellers.is_empty() {
        return "no sellers found for the selected region and year\n".to_owned();
    }
    let mut out = String::new();
    for seller in &dashboard.available_sellers {
        let _ = writeln!(out, "{seller}");
    }
    out
}

#[derive(Serialize)]
struct RevenueView<'a> {
    total_revenue: Decimal,
    total_sales: usize,
    revenue_by_location: &'a [LocationRevenue],
    revenue_by_month: &'a [MonthlyRevenue],
    revenue_by_category: &'a [CategoryRevenue],
}

#[derive(Serialize)]
struct SalesView<'a> {
    total_revenue: Decimal,
    total_sales: usize,
    sales_by_location: &'a [LocationSales],
    sales_by_month_and_location: &'a [MonthlyLocationSales],
    sales_by_category: &'a [CategorySales],
}

#[derive(Serialize)]
struct SellersView<'a> {
    total_revenue: Decimal,
    total_sales: usize,
    top_sellers_by_revenue: &'a [SellerSummary],
    top_sellers_by_sales: &'a [SellerSummary],
}

fn to_json<T: Serialize>(view: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(view)?;
    json.push('\n');
    Ok(json)
}

pub(crate) fn revenue_json(dashboard: &Dashboard) -> anyhow::Result<String> {
    to_json(&RevenueView {
        total_revenue: dashboard.total_revenue,
        total_sales: dashboard.total_sales,
        revenue_by_location: &dashboard.revenue_by_location,
        revenue_by_month: &dashboard.revenue_by_month,
        revenue_by_category: &dashboard.revenue_by_category,
    })
}

pub(crate) fn sales_json(dashboard: &Dashboard) -> anyhow::Result<String> {
    to_json(&SalesView {
        total_revenue: dashboard.total_revenue,
        total_sales: dashboard.total_sales,
        sales_by_location: &dashboard.sales_by_location,
        sales_by_month_and_location: &dashboard.sales_by_month_and_location,
        sales_by_category: &dashboard.sales_by_category,
    })
}

pub(crate) fn sellers_json(dashboard: &Dashboard) -> anyhow::Result<String> {
    to_json(&SellersView {
        total_revenue: dashboard.total_revenue,
        total_sales: dashboard.total_sales,
        top_sellers_by_revenue: &dashboard.top_sellers_by_revenue,
        top_sellers_by_sales: &dashboard.top_sellers_by_sales,
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
