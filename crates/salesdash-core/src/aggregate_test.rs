use super::*;
use crate::fixtures::{scenario, tx};

fn dec(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn ym(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// A larger set with ties, several months, and repeated keys.
fn wider_set() -> Vec<Transaction> {
    vec![
        tx("SP", 10_000, "moveis", "Ana", "03/01/2021", (-22.19, -48.79)),
        tx("MG", 5_000, "livros", "Bruno", "15/01/2021", (-18.1, -44.38)),
        tx("RJ", 5_000, "livros", "Ana", "20/02/2021", (-22.25, -42.66)),
        tx("SP", 2_500, "eletronicos", "Carla", "28/02/2021", (-22.19, -48.79)),
        tx("BA", 7_500, "moveis", "Bruno", "01/12/2020", (-13.29, -41.71)),
        tx("MG", 1_000, "eletronicos", "Carla", "09/02/2021", (-18.1, -44.38)),
    ]
}

// -----------------------------------------------------------------------
// Reference scenario
// -----------------------------------------------------------------------

#[test]
fn scenario_revenue_by_location() {
    let rows = revenue_by_location(&scenario());
    let got: Vec<(&str, Decimal)> = rows.iter().map(|r| (r.location.as_str(), r.revenue)).collect();
    assert_eq!(got, [("RJ", dec(20_000)), ("SP", dec(15_000))]);
}

#[test]
fn scenario_revenue_by_category() {
    let rows = revenue_by_category(&scenario());
    let got: Vec<(&str, Decimal)> = rows.iter().map(|r| (r.category.as_str(), r.revenue)).collect();
    assert_eq!(got, [("B", dec(20_000)), ("A", dec(15_000))]);
}

#[test]
fn scenario_scalars() {
    let set = scenario();
    assert_eq!(total_revenue(&set), dec(35_000));
    assert_eq!(total_sales(&set), 3);
}

#[test]
fn scenario_seller_summary() {
    let rows = seller_summary(&scenario());
    assert_eq!(
        rows,
        [
            SellerSummary {
                seller: "X".to_owned(),
                revenue: dec(30_000),
                sales: 2,
            },
            SellerSummary {
                seller: "Y".to_owned(),
                revenue: dec(5_000),
                sales: 1,
            },
        ]
    );
}

// -----------------------------------------------------------------------
// Location aggregates
// -----------------------------------------------------------------------

#[test]
fn location_rows_carry_coordinates() {
    let rows = revenue_by_location(&scenario());
    let rj = rows.iter().find(|r| r.location == "RJ").unwrap();
    assert!((rj.latitude - 1.0).abs() < f64::EPSILON);
    assert!((rj.longitude - 1.0).abs() < f64::EPSILON);

    let counts = sales_by_location(&scenario());
    let sp = counts.iter().find(|r| r.location == "SP").unwrap();
    assert_eq!(sp.sales, 2);
    assert!(sp.latitude.abs() < f64::EPSILON);
}

#[test]
fn location_aggregates_are_non_increasing() {
    let set = wider_set();
    let revenue = revenue_by_location(&set);
    assert!(revenue.windows(2).all(|w| w[0].revenue >= w[1].revenue));
    let sales = sales_by_location(&set);
    assert!(sales.windows(2).all(|w| w[0].sales >= w[1].sales));
}

#[test]
fn location_ties_keep_first_seen_order() {
    // SP and MG tie at 2 sales, RJ and BA tie at 1.
    let rows = sales_by_location(&wider_set());
    let order: Vec<&str> = rows.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(order, ["SP", "MG", "RJ", "BA"]);
}

#[test]
fn revenue_by_location_single_key() {
    let set = vec![
        tx("SP", 100, "a", "s", "01/01/2022", (0.0, 0.0)),
        tx("SP", 200, "b", "t", "02/01/2022", (0.0, 0.0)),
    ];
    let rows = revenue_by_location(&set);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].revenue, dec(300));
}

// -----------------------------------------------------------------------
// Monthly aggregates
// -----------------------------------------------------------------------

#[test]
fn revenue_by_month_is_chronological() {
    let rows = revenue_by_month(&wider_set());
    let months: Vec<NaiveDate> = rows.iter().map(|r| r.month).collect();
    assert_eq!(months, [ym(2020, 12), ym(2021, 1), ym(2021, 2)]);
}

#[test]
fn revenue_by_month_labels_year_and_month_name() {
    let rows = revenue_by_month(&wider_set());
    assert_eq!(rows[0].year, 2020);
    assert_eq!(rows[0].month_name, "December");
    assert_eq!(rows[0].period, "2020-12");
    assert_eq!(rows[1].month_name, "January");
    assert_eq!(rows[1].revenue, dec(15_000));
    assert_eq!(rows[2].month_name, "February");
    assert_eq!(rows[2].revenue, dec(8_500));
}

#[test]
fn revenue_by_month_does_not_sort_alphabetically() {
    // "April" sorts before "March" alphabetically; chronological keeps March first.
    let set = vec![
        tx("SP", 100, "a", "s", "10/04/2022", (0.0, 0.0)),
        tx("SP", 100, "a", "s", "10/03/2022", (0.0, 0.0)),
    ];
    let names: Vec<String> = revenue_by_month(&set)
        .into_iter()
        .map(|r| r.month_name)
        .collect();
    assert_eq!(names, ["March", "April"]);
}

#[test]
fn sales_by_month_and_location_omits_empty_pairs() {
    let rows = sales_by_month_and_location(&wider_set());
    let got: Vec<(&str, &str, usize)> = rows
        .iter()
        .map(|r| (r.period.as_str(), r.location.as_str(), r.sales))
        .collect();
    assert_eq!(
        got,
        [
            ("2020-12", "BA", 1),
            ("2021-01", "MG", 1),
            ("2021-01", "SP", 1),
            ("2021-02", "MG", 1),
            ("2021-02", "RJ", 1),
            ("2021-02", "SP", 1),
        ]
    );
}

#[test]
fn sales_by_month_and_location_counts_repeats() {
    let set = vec![
        tx("SP", 100, "a", "s", "01/01/2022", (0.0, 0.0)),
        tx("SP", 100, "a", "s", "31/01/2022", (0.0, 0.0)),
        tx("SP", 100, "a", "s", "01/02/2022", (0.0, 0.0)),
    ];
    let rows = sales_by_month_and_location(&set);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sales, 2);
    assert_eq!(rows[1].sales, 1);
}

// -----------------------------------------------------------------------
// Category aggregates
// -----------------------------------------------------------------------

#[test]
fn sales_by_category_descending_with_stable_ties() {
    let rows = sales_by_category(&wider_set());
    let got: Vec<(&str, usize)> = rows.iter().map(|r| (r.category.as_str(), r.sales)).collect();
    assert_eq!(got, [("moveis", 2), ("livros", 2), ("eletronicos", 2)]);
}

#[test]
fn revenue_by_category_descending() {
    let rows = revenue_by_category(&wider_set());
    let got: Vec<(&str, Decimal)> = rows.iter().map(|r| (r.category.as_str(), r.revenue)).collect();
    assert_eq!(
        got,
        [
            ("moveis", dec(17_500)),
            ("livros", dec(10_000)),
            ("eletronicos", dec(3_500)),
        ]
    );
}

// -----------------------------------------------------------------------
// Sellers
// -----------------------------------------------------------------------

#[test]
fn top_sellers_by_revenue_and_by_sales_rank_independently() {
    let set = vec![
        tx("SP", 100_000, "a", "Big", "01/01/2022", (0.0, 0.0)),
        tx("SP", 100, "a", "Busy", "01/01/2022", (0.0, 0.0)),
        tx("SP", 100, "a", "Busy", "02/01/2022", (0.0, 0.0)),
        tx("SP", 100, "a", "Busy", "03/01/2022", (0.0, 0.0)),
        tx("SP", 500, "a", "Mid", "03/01/2022", (0.0, 0.0)),
    ];
    let summary = seller_summary(&set);

    let by_revenue = top_sellers(&summary, 2, SellerMeasure::Revenue);
    let names: Vec<&str> = by_revenue.iter().map(|s| s.seller.as_str()).collect();
    assert_eq!(names, ["Big", "Mid"]);

    let by_sales = top_sellers(&summary, 2, SellerMeasure::Sales);
    let names: Vec<&str> = by_sales.iter().map(|s| s.seller.as_str()).collect();
    assert_eq!(names, ["Busy", "Big"]);
}

#[test]
fn top_sellers_larger_n_than_rows_returns_all() {
    let summary = seller_summary(&scenario());
    assert_eq!(top_sellers(&summary, 10, SellerMeasure::Sales).len(), 2);
}

#[test]
fn normalize_top_sellers_applies_default_and_bounds() {
    assert_eq!(normalize_top_sellers(None), 5);
    assert_eq!(normalize_top_sellers(Some(0)), 2);
    assert_eq!(normalize_top_sellers(Some(1_000)), 10);
    assert_eq!(normalize_top_sellers(Some(7)), 7);
}

// -----------------------------------------------------------------------
// Conservation and empty input
// -----------------------------------------------------------------------

#[test]
fn grouped_revenue_sums_to_total() {
    let set = wider_set();
    let total = total_revenue(&set);
    assert_eq!(
        revenue_by_location(&set).iter().map(|r| r.revenue).sum::<Decimal>(),
        total
    );
    assert_eq!(
        revenue_by_month(&set).iter().map(|r| r.revenue).sum::<Decimal>(),
        total
    );
    assert_eq!(
        revenue_by_category(&set).iter().map(|r| r.revenue).sum::<Decimal>(),
        total
    );
    assert_eq!(
        seller_summary(&set).iter().map(|r| r.revenue).sum::<Decimal>(),
        total
    );
}

#[test]
fn grouped_counts_sum_to_total() {
    let set = wider_set();
    let total = total_sales(&set);
    assert_eq!(sales_by_location(&set).iter().map(|r| r.sales).sum::<usize>(), total);
    assert_eq!(
        sales_by_month_and_location(&set)
            .iter()
            .map(|r| r.sales)
            .sum::<usize>(),
        total
    );
    assert_eq!(sales_by_category(&set).iter().map(|r| r.sales).sum::<usize>(), total);
    assert_eq!(seller_summary(&set).iter().map(|r| r.sales).sum::<usize>(), total);
}

#[test]
fn empty_input_yields_empty_aggregates() {
    let empty: Vec<Transaction> = Vec::new();
    assert!(revenue_by_location(&empty).is_empty());
    assert!(revenue_by_month(&empty).is_empty());
    assert!(revenue_by_category(&empty).is_empty());
    assert!(sales_by_location(&empty).is_empty());
    assert!(sales_by_month_and_location(&empty).is_empty());
    assert!(sales_by_category(&empty).is_empty());
    assert!(seller_summary(&empty).is_empty());
    assert_eq!(total_revenue(&empty), Decimal::ZERO);
    assert_eq!(total_sales(&empty), 0);
}
