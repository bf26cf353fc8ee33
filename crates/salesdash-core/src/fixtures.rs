use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::transactions::{RawTransaction, Transaction};

/// Build a transaction from the handful of fields the aggregates look at.
///
/// `date` is `dd/mm/yyyy`, `price` is in cents.
pub(crate) fn tx(
    location: &str,
    price_cents: i64,
    category: &str,
    seller: &str,
    date: &str,
    coords: (f64, f64),
) -> Transaction {
    Transaction {
        purchase_date: NaiveDate::parse_from_str(date, "%d/%m/%Y").expect("fixture date"),
        price: Decimal::new(price_cents, 2),
        location: location.to_owned(),
        latitude: coords.0,
        longitude: coords.1,
        product_category: category.to_owned(),
        seller: seller.to_owned(),
        product: None,
        freight: None,
        rating: None,
        payment_type: None,
        installments: None,
    }
}

pub(crate) fn raw(
    location: &str,
    price_cents: i64,
    category: &str,
    seller: &str,
    date: &str,
    coords: (f64, f64),
) -> RawTransaction {
    RawTransaction {
        product: None,
        product_category: category.to_owned(),
        price: Decimal::new(price_cents, 2),
        freight: None,
        purchase_date: date.to_owned(),
        seller: seller.to_owned(),
        location: location.to_owned(),
        rating: None,
        payment_type: None,
        installments: None,
        latitude: coords.0,
        longitude: coords.1,
    }
}

/// The three-record scenario: two sales in SP, one in RJ.
pub(crate) fn scenario() -> Vec<Transaction> {
    vec![
        tx("SP", 10_000, "A", "X", "01/01/2022", (0.0, 0.0)),
        tx("SP", 5_000, "A", "Y", "01/02/2022", (0.0, 0.0)),
        tx("RJ", 20_000, "B", "X", "01/01/2022", (1.0, 1.0)),
    ]
}

pub(crate) fn raw_scenario() -> Vec<RawTransaction> {
    vec![
        raw("SP", 10_000, "A", "X", "01/01/2022", (0.0, 0.0)),
        raw("SP", 5_000, "A", "Y", "01/02/2022", (0.0, 0.0)),
        raw("RJ", 20_000, "B", "X", "01/01/2022", (1.0, 1.0)),
    ]
}
