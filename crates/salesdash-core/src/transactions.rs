//! Sales transaction records and the date normalizer.
//!
//! The remote endpoint returns records keyed by Portuguese column names with
//! the purchase date as `dd/mm/yyyy` text. [`RawTransaction`] mirrors that
//! payload; [`Transaction`] is the typed record every aggregate consumes.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// `chrono` format string for the source's purchase-date column.
pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

/// One sale exactly as the data source serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "Produto", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(rename = "Categoria do Produto")]
    pub product_category: String,
    #[serde(rename = "Preço")]
    pub price: Decimal,
    #[serde(rename = "Frete", default, skip_serializing_if = "Option::is_none")]
    pub freight: Option<Decimal>,
    /// Purchase date as `dd/mm/yyyy` text, e.g. `"01/02/2022"`.
    #[serde(rename = "Data da Compra")]
    pub purchase_date: String,
    #[serde(rename = "Vendedor")]
    pub seller: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    #[serde(
        rename = "Avaliação da compra",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<u8>,
    #[serde(
        rename = "Tipo de pagamento",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_type: Option<String>,
    #[serde(
        rename = "Quantidade de parcelas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub installments: Option<u32>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// A normalized sale with a structured purchase date.
///
/// All records sharing a `location` carry identical coordinates; the
/// location aggregates rely on that and read them from the first record seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub purchase_date: NaiveDate,
    pub price: Decimal,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub product_category: String,
    pub seller: String,
    pub product: Option<String>,
    pub freight: Option<Decimal>,
    pub rating: Option<u8>,
    pub payment_type: Option<String>,
    pub installments: Option<u32>,
}

impl Transaction {
    /// First day of the calendar month containing the purchase date.
    #[must_use]
    pub fn purchase_month(&self) -> NaiveDate {
        self.purchase_date
            .with_day(1)
            .unwrap_or(self.purchase_date)
    }
}

/// Parse a `dd/mm/yyyy` purchase date, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns the underlying [`chrono::ParseError`] if the text is not a valid
/// calendar date in that format.
pub fn parse_purchase_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), PURCHASE_DATE_FORMAT)
}

/// Convert a batch of raw records into typed transactions.
///
/// The batch fails as a whole on the first bad record so aggregates are never
/// computed over a silently truncated set.
///
/// # Errors
///
/// - [`CoreError::MalformedDate`] if any purchase date fails to parse.
/// - [`CoreError::NegativePrice`] if any price is below zero.
pub fn normalize_transactions(raw: Vec<RawTransaction>) -> Result<Vec<Transaction>, CoreError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| normalize_transaction(record, index))
        .collect()
}

fn normalize_transaction(raw: RawTransaction, index: usize) -> Result<Transaction, CoreError> {
    let purchase_date =
        parse_purchase_date(&raw.purchase_date).map_err(|_| CoreError::MalformedDate {
            index,
            value: raw.purchase_date.clone(),
        })?;
    if raw.price < Decimal::ZERO {
        return Err(CoreError::NegativePrice {
            index,
            price: raw.price,
        });
    }

    Ok(Transaction {
        purchase_date,
        price: raw.price,
        location: raw.location,
        latitude: raw.latitude,
        longitude: raw.longitude,
        product_category: raw.product_category,
        seller: raw.seller,
        product: raw.product,
        freight: raw.freight,
        rating: raw.rating,
        payment_type: raw.payment_type,
        installments: raw.installments,
    })
}

#[cfg(test)]
#[path = "transactions_test.rs"]
mod tests;
