//! Query filters sent to the data source and the in-memory seller filter.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::transactions::Transaction;
use crate::CoreError;

/// Sales region accepted by the data source.
///
/// [`Region::Brasil`] stands for the whole country and is sent as an empty
/// `regiao` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Brasil,
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    /// Display label, e.g. `"Centro-Oeste"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }

    /// Value for the `regiao` query parameter: the lower-cased label, or an
    /// empty string for the whole country.
    #[must_use]
    pub fn query_value(self) -> String {
        match self {
            Region::Brasil => String::new(),
            other => other.label().to_lowercase(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    /// Case-insensitive. `""` and `"all"` both mean [`Region::Brasil`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.is_empty() || needle.eq_ignore_ascii_case("all") {
            return Ok(Region::Brasil);
        }
        Region::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::InvalidRegion(s.to_owned()))
    }
}

/// Calendar year filter, bounded to the years the source has data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(i32);

impl Year {
    pub const MIN: i32 = 2020;
    pub const MAX: i32 = 2023;

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidYear`] when `year` is outside
    /// [`Year::MIN`]..=[`Year::MAX`].
    pub fn new(year: i32) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&year) {
            Ok(Self(year))
        } else {
            Err(CoreError::InvalidYear(year))
        }
    }

    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Region and year selection for one data-source call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceQuery {
    pub region: Region,
    /// `None` requests every year.
    pub year: Option<Year>,
}

impl SourceQuery {
    /// Query parameters in the order the source expects: `regiao`, `ano`.
    #[must_use]
    pub fn params(&self) -> [(&'static str, String); 2] {
        [
            ("regiao", self.region.query_value()),
            (
                "ano",
                self.year.map(|y| y.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

/// Keep only the transactions whose seller is in `sellers`.
///
/// An empty `sellers` slice means no filter and returns the input unchanged.
#[must_use]
pub fn filter_by_sellers(transactions: Vec<Transaction>, sellers: &[String]) -> Vec<Transaction> {
    if sellers.is_empty() {
        return transactions;
    }
    let wanted: HashSet<&str> = sellers.iter().map(String::as_str).collect();
    transactions
        .into_iter()
        .filter(|tx| wanted.contains(tx.seller.as_str()))
        .collect()
}

/// Distinct seller names in first-seen order.
#[must_use]
pub fn available_sellers(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter(|tx| seen.insert(tx.seller.as_str()))
        .map(|tx| tx.seller.clone())
        .collect()
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
