use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// One user-entered spending entry. `amount` is in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub amount: i64,
}

impl ExpenseRecord {
    /// Creates a record with a freshly generated id.
    pub fn new(name: impl Into<String>, category: impl Into<String>, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            amount,
        }
    }

    pub fn amount_decimal(&self) -> Decimal {
        from_minor_units(self.amount)
    }
}

/// Exported CSV row. Amount is written in major units.
#[derive(Debug, Serialize, PartialEq)]
pub struct ExpenseRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub category: &'a str,
    pub amount: Decimal,
}

impl<'a> From<&'a ExpenseRecord> for ExpenseRow<'a> {
    fn from(record: &'a ExpenseRecord) -> Self {
        Self {
            id: record.id,
            name: &record.name,
            category: &record.category,
            amount: record.amount_decimal(),
        }
    }
}

/// Imported CSV row, `name,type,amount` with amount in major units.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ImportRow {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(deserialize_with = "deserialize_decimal_2dp")]
    pub amount: Decimal,
}

impl ImportRow {
    pub fn into_record(self) -> Result<ExpenseRecord, Error> {
        let amount = to_minor_units(self.amount)?;
        Ok(ExpenseRecord::new(self.name, self.category, amount))
    }
}

fn deserialize_decimal_2dp<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    <Decimal as Deserialize>::deserialize(deserializer)
        .map(|dec| dec.round_dp_with_strategy(2, RoundingStrategy::ToZero))
}

pub fn from_minor_units(amount: i64) -> Decimal {
    Decimal::new(amount, 2)
}

/// Converts a major-unit amount to minor units, truncating past two decimal
/// places. Negative amounts and amounts outside `i64` are rejected.
pub fn to_minor_units(amount: Decimal) -> Result<i64, Error> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    let mut scaled = amount.round_dp_with_strategy(2, RoundingStrategy::ToZero);
    scaled.rescale(2);
    i64::try_from(scaled.mantissa()).map_err(|_| Error::InvalidAmount(amount.to_string()))
}
