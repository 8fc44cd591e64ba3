//! Wire shapes of the JSON dataset exports.
//!
//! Column names are the Korean sheet headers. Every field is optional and
//! numbers may arrive as numbers, numeric strings, or `null`.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::domain::period::Period;
use crate::domain::record::{CompetitorRecord, InventoryRecord, TransactionRecord};
use crate::domain::store::RosterEntry;

/// Tabular export: `{ headers, data, total_rows }`.
#[derive(Debug, Deserialize)]
pub struct Table<T> {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total_rows: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Parse a loosely formatted decimal, `None` when unparseable.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Number, numeric string, or null as a decimal; anything else is zero.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => parse_decimal(&n.to_string()),
        Some(NumberOrText::Text(s)) => parse_decimal(&s),
        Some(NumberOrText::Other(_)) | None => None,
    }
    .unwrap_or_default())
}

fn lenient_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => parse_decimal(&n.to_string()),
        Some(NumberOrText::Text(s)) => parse_decimal(&s),
        Some(NumberOrText::Other(_)) | None => None,
    })
}

/// String or number rendered as text; null and blanks are `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n.to_string()),
        Some(NumberOrText::Text(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(NumberOrText::Other(_)) | None => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

/// Row of `item_season_data.json`.
#[derive(Debug, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "매장코드", default, deserialize_with = "lenient_string")]
    pub store_code: String,
    #[serde(rename = "매장명", default, deserialize_with = "lenient_string")]
    pub store_name: String,
    #[serde(rename = "ITEM", default, deserialize_with = "lenient_string")]
    pub item: String,
    #[serde(rename = "시즌", default, deserialize_with = "lenient_string")]
    pub season: String,
    #[serde(rename = "판매액", default, deserialize_with = "lenient_decimal")]
    pub sales_amount: Decimal,
    #[serde(rename = "판매수량", default, deserialize_with = "lenient_decimal")]
    pub sales_quantity: Decimal,
    #[serde(rename = "정상_판매액", default, deserialize_with = "lenient_decimal")]
    pub normal_amount: Decimal,
    #[serde(rename = "정상_판매수량", default, deserialize_with = "lenient_decimal")]
    pub normal_quantity: Decimal,
    #[serde(rename = "반품_판매액", default, deserialize_with = "lenient_decimal")]
    pub return_amount: Decimal,
    #[serde(rename = "반품_판매수량", default, deserialize_with = "lenient_decimal")]
    pub return_quantity: Decimal,
    /// Remaining columns; `YYYYMM` keys are monthly sales.
    #[serde(flatten)]
    pub columns: BTreeMap<String, serde_json::Value>,
}

fn value_to_decimal(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

impl From<TransactionRow> for TransactionRecord {
    fn from(row: TransactionRow) -> Self {
        let periods = row
            .columns
            .iter()
            .filter_map(|(key, value)| {
                let period = Period::parse(key.trim()).ok()?;
                Some((period, value_to_decimal(value).unwrap_or_default()))
            })
            .collect();

        Self {
            store_code: row.store_code,
            store_name: row.store_name,
            item: row.item,
            season: row.season,
            sales_amount: row.sales_amount,
            sales_quantity: row.sales_quantity,
            normal_amount: row.normal_amount,
            normal_quantity: row.normal_quantity,
            return_amount: row.return_amount,
            return_quantity: row.return_quantity,
            periods,
        }
    }
}

/// Row of `store_inventory_data.json`.
#[derive(Debug, Deserialize)]
pub struct InventoryRow {
    #[serde(rename = "시즌", default, deserialize_with = "lenient_string")]
    pub season: String,
    #[serde(rename = "매장코드", default, deserialize_with = "lenient_string")]
    pub store_code: String,
    #[serde(rename = "매장명", default, deserialize_with = "lenient_string")]
    pub store_name: String,
    #[serde(rename = "매장재고수량", default, deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,
    #[serde(rename = "매장재고택가", default, deserialize_with = "lenient_decimal")]
    pub retail_value: Decimal,
}

impl From<InventoryRow> for InventoryRecord {
    fn from(row: InventoryRow) -> Self {
        Self {
            store_code: row.store_code,
            store_name: row.store_name,
            season: row.season,
            quantity: row.quantity,
            retail_value: row.retail_value,
        }
    }
}

/// Row of `store_data.json`.
#[derive(Debug, Deserialize)]
pub struct RosterRow {
    #[serde(rename = "매장명", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "형태", default, deserialize_with = "lenient_string")]
    pub format: String,
    #[serde(rename = "PY", default, deserialize_with = "lenient_optional_decimal")]
    pub floor_area: Option<Decimal>,
    #[serde(rename = "성명", default, deserialize_with = "lenient_string")]
    pub manager_name: String,
    /// The sheet header carries a trailing space.
    #[serde(
        rename = "연락처 ",
        alias = "연락처",
        default,
        deserialize_with = "lenient_string"
    )]
    pub phone: String,
    #[serde(rename = "생년월일", default, deserialize_with = "lenient_text")]
    pub birth_date: Option<String>,
    #[serde(rename = "SM근무시작일", default, deserialize_with = "lenient_text")]
    pub service_start: Option<String>,
}

impl From<RosterRow> for RosterEntry {
    fn from(row: RosterRow) -> Self {
        Self {
            name: row.name,
            format: row.format,
            floor_area: row.floor_area,
            manager_name: row.manager_name,
            phone: row.phone,
            birth_date: row.birth_date,
            service_start: row.service_start,
        }
    }
}

/// `competitor_data_v2.json`.
#[derive(Debug, Default, Deserialize)]
pub struct CompetitorFile {
    /// Brand columns in sheet order.
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub stores: Vec<CompetitorRow>,
    #[serde(default)]
    pub total_stores: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitorRow {
    #[serde(rename = "백화점", default, deserialize_with = "lenient_string")]
    pub venue: String,
    #[serde(rename = "브랜드별_월평균", default)]
    pub brand_averages: BTreeMap<String, serde_json::Value>,
}

impl CompetitorFile {
    /// Convert rows, ordering brands by the `brands` header list first.
    #[must_use]
    pub fn into_records(self) -> Vec<CompetitorRecord> {
        let order = self.brands;
        self.stores
            .into_iter()
            .filter(|row| !row.venue.trim().is_empty())
            .map(|row| {
                let mut remaining = row.brand_averages;
                let mut brand_averages: Vec<(String, Decimal)> = order
                    .iter()
                    .filter_map(|brand| {
                        let value = remaining.remove(brand)?;
                        Some((brand.clone(), value_to_decimal(&value).unwrap_or_default()))
                    })
                    .collect();
                brand_averages.extend(
                    remaining
                        .into_iter()
                        .map(|(brand, value)| (brand, value_to_decimal(&value).unwrap_or_default())),
                );
                CompetitorRecord {
                    venue: row.venue,
                    brand_averages,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_variants() {
        assert_eq!(parse_decimal("1,234"), Some(dec!(1234)));
        assert_eq!(parse_decimal(" 12.5 "), Some(dec!(12.5)));
        assert_eq!(parse_decimal("1e3"), Some(dec!(1000)));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("n/a"), None);
    }

    #[test]
    fn transaction_row_tolerates_loose_numbers() {
        let json = r#"{
            "매장코드": 1001,
            "매장명": "29CM(롯데본점)",
            "ITEM": "TS",
            "시즌": null,
            "판매액": "1,500,000",
            "판매수량": 12,
            "반품_판매액": -20000.0,
            "202512": 1500000,
            "202511": "300000",
            "비고": "x"
        }"#;
        let row: TransactionRow = serde_json::from_str(json).unwrap();
        let record = TransactionRecord::from(row);

        assert_eq!(record.store_code, "1001");
        assert_eq!(record.season, "");
        assert_eq!(record.sales_amount, dec!(1500000));
        assert_eq!(record.normal_amount, Decimal::ZERO);
        assert_eq!(record.return_amount, dec!(-20000));
        assert_eq!(record.periods.len(), 2);
        assert_eq!(record.period_amount(Period::parse("202511").unwrap()), dec!(300000));
    }

    #[test]
    fn roster_row_reads_spaced_header_and_numeric_date() {
        let json = r#"{
            "매장명": "롯데본점",
            "형태": "백화점",
            "PY": "35.5",
            "성명": "김민지",
            "연락처 ": "010 1234 5678",
            "SM근무시작일": 2017.1
        }"#;
        let row: RosterRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.phone, "010 1234 5678");
        assert_eq!(row.floor_area, Some(dec!(35.5)));
        assert_eq!(row.service_start.as_deref(), Some("2017.1"));
        assert_eq!(row.birth_date, None);
    }

    #[test]
    fn competitor_brands_follow_header_order() {
        let json = r#"{
            "brands": ["MLB", "DISCOVERY"],
            "stores": [
                {"백화점": "롯데본점", "브랜드별_월평균": {"DISCOVERY": 20, "MLB": "10", "NIKE": 5}},
                {"백화점": "", "브랜드별_월평균": {}}
            ],
            "total_stores": 2
        }"#;
        let file: CompetitorFile = serde_json::from_str(json).unwrap();
        let records = file.into_records();
        assert_eq!(records.len(), 1);
        let brands: Vec<&str> = records[0].brand_averages.iter().map(|(b, _)| b.as_str()).collect();
        assert_eq!(brands, vec!["MLB", "DISCOVERY", "NIKE"]);
        assert_eq!(records[0].brand_averages[0].1, dec!(10));
    }

    #[test]
    fn table_defaults_missing_fields() {
        let table: Table<InventoryRow> = serde_json::from_str(r#"{"data": [{"매장명": "A"}]}"#).unwrap();
        assert_eq!(table.data.len(), 1);
        assert_eq!(table.data[0].quantity, Decimal::ZERO);
        assert!(table.headers.is_empty());
    }
}
