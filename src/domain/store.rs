//! Canonical stores and their managers.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::id::StoreId;

/// Month a manager started at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStart {
    pub year: i32,
    pub month: u32,
}

impl ServiceStart {
    /// Parse a `YYYY.MM` or `YYYY-MM-DD` value.
    ///
    /// Spreadsheet exports write `2017.10` as the number `2017.1`, so a single
    /// digit after the dot is the tens digit of the month.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (year, month) = if let Some((y, m)) = raw.split_once('.') {
            let month: u32 = if m.len() == 1 {
                m.parse::<u32>().ok()? * 10
            } else {
                m.get(..2)?.parse().ok()?
            };
            (y.parse().ok()?, month)
        } else {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
            (date.year(), date.month())
        };
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

/// Store manager contact record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Manager {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub birth_date: Option<NaiveDate>,
    pub service_start: Option<ServiceStart>,
}

impl Manager {
    /// Age in whole years on `today`, `None` without a birth date.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        today.years_since(birth)
    }

    /// Years of service on `today`, rounded to one decimal.
    #[must_use]
    pub fn years_of_service_on(&self, today: NaiveDate) -> Option<Decimal> {
        let start = self.service_start?;
        let months = (today.year() - start.year) * 12 + today.month() as i32 - start.month as i32;
        let years = Decimal::from(months) / Decimal::from(12);
        Some(years.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }
}

/// A canonical store from the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Store {
    pub id: StoreId,
    /// The only cross-dataset join key.
    pub name: String,
    pub category: String,
    pub location: String,
    /// Sales floor area in pyeong.
    pub floor_area: Option<Decimal>,
    pub manager: Manager,
}

impl Store {
    /// Minimal store with only identity fields populated.
    pub fn new(id: impl Into<StoreId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            location: String::new(),
            floor_area: None,
            manager: Manager::default(),
        }
    }
}

/// A roster row before ids are assigned.
#[derive(Debug, Clone, Default)]
pub struct RosterEntry {
    pub name: String,
    pub format: String,
    pub floor_area: Option<Decimal>,
    pub manager_name: String,
    pub phone: String,
    pub birth_date: Option<String>,
    pub service_start: Option<String>,
}

/// Build canonical stores from roster rows.
///
/// Rows are sorted by name (Hangul syllables sort in 가나다 order by code
/// point) and assigned `ST-NNN` ids in that order. Blank names are dropped.
#[must_use]
pub fn build_roster(mut entries: Vec<RosterEntry>) -> Vec<Store> {
    entries.retain(|e| !e.name.trim().is_empty());
    entries.sort_by(|a, b| a.name.trim().cmp(b.name.trim()));

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let phone: String = entry.phone.split_whitespace().collect();
            let email = format!(
                "{}@retail.com",
                entry
                    .manager_name
                    .to_lowercase()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(".")
            );
            let birth_date = entry
                .birth_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
            let service_start = entry.service_start.as_deref().and_then(ServiceStart::parse);

            Store {
                id: StoreId::from_position(index + 1),
                name: entry.name.trim().to_string(),
                category: entry.format.clone(),
                location: entry.format,
                floor_area: entry.floor_area,
                manager: Manager {
                    name: entry.manager_name,
                    phone,
                    email,
                    position: "매니저".to_string(),
                    birth_date,
                    service_start,
                },
            }
        })
        .collect()
}
