//! JSON export files for dataset and CLI tests.
//!
//! The shapes mirror the sheet exports: Korean headers, numbers mixed with
//! numeric strings, and `YYYYMM` period columns.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

/// Roster rows: `(store name, manager name)`.
pub fn roster(rows: &[(&str, &str)]) -> Value {
    let data: Vec<Value> = rows
        .iter()
        .map(|(store, manager)| {
            json!({
                "매장명": store,
                "형태": "백화점",
                "PY": 30,
                "성명": manager,
                "연락처 ": "010 1234 5678",
                "생년월일": "1985-03-02",
                "SM근무시작일": 2017.1,
            })
        })
        .collect();
    json!({ "headers": ["매장명", "형태", "PY", "성명", "연락처 ", "생년월일", "SM근무시작일"], "data": data, "total_rows": rows.len() })
}

/// Transaction rows: `(raw store name, item, season, period token, amount)`.
pub fn transactions(rows: &[(&str, &str, &str, &str, i64)]) -> Value {
    let data: Vec<Value> = rows
        .iter()
        .map(|(store, item, season, token, amount)| {
            let mut row = json!({
                "매장코드": "",
                "매장명": store,
                "ITEM": item,
                "시즌": season,
                "판매액": amount,
                "판매수량": "1",
                "정상_판매액": amount,
                "정상_판매수량": 1,
                "반품_판매액": 0,
                "반품_판매수량": null,
            });
            row[*token] = json!(amount.to_string());
            row
        })
        .collect();
    json!({ "headers": [], "data": data, "total_rows": rows.len() })
}

/// Inventory rows: `(raw store name, season, quantity, tag value)`.
pub fn inventory(rows: &[(&str, &str, i64, i64)]) -> Value {
    let data: Vec<Value> = rows
        .iter()
        .map(|(store, season, quantity, value)| {
            json!({
                "시즌": season,
                "매장코드": "",
                "매장명": store,
                "매장재고수량": quantity,
                "매장재고택가": value,
            })
        })
        .collect();
    json!({ "headers": [], "data": data, "total_rows": rows.len() })
}

/// Competitor sheet: `(venue, [(brand, monthly average)])`.
pub fn competitors(brands: &[&str], venues: &[(&str, &[(&str, i64)])]) -> Value {
    let stores: Vec<Value> = venues
        .iter()
        .map(|(venue, figures)| {
            let averages: serde_json::Map<String, Value> = figures
                .iter()
                .map(|(brand, value)| ((*brand).to_string(), json!(value)))
                .collect();
            json!({ "백화점": venue, "브랜드별_월평균": averages })
        })
        .collect();
    json!({ "brands": brands, "stores": stores, "total_stores": venues.len() })
}

/// Write `value` as `dir/file`.
pub fn write(dir: &Path, file: &str, value: &Value) {
    fs::write(dir.join(file), value.to_string())
        .unwrap_or_else(|e| panic!("failed to write fixture {file}: {e}"));
}

/// A small three-store dataset with the default file names.
///
/// December revenue: 롯데본점 1,000만원, 신세계강남 1,100만원,
/// 현대판교 5,000만원. Only 롯데본점 and 신세계강남 are peers.
pub fn write_sample(dir: &Path) {
    write(
        dir,
        "store_data.json",
        &roster(&[("롯데본점", "김 민수"), ("신세계강남", "이영희"), ("현대판교", "박철수")]),
    );
    write(
        dir,
        "item_season_data.json",
        &transactions(&[
            ("29CM(롯데본점)", "TS", "25F", "202512", 6_000_000),
            ("롯데본점", "PT", "25F", "202512", 4_000_000),
            ("롯데본점", "TS", "25F", "202412", 5_000_000),
            ("신세계강남", "TS", "25F", "202512", 8_000_000),
            ("신세계강남", "PT", "24F", "202512", 3_000_000),
            ("현대판교", "TS", "25F", "202512", 50_000_000),
            ("알수없음", "TS", "25F", "202512", 1_000_000),
        ]),
    );
    write(
        dir,
        "store_inventory_data.json",
        &inventory(&[
            ("롯데본점", "25F", 100, 4_000_000),
            ("신세계강남", "25F", 300, 12_000_000),
            ("신세계강남", "24F", 50, 1_000_000),
        ]),
    );
    write(
        dir,
        "competitor_data_v2.json",
        &competitors(
            &["MLB", "NIKE"],
            &[("롯데본점", &[("MLB", 9_000_000), ("NIKE", 12_000_000)])],
        ),
    );
}
