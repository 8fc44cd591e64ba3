//! Peer search over resolved catalogs.

use rust_decimal_macros::dec;
use storelens::application::catalog::StoreCatalog;
use storelens::domain::matcher::{matches, NameMatcher};
use storelens::domain::peer::{find_peers, PeerCriteria, PeerOutcome};
use storelens::testkit::domain::{period, DatasetBuilder};

const PERIOD: &str = "202512";

/// Catalog with one December sale per store, amounts in 만원.
fn catalog(revenues: &[(&str, i64)]) -> StoreCatalog {
    let names: Vec<&str> = revenues.iter().map(|(name, _)| *name).collect();
    revenues
        .iter()
        .fold(DatasetBuilder::new(&names), |builder, (name, man_won)| {
            builder.sale(name, "TS", "25F", PERIOD, rust_decimal::Decimal::from(man_won * 10_000))
        })
        .catalog()
}

fn peer_names(catalog: &StoreCatalog, target: &str) -> Vec<String> {
    let store = catalog.find(target).expect("target store");
    let outcome = find_peers(store, catalog.stores(), catalog, &PeerCriteria::new(period(PERIOD)));
    outcome.stores().iter().map(|s| s.name.clone()).collect()
}

#[test]
fn bracketed_raw_names_match_their_store() {
    assert!(matches("29CM(롯데본점)", "롯데본점", None));
    assert!(!matches("29CM(롯데본점)", "신세계강남", None));
}

#[test]
fn band_edges_are_inclusive() {
    let catalog = catalog(&[
        ("기준", 1000),
        ("하한", 800),
        ("상한", 1200),
        ("하한밖", 799),
        ("상한밖", 1201),
    ]);
    let mut names = peer_names(&catalog, "기준");
    names.sort();
    assert_eq!(names, vec!["상한".to_string(), "하한".to_string()]);
}

#[test]
fn zero_revenue_target_has_no_baseline() {
    let catalog = catalog(&[("기준", 0), ("다른매장", 0)]);
    let store = catalog.find("기준").expect("target store");
    let outcome = find_peers(store, catalog.stores(), &catalog, &PeerCriteria::new(period(PERIOD)));
    assert_eq!(outcome, PeerOutcome::NoBaseline);
}

#[test]
fn peers_are_capped_and_closest_first() {
    let catalog = catalog(&[
        ("기준", 1000),
        ("A", 1150),
        ("B", 1010),
        ("C", 900),
        ("D", 1050),
        ("E", 830),
        ("F", 980),
        ("G", 1190),
    ]);
    assert_eq!(peer_names(&catalog, "기준"), vec!["B", "F", "D", "C", "A"]);
}

#[test]
fn target_is_never_its_own_peer() {
    let catalog = catalog(&[("기준", 1000), ("쌍둥이", 1000)]);
    assert_eq!(peer_names(&catalog, "기준"), vec!["쌍둥이"]);
}

#[test]
fn bracketed_rows_count_toward_revenue() {
    let catalog = DatasetBuilder::new(&["롯데본점", "신세계강남"])
        .sale("29CM(롯데본점)", "TS", "25F", PERIOD, dec!(6_000_000))
        .sale("롯데본점", "PT", "25F", PERIOD, dec!(4_000_000))
        .sale("신세계강남", "TS", "25F", PERIOD, dec!(11_000_000))
        .catalog();

    let store = catalog.find("롯데본점").expect("store");
    let outcome = find_peers(store, catalog.stores(), &catalog, &PeerCriteria::new(period(PERIOD)));
    let set = outcome.peer_set().expect("peers");
    assert_eq!(set.target_revenue, 1000);
    assert_eq!(set.peers[0].distance, 100);
}

#[test]
fn containment_is_opt_in() {
    let dataset = DatasetBuilder::new(&["롯데본점", "신세계강남"])
        .sale("롯데본점 아울렛", "TS", "25F", PERIOD, dec!(10_000_000))
        .sale("신세계강남", "TS", "25F", PERIOD, dec!(10_000_000))
        .build();

    let strict = StoreCatalog::resolve(dataset.clone(), NameMatcher::default());
    assert!(peer_names(&strict, "신세계강남").is_empty());

    let loose = StoreCatalog::resolve(dataset, NameMatcher::default().with_containment_fallback(true));
    assert_eq!(peer_names(&loose, "신세계강남"), vec!["롯데본점"]);
}

#[test]
fn zero_revenue_store_is_never_a_peer_even_with_full_tolerance() {
    let catalog = catalog(&[("기준", 1000), ("휴점", 0), ("근처", 1500)]);
    let store = catalog.find("기준").expect("target store");
    let criteria = PeerCriteria::new(period(PERIOD)).with_tolerance(dec!(1));

    let outcome = find_peers(store, catalog.stores(), &catalog, &criteria);
    let set = outcome.peer_set().expect("peers");
    assert!(set.peers.iter().all(|p| p.revenue > 0));
    assert_eq!(outcome.stores().iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["근처"]);
}
