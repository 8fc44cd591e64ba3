//! Store catalog with raw names resolved once at load.
//!
//! Every raw store name in the transaction and inventory collections is
//! matched against the roster exactly once. Records are then indexed by
//! [`StoreId`], and downstream lookups never re-match strings.
//!
//! Resolution order for a raw name:
//!
//! 1. bracket or exact match
//! 2. alias match
//! 3. containment, only when enabled
//!
//! Several stores matching at the same level is ambiguous; the first store in
//! roster order wins and the ambiguity is logged.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::id::StoreId;
use crate::domain::ledger::SalesLedger;
use crate::domain::matcher::{MatchKind, NameMatcher};
use crate::domain::record::{CompetitorRecord, InventoryRecord, TransactionRecord};
use crate::domain::store::Store;
use crate::port::outbound::dataset::Dataset;

/// Outcome of resolving the raw names of one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    /// Distinct raw names resolved, by how they matched.
    pub resolved: BTreeMap<MatchKind, usize>,
    /// Raw names that matched no store.
    pub unmatched: BTreeSet<String>,
    /// Raw names that matched several stores at the same level.
    pub ambiguous: BTreeSet<String>,
}

impl ResolutionReport {
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved.values().sum()
    }

    #[must_use]
    pub fn by_kind(&self, kind: MatchKind) -> usize {
        self.resolved.get(&kind).copied().unwrap_or(0)
    }
}

/// Resolver state shared across both collections.
struct Resolver<'a> {
    stores: &'a [Store],
    matcher: &'a NameMatcher,
    cache: HashMap<String, Option<StoreId>>,
    report: ResolutionReport,
}

impl<'a> Resolver<'a> {
    fn new(stores: &'a [Store], matcher: &'a NameMatcher) -> Self {
        Self {
            stores,
            matcher,
            cache: HashMap::new(),
            report: ResolutionReport::default(),
        }
    }

    fn resolve(&mut self, raw: &str) -> Option<StoreId> {
        if let Some(hit) = self.cache.get(raw) {
            return hit.clone();
        }
        let resolved = self.resolve_uncached(raw);
        self.cache.insert(raw.to_string(), resolved.clone());
        resolved
    }

    fn resolve_uncached(&mut self, raw: &str) -> Option<StoreId> {
        if raw.trim().is_empty() {
            return None;
        }

        let mut best: Option<MatchKind> = None;
        let mut candidates: Vec<&Store> = Vec::new();
        for store in self.stores {
            let Some(kind) = self.matcher.classify_strict(raw, &store.name) else {
                continue;
            };
            // Bracket and exact rank together ahead of alias.
            let rank = |k: MatchKind| matches!(k, MatchKind::Alias);
            match best {
                Some(current) if rank(current) == rank(kind) => candidates.push(store),
                Some(current) if rank(current) && !rank(kind) => {
                    best = Some(kind);
                    candidates = vec![store];
                }
                Some(_) => {}
                None => {
                    best = Some(kind);
                    candidates.push(store);
                }
            }
        }

        if best.is_none() && self.matcher.containment_fallback() {
            candidates = self
                .stores
                .iter()
                .filter(|s| self.matcher.classify(raw, &s.name) == Some(MatchKind::Containment))
                .collect();
            if !candidates.is_empty() {
                best = Some(MatchKind::Containment);
            }
        }

        let (kind, first) = match (best, candidates.first()) {
            (Some(kind), Some(first)) => (kind, *first),
            _ => {
                self.report.unmatched.insert(raw.to_string());
                return None;
            }
        };

        if candidates.len() > 1 {
            let names: Vec<&str> = candidates.iter().map(|s| s.name.as_str()).collect();
            warn!(raw, chosen = %first.name, candidates = ?names, "ambiguous store name");
            self.report.ambiguous.insert(raw.to_string());
        }

        *self.report.resolved.entry(kind).or_insert(0) += 1;
        debug!(raw, store = %first.name, kind = ?kind, "resolved store name");
        Some(first.id.clone())
    }
}

fn index_by<'r, T, F>(resolver: &mut Resolver<'_>, records: &'r [T], name: F) -> HashMap<StoreId, Vec<usize>>
where
    F: Fn(&'r T) -> &'r str,
{
    let mut index: HashMap<StoreId, Vec<usize>> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        if let Some(id) = resolver.resolve(name(record)) {
            index.entry(id).or_default().push(position);
        }
    }
    index
}

/// Loaded dataset with records indexed by resolved store.
#[derive(Debug, Clone)]
pub struct StoreCatalog {
    stores: Vec<Store>,
    transactions: Vec<TransactionRecord>,
    inventory: Vec<InventoryRecord>,
    competitors: Vec<CompetitorRecord>,
    transaction_index: HashMap<StoreId, Vec<usize>>,
    inventory_index: HashMap<StoreId, Vec<usize>>,
    matcher: NameMatcher,
    report: ResolutionReport,
}

impl StoreCatalog {
    /// Resolve every raw name in `dataset` against its roster.
    #[must_use]
    pub fn resolve(dataset: Dataset, matcher: NameMatcher) -> Self {
        let Dataset {
            stores,
            transactions,
            inventory,
            competitors,
        } = dataset;

        let (transaction_index, inventory_index, report) = {
            let mut resolver = Resolver::new(&stores, &matcher);
            let tx = index_by(&mut resolver, &transactions, |r| r.store_name.as_str());
            let inv = index_by(&mut resolver, &inventory, |r| r.store_name.as_str());
            (tx, inv, resolver.report)
        };

        if !report.unmatched.is_empty() {
            warn!(
                count = report.unmatched.len(),
                names = ?report.unmatched,
                "raw store names matched no roster store"
            );
        }
        info!(
            stores = stores.len(),
            resolved = report.resolved_count(),
            unmatched = report.unmatched.len(),
            ambiguous = report.ambiguous.len(),
            "store names resolved"
        );

        Self {
            stores,
            transactions,
            inventory,
            competitors,
            transaction_index,
            inventory_index,
            matcher,
            report,
        }
    }

    /// Roster stores in id order.
    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Find a store by id (`ST-001`) or canonical name.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Store> {
        let key = key.trim();
        self.stores
            .iter()
            .find(|s| s.id.as_str().eq_ignore_ascii_case(key))
            .or_else(|| self.stores.iter().find(|s| s.name == key))
    }

    #[must_use]
    pub fn competitors(&self) -> &[CompetitorRecord] {
        &self.competitors
    }

    #[must_use]
    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    #[must_use]
    pub fn report(&self) -> &ResolutionReport {
        &self.report
    }

    fn rows<'s, T>(index: &HashMap<StoreId, Vec<usize>>, records: &'s [T], store: &Store) -> Vec<&'s T> {
        index
            .get(&store.id)
            .map(|positions| positions.iter().filter_map(|&i| records.get(i)).collect())
            .unwrap_or_default()
    }
}

impl SalesLedger for StoreCatalog {
    fn transactions(&self, store: &Store) -> Vec<&TransactionRecord> {
        Self::rows(&self.transaction_index, &self.transactions, store)
    }

    fn inventory(&self, store: &Store) -> Vec<&InventoryRecord> {
        Self::rows(&self.inventory_index, &self.inventory, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matcher::AliasTable;

    fn store(id: &str, name: &str) -> Store {
        Store::new(id, name)
    }

    fn tx(name: &str) -> TransactionRecord {
        TransactionRecord {
            store_name: name.into(),
            ..Default::default()
        }
    }

    fn dataset(stores: Vec<Store>, names: &[&str]) -> Dataset {
        Dataset {
            stores,
            transactions: names.iter().map(|n| tx(n)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_brackets_and_reports_unmatched() {
        let catalog = StoreCatalog::resolve(
            dataset(
                vec![store("ST-001", "롯데본점"), store("ST-002", "신세계강남")],
                &["29CM(롯데본점)", "롯데본점", "무신사(신세계강남)", "현대무역"],
            ),
            NameMatcher::default(),
        );

        assert_eq!(catalog.transactions(&catalog.stores()[0]).len(), 2);
        assert_eq!(catalog.transactions(&catalog.stores()[1]).len(), 1);
        assert!(catalog.report().unmatched.contains("현대무역"));
        assert_eq!(catalog.report().by_kind(MatchKind::Bracket), 2);
        assert_eq!(catalog.report().by_kind(MatchKind::Exact), 1);
    }

    #[test]
    fn exact_beats_alias_for_the_same_raw_name() {
        let mut aliases = AliasTable::new();
        aliases.insert("더현대서울", ["현대서울"]);
        let catalog = StoreCatalog::resolve(
            dataset(
                vec![store("ST-001", "더현대서울"), store("ST-002", "현대서울")],
                &["현대서울"],
            ),
            NameMatcher::new(aliases),
        );

        assert!(catalog.transactions(&catalog.stores()[0]).is_empty());
        assert_eq!(catalog.transactions(&catalog.stores()[1]).len(), 1);
        assert!(catalog.report().ambiguous.is_empty());
    }

    #[test]
    fn containment_only_when_enabled() {
        let stores = vec![store("ST-001", "롯데본점")];
        let strict = StoreCatalog::resolve(
            dataset(stores.clone(), &["롯데본점 아울렛"]),
            NameMatcher::default(),
        );
        assert!(strict.transactions(&strict.stores()[0]).is_empty());

        let loose = StoreCatalog::resolve(
            dataset(stores, &["롯데본점 아울렛"]),
            NameMatcher::default().with_containment_fallback(true),
        );
        assert_eq!(loose.transactions(&loose.stores()[0]).len(), 1);
        assert_eq!(loose.report().by_kind(MatchKind::Containment), 1);
    }

    #[test]
    fn ambiguous_containment_goes_to_first_store() {
        let catalog = StoreCatalog::resolve(
            dataset(
                vec![store("ST-001", "롯데"), store("ST-002", "롯데본점")],
                &["롯데본점점"],
            ),
            NameMatcher::default().with_containment_fallback(true),
        );
        assert_eq!(catalog.transactions(&catalog.stores()[0]).len(), 1);
        assert!(catalog.report().ambiguous.contains("롯데본점점"));
    }

    #[test]
    fn find_by_id_or_name() {
        let catalog = StoreCatalog::resolve(
            dataset(vec![store("ST-001", "롯데본점")], &[]),
            NameMatcher::default(),
        );
        assert_eq!(catalog.find("st-001").map(|s| s.name.as_str()), Some("롯데본점"));
        assert_eq!(catalog.find(" 롯데본점 ").map(|s| s.id.as_str()), Some("ST-001"));
        assert!(catalog.find("신세계강남").is_none());
    }
}
