use crate::domain::model::StageOrder;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationWindow {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
    pub has_more: bool,
}

impl PaginationWindow {
    pub fn new(page: PageRequest, total: usize) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            total,
            has_more: page.offset.saturating_add(page.limit) < total,
        }
    }
}

/// 取 `[offset, offset + limit)` 區間，超出範圍時截斷
pub fn paginate<T: Clone>(items: &[T], page: PageRequest) -> (Vec<T>, PaginationWindow) {
    let start = page.offset.min(items.len());
    let end = page.offset.saturating_add(page.limit).min(items.len());
    (items[start..end].to_vec(), PaginationWindow::new(page, items.len()))
}

pub type Grouper<T> = (&'static str, fn(&T) -> String);

pub fn count_by<T>(items: &[T], key: fn(&T) -> String) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone)]
pub struct Staged<T> {
    pub page: Vec<T>,
    pub window: PaginationWindow,
    pub groups: BTreeMap<&'static str, BTreeMap<String, usize>>,
}

impl<T> Staged<T> {
    pub fn group(&self, name: &str) -> BTreeMap<String, usize> {
        self.groups.get(name).cloned().unwrap_or_default()
    }
}

/// 依 `order` 執行分頁與分組統計
pub fn run_stages<T: Clone>(
    items: &[T],
    page: PageRequest,
    order: StageOrder,
    groupers: &[Grouper<T>],
) -> Staged<T> {
    let aggregate = |source: &[T]| {
        groupers
            .iter()
            .map(|(name, key)| (*name, count_by(source, *key)))
            .collect::<BTreeMap<_, _>>()
    };

    match order {
        StageOrder::PaginateThenAggregate => {
            let (page_items, window) = paginate(items, page);
            let groups = aggregate(&page_items);
            Staged {
                page: page_items,
                window,
                groups,
            }
        }
        StageOrder::AggregateThenPaginate => {
            let groups = aggregate(items);
            let (page_items, window) = paginate(items, page);
            Staged {
                page: page_items,
                window,
                groups,
            }
        }
    }
}

/// 保留每個鍵第一次出現的項目
pub fn dedup_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}
