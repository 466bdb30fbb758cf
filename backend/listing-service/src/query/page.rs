//! Facet result shape shared by every listing query.

use serde::{Deserialize, Serialize};

/// Pre-pagination match count, `[{total}]` on the wire. The array is
/// empty when the match stage produced zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCounter {
    pub total: i64,
}

/// One page of results plus the total count in a single pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetPage<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default = "Vec::new")]
    pub meta_counter: Vec<TotalCounter>,
}

impl<T> FacetPage<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        Self {
            list,
            meta_counter: vec![TotalCounter { total }],
        }
    }

    /// Zero matches: empty list, total 0.
    pub fn total(&self) -> i64 {
        self.meta_counter.first().map(|c| c.total).unwrap_or(0)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> FacetPage<U> {
        FacetPage {
            list: self.list.into_iter().map(f).collect(),
            meta_counter: self.meta_counter,
        }
    }
}

impl<T> Default for FacetPage<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            meta_counter: Vec::new(),
        }
    }
}
