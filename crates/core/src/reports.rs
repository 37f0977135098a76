//! Per-requester copy totals and period-over-period comparison.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::DbId;

/// Display name for rows whose requester has been soft-deleted.
pub const UNKNOWN_REQUESTER: &str = "Unknown Requester";

/// Summed copies for one requester over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyTotals {
    pub requester_id: DbId,
    /// `None` when the requester row is soft-deleted.
    pub requester_name: Option<String>,
    pub color_copies: i64,
    pub bw_copies: i64,
    pub total_copies: i64,
}

impl CopyTotals {
    pub fn display_name(&self) -> &str {
        self.requester_name.as_deref().unwrap_or(UNKNOWN_REQUESTER)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodCopies {
    pub color_copies: i64,
    pub bw_copies: i64,
    pub total_copies: i64,
}

impl From<&CopyTotals> for PeriodCopies {
    fn from(t: &CopyTotals) -> Self {
        Self {
            color_copies: t.color_copies,
            bw_copies: t.bw_copies,
            total_copies: t.total_copies,
        }
    }
}

/// One requester's copies in two periods. Missing periods count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub requester_id: DbId,
    pub requester_name: String,
    pub first: PeriodCopies,
    pub second: PeriodCopies,
}

impl ComparisonRow {
    pub fn color_difference(&self) -> i64 {
        self.second.color_copies - self.first.color_copies
    }

    pub fn bw_difference(&self) -> i64 {
        self.second.bw_copies - self.first.bw_copies
    }

    pub fn total_difference(&self) -> i64 {
        self.second.total_copies - self.first.total_copies
    }
}

/// Merge two periods' totals by requester, largest growth first.
///
/// Ties are broken by requester id so the output is stable.
pub fn compare_periods(first: &[CopyTotals], second: &[CopyTotals]) -> Vec<ComparisonRow> {
    let mut merged: BTreeMap<DbId, ComparisonRow> = BTreeMap::new();

    for (totals, is_first) in first
        .iter()
        .map(|t| (t, true))
        .chain(second.iter().map(|t| (t, false)))
    {
        let row = merged
            .entry(totals.requester_id)
            .or_insert_with(|| ComparisonRow {
                requester_id: totals.requester_id,
                requester_name: totals.display_name().to_string(),
                first: PeriodCopies::default(),
                second: PeriodCopies::default(),
            });
        if is_first {
            row.first = totals.into();
        } else {
            row.second = totals.into();
        }
    }

    let mut rows: Vec<ComparisonRow> = merged.into_values().collect();
    rows.sort_by(|a, b| {
        b.total_difference()
            .cmp(&a.total_difference())
            .then(a.requester_id.cmp(&b.requester_id))
    });
    rows
}
