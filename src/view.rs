//! Pure aggregation step between the store and the renderer: records in,
//! view-model out. Keeping this free of any terminal types means the total
//! and ordering rules are unit-testable without a rendering environment, and
//! the draw code stays a dumb projection of [`LedgerView`].

use crate::models::Debt;

/// Everything a render pass needs, computed up front from one `list_all`
/// snapshot. Building the same view twice from the same records yields an
/// identical value, which is what makes repeated renders idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    /// Sum of every parseable `cost`; garbled amounts contribute zero.
    pub total: f64,
    /// Entries in display order: most recently added first.
    pub entries: Vec<Debt>,
}

impl LedgerView {
    /// Build the view from records in storage order (insertion order).
    pub fn from_debts(debts: &[Debt]) -> Self {
        // Folded from an explicit positive zero: the `Sum` identity for f64 is
        // -0.0, which would render an empty ledger as "$-0.00".
        let total = debts.iter().fold(0.0, |acc, debt| acc + debt.amount());
        let entries = debts.iter().rev().cloned().collect();
        Self { total, entries }
    }

    /// The running total as shown in the header, e.g. `$19.50`.
    pub fn formatted_total(&self) -> String {
        format!("${:.2}", self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debt(id: i64, who: &str, cost: &str, why: &str) -> Debt {
        Debt {
            id,
            who: who.to_string(),
            cost: cost.to_string(),
            why: why.to_string(),
        }
    }

    #[test]
    fn total_sums_parseable_costs_with_two_digits() {
        let debts = vec![
            debt(1, "Sam", "12.50", "lunch"),
            debt(2, "Lee", "7", ""),
        ];
        let view = LedgerView::from_debts(&debts);
        assert_eq!(view.formatted_total(), "$19.50");
    }

    #[test]
    fn unparseable_cost_counts_zero_but_still_lists() {
        let debts = vec![debt(1, "Sam", "abc", "typo"), debt(2, "Lee", "5", "")];
        let view = LedgerView::from_debts(&debts);
        assert_eq!(view.formatted_total(), "$5.00");
        assert_eq!(view.len(), 2);
        assert!(view.entries.iter().any(|d| d.cost == "abc"));
    }

    #[test]
    fn prefixed_amount_contributes_its_numeric_prefix() {
        let debts = vec![debt(1, "Sam", "12.50abc", "typo")];
        let view = LedgerView::from_debts(&debts);
        assert_eq!(view.formatted_total(), "$12.50");
    }

    #[test]
    fn entries_come_newest_first() {
        let debts = vec![
            debt(1, "Sam", "12.50", "lunch"),
            debt(2, "Lee", "7", ""),
        ];
        let view = LedgerView::from_debts(&debts);
        assert_eq!(view.entries[0].who, "Lee");
        assert_eq!(view.entries[1].who, "Sam");
    }

    #[test]
    fn empty_ledger_shows_zero_total() {
        let view = LedgerView::from_debts(&[]);
        assert_eq!(view.formatted_total(), "$0.00");
        assert!(view.is_empty());
    }

    #[test]
    fn same_records_build_an_identical_view() {
        let debts = vec![debt(1, "Sam", "12.50", "lunch")];
        assert_eq!(LedgerView::from_debts(&debts), LedgerView::from_debts(&debts));
    }
}
