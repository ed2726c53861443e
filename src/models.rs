//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These types stay light-weight data holders so the store and the view
//! layers can focus on persistence and presentation logic respectively.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// One persisted ledger entry: money owed to (or by) somebody.
pub struct Debt {
    /// Primary key assigned by the store. Ids are monotonically increasing and
    /// never reused, so delete flows can bubble the id back to the persistence
    /// layer without ambiguity.
    pub id: i64,
    /// Counterparty name. Never empty once persisted; the commit form refuses
    /// blank names before the store is involved.
    pub who: String,
    /// Amount kept verbatim as the user typed it. Parsing to a number happens
    /// only when the aggregate total is computed, so a record with a garbled
    /// amount still round-trips through storage unchanged.
    pub cost: String,
    /// Free-text reason. May be empty.
    pub why: String,
}

/// Field values for a debt that has not been persisted yet. The store assigns
/// the id on insert, so callers never fabricate one.
#[derive(Debug, Clone, Default)]
pub struct NewDebt {
    pub who: String,
    pub cost: String,
    pub why: String,
}

impl Debt {
    /// Parse the stored amount for aggregation. Like `parseFloat`, the longest
    /// leading numeric prefix counts, so `"12.50abc"` contributes 12.50.
    /// Text with no numeric prefix counts as zero rather than poisoning the
    /// total; the record itself is untouched either way.
    pub fn amount(&self) -> f64 {
        let text = self.cost.trim_start();
        (0..=text.len())
            .rev()
            .filter(|&end| text.is_char_boundary(end))
            .find_map(|end| text[..end].parse::<f64>().ok())
            .filter(|value| !value.is_nan())
            .unwrap_or(0.0)
    }
}

impl fmt::Display for Debt {
    /// Formats the card shown in the entry list: `WHO: $COST | WHY`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ${} | {}", self.who, self.cost, self.why)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debt(cost: &str) -> Debt {
        Debt {
            id: 1,
            who: "Sam".to_string(),
            cost: cost.to_string(),
            why: "lunch".to_string(),
        }
    }

    #[test]
    fn amount_parses_decimal_text() {
        assert_eq!(debt("12.50").amount(), 12.5);
        assert_eq!(debt(" 7 ").amount(), 7.0);
    }

    #[test]
    fn amount_treats_garbage_as_zero() {
        assert_eq!(debt("abc").amount(), 0.0);
        assert_eq!(debt("").amount(), 0.0);
        assert_eq!(debt("NaN").amount(), 0.0);
    }

    #[test]
    fn amount_reads_a_leading_numeric_prefix() {
        assert_eq!(debt("12.50abc").amount(), 12.5);
        assert_eq!(debt("-3 or so").amount(), -3.0);
        assert_eq!(debt("$5").amount(), 0.0);
    }

    #[test]
    fn display_matches_card_format() {
        assert_eq!(debt("12.50").to_string(), "Sam: $12.50 | lunch");
    }
}
