//! Party-size matching against the table list.
//!
//! Two passes in stored order: the first available table with enough seats
//! wins; otherwise the first available table of any size is offered as an
//! alternative. Capacity is deliberately ignored in the second pass.

use bistro_protocol::{MatchOutcome, MatchResult, Table};

/// Pick a table for `party_size` people.
pub fn find_table(tables: &[Table], party_size: u32) -> MatchResult {
    if let Some(table) = tables.iter().find(|t| t.fits(party_size)) {
        tracing::debug!(table_id = %table.id, party_size, "exact table match");
        return MatchResult {
            outcome: MatchOutcome::Exact(table.id),
            rationale: format!("table {} fits a party of {party_size}", table.id),
        };
    }

    if let Some(table) = tables.iter().find(|t| t.available) {
        tracing::debug!(
            table_id = %table.id,
            capacity = table.capacity,
            party_size,
            "no exact match, offering alternative"
        );
        return MatchResult {
            outcome: MatchOutcome::Alternative(table.id),
            rationale: format!(
                "no table fits a party of {party_size}; table {} is available as an alternative",
                table.id
            ),
        };
    }

    MatchResult {
        outcome: MatchOutcome::None,
        rationale: "no table is available".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_protocol::TableId;

    #[test]
    fn exact_match_skips_small_tables() {
        let tables = vec![Table::new(1, 2, true), Table::new(2, 6, true)];
        let result = find_table(&tables, 4);
        assert_eq!(result.outcome, MatchOutcome::Exact(TableId(2)));
        assert!(result.rationale.contains("table 2"));
    }

    #[test]
    fn alternative_when_nothing_fits() {
        let tables = vec![Table::new(1, 2, true)];
        let result = find_table(&tables, 4);
        assert_eq!(result.outcome, MatchOutcome::Alternative(TableId(1)));
    }

    #[test]
    fn none_when_nothing_available() {
        let tables = vec![Table::new(1, 6, false)];
        let result = find_table(&tables, 4);
        assert_eq!(result.outcome, MatchOutcome::None);
        assert_eq!(result.rationale, "no table is available");
    }

    #[test]
    fn empty_inventory_is_none() {
        assert_eq!(find_table(&[], 2).outcome, MatchOutcome::None);
    }

    #[test]
    fn first_fitting_table_in_stored_order_wins() {
        // Table 3 is a tighter fit but table 2 comes first.
        let tables = vec![
            Table::new(1, 8, false),
            Table::new(2, 8, true),
            Table::new(3, 4, true),
        ];
        assert_eq!(
            find_table(&tables, 4).outcome,
            MatchOutcome::Exact(TableId(2))
        );
    }

    #[test]
    fn alternative_ignores_capacity() {
        let tables = vec![
            Table::new(1, 10, false),
            Table::new(2, 2, true),
            Table::new(3, 4, true),
        ];
        assert_eq!(
            find_table(&tables, 10).outcome,
            MatchOutcome::Alternative(TableId(2))
        );
    }

    #[test]
    fn capacity_equal_to_party_is_exact() {
        let tables = vec![Table::new(5, 4, true)];
        assert_eq!(
            find_table(&tables, 4).outcome,
            MatchOutcome::Exact(TableId(5))
        );
    }
}
