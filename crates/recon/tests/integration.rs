use proptest::prelude::*;

use shears_recon::{reconcile, remap_indices, Session, Step};
use shears_table::{ColumnSelection, Table};

fn headers(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

// -------------------------------------------------------------------------
// Scenario tests
// -------------------------------------------------------------------------

#[test]
fn scenario_overlapping_headers() {
    let recon = reconcile(
        &headers(&["ID", "Name", "Age"]),
        &headers(&["Name", "Age", "City"]),
    );
    assert_eq!(recon.common, headers(&["Name", "Age"]));
    assert_eq!(recon.missing, headers(&["ID"]));
    assert_eq!(recon.extra, headers(&["City"]));
}

#[test]
fn scenario_delete_first_column() {
    let table = Table::new(
        "Sheet1",
        headers(&["A", "B"]),
        vec![headers(&["1", "2"]), headers(&["3", "4"])],
    );
    let selection = ColumnSelection::from_positions([1]);
    let kept = table.project(&selection.keep_for(table.column_count())).unwrap();
    assert_eq!(kept.headers, headers(&["B"]));
    assert_eq!(kept.rows, vec![headers(&["2"]), headers(&["4"])]);
}

#[test]
fn scenario_identical_schemas_identity_remap() {
    let reference = headers(&["A", "B", "C"]);
    let recon = reconcile(&reference, &reference);
    assert!(recon.missing.is_empty());
    assert!(recon.extra.is_empty());
    let remap = remap_indices(&reference, &recon.common).unwrap();
    assert_eq!(remap.positions, vec![1, 2, 3]);
}

#[test]
fn scenario_empty_candidate() {
    let recon = reconcile(&headers(&["X"]), &[]);
    assert!(recon.common.is_empty());
    assert_eq!(recon.missing, headers(&["X"]));
    assert!(recon.extra.is_empty());
}

// -------------------------------------------------------------------------
// End-to-end workflow
// -------------------------------------------------------------------------

#[test]
fn clean_then_match_projects_candidate_onto_reference() {
    let mut session = Session::new();
    session.load_original(Table::new(
        "Invoices",
        headers(&["Invoice", "Internal Ref", "Amount", "Status"]),
        vec![headers(&["inv_1", "x", "7210", "paid"])],
    ));

    let cleaned = session
        .clean(&ColumnSelection::from_positions([2]))
        .unwrap();
    assert_eq!(cleaned.name, "Invoices_cleaned");
    assert_eq!(cleaned.headers, headers(&["Invoice", "Amount", "Status"]));

    session
        .load_candidate(Table::new(
            "March",
            headers(&["Status", "Invoice", "Notes", "Amount"]),
            vec![headers(&["open", "inv_9", "call back", "5000"])],
        ))
        .unwrap();

    let outcome = session.match_candidate().unwrap();
    assert_eq!(session.step(), Step::Matched);
    assert_eq!(outcome.table.name, "March_matched");
    assert_eq!(outcome.table.headers, headers(&["Invoice", "Amount", "Status"]));
    assert_eq!(outcome.table.rows, vec![headers(&["inv_9", "5000", "open"])]);
    assert_eq!(outcome.reconciliation.extra, headers(&["Notes"]));
    assert!(outcome.reconciliation.missing.is_empty());
}

// -------------------------------------------------------------------------
// Algebraic properties
// -------------------------------------------------------------------------

// Small alphabet so duplicate and overlapping labels actually occur.
fn header_lists() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    let label = prop::sample::select(vec!["a", "b", "c", "d", "e"])
        .prop_map(|s| s.to_string());
    (
        prop::collection::vec(label.clone(), 0..8),
        prop::collection::vec(label, 0..8),
    )
}

fn sorted(v: &[String]) -> Vec<String> {
    let mut v = v.to_vec();
    v.sort();
    v
}

proptest! {
    #[test]
    fn common_bounded_by_reference((reference, candidate) in header_lists()) {
        let recon = reconcile(&reference, &candidate);
        prop_assert!(recon.common.len() <= reference.len());
        // With distinct reference labels, common is also bounded by the
        // candidate side (duplicates in the reference relax that bound).
        let distinct: std::collections::HashSet<&String> = reference.iter().collect();
        if distinct.len() == reference.len() {
            prop_assert!(recon.common.len() <= candidate.len());
        }
    }

    #[test]
    fn common_and_missing_partition_reference((reference, candidate) in header_lists()) {
        let recon = reconcile(&reference, &candidate);
        let mut merged = recon.common.clone();
        merged.extend(recon.missing.clone());
        prop_assert_eq!(sorted(&merged), sorted(&reference));
        // Disjoint by membership: no label lands on both sides
        for h in &recon.common {
            prop_assert!(!recon.missing.contains(h));
        }
    }

    #[test]
    fn common_and_extra_cover_candidate((reference, candidate) in header_lists()) {
        let recon = reconcile(&reference, &candidate);
        for h in &candidate {
            prop_assert!(recon.common.contains(h) || recon.extra.contains(h));
        }
        for h in &recon.extra {
            prop_assert!(candidate.contains(h));
            prop_assert!(!recon.common.contains(h));
        }
    }

    #[test]
    fn order_preserved((reference, candidate) in header_lists()) {
        let recon = reconcile(&reference, &candidate);
        // common and missing are subsequences of reference
        let mut rest = reference.as_slice();
        for h in &recon.common {
            let pos = rest.iter().position(|r| r == h);
            prop_assert!(pos.is_some());
            rest = &rest[pos.unwrap() + 1..];
        }
        let mut rest = candidate.as_slice();
        for h in &recon.extra {
            let pos = rest.iter().position(|r| r == h);
            prop_assert!(pos.is_some());
            rest = &rest[pos.unwrap() + 1..];
        }
    }

    #[test]
    fn remap_positions_are_valid((reference, candidate) in header_lists()) {
        let recon = reconcile(&reference, &candidate);
        let remap = remap_indices(&candidate, &recon.common).unwrap();
        prop_assert_eq!(remap.positions.len(), recon.common.len());
        for (header, &position) in recon.common.iter().zip(&remap.positions) {
            prop_assert!(position >= 1 && position <= candidate.len());
            prop_assert_eq!(&candidate[position - 1], header);
        }
    }

    #[test]
    fn projection_count_arithmetic(
        columns in 1usize..10,
        selected in prop::collection::btree_set(1usize..15, 0..10),
    ) {
        let headers: Vec<String> = (1..=columns).map(|i| format!("h{i}")).collect();
        let table = Table::new("t", headers, vec![]);
        let selection = ColumnSelection::from_positions(selected.iter().copied());
        let kept = table.project(&selection.keep_for(columns)).unwrap();
        let in_range = selected.iter().filter(|&&p| p >= 1 && p <= columns).count();
        prop_assert_eq!(kept.column_count(), columns - in_range);
    }
}
