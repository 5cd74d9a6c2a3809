use std::collections::{HashMap, HashSet};

use crate::error::ReconError;
use crate::model::{Reconciliation, Remap};

/// Compute common/missing/extra between two header lists.
///
/// `common` and `missing` preserve reference order, `extra` preserves
/// candidate order. O(R + C): each list is scanned once against a lookup
/// set built from the other. Empty inputs are valid and produce empty sets.
///
/// Headers are compared as exact strings. A reference header that repeats
/// is classified once per occurrence (membership, not multiplicity, is
/// what the sets describe).
pub fn reconcile(reference: &[String], candidate: &[String]) -> Reconciliation {
    let candidate_set: HashSet<&str> = candidate.iter().map(String::as_str).collect();
    let reference_set: HashSet<&str> = reference.iter().map(String::as_str).collect();

    let mut common = Vec::new();
    let mut missing = Vec::new();
    for header in reference {
        if candidate_set.contains(header.as_str()) {
            common.push(header.clone());
        } else {
            missing.push(header.clone());
        }
    }

    let extra: Vec<String> = candidate
        .iter()
        .filter(|h| !reference_set.contains(h.as_str()))
        .cloned()
        .collect();

    Reconciliation {
        common,
        missing,
        extra,
    }
}

/// Candidate position (1-based) of each common header, in common order.
///
/// A header that occurs more than once in the candidate resolves to its
/// first occurrence; the label is recorded in `Remap.ambiguous` so callers
/// can warn. A common header absent from the candidate is an error — it
/// cannot happen when `common` comes from [`reconcile`] over the same
/// candidate list.
pub fn remap_indices(candidate: &[String], common: &[String]) -> Result<Remap, ReconError> {
    // First occurrence wins; count occurrences to flag duplicates.
    let mut first_position: HashMap<&str, usize> = HashMap::new();
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for (i, header) in candidate.iter().enumerate() {
        first_position.entry(header.as_str()).or_insert(i + 1);
        *occurrences.entry(header.as_str()).or_insert(0) += 1;
    }

    let mut positions = Vec::with_capacity(common.len());
    let mut ambiguous = Vec::new();
    for header in common {
        let position = first_position
            .get(header.as_str())
            .copied()
            .ok_or_else(|| ReconError::UnknownHeader(header.clone()))?;
        positions.push(position);
        if occurrences[header.as_str()] > 1 {
            ambiguous.push(header.clone());
        }
    }

    Ok(Remap {
        positions,
        ambiguous,
    })
}
