use serde::Serialize;

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Set reconciliation between a reference header list and a candidate's.
///
/// `common` and `missing` follow reference order; `extra` follows candidate
/// order. Membership partitions cleanly: common ∪ missing = reference,
/// common ∪ extra = candidate (as sets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub common: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl Reconciliation {
    /// True when the candidate carries exactly the reference schema
    /// (possibly in a different column order).
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    /// Single-line summary suitable for status output.
    pub fn summary(&self) -> String {
        format!(
            "{} common · {} missing · {} extra",
            self.common.len(),
            self.missing.len(),
            self.extra.len()
        )
    }

    /// Single-line warning for stderr, or None when schemas align.
    pub fn warning_summary(&self) -> Option<String> {
        let mut issues = Vec::new();
        if !self.missing.is_empty() {
            issues.push(format!("missing from candidate: {}", self.missing.join(", ")));
        }
        if !self.extra.is_empty() {
            issues.push(format!("extra in candidate: {}", self.extra.join(", ")));
        }
        if issues.is_empty() {
            None
        } else {
            Some(issues.join("; "))
        }
    }
}

// ---------------------------------------------------------------------------
// Remap
// ---------------------------------------------------------------------------

/// Column remap for projecting a candidate table onto the reference schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remap {
    /// 1-based candidate position for each common header, in reference order.
    pub positions: Vec<usize>,
    /// Common headers that occur more than once in the candidate. The remap
    /// resolved each to its first occurrence; callers surface these as
    /// warnings, not failures.
    pub ambiguous: Vec<String>,
}

impl Remap {
    /// True when the remap is the identity permutation over `width` columns.
    pub fn is_identity(&self, width: usize) -> bool {
        self.positions.len() == width && self.positions.iter().enumerate().all(|(i, &p)| p == i + 1)
    }
}
