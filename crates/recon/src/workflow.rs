use shears_table::{ColumnSelection, Table};

use crate::error::ReconError;
use crate::model::{Reconciliation, Remap};
use crate::reconcile::{reconcile, remap_indices};

/// Where a session stands in the two-step clean/match workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    AwaitingOriginal,
    AwaitingSelection,
    OriginalCleaned,
    AwaitingMatch,
    Matched,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingOriginal => "awaiting_original",
            Self::AwaitingSelection => "awaiting_selection",
            Self::OriginalCleaned => "original_cleaned",
            Self::AwaitingMatch => "awaiting_match",
            Self::Matched => "matched",
        }
    }
}

/// Result of matching a candidate against the reference schema.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Candidate table projected onto the common columns, in reference order.
    pub table: Table,
    pub reconciliation: Reconciliation,
    pub remap: Remap,
}

/// Explicit workflow context carried by the caller between the two steps.
///
/// The cleaned header list lives here and nowhere else — there is no
/// process-wide session state. Operations called in the wrong step return
/// `ReconError::StepMismatch` and leave the session untouched, so a failed
/// action never loses the work done so far.
#[derive(Debug, Default)]
pub struct Session {
    step: Step,
    original: Option<Table>,
    reference: Vec<String>,
    candidate: Option<Table>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Cleaned header list from step 1; empty until `clean` has run.
    pub fn reference_headers(&self) -> &[String] {
        &self.reference
    }

    /// Load the original file. Always valid: a new original restarts the
    /// whole workflow and discards any prior reference or candidate.
    pub fn load_original(&mut self, table: Table) {
        self.original = Some(table);
        self.reference.clear();
        self.candidate = None;
        self.step = Step::AwaitingSelection;
    }

    /// Delete the selected columns from the original. The surviving headers
    /// become the reference schema for step 2, and the returned table is
    /// named `<original>_cleaned`.
    pub fn clean(&mut self, selection: &ColumnSelection) -> Result<Table, ReconError> {
        let original = match (self.step(), &self.original) {
            (Step::AwaitingSelection, Some(table)) => table,
            (step, _) => {
                return Err(ReconError::StepMismatch {
                    operation: "clean",
                    step: step.name(),
                })
            }
        };

        let keep = selection.keep_for(original.column_count());
        let cleaned = original
            .project(&keep)
            .map_err(|e| ReconError::Projection(e.to_string()))?;
        let cleaned = cleaned.with_name(format!("{}_cleaned", original.name));

        self.reference = cleaned.headers.clone();
        self.step = Step::OriginalCleaned;
        Ok(cleaned)
    }

    /// Load the follow-up file to be aligned to the reference schema.
    pub fn load_candidate(&mut self, table: Table) -> Result<(), ReconError> {
        match self.step() {
            Step::OriginalCleaned | Step::AwaitingMatch => {
                self.candidate = Some(table);
                self.step = Step::AwaitingMatch;
                Ok(())
            }
            step => Err(ReconError::StepMismatch {
                operation: "load candidate",
                step: step.name(),
            }),
        }
    }

    /// Reconciliation preview without advancing the workflow, for showing
    /// missing/extra warnings before the match is committed.
    pub fn preview(&self) -> Option<Reconciliation> {
        match (self.step(), &self.candidate) {
            (Step::AwaitingMatch, Some(candidate)) => {
                Some(reconcile(&self.reference, &candidate.headers))
            }
            _ => None,
        }
    }

    /// Align the candidate to the reference schema: reconcile headers,
    /// remap column positions, and project the candidate onto the common
    /// columns in reference order. The result is named `<candidate>_matched`.
    pub fn match_candidate(&mut self) -> Result<MatchOutcome, ReconError> {
        let candidate = match (self.step(), &self.candidate) {
            (Step::AwaitingMatch, Some(table)) => table,
            (step, _) => {
                return Err(ReconError::StepMismatch {
                    operation: "match",
                    step: step.name(),
                })
            }
        };

        let reconciliation = reconcile(&self.reference, &candidate.headers);
        let remap = remap_indices(&candidate.headers, &reconciliation.common)?;
        let table = candidate
            .project(&remap.positions)
            .map_err(|e| ReconError::Projection(e.to_string()))?;
        let table = table.with_name(format!("{}_matched", candidate.name));

        self.step = Step::Matched;
        Ok(MatchOutcome {
            table,
            reconciliation,
            remap,
        })
    }
}
