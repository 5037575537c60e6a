//! Outcome of a fill pass.

use std::collections::HashSet;

use serde::Serialize;

use formfill_protocols::{ElementId, FillError, ScalarField};

/// Why an element received its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillSource {
    Learned {
        selector: String,
        profile_key: String,
    },
    Keyword {
        field: ScalarField,
    },
    SectionItem {
        section: String,
        index: usize,
        field: String,
    },
}

/// A single write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilledField {
    pub element: ElementId,
    /// Name, id, or handle of the element, for display.
    pub label: String,
    pub value: String,
    pub source: FillSource,
}

/// Writes and non-fatal diagnostics collected over one pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillReport {
    pub filled: Vec<FilledField>,
    pub diagnostics: Vec<FillError>,
}

impl FillReport {
    /// Number of distinct elements written.
    pub fn distinct_elements(&self) -> usize {
        self.filled
            .iter()
            .map(|field| field.element)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Writes made to `element`, in order.
    pub fn writes_to(&self, element: ElementId) -> Vec<&FilledField> {
        self.filled.iter().filter(|f| f.element == element).collect()
    }

    pub fn learned_count(&self) -> usize {
        self.filled
            .iter()
            .filter(|f| matches!(f.source, FillSource::Learned { .. }))
            .count()
    }
}
