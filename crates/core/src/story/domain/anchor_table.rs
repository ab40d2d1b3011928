use std::collections::HashSet;

use thiserror::Error;

use super::anchor::{AnchorRole, ReferenceAnchor};
use crate::matching::domain::normalizer::canonicalize;

#[derive(Error, Debug, PartialEq)]
pub enum AnchorTableError {
    #[error("anchor table has no anchors")]
    Empty,
    #[error("anchor table has no start anchor, so no story could ever be found")]
    NoStartAnchor,
    #[error("anchor {id} has weight {weight}; weights must be positive")]
    NonPositiveWeight { id: String, weight: f64 },
    #[error("anchor {id} has a phrase or variant with no words")]
    EmptyPhrase { id: String },
    #[error("anchor id {id} is used more than once")]
    DuplicateId { id: String },
}

/// The fixed, versioned set of anchors describing one reference story.
///
/// Validated once when built and never mutated; share it by reference (or
/// behind an `Arc`) with every extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorTable {
    version: String,
    anchors: Vec<ReferenceAnchor>,
    total_weight: f64,
}

impl AnchorTable {
    pub fn new(
        version: impl Into<String>,
        anchors: Vec<ReferenceAnchor>,
    ) -> Result<Self, AnchorTableError> {
        if anchors.is_empty() {
            return Err(AnchorTableError::Empty);
        }

        let mut seen = HashSet::new();
        for a in &anchors {
            if !seen.insert(a.id.as_str()) {
                return Err(AnchorTableError::DuplicateId { id: a.id.clone() });
            }
            if !(a.weight.is_finite() && a.weight > 0.0) {
                return Err(AnchorTableError::NonPositiveWeight {
                    id: a.id.clone(),
                    weight: a.weight,
                });
            }
            let has_empty_form = std::iter::once(&a.canonical_phrase)
                .chain(a.known_variants.iter())
                .any(|phrase| canonicalize(phrase).is_empty());
            if has_empty_form {
                return Err(AnchorTableError::EmptyPhrase { id: a.id.clone() });
            }
        }

        if !anchors.iter().any(|a| a.role == AnchorRole::Start) {
            return Err(AnchorTableError::NoStartAnchor);
        }

        let total_weight = anchors.iter().map(|a| a.weight).sum();
        Ok(Self {
            version: version.into(),
            anchors,
            total_weight,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn anchors(&self) -> &[ReferenceAnchor] {
        &self.anchors
    }

    pub fn with_role(&self, role: AnchorRole) -> impl Iterator<Item = &ReferenceAnchor> + '_ {
        self.anchors.iter().filter(move |a| a.role == role)
    }

    pub fn get(&self, id: &str) -> Option<&ReferenceAnchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    /// Sum of all anchor weights; always positive.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
