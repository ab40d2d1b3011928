use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which part of the story an anchor marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorRole {
    Start,
    End,
    Body,
}

impl fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorRole::Start => write!(f, "start"),
            AnchorRole::End => write!(f, "end"),
            AnchorRole::Body => write!(f, "body"),
        }
    }
}

/// A canonical phrase of the reference story plus the ways a transcriber is
/// known to mishear it.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceAnchor {
    pub id: String,
    pub canonical_phrase: String,
    pub role: AnchorRole,
    /// Contribution to confidence when matched.
    pub weight: f64,
    pub known_variants: BTreeSet<String>,
}

impl ReferenceAnchor {
    pub fn new(
        id: impl Into<String>,
        canonical_phrase: impl Into<String>,
        role: AnchorRole,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            canonical_phrase: canonical_phrase.into(),
            role,
            weight,
            known_variants: BTreeSet::new(),
        }
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_variants
            .extend(variants.into_iter().map(Into::into));
        self
    }
}
