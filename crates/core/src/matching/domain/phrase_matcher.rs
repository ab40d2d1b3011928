use super::match_result::MatchResult;
use super::normalizer::Normalizer;
use super::similarity::ratio;
use crate::shared::constants::{MIN_FUZZY_PHRASE_WORDS, VARIANT_MATCH_FACTOR};
use crate::story::domain::anchor::ReferenceAnchor;

/// Scores how strongly a piece of transcript text contains an anchor phrase.
///
/// Exact whole-word containment of the canonical phrase scores 1.0 and of a
/// known variant [`VARIANT_MATCH_FACTOR`]. Phrases of at least
/// [`MIN_FUZZY_PHRASE_WORDS`] words also match approximately: the best
/// edit-distance ratio against any window of nearby length, so a dropped,
/// inserted or misheard word still scores high.
#[derive(Clone, Debug, Default)]
pub struct PhraseMatcher {
    normalizer: Normalizer,
}

impl PhraseMatcher {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Similarity in [0, 1] between raw segment text and an anchor.
    pub fn score(&self, segment_text: &str, anchor: &ReferenceAnchor) -> f64 {
        self.score_tokens(&self.normalizer.tokens(segment_text), anchor)
    }

    /// Like [`score`](Self::score) for text already split by the normalizer.
    pub fn score_tokens(&self, tokens: &[String], anchor: &ReferenceAnchor) -> f64 {
        self.score_prepared(tokens, &self.prepare(anchor))
    }

    /// Splits the canonical phrase and every variant of `anchor` once, for
    /// scoring the same anchor against many segments.
    pub fn prepare<'a>(&self, anchor: &'a ReferenceAnchor) -> PreparedAnchor<'a> {
        let canonical = std::iter::once((anchor.canonical_phrase.as_str(), 1.0));
        let variants = anchor
            .known_variants
            .iter()
            .map(|v| (v.as_str(), VARIANT_MATCH_FACTOR));
        let forms = canonical
            .chain(variants)
            .map(|(phrase, factor)| (self.normalizer.tokens(phrase), factor))
            .collect();
        PreparedAnchor { anchor, forms }
    }

    pub fn score_prepared(&self, tokens: &[String], prepared: &PreparedAnchor<'_>) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        prepared
            .forms
            .iter()
            .map(|(form, factor)| form_score(tokens, form) * factor)
            .fold(0.0, f64::max)
            .clamp(0.0, 1.0)
    }

    /// The anchor that marks this segment, if any clears `threshold`.
    ///
    /// Among anchors scoring above the threshold the heaviest wins; equal
    /// weights fall back to the higher score, then to table order.
    pub fn best_match<'a>(
        &self,
        segment_index: usize,
        segment_text: &str,
        anchors: impl IntoIterator<Item = &'a ReferenceAnchor>,
        threshold: f64,
    ) -> Option<MatchResult> {
        let prepared: Vec<_> = anchors.into_iter().map(|a| self.prepare(a)).collect();
        self.best_prepared_match(segment_index, segment_text, &prepared, threshold)
    }

    /// [`best_match`](Self::best_match) over anchors prepared up front.
    pub fn best_prepared_match(
        &self,
        segment_index: usize,
        segment_text: &str,
        anchors: &[PreparedAnchor<'_>],
        threshold: f64,
    ) -> Option<MatchResult> {
        let tokens = self.normalizer.tokens(segment_text);
        let mut best: Option<(&ReferenceAnchor, f64)> = None;

        for prepared in anchors {
            let anchor = prepared.anchor;
            let similarity = self.score_prepared(&tokens, prepared);
            if similarity <= threshold {
                continue;
            }
            let better = match best {
                None => true,
                Some((current, current_sim)) => {
                    anchor.weight > current.weight
                        || (anchor.weight == current.weight && similarity > current_sim)
                }
            };
            if better {
                best = Some((anchor, similarity));
            }
        }

        best.map(|(anchor, similarity)| MatchResult {
            anchor_id: anchor.id.clone(),
            segment_index,
            similarity,
        })
    }
}

/// An anchor with its phrase forms already normalized and split into words.
#[derive(Clone, Debug)]
pub struct PreparedAnchor<'a> {
    pub anchor: &'a ReferenceAnchor,
    forms: Vec<(Vec<String>, f64)>,
}

fn form_score(tokens: &[String], form: &[String]) -> f64 {
    if form.is_empty() {
        return 0.0;
    }
    if contains_phrase(tokens, form) {
        return 1.0;
    }
    if form.len() < MIN_FUZZY_PHRASE_WORDS {
        return 0.0;
    }
    window_score(tokens, form)
}

pub(crate) fn contains_phrase(tokens: &[String], form: &[String]) -> bool {
    tokens.windows(form.len()).any(|w| w == form)
}

/// Best ratio between the phrase and any run of `n - 1 ..= n + 1` words.
fn window_score(tokens: &[String], form: &[String]) -> f64 {
    let phrase = form.join(" ");
    let shortest = form.len().saturating_sub(1).max(1);
    let longest = form.len() + 1;

    if tokens.len() < shortest {
        return ratio(&tokens.join(" "), &phrase);
    }

    (shortest..=longest.min(tokens.len()))
        .flat_map(|width| tokens.windows(width))
        .map(|window| ratio(&window.join(" "), &phrase))
        .fold(0.0, f64::max)
}
