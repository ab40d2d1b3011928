use crate::matching::domain::match_result::MatchResult;
use crate::matching::domain::phrase_matcher::PhraseMatcher;
use crate::story::domain::anchor_table::AnchorTable;
use crate::transcript::domain::transcript::Transcript;

/// Aggregates anchor evidence over a candidate range into a graded
/// confidence in [0, 1].
///
/// Each anchor contributes `weight × similarity` for its best position in
/// the range, where a position is a single segment or two adjacent segments
/// read together (a phrase cut by a segment break). The sum is divided by the
/// total weight of the table. Matches below the evidence floor contribute
/// nothing.
pub struct ConfidenceScorer<'a> {
    matcher: &'a PhraseMatcher,
    evidence_floor: f64,
}

impl<'a> ConfidenceScorer<'a> {
    pub fn new(matcher: &'a PhraseMatcher, evidence_floor: f64) -> Self {
        Self {
            matcher,
            evidence_floor,
        }
    }

    /// Confidence for the inclusive segment range `[start, end]`; 0 when
    /// there is no range.
    pub fn score(
        &self,
        transcript: &Transcript,
        range: Option<(usize, usize)>,
        anchors: &AnchorTable,
    ) -> f64 {
        let total: f64 = self
            .evidence(transcript, range, anchors)
            .iter()
            .filter_map(|m| anchors.get(&m.anchor_id).map(|a| a.weight * m.similarity))
            .sum();
        (total / anchors.total_weight()).clamp(0.0, 1.0)
    }

    /// Best match per anchor inside the range, for anchors that clear the
    /// evidence floor, in table order.
    pub fn evidence(
        &self,
        transcript: &Transcript,
        range: Option<(usize, usize)>,
        anchors: &AnchorTable,
    ) -> Vec<MatchResult> {
        let Some(candidates) = self.candidates(transcript, range) else {
            return Vec::new();
        };

        anchors
            .anchors()
            .iter()
            .filter_map(|anchor| {
                let prepared = self.matcher.prepare(anchor);
                let (position, similarity) = candidates
                    .iter()
                    .map(|(position, tokens)| {
                        (*position, self.matcher.score_prepared(tokens, &prepared))
                    })
                    .fold(None, |best: Option<(usize, f64)>, (p, s)| match best {
                        Some((_, b)) if b >= s => best,
                        _ => Some((p, s)),
                    })?;
                (similarity >= self.evidence_floor).then(|| MatchResult {
                    anchor_id: anchor.id.clone(),
                    segment_index: position,
                    similarity,
                })
            })
            .collect()
    }

    /// Normalized words of every single segment and adjacent pair in range,
    /// keyed by the position of the first segment.
    fn candidates(
        &self,
        transcript: &Transcript,
        range: Option<(usize, usize)>,
    ) -> Option<Vec<(usize, Vec<String>)>> {
        let (start, end) = range?;
        let segments = transcript.segments();
        let end = end.min(segments.len().checked_sub(1)?);
        if start > end {
            return None;
        }

        let normalizer = self.matcher.normalizer();
        let window = &segments[start..=end];
        let singles = window
            .iter()
            .enumerate()
            .map(|(i, s)| (start + i, normalizer.tokens(&s.text)));
        let pairs = window.windows(2).enumerate().map(|(i, pair)| {
            let joined = format!("{} {}", pair[0].text, pair[1].text);
            (start + i, normalizer.tokens(&joined))
        });
        Some(singles.chain(pairs).collect())
    }
}
