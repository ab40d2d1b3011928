use crate::matching::domain::match_result::MatchResult;
use crate::matching::domain::phrase_matcher::PhraseMatcher;
use crate::story::domain::anchor::AnchorRole;
use crate::story::domain::anchor_table::AnchorTable;
use crate::transcript::domain::transcript::Transcript;

/// Where the story starts and ends, as positions in the transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct StoryBoundaries {
    pub start: usize,
    pub end: usize,
    pub start_match: MatchResult,
    /// `None` when no END anchor was found and `end` fell back to the last
    /// segment.
    pub end_match: Option<MatchResult>,
}

impl StoryBoundaries {
    pub fn end_defaulted(&self) -> bool {
        self.end_match.is_none()
    }

    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Number of segments between the boundaries, inclusive.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Finds the first segment that opens the story and the first segment at or
/// after it that closes the story.
///
/// Missing an end is not a failure: the story is assumed to run to the end
/// of the transcript, preferring too much audio over none.
pub struct BoundaryLocator<'a> {
    matcher: &'a PhraseMatcher,
    threshold: f64,
}

impl<'a> BoundaryLocator<'a> {
    pub fn new(matcher: &'a PhraseMatcher, threshold: f64) -> Self {
        Self { matcher, threshold }
    }

    pub fn locate(&self, transcript: &Transcript, anchors: &AnchorTable) -> Option<StoryBoundaries> {
        let segments = transcript.segments();

        let start_match = self.first_match(transcript, 0, anchors, AnchorRole::Start)?;
        let start = start_match.segment_index;

        let end_match = self.first_match(transcript, start, anchors, AnchorRole::End);
        let end = match &end_match {
            Some(m) => m.segment_index,
            None => {
                log::debug!(
                    "{}: no end anchor after segment {start}, running to the last segment",
                    transcript.source_id()
                );
                segments.len() - 1
            }
        };

        log::debug!(
            "{}: story spans segments {start}..={end} (start anchor {})",
            transcript.source_id(),
            start_match.anchor_id
        );

        Some(StoryBoundaries {
            start,
            end,
            start_match,
            end_match,
        })
    }

    fn first_match(
        &self,
        transcript: &Transcript,
        from: usize,
        anchors: &AnchorTable,
        role: AnchorRole,
    ) -> Option<MatchResult> {
        let prepared: Vec<_> = anchors
            .with_role(role)
            .map(|a| self.matcher.prepare(a))
            .collect();
        transcript
            .segments()
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(position, segment)| {
                self.matcher
                    .best_prepared_match(position, &segment.text, &prepared, self.threshold)
            })
    }
}
