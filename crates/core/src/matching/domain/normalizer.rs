use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A known transcription error and the text it should have been.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizerError {
    #[error("substitution source {from:?} has no words")]
    EmptySource { from: String },
    #[error("substitution for {from:?} has an empty replacement")]
    EmptyReplacement { from: String },
    #[error("substitution for {from:?} can rewrite its own output")]
    Cycle { from: String },
}

#[derive(Clone, Debug, PartialEq)]
struct Rule {
    from: Vec<String>,
    to: Vec<String>,
}

/// Canonicalizes text so that transcripts and reference phrases compare on
/// words alone.
///
/// Lower-cases, drops punctuation (apostrophes survive only inside words),
/// collapses whitespace, then rewrites known mis-transcriptions word by word.
/// `normalize(normalize(x)) == normalize(x)` for every input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normalizer {
    // Longest source first so multi-word rules win over their prefixes.
    rules: Vec<Rule>,
}

impl Normalizer {
    /// Builds a normalizer from substitution rules.
    ///
    /// A rule whose replacement could line up with any rule's source,
    /// partially or fully, is rejected as a cycle. That includes shrinking
    /// rules such as `"the the" -> "the"` which would terminate in practice:
    /// list each stutter form explicitly instead.
    pub fn new(substitutions: &[Substitution]) -> Result<Self, NormalizerError> {
        let mut rules = Vec::with_capacity(substitutions.len());
        for sub in substitutions {
            let from = words(&canonicalize(&sub.from));
            if from.is_empty() {
                return Err(NormalizerError::EmptySource {
                    from: sub.from.clone(),
                });
            }
            let to = words(&canonicalize(&sub.to));
            if to.is_empty() {
                return Err(NormalizerError::EmptyReplacement {
                    from: sub.from.clone(),
                });
            }
            rules.push(Rule { from, to });
        }

        if let Some(i) = find_cycle(&rules) {
            return Err(NormalizerError::Cycle {
                from: substitutions[i].from.clone(),
            });
        }

        rules.sort_by(|a, b| b.from.len().cmp(&a.from.len()));
        Ok(Self { rules })
    }

    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Normalized words of `text`.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let mut tokens = words(&canonicalize(text));
        if self.rules.is_empty() {
            return tokens;
        }
        // An acyclic rule set settles within one pass per rule.
        for _ in 0..=self.rules.len() {
            match self.rewrite_once(&tokens) {
                Some(next) => tokens = next,
                None => break,
            }
        }
        tokens
    }

    pub fn substitution_count(&self) -> usize {
        self.rules.len()
    }

    fn rewrite_once(&self, tokens: &[String]) -> Option<Vec<String>> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut changed = false;
        let mut i = 0;
        while i < tokens.len() {
            match self.rules.iter().find(|r| tokens[i..].starts_with(&r.from)) {
                Some(rule) => {
                    out.extend(rule.to.iter().cloned());
                    i += rule.from.len();
                    changed = true;
                }
                None => {
                    out.push(tokens[i].clone());
                    i += 1;
                }
            }
        }
        changed.then_some(out)
    }
}

/// Case, punctuation and whitespace canonicalization without substitutions.
pub fn canonicalize(text: &str) -> String {
    let chars: Vec<char> = text
        .chars()
        .map(unify_apostrophe)
        .flat_map(char::to_lowercase)
        .collect();

    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        let keep = c.is_alphanumeric() || (c == '\'' && is_inner(&chars, i));
        out.push(if keep { c } else { ' ' });
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn unify_apostrophe(c: char) -> char {
    match c {
        '\u{2019}' | '\u{2018}' | '\u{02BC}' => '\'',
        other => other,
    }
}

fn is_inner(chars: &[char], i: usize) -> bool {
    i > 0
        && chars[i - 1].is_alphanumeric()
        && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric())
}

fn words(canonical: &str) -> Vec<String> {
    canonical.split_whitespace().map(str::to_string).collect()
}

/// True if some placement of `from` over `output` agrees on every word
/// they share, i.e. a rewrite producing `output` can create a new match
/// for `from`.
fn overlaps(output: &[String], from: &[String]) -> bool {
    let out_len = output.len() as isize;
    let from_len = from.len() as isize;
    (-(from_len - 1)..out_len).any(|shift| {
        (0..from_len)
            .filter(|p| (0..out_len).contains(&(p + shift)))
            .all(|p| from[p as usize] == output[(p + shift) as usize])
    })
}

/// Index of a rule that lies on a rewrite cycle, if any.
fn find_cycle(rules: &[Rule]) -> Option<usize> {
    let edges: Vec<Vec<usize>> = rules
        .iter()
        .map(|a| {
            (0..rules.len())
                .filter(|&j| overlaps(&a.to, &rules[j].from))
                .collect()
        })
        .collect();

    // 0 = unvisited, 1 = on stack, 2 = done
    let mut state = vec![0u8; rules.len()];
    fn visit(node: usize, edges: &[Vec<usize>], state: &mut [u8]) -> bool {
        state[node] = 1;
        for &next in &edges[node] {
            if state[next] == 1 || (state[next] == 0 && visit(next, edges, state)) {
                return true;
            }
        }
        state[node] = 2;
        false
    }

    (0..rules.len()).find(|&i| state[i] == 0 && visit(i, &edges, &mut state))
}
