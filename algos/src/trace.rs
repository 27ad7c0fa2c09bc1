use std::fmt;

use serde::Serialize;

use crate::Algorithm;
use crate::automaton::Automaton;

/// One atomic unit of algorithmic progress.
///
/// Indices are byte offsets into the text or pattern. For `Comparing` and
/// `Mismatch` the `text_index` is the absolute position of the compared text
/// byte, so the candidate window starts at `text_index - pattern_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Comparing {
        text_index: usize,
        pattern_index: usize,
        text_char: u8,
        pattern_char: u8,
        matched: bool,
    },
    Mismatch {
        text_index: usize,
        pattern_index: usize,
    },
    /// `state` is the accepting state for finite-automaton traces.
    Found {
        offset: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<usize>,
    },
    HashInit {
        pattern_hash: u64,
        text_hash: u64,
    },
    HashCompare {
        offset: usize,
        text_hash: u64,
        pattern_hash: u64,
    },
    /// Hash of the window starting at `offset`, derived from the previous one.
    RollingHash {
        offset: usize,
        text_hash: u64,
    },
    Transition {
        text_index: usize,
        symbol: u8,
        prev_state: usize,
        state: usize,
    },
    AutomatonBuilt {
        states: usize,
        automaton: Automaton,
    },
}

impl Step {
    pub fn text_index(&self) -> Option<usize> {
        match *self {
            Step::Comparing { text_index, .. }
            | Step::Mismatch { text_index, .. }
            | Step::Transition { text_index, .. } => Some(text_index),
            Step::Found { offset, .. }
            | Step::HashCompare { offset, .. }
            | Step::RollingHash { offset, .. } => Some(offset),
            Step::HashInit { .. } | Step::AutomatonBuilt { .. } => None,
        }
    }

    pub fn pattern_index(&self) -> Option<usize> {
        match *self {
            Step::Comparing { pattern_index, .. } | Step::Mismatch { pattern_index, .. } => {
                Some(pattern_index)
            }
            _ => None,
        }
    }

    /// Start of the candidate window a point comparison belongs to.
    pub fn window_start(&self) -> Option<usize> {
        match *self {
            Step::Comparing {
                text_index,
                pattern_index,
                ..
            }
            | Step::Mismatch {
                text_index,
                pattern_index,
            } => text_index.checked_sub(pattern_index),
            Step::HashCompare { offset, .. } | Step::Found { offset, .. } => Some(offset),
            _ => None,
        }
    }

    /// True for steps that examine input: byte, hash, or transition lookups.
    pub fn is_comparing(&self) -> bool {
        matches!(
            self,
            Step::Comparing { .. } | Step::HashCompare { .. } | Step::Transition { .. }
        )
    }

    /// Outcome of a byte comparison.
    pub fn is_match(&self) -> Option<bool> {
        match *self {
            Step::Comparing { matched, .. } => Some(matched),
            Step::Mismatch { .. } => Some(false),
            Step::HashCompare {
                text_hash,
                pattern_hash,
                ..
            } => Some(text_hash == pattern_hash),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Step::Found { .. })
    }

    pub fn text_hash(&self) -> Option<u64> {
        match *self {
            Step::HashInit { text_hash, .. }
            | Step::HashCompare { text_hash, .. }
            | Step::RollingHash { text_hash, .. } => Some(text_hash),
            _ => None,
        }
    }

    pub fn pattern_hash(&self) -> Option<u64> {
        match *self {
            Step::HashInit { pattern_hash, .. } | Step::HashCompare { pattern_hash, .. } => {
                Some(pattern_hash)
            }
            _ => None,
        }
    }

    /// Automaton state after this step, for finite-automaton traces.
    pub fn state(&self) -> Option<usize> {
        match *self {
            Step::Transition { state, .. } => Some(state),
            Step::Found { state, .. } => state,
            _ => None,
        }
    }

    pub fn prev_state(&self) -> Option<usize> {
        match *self {
            Step::Transition { prev_state, .. } => Some(prev_state),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Comparing {
                text_index,
                pattern_index,
                text_char,
                pattern_char,
                ..
            } => write!(
                f,
                "Comparing text[{}]='{}' with pattern[{}]='{}'",
                text_index,
                text_char.escape_ascii(),
                pattern_index,
                pattern_char.escape_ascii()
            ),
            Step::Mismatch { .. } => write!(f, "Mismatch! Shift pattern to next position"),
            Step::Found { offset, .. } => write!(f, "Match found at position {}!", offset),
            Step::HashInit {
                pattern_hash,
                text_hash,
            } => write!(
                f,
                "Pattern hash: {}, Initial text window hash: {}",
                pattern_hash, text_hash
            ),
            Step::HashCompare {
                offset,
                text_hash,
                pattern_hash,
            } => write!(
                f,
                "Comparing hashes at position {}: text={}, pattern={}",
                offset, text_hash, pattern_hash
            ),
            Step::RollingHash { text_hash, .. } => {
                write!(f, "Rolling hash for next window: {}", text_hash)
            }
            Step::Transition {
                text_index,
                symbol,
                prev_state,
                state,
            } => write!(
                f,
                "Reading '{}' at position {}: state {} → {}",
                symbol.escape_ascii(),
                text_index,
                prev_state,
                state
            ),
            Step::AutomatonBuilt { states, .. } => {
                write!(f, "Built finite automaton with {} states", states)
            }
        }
    }
}

/// The full ordered record of one matching run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    algorithm: Algorithm,
    steps: Vec<Step>,
    matches: Vec<usize>,
}

impl Trace {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Offsets where the pattern fully matched, ascending.
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_matches(self) -> Vec<usize> {
        self.matches
    }
}

/// Append-only recorder the matchers write into.
pub(crate) struct TraceBuilder {
    algorithm: Algorithm,
    steps: Vec<Step>,
    matches: Vec<usize>,
}

impl TraceBuilder {
    pub(crate) fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            steps: Vec::new(),
            matches: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, step: Step) {
        log::trace!("{:?}: {}", self.algorithm, step);
        self.steps.push(step);
    }

    /// Records a completed match and emits its `Found` step. Automaton
    /// matchers pass the accepting state they reached.
    pub(crate) fn found(&mut self, offset: usize, state: Option<usize>) {
        // every matcher scans left to right, so a repeat can only be the last entry
        if self.matches.last() != Some(&offset) {
            self.matches.push(offset);
        }
        self.push(Step::Found { offset, state });
    }

    pub(crate) fn finish(self) -> Trace {
        log::debug!(
            "{:?}: trace finished with {} steps, {} matches",
            self.algorithm,
            self.steps.len(),
            self.matches.len()
        );
        Trace {
            algorithm: self.algorithm,
            steps: self.steps,
            matches: self.matches,
        }
    }
}
