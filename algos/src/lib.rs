mod automaton;
mod finite_automaton;
mod naive;
mod rabin_karp;
mod trace;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use automaton::Automaton;
pub use finite_automaton::{FiniteAutomaton, finite_automaton_trace};
pub use naive::{Naive, naive_trace};
pub use rabin_karp::{HashParams, RabinKarp, polynomial_hash, rabin_karp_trace};
pub use trace::{Step, Trace};

/// A string-matching algorithm that records every step it takes.
pub trait TraceSearch {
    type Config: Default;
    const ALGORITHM: Algorithm;

    fn trace_bytes(config: &Self::Config, text: &[u8], pattern: &[u8]) -> Trace;

    fn trace(config: &Self::Config, text: &str, pattern: &str) -> Trace {
        Self::trace_bytes(config, text.as_bytes(), pattern.as_bytes())
    }

    fn find_all_bytes(config: &Self::Config, text: &[u8], pattern: &[u8]) -> Vec<usize> {
        Self::trace_bytes(config, text, pattern).into_matches()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Naive,
    RabinKarp,
    FiniteAutomaton,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Naive,
        Algorithm::RabinKarp,
        Algorithm::FiniteAutomaton,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Naive => "naive",
            Algorithm::RabinKarp => "rabin-karp",
            Algorithm::FiniteAutomaton => "finite-automaton",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Naive => "Brute Force Algorithm",
            Algorithm::RabinKarp => "Rabin-Karp Algorithm",
            Algorithm::FiniteAutomaton => "Finite Automata Algorithm",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Naive => {
                "The simplest pattern matching algorithm. It checks for a match at every \
                 position in the text by comparing the pattern character by character."
            }
            Algorithm::RabinKarp => {
                "Uses hashing to find patterns. It computes hash values for the pattern and \
                 text windows, then compares hashes. When hashes match, it verifies character \
                 by character."
            }
            Algorithm::FiniteAutomaton => {
                "Builds a state machine (automaton) from the pattern. Each character in the \
                 text causes a transition between states. When the final state is reached, a \
                 match is found."
            }
        }
    }

    pub fn complexity(self) -> &'static str {
        match self {
            Algorithm::Naive => "O(n×m) where n is text length and m is pattern length",
            Algorithm::RabinKarp => "O(n+m) average case, O(n×m) worst case",
            Algorithm::FiniteAutomaton => {
                "O(n) after O(m×|Σ|) preprocessing (|Σ| is alphabet size)"
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm {:?} (expected naive, rabin-karp or finite-automaton)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" | "brute-force" => Ok(Algorithm::Naive),
            "rabin-karp" => Ok(Algorithm::RabinKarp),
            "finite-automaton" | "finite-automata" => Ok(Algorithm::FiniteAutomaton),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Runs `algorithm` over the bytes of `text` with default parameters.
pub fn run_match(text: &str, pattern: &str, algorithm: Algorithm) -> Trace {
    log::debug!(
        "run_match: {} (text-length={}, pattern-length={})",
        algorithm,
        text.len(),
        pattern.len()
    );
    match algorithm {
        Algorithm::Naive => Naive::trace(&(), text, pattern),
        Algorithm::RabinKarp => RabinKarp::trace(&HashParams::default(), text, pattern),
        Algorithm::FiniteAutomaton => FiniteAutomaton::trace(&(), text, pattern),
    }
}
