use crate::automaton::Automaton;
use crate::trace::{Step, Trace, TraceBuilder};
use crate::{Algorithm, TraceSearch};

pub struct FiniteAutomaton;

impl TraceSearch for FiniteAutomaton {
    type Config = ();
    const ALGORITHM: Algorithm = Algorithm::FiniteAutomaton;

    fn trace_bytes(_config: &Self::Config, text: &[u8], pattern: &[u8]) -> Trace {
        finite_automaton_trace(text, pattern)
    }
}

/// Single left-to-right pass over the text, one transition per byte.
pub fn finite_automaton_trace(text: &[u8], pattern: &[u8]) -> Trace {
    let n = text.len();
    let m = pattern.len();
    let mut trace = TraceBuilder::new(Algorithm::FiniteAutomaton);

    let automaton = Automaton::build(pattern);
    trace.push(Step::AutomatonBuilt {
        states: automaton.states(),
        automaton: automaton.clone(),
    });

    if m == 0 || m > n {
        log::debug!("finite_automaton_trace: accepting state unreachable (n={}, m={})", n, m);
        return trace.finish();
    }

    let mut state = 0;
    for (i, &symbol) in text.iter().enumerate() {
        let prev_state = state;
        state = automaton.next(state, symbol);

        trace.push(Step::Transition {
            text_index: i,
            symbol,
            prev_state,
            state,
        });

        if state == m {
            trace.found(i + 1 - m, Some(m));
        }
    }

    trace.finish()
}
