use crate::trace::{Step, Trace, TraceBuilder};
use crate::{Algorithm, TraceSearch};

pub struct Naive;

impl TraceSearch for Naive {
    type Config = ();
    const ALGORITHM: Algorithm = Algorithm::Naive;

    fn trace_bytes(_config: &Self::Config, text: &[u8], pattern: &[u8]) -> Trace {
        naive_trace(text, pattern)
    }
}

/// Tries every offset and compares the pattern byte by byte, recording each
/// comparison. Quadratic on purpose: the redundant work is what gets shown.
pub fn naive_trace(text: &[u8], pattern: &[u8]) -> Trace {
    let n = text.len();
    let m = pattern.len();
    let mut trace = TraceBuilder::new(Algorithm::Naive);

    if m == 0 || m > n {
        log::debug!("naive_trace: nothing to compare (n={}, m={})", n, m);
        return trace.finish();
    }

    for i in 0..=n - m {
        let mut matched = true;
        for j in 0..m {
            let equal = text[i + j] == pattern[j];
            trace.push(Step::Comparing {
                text_index: i + j,
                pattern_index: j,
                text_char: text[i + j],
                pattern_char: pattern[j],
                matched: equal,
            });

            if !equal {
                trace.push(Step::Mismatch {
                    text_index: i + j,
                    pattern_index: j,
                });
                matched = false;
                break;
            }
        }
        if matched {
            trace.found(i, None);
        }
    }

    trace.finish()
}
