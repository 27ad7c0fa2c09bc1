use crate::trace::{Step, Trace, TraceBuilder};
use crate::{Algorithm, TraceSearch};

pub struct RabinKarp;

/// Radix and modulus of the polynomial rolling hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    radix: u32,
    modulus: u32,
}

impl HashParams {
    pub const DEFAULT_RADIX: u32 = 256;
    pub const DEFAULT_MODULUS: u32 = 101;

    /// Returns `None` if either value is zero.
    pub fn new(radix: u32, modulus: u32) -> Option<Self> {
        if radix == 0 || modulus == 0 {
            return None;
        }
        Some(Self { radix, modulus })
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            radix: Self::DEFAULT_RADIX,
            modulus: Self::DEFAULT_MODULUS,
        }
    }
}

impl TraceSearch for RabinKarp {
    type Config = HashParams;
    const ALGORITHM: Algorithm = Algorithm::RabinKarp;

    fn trace_bytes(config: &Self::Config, text: &[u8], pattern: &[u8]) -> Trace {
        rabin_karp_trace(config, text, pattern)
    }
}

/// Hash of `bytes` computed directly with Horner's rule, modulo `q`.
pub fn polynomial_hash(params: &HashParams, bytes: &[u8]) -> u64 {
    let d = params.radix as u64;
    let q = params.modulus as u64;
    bytes
        .iter()
        .fold(0u64, |acc, &b| (d * acc + b as u64) % q)
}

/// `d^(m-1) mod q`, the weight of the byte leaving the window.
fn leading_weight(params: &HashParams, m: usize) -> u64 {
    let d = params.radix as u64;
    let q = params.modulus as u64;
    let mut h = 1 % q;
    for _ in 1..m {
        h = (h * d) % q;
    }
    h
}

/// Slides the window one byte to the right.
#[inline]
fn roll(params: &HashParams, t: u64, outgoing: u8, incoming: u8, h: u64) -> u64 {
    let d = params.radix as i128;
    let q = params.modulus as i128;
    let rolled = (d * (t as i128 - outgoing as i128 * h as i128) + incoming as i128) % q;
    // `%` keeps the dividend's sign
    if rolled < 0 {
        (rolled + q) as u64
    } else {
        rolled as u64
    }
}

pub fn rabin_karp_trace(params: &HashParams, text: &[u8], pattern: &[u8]) -> Trace {
    let n = text.len();
    let m = pattern.len();
    let mut trace = TraceBuilder::new(Algorithm::RabinKarp);

    let p = polynomial_hash(params, pattern);
    let mut t = polynomial_hash(params, &text[..m.min(n)]);

    trace.push(Step::HashInit {
        pattern_hash: p,
        text_hash: t,
    });

    if m == 0 || m > n {
        log::debug!("rabin_karp_trace: no window to scan (n={}, m={})", n, m);
        return trace.finish();
    }

    let h = leading_weight(params, m);

    for i in 0..=n - m {
        trace.push(Step::HashCompare {
            offset: i,
            text_hash: t,
            pattern_hash: p,
        });

        if t == p {
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
                    log::trace!("rabin_karp_trace: spurious hit at {}", i);
                    matched = false;
                    break;
                }
            }
            if matched {
                trace.found(i, None);
            }
        }

        if i < n - m {
            t = roll(params, t, text[i], text[i + m], h);
            trace.push(Step::RollingHash {
                offset: i + 1,
                text_hash: t,
            });
        }
    }

    trace.finish()
}
