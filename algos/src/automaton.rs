use serde::Serialize;

const NO_COLUMN: usize = usize::MAX;

/// String-matching automaton with `m + 1` states.
///
/// Only bytes that occur in the pattern get a column; every other byte
/// sends the automaton back to state 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Automaton {
    alphabet: Vec<u8>,
    rows: Vec<Vec<usize>>,
    #[serde(skip)]
    columns: Box<[usize; 256]>,
}

/// Build the "longest proper prefix which is also suffix" (LPS) table
fn build_lps(pattern: &[u8]) -> Vec<usize> {
    let m = pattern.len();
    let mut lps = vec![0; m];

    let mut len = 0;
    let mut i = 1;

    while i < m {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }

    lps
}

impl Automaton {
    /// Builds the transition table.
    ///
    /// `next(s, c)` is the length of the longest pattern prefix that is also a
    /// suffix of `pattern[..s] + c`. Rows are filled in state order, a failed
    /// extension reuses the row of the state's longest border, which is
    /// always an earlier row.
    pub fn build(pattern: &[u8]) -> Self {
        let m = pattern.len();
        let mut columns = Box::new([NO_COLUMN; 256]);
        let mut alphabet = Vec::new();

        for &b in pattern {
            if columns[b as usize] == NO_COLUMN {
                columns[b as usize] = alphabet.len();
                alphabet.push(b);
            }
        }

        let lps = build_lps(pattern);
        let mut rows: Vec<Vec<usize>> = Vec::with_capacity(m + 1);

        for state in 0..=m {
            let row: Vec<usize> = alphabet
                .iter()
                .map(|&c| {
                    if state < m && pattern[state] == c {
                        state + 1
                    } else if state == 0 {
                        0
                    } else {
                        rows[lps[state - 1]][columns[c as usize]]
                    }
                })
                .collect();
            rows.push(row);
        }

        log::debug!(
            "automaton: built {} states over {} symbols",
            rows.len(),
            alphabet.len()
        );

        Self {
            alphabet,
            rows,
            columns,
        }
    }

    /// Number of states, `m + 1`.
    pub fn states(&self) -> usize {
        self.rows.len()
    }

    /// The accepting state, `m`.
    pub fn accepting(&self) -> usize {
        self.rows.len() - 1
    }

    /// Distinct pattern bytes in order of first appearance.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    #[inline]
    pub fn next(&self, state: usize, symbol: u8) -> usize {
        let column = self.columns[symbol as usize];
        if column == NO_COLUMN {
            return 0;
        }
        self.rows
            .get(state)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Explicit transitions out of `state`, one per alphabet symbol.
    pub fn transitions(&self, state: usize) -> impl Iterator<Item = (u8, usize)> + '_ {
        let row = self.rows.get(state).map(Vec::as_slice).unwrap_or(&[]);
        self.alphabet.iter().copied().zip(row.iter().copied())
    }
}
