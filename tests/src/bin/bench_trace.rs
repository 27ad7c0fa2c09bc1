use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use algos::{Algorithm, Trace, run_match};
use rand::{Rng, SeedableRng, rngs::StdRng};

const SEED: u64 = 0x5EED_2024;

const TEXT_LENGTHS: &[usize] = &[1_000, 20_000];

const ALPHABETS: &[(&str, &[u8])] = &[
    ("binary", b"AB"),
    ("dna", b"ACGT"),
    ("latin", b"ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
];

const PATTERN_LENGTHS: &[usize] = &[2, 4, 8, 16];

#[derive(Debug)]
struct Corpus {
    name: String,
    text: String,
    patterns: Vec<String>,
}

#[derive(Debug)]
struct ResultEntry {
    algo: Algorithm,
    corpus: String,
    pattern: String,
    duration: Duration,
    steps: usize,
    matches: Vec<usize>,
}

#[derive(Debug)]
struct Mismatch {
    algo: Algorithm,
    corpus: String,
    pattern: String,
    expected: usize,
    actual: usize,
}

fn main() {
    println!("--- Starting Trace Benchmark ---");
    println!("> Generating corpora (seed={:#x})...", SEED);

    let mut rng = StdRng::seed_from_u64(SEED);
    let corpora = generate_corpora(&mut rng);
    println!("> Generated {} corpora.", corpora.len());

    let mut results = Vec::new();

    for algo in Algorithm::ALL {
        for corpus in &corpora {
            println!("> Tracing Algo: [{}] Corpus: [{}]", algo, corpus.name);
            for pattern in &corpus.patterns {
                results.push(run_benchmark(algo, corpus, pattern));
            }
        }
    }

    print_summary_table(&results);
    print_algo_ranking(&results);
    let mismatches = print_correctness_report(&results);

    if mismatches > 0 {
        std::process::exit(1);
    }
}

fn generate_corpora(rng: &mut StdRng) -> Vec<Corpus> {
    let mut corpora = Vec::new();

    for (alphabet_name, alphabet) in ALPHABETS {
        for &len in TEXT_LENGTHS {
            let text: String = (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
                .collect();

            let mut patterns = Vec::new();
            for &m in PATTERN_LENGTHS {
                // a pattern cut from the text always has at least one hit
                let start = rng.random_range(0..=len - m);
                patterns.push(text[start..start + m].to_string());
            }
            // lowercase never occurs in the generated text
            patterns.push("missing".to_string());

            corpora.push(Corpus {
                name: format!("{}-{}", alphabet_name, len),
                text,
                patterns,
            });
        }
    }

    corpora
}

fn run_benchmark(algo: Algorithm, corpus: &Corpus, pattern: &str) -> ResultEntry {
    let start = Instant::now();
    let trace: Trace = run_match(&corpus.text, pattern, algo);
    let duration = start.elapsed();

    ResultEntry {
        algo,
        corpus: corpus.name.clone(),
        pattern: pattern.to_string(),
        duration,
        steps: trace.len(),
        matches: trace.into_matches(),
    }
}

fn print_summary_table(results: &[ResultEntry]) {
    println!("\n\n{:=^100}", " RESULTS SUMMARY ");
    println!(
        "{:<17} | {:<12} | {:<18} | {:>8} | {:>12} | {:>15}",
        "Algorithm", "Corpus", "Pattern", "Hits", "Steps", "Time (µs)"
    );
    println!("{:-^100}", "");

    for entry in results {
        let micros = entry.duration.as_micros() as f64;

        let pat_display = if entry.pattern.len() > 18 {
            format!("{}...", &entry.pattern[..15])
        } else {
            entry.pattern.clone()
        };

        println!(
            "{:<17} | {:<12} | {:<18} | {:>8} | {:>12} | {:>15.2}",
            entry.algo.name(),
            entry.corpus,
            pat_display,
            entry.matches.len(),
            entry.steps,
            micros
        );
    }
    println!("{:=^100}", " END ");
}

fn print_algo_ranking(results: &[ResultEntry]) {
    println!("\n\n{:=^64}", " SPEED RANKING ");
    println!(
        "{:<5} | {:<17} | {:>16} | {:>16}",
        "Rank", "Algorithm", "Total Time (ms)", "Total Steps"
    );
    println!("{:-^64}", "");

    let mut sums: HashMap<Algorithm, (Duration, usize)> = HashMap::new();

    for entry in results {
        let sum = sums.entry(entry.algo).or_default();
        sum.0 += entry.duration;
        sum.1 += entry.steps;
    }

    let mut ranked: Vec<(Algorithm, (Duration, usize))> = sums.into_iter().collect();

    ranked.sort_by_key(|(_, (duration, _))| *duration);

    for (i, (algo, (duration, steps))) in ranked.iter().enumerate() {
        println!(
            "{:<5} | {:<17} | {:>16} | {:>16}",
            i + 1,
            algo.name(),
            duration.as_millis(),
            steps
        );
    }

    println!("{:=^64}", " END ");
}

/// Compares every algorithm's offsets against the naive baseline.
fn print_correctness_report(results: &[ResultEntry]) -> usize {
    let mut baseline = HashMap::<(&str, &str), &[usize]>::new();
    let mut mismatches = Vec::<Mismatch>::new();
    let mut total_checks = 0usize;

    for entry in results.iter().filter(|r| r.algo == Algorithm::Naive) {
        baseline.insert(
            (entry.corpus.as_str(), entry.pattern.as_str()),
            entry.matches.as_slice(),
        );
    }

    for entry in results.iter().filter(|r| r.algo != Algorithm::Naive) {
        total_checks += 1;
        match baseline.get(&(entry.corpus.as_str(), entry.pattern.as_str())) {
            Some(expected) if *expected == entry.matches.as_slice() => {}
            Some(expected) => mismatches.push(Mismatch {
                algo: entry.algo,
                corpus: entry.corpus.clone(),
                pattern: entry.pattern.clone(),
                expected: expected.len(),
                actual: entry.matches.len(),
            }),
            None => mismatches.push(Mismatch {
                algo: entry.algo,
                corpus: entry.corpus.clone(),
                pattern: entry.pattern.clone(),
                expected: 0,
                actual: entry.matches.len(),
            }),
        }
    }

    println!("\n\n{:=^70}", " CORRECTNESS REPORT ");
    println!("Checks: {}, Mismatches: {}", total_checks, mismatches.len());

    if mismatches.is_empty() {
        println!("All algorithms match the naive baseline.");
        println!("{:=^70}", " END ");
        return 0;
    }

    println!(
        "{:<17} | {:<12} | {:<18} | {:>8} | {:>8}",
        "Algorithm", "Corpus", "Pattern", "Expected", "Actual"
    );
    println!("{:-^70}", "");

    for mismatch in &mismatches {
        println!(
            "{:<17} | {:<12} | {:<18} | {:>8} | {:>8}",
            mismatch.algo.name(),
            mismatch.corpus,
            mismatch.pattern,
            mismatch.expected,
            mismatch.actual
        );
    }

    println!("{:=^70}", " END ");
    mismatches.len()
}
