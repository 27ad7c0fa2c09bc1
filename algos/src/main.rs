use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use algos::{Algorithm, FiniteAutomaton, HashParams, Naive, RabinKarp, Step, Trace, TraceSearch};
use clap::Parser;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// One numbered line per step
    Text,
    /// The whole trace as JSON
    Json,
    /// Only the match offsets
    Matches,
}

/// Example:
/// cargo run --bin string-trace -- -a rabin-karp --text AABAACAADAABAABA --pattern AABA
/// cargo run --bin string-trace -- -a finite-automaton -t data/dna.txt --pattern GATTACA \
///     --format json
#[derive(Debug, clap::Parser)]
#[command(
    name = "string-trace",
    about = "Run one string matching algorithm and print every step it takes"
)]
struct Cli {
    /// naive (brute-force), rabin-karp or finite-automaton (finite-automata)
    #[arg(short, long)]
    algo: Algorithm,

    #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
    text: Option<String>,

    /// Read the text from a file ("-" for stdin)
    #[arg(
        short = 't',
        long = "text-file",
        value_name = "TEXT_FILE",
        conflicts_with = "text",
        required_unless_present = "text"
    )]
    text_file: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "pattern_file",
        required_unless_present = "pattern_file"
    )]
    pattern: Option<String>,

    #[arg(
        long = "pattern-file",
        value_name = "PATTERN_FILE",
        conflicts_with = "pattern",
        required_unless_present = "pattern"
    )]
    pattern_file: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Radix of the rolling hash (only used with --algo rabin-karp)
    #[arg(long, default_value_t = HashParams::DEFAULT_RADIX)]
    radix: u32,

    /// Modulus of the rolling hash (only used with --algo rabin-karp)
    #[arg(long, default_value_t = HashParams::DEFAULT_MODULUS)]
    modulus: u32,

    /// Print the automaton's transition table (only used with --algo finite-automaton)
    #[arg(long)]
    show_automaton: bool,

    /// Optional output file; if omitted, results are written to stdout
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Measure and print execution time for the algorithm
    #[arg(long)]
    measure_time: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let text = match (&cli.text, &cli.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => load_text(path)?,
        (None, None) => return Err("Either --text or --text-file must be provided".into()),
    };
    let pattern = load_pattern(&cli)?;
    if pattern.is_empty() {
        return Err("Pattern must not be empty".into());
    }

    let params = HashParams::new(cli.radix, cli.modulus).ok_or_else(|| {
        format!(
            "radix and modulus must be positive (got radix={}, modulus={})",
            cli.radix, cli.modulus
        )
    })?;

    let mut out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let (trace, duration) = run_algorithm(&cli, &params, &text, &pattern);

    match cli.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &trace)?;
            writeln!(out)?;
        }
        Format::Matches => {
            writeln!(out, "matches: {:?}", trace.matches())?;
        }
        Format::Text => {
            let algorithm = trace.algorithm();
            writeln!(
                out,
                "# algorithm={}, text-length={}, pattern-length={}",
                algorithm,
                text.len(),
                pattern.len()
            )?;
            writeln!(out, "# {}: {}", algorithm.title(), algorithm.complexity())?;
            write_steps(&mut out, &cli, &trace)?;
            writeln!(out, "steps: {}", trace.len())?;
            writeln!(out, "matches: {:?}", trace.matches())?;
        }
    }

    if let Some(d) = duration {
        writeln!(out, "execution_time: {}ns", d.as_nanos())?;
    }

    Ok(())
}

fn write_steps(out: &mut dyn Write, cli: &Cli, trace: &Trace) -> io::Result<()> {
    for (idx, step) in trace.steps().iter().enumerate() {
        writeln!(out, "{:>6}  {}", idx, step)?;

        if let Step::AutomatonBuilt { automaton, .. } = step
            && cli.show_automaton
        {
            for state in 0..automaton.states() {
                let row: Vec<String> = automaton
                    .transitions(state)
                    .map(|(symbol, next)| format!("{}->{}", symbol.escape_ascii(), next))
                    .collect();
                writeln!(out, "        state {}: {}", state, row.join(" "))?;
            }
        }
    }
    Ok(())
}

fn load_pattern(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(ref pat) = cli.pattern {
        Ok(pat.clone())
    } else if let Some(ref path) = cli.pattern_file {
        Ok(load_text(path)?.trim_end_matches(['\r', '\n']).to_string())
    } else {
        Err("Either --pattern or --pattern-file must be provided".into())
    }
}

fn load_text(path: &PathBuf) -> Result<String, Box<dyn std::error::Error>> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        let mut file = File::open(path)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        Ok(buf)
    }
}

fn run_algorithm(
    cli: &Cli,
    params: &HashParams,
    text: &str,
    pattern: &str,
) -> (Trace, Option<Duration>) {
    let start = if cli.measure_time {
        Some(Instant::now())
    } else {
        None
    };

    let trace = match cli.algo {
        Algorithm::Naive => Naive::trace(&(), text, pattern),
        Algorithm::RabinKarp => RabinKarp::trace(params, text, pattern),
        Algorithm::FiniteAutomaton => FiniteAutomaton::trace(&(), text, pattern),
    };

    let duration = start.map(|s| s.elapsed());

    (trace, duration)
}
