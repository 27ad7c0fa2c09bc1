use std::io::{self, Write};
use std::thread;

use clap::Parser;
use playback::{Algorithm, Controller, MatchInput, PlaybackConfig, PlaybackEvent, Step};

/// Example:
/// cargo run --bin simulate -- -a rabin-karp --speed 200
/// cargo run --bin simulate -- --text "abracadabra" --pattern abra --uppercase --manual
#[derive(Debug, clap::Parser)]
#[command(
    name = "simulate",
    about = "Play back a string matching algorithm step by step"
)]
struct Cli {
    /// naive (brute-force), rabin-karp or finite-automaton (finite-automata)
    #[arg(short, long, default_value = "naive")]
    algo: Algorithm,

    #[arg(long)]
    text: Option<String>,

    #[arg(long)]
    pattern: Option<String>,

    /// Uppercase text and pattern before matching
    #[arg(long)]
    uppercase: bool,

    /// Delay between steps in milliseconds
    #[arg(short, long)]
    speed: Option<u64>,

    #[arg(long, default_value_t = PlaybackConfig::MIN_SPEED_MS)]
    min_speed: u64,

    #[arg(long, default_value_t = PlaybackConfig::MAX_SPEED_MS)]
    max_speed: u64,

    /// Step through the whole trace without waiting
    #[arg(long)]
    manual: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let defaults = MatchInput::default();
    let mut text = cli.text.clone().unwrap_or(defaults.text);
    let mut pattern = cli.pattern.clone().unwrap_or(defaults.pattern);
    if cli.uppercase {
        text = text.to_uppercase();
        pattern = pattern.to_uppercase();
    }
    if text.is_empty() || pattern.is_empty() {
        return Err("Text and pattern must not be empty".into());
    }

    let default_speed = PlaybackConfig::DEFAULT_SPEED_MS
        .clamp(cli.min_speed, cli.max_speed.max(cli.min_speed));
    let config = PlaybackConfig::new(cli.min_speed, cli.max_speed, default_speed)?;

    let algorithm = cli.algo;
    let mut controller = Controller::new(
        config,
        MatchInput {
            text,
            pattern,
            algorithm,
        },
    );
    if let Some(speed) = cli.speed {
        controller.set_speed(speed);
    }

    let mut out = io::stdout().lock();
    writeln!(out, "# {}", algorithm.title())?;
    writeln!(out, "# {}", algorithm.description())?;
    writeln!(out, "# Time Complexity: {}", algorithm.complexity())?;
    writeln!(out, "text:    {}", controller.input().text)?;
    writeln!(out, "pattern: {}", controller.input().pattern)?;

    if controller.trace().is_empty() {
        writeln!(out, "(no steps)")?;
        writeln!(out, "matches: {:?}", controller.trace().matches())?;
        return Ok(());
    }

    print_current(&mut out, &controller)?;

    if cli.manual {
        while let Some(event) = controller.step() {
            if event == PlaybackEvent::Finished {
                break;
            }
            print_current(&mut out, &controller)?;
        }
    } else {
        controller.start();
        while let Some(wait) = controller.time_until_tick() {
            thread::sleep(wait);
            match controller.advance(wait) {
                Some(PlaybackEvent::Advanced { .. }) => print_current(&mut out, &controller)?,
                Some(PlaybackEvent::Finished) => break,
                None => {}
            }
        }
    }

    writeln!(out, "{}", controller.progress())?;
    writeln!(out, "matches: {:?}", controller.trace().matches())?;
    Ok(())
}

fn print_current(out: &mut impl Write, controller: &Controller) -> io::Result<()> {
    let Some(step) = controller.current_step() else {
        return Ok(());
    };
    let progress = controller.progress();
    write!(out, "[{:>4}/{}] {}", progress.step, progress.total, step)?;

    match step {
        Step::HashInit {
            pattern_hash,
            text_hash,
        }
        | Step::HashCompare {
            pattern_hash,
            text_hash,
            ..
        } => write!(out, "  (Text Hash: {} | Pattern Hash: {})", text_hash, pattern_hash)?,
        Step::Transition { state, .. }
        | Step::Found {
            state: Some(state), ..
        } => write!(out, "  (Current State: {})", state)?,
        _ => {}
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algo_defaults_to_naive_and_accepts_aliases() {
        let cli = Cli::try_parse_from(["simulate"]).unwrap();
        assert_eq!(cli.algo, Algorithm::Naive);

        let cli = Cli::try_parse_from(["simulate", "-a", "finite-automata"]).unwrap();
        assert_eq!(cli.algo, Algorithm::FiniteAutomaton);

        let cli = Cli::try_parse_from(["simulate", "--algo", "Rabin-Karp"]).unwrap();
        assert_eq!(cli.algo, Algorithm::RabinKarp);

        let err = Cli::try_parse_from(["simulate", "-a", "kmp"]).unwrap_err();
        assert!(err.to_string().contains("unknown algorithm"));
    }
}
