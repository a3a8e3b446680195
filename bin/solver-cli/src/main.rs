use anyhow::Context;
use clap::{Parser, Subcommand};
use numbers_core::{Solution, Solver, SolverConfig, SolverEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod draw;
mod settings;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "numbers")]
#[command(about = "Numbers-round solver: reach a target from a set of source numbers")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Solver configuration file (TOML, JSON or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Search limits that can be set per invocation
#[derive(clap::Args, Debug, Clone, Default)]
struct LimitArgs {
    /// Maximum number of exact solutions to report
    #[arg(long)]
    max_solutions: Option<usize>,

    /// Maximum number of search states to expand
    #[arg(long)]
    max_expansions: Option<u64>,
}

impl LimitArgs {
    fn apply(&self, config: &mut SolverConfig) {
        if let Some(max_solutions) = self.max_solutions {
            config.max_solutions = max_solutions;
        }
        if let Some(max_expansions) = self.max_expansions {
            config.max_expansions = max_expansions;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a target from source numbers
    Solve {
        /// Target value
        target: u64,
        /// Source numbers, each used at most once
        #[arg(required = true)]
        sources: Vec<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Check whether a target can be reached exactly (grid pick validity)
    Check {
        /// Target value
        target: u64,
        /// Source numbers (for example the rolled dice)
        #[arg(required = true)]
        sources: Vec<u64>,
    },
    /// Draw a random numbers round and solve it
    Draw {
        /// How many large numbers to draw (0-4)
        #[arg(long, default_value = "2")]
        large: usize,
        /// Total number of source numbers
        #[arg(long, default_value = "6")]
        count: usize,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        limits: LimitArgs,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// --- Output ---

fn format_numbers(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_solution(solution: &Solution) -> String {
    let mut s = String::new();

    if solution.has_exact {
        s.push_str("solutions:\n");
        for (i, derivation) in solution.exact.iter().enumerate() {
            s.push_str(&format!("{:3}: {} = {}\n", i + 1, derivation, solution.target));
        }
    } else if let Some(closest) = &solution.closest {
        s.push_str(&format!(
            "no exact solution, closest is {} ({} away):\n     {} = {}\n",
            closest.value, closest.distance, closest.derivation, closest.value
        ));
    } else {
        s.push_str("nothing to solve\n");
    }

    if solution.statistics.truncated {
        s.push_str("search limit reached, result may not be optimal\n");
    }

    s
}

fn print_solution(solution: &Solution, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(solution).context("failed to encode solution")?;
        println!("{}", out);
    } else {
        print!("{}", render_solution(solution));
    }
    Ok(())
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut config = settings::load(args.config.as_deref())?;

    match args.command {
        Commands::Solve {
            target,
            sources,
            json,
            limits,
        } => {
            limits.apply(&mut config);
            config.validate()?;
            let engine = SolverEngine::new(config);

            if !json {
                println!("target  = {}", target);
                println!("numbers = [{}]", format_numbers(&sources));
            }
            let solution = engine.solve(target, &sources);
            print_solution(&solution, json)?;
        }
        Commands::Check { target, sources } => {
            let engine = SolverEngine::new(config);
            if engine.is_reachable(target, &sources) {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Draw {
            large,
            count,
            seed,
            json,
            limits,
        } => {
            limits.apply(&mut config);
            config.validate()?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let round = draw::draw_round(&mut rng, large, count)?;
            debug!("Drew round {:?}", round);

            if !json {
                println!("target  = {}", round.target);
                println!("numbers = [{}]", format_numbers(&round.sources));
            }
            let solution = SolverEngine::new(config).solve(round.target, &round.sources);
            print_solution(&solution, json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_solve() {
        let args = Args::try_parse_from([
            "numbers", "solve", "952", "25", "50", "75", "100", "3", "6", "--max-solutions", "2",
        ])
        .unwrap();

        match args.command {
            Commands::Solve {
                target,
                sources,
                json,
                limits,
            } => {
                assert_eq!(target, 952);
                assert_eq!(sources, vec![25, 50, 75, 100, 3, 6]);
                assert!(!json);
                assert_eq!(limits.max_solutions, Some(2));
                assert_eq!(limits.max_expansions, None);
            }
            _ => panic!("expected solve command"),
        }
    }

    #[test]
    fn test_args_require_sources() {
        assert!(Args::try_parse_from(["numbers", "solve", "10"]).is_err());
        assert!(Args::try_parse_from(["numbers", "check", "10"]).is_err());
        assert!(Args::try_parse_from(["numbers", "solve", "10", "-3"]).is_err());
    }

    #[test]
    fn test_limit_args_override_config() {
        let mut config = SolverConfig::default();
        let limits = LimitArgs {
            max_solutions: Some(1),
            max_expansions: None,
        };
        limits.apply(&mut config);
        assert_eq!(config.max_solutions, 1);
        assert_eq!(config.max_expansions, SolverConfig::default().max_expansions);
    }

    #[test]
    fn test_render_exact_solution() {
        let solution = numbers_core::solve(4, &[2, 2]);
        let text = render_solution(&solution);
        assert!(text.starts_with("solutions:\n"));
        assert!(text.contains("  1: (2 + 2) = 4"));
        assert!(text.contains("  2: (2 * 2) = 4"));
    }

    #[test]
    fn test_render_closest_solution() {
        let solution = numbers_core::solve(100, &[3, 5]);
        let text = render_solution(&solution);
        assert!(text.contains("closest is 15 (85 away)"));
        assert!(text.contains("(5 * 3) = 15"));
    }

    #[test]
    fn test_render_empty_solution() {
        let solution = numbers_core::solve(100, &[]);
        assert_eq!(render_solution(&solution), "nothing to solve\n");
    }
}
