mod input;

use std::{
    fs::File,
    io::{self, stdin, Write},
    path::PathBuf,
};

use anyhow::{bail, ensure, Context as _};
use clap::Parser;
use household_selection::{default_weights, specs, Household, CRITERIA};
use rand::{rngs::SmallRng, SeedableRng as _};
use topsis_selection::{
    criteria::WEIGHT_SUM_TOLERANCE, evaluate, normalize, rank::IdealSolution, select,
    CriteriaMatrix, Normalized, ScoreVector,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Select social-assistance recipients by TOPSIS ranking of household data.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Household table as CSV. Read from stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Rank a random population of this many households instead of reading a table.
    #[arg(long, conflicts_with = "input")]
    synthetic: Option<usize>,
    /// Seed for the random population.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of recipients to select.
    #[arg(short = 'n', long, default_value_t = 10)]
    recipients: usize,
    /// Override the weight of one criterion, as `<criterion>=<weight>`. May be repeated.
    #[arg(short, long = "weight", value_parser = parse_weight)]
    weights: Vec<(String, f64)>,
    /// Exclude households whose score is undefined instead of failing.
    #[arg(long)]
    skip_unrankable: bool,
    /// Print the ideal solution used for the ranking.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_weight(arg: &str) -> Result<(String, f64), String> {
    let (criterion, weight) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected <criterion>=<weight>, got {arg:?}"))?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid weight {weight:?}: {err}"))?;
    Ok((criterion.trim().to_string(), weight))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let households = match (&args.input, args.synthetic) {
        (_, Some(count)) => {
            let mut rng = SmallRng::seed_from_u64(args.seed);
            input::synthetic_households(&mut rng, count)
        }
        (Some(path), None) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            input::read_households(file)?
        }
        (None, None) => input::read_households(stdin().lock())?,
    };
    info!(households = households.len(), "loaded population");

    let mut weights = default_weights();
    for (criterion, weight) in &args.weights {
        if !CRITERIA.iter().any(|c| c.id == criterion.as_str()) {
            let known: Vec<&str> = CRITERIA.iter().map(|c| c.id).collect();
            bail!("unknown criterion {criterion:?}, expected one of {known:?}");
        }
        weights.insert(criterion.as_str(), *weight);
    }
    let specs = specs();
    let criteria: Vec<String> = specs.iter().map(|s| s.id.clone()).collect();
    let sum = weights.sum(&criteria);
    ensure!(
        (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE,
        "criterion weights must sum to 1, got {sum}"
    );
    ensure!(
        args.recipients <= households.len(),
        "cannot select {} recipients from {} households",
        args.recipients,
        households.len()
    );

    let matrix = CriteriaMatrix::from_candidates(criteria, &households)?;
    let evaluation = evaluate(&normalize(&matrix)?, &weights, &specs)?;
    if args.verbose {
        write_ideal(&mut io::stdout().lock(), &evaluation.ideal)?;
    }

    let (households, scores): (Vec<Household>, ScoreVector) = if args.skip_unrankable {
        let (households, scores): (Vec<Household>, Vec<Normalized>) = households
            .into_iter()
            .zip(evaluation.closeness())
            .filter_map(|(household, closeness)| match closeness {
                Some(closeness) => Some((household, closeness)),
                None => {
                    warn!(household = %household.name, "excluding household with undefined score");
                    None
                }
            })
            .unzip();
        (households, scores.into())
    } else {
        (households, evaluation.scores()?)
    };

    let recipients = args.recipients.min(households.len());
    if recipients < args.recipients {
        warn!(
            requested = args.recipients,
            recipients, "fewer rankable households than requested recipients"
        );
    }
    let selected = select(&households, &scores, recipients)?;
    println!("{:>4}  {:<32} {:>12}", "rank", "name", "TOPSIS score");
    for selection in &selected {
        println!(
            "{:>4}  {:<32} {:>12.6}",
            selection.rank,
            selection.candidate.name,
            selection.score.as_f64()
        );
    }
    Ok(())
}

/// Table of the ideal and anti-ideal value per criterion, in `CRITERIA` order.
fn write_ideal<W: Write>(out: &mut W, ideal: &IdealSolution) -> io::Result<()> {
    writeln!(
        out,
        "{:<24} {:<32} {:>10} {:>10}",
        "criterion", "description", "A+", "A-"
    )?;
    for ((criterion, best), worst) in CRITERIA.iter().zip(&ideal.best).zip(&ideal.worst) {
        writeln!(
            out,
            "{:<24} {:<32} {best:>10.6} {worst:>10.6}",
            criterion.id, criterion.description
        )?;
    }
    writeln!(out)
}
