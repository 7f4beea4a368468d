use baseball_elimination::utils::random_division::generate_division;
use baseball_elimination::{EliminationKind, EliminationReport};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

struct BenchmarkResult {
    teams: usize,
    samples: u32,
    division_games: u64,
    report_time_ms: f64,
    per_team_time_us: f64,
    trivial_eliminations: usize,
    flow_eliminations: usize,
    alive: usize,
    mean_certificate_size: f64,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Benchmark runner for max-flow elimination reports"
)]
struct BenchmarkCli {
    /// Comma-separated list of division sizes to benchmark (e.g. 5,10,40)
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize))]
    teams: Option<Vec<usize>>,
    /// Random divisions generated per size
    #[arg(long, default_value_t = 5)]
    samples: u32,
    /// Seed for the division generator
    #[arg(long, default_value_t = 0x0BA5_EBA1)]
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = BenchmarkCli::parse();
    println!("=== Baseball Elimination Benchmark Suite ===\n");

    let team_sizes = cli.teams.unwrap_or_else(|| vec![5, 10, 20, 40]);
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut all_results = Vec::new();

    for &teams in &team_sizes {
        println!("Benchmarking n={} teams, {} samples", teams, cli.samples);
        match run_benchmark(teams, cli.samples, &mut rng) {
            Ok(result) => {
                print_result(&result);
                all_results.push(result);
            }
            Err(e) => {
                eprintln!("  ✗ Benchmark failed: {}", e);
            }
        }
        println!();
    }

    println!("\n=== Summary Report ===\n");
    print_summary_table(&all_results);
    print_scaling_analysis(&all_results);
}

fn run_benchmark(
    teams: usize,
    samples: u32,
    rng: &mut StdRng,
) -> Result<BenchmarkResult, Box<dyn std::error::Error>> {
    let progress = ProgressBar::new(u64::from(samples));
    progress.set_style(
        ProgressStyle::with_template("  [{bar:30}] {pos}/{len} divisions {elapsed}")?
            .progress_chars("=> "),
    );

    let mut report_time = Duration::ZERO;
    let mut division_games = 0u64;
    let mut trivial = 0usize;
    let mut flow = 0usize;
    let mut alive = 0usize;
    let mut certificate_members = 0usize;

    for _ in 0..samples {
        let (division, params) = generate_division(teams, rng)?;
        division_games += params.division_games;

        let start = Instant::now();
        let report = EliminationReport::compute(&division)?;
        report_time += start.elapsed();

        if !report.unverified(&division)?.is_empty() {
            return Err("certificate verification failed".into());
        }

        for standing in &report.standings {
            match &standing.certificate {
                Some(certificate) => {
                    certificate_members += certificate.len();
                    match certificate.kind {
                        EliminationKind::Trivial => trivial += 1,
                        EliminationKind::Flow => flow += 1,
                    }
                }
                None => alive += 1,
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let evaluated = (teams as f64) * f64::from(samples.max(1));
    let eliminated = trivial + flow;
    Ok(BenchmarkResult {
        teams,
        samples,
        division_games: division_games / u64::from(samples.max(1)),
        report_time_ms: report_time.as_secs_f64() * 1000.0 / f64::from(samples.max(1)),
        per_team_time_us: report_time.as_secs_f64() * 1_000_000.0 / evaluated.max(1.0),
        trivial_eliminations: trivial,
        flow_eliminations: flow,
        alive,
        mean_certificate_size: if eliminated == 0 {
            0.0
        } else {
            certificate_members as f64 / eliminated as f64
        },
    })
}

fn print_result(result: &BenchmarkResult) {
    println!("  ✓ Report time:      {:.3} ms / division", result.report_time_ms);
    println!("  ✓ Per team:         {:.1} µs", result.per_team_time_us);
    println!("  ✓ Division games:   {} (mean)", result.division_games);
    println!(
        "  ✓ Eliminated:       {} trivial · {} by flow · {} alive",
        result.trivial_eliminations, result.flow_eliminations, result.alive
    );
    println!(
        "  ✓ Certificate size: {:.2} teams (mean)",
        result.mean_certificate_size
    );
}

fn print_summary_table(results: &[BenchmarkResult]) {
    println!(
        "{:<6} {:<8} {:<10} {:<12} {:<12} {:<9} {:<9} {:<9}",
        "Teams", "Samples", "Games", "Report(ms)", "Team(µs)", "Trivial", "Flow", "Alive"
    );
    println!("{}", "-".repeat(80));

    for result in results {
        println!(
            "{:<6} {:<8} {:<10} {:<12.3} {:<12.1} {:<9} {:<9} {:<9}",
            result.teams,
            result.samples,
            result.division_games,
            result.report_time_ms,
            result.per_team_time_us,
            result.trivial_eliminations,
            result.flow_eliminations,
            result.alive
        );
    }
}

fn print_scaling_analysis(results: &[BenchmarkResult]) {
    println!("\n=== Scaling Analysis ===\n");

    if results.len() < 2 {
        println!("  Need at least two division sizes.");
        return;
    }

    let first = &results[0];
    let last = &results[results.len() - 1];
    if first.report_time_ms <= 0.0 || first.teams == last.teams {
        return;
    }

    let time_ratio = last.report_time_ms / first.report_time_ms;
    let team_ratio = last.teams as f64 / first.teams as f64;

    println!(
        "  Teams: {} → {} ({:.1}x increase)",
        first.teams, last.teams, team_ratio
    );
    println!("  Report time scaling: {:.2}x", time_ratio);
    println!(
        "  Estimated report complexity: O(n^{:.2})",
        time_ratio.log(team_ratio)
    );
}
