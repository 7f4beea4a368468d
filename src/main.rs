use baseball_elimination::utils::random_division::generate_division;
use baseball_elimination::utils::serialization::{load_any, save_any};
use baseball_elimination::{EliminationReport, OutputFormat, ReportConfig};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Baseball elimination via max flow", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which teams of a division are mathematically eliminated
    Check {
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Only evaluate this team
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Hide teams that are still alive
        #[arg(long)]
        only_eliminated: bool,
        /// Re-check every certificate against the standings
        #[arg(long)]
        verify: bool,
        /// TOML report configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Generate a random division and write it to disk (`.bin` for a snapshot)
    Generate {
        #[arg(long, default_value_t = 5)]
        teams: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the flow network built for one team
    Inspect {
        #[arg(value_name = "FILE")]
        input: PathBuf,
        #[arg(long)]
        team: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("baseball_elimination=info".parse()?),
        )
        .init();
    Ok(())
}

fn run() -> CliResult<()> {
    init_tracing()?;
    let cli = Cli::parse();
    match cli.command {
        Commands::Check {
            input,
            team,
            format,
            only_eliminated,
            verify,
            config,
        } => {
            let mut report_config = match config {
                Some(path) => ReportConfig::load(path)?,
                None => ReportConfig::default(),
            };
            if let Some(format) = format {
                report_config.format = format;
            }
            report_config.only_eliminated |= only_eliminated;
            report_config.verify_certificates |= verify;
            run_check(input, team, &report_config)?
        }
        Commands::Generate {
            teams,
            seed,
            output,
        } => run_generate(teams, seed, output)?,
        Commands::Inspect { input, team } => run_inspect(input, &team)?,
    }
    Ok(())
}

fn run_check(input: PathBuf, team: Option<String>, config: &ReportConfig) -> CliResult<()> {
    let division = load_any(&input)?;
    info!(
        teams = division.team_count(),
        leader = division.leader_name(),
        "loaded {}",
        input.display()
    );

    let mut report = match team {
        Some(name) => EliminationReport::for_team(&division, &name)?,
        None => EliminationReport::compute(&division)?,
    };

    if config.verify_certificates {
        let failed = report.unverified(&division)?;
        if !failed.is_empty() {
            return Err(format!("certificates failed verification for: {}", failed.join(", ")).into());
        }
        info!("all certificates verified");
    }
    if config.only_eliminated {
        report.retain_eliminated();
    }

    match config.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn run_generate(teams: usize, seed: Option<u64>, output: PathBuf) -> CliResult<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let (division, params) = generate_division(teams, &mut rng)?;
    println!(
        "Generated division: {} teams, {} division games remaining, leader {}",
        params.teams,
        params.division_games,
        division.leader_name()
    );
    save_any(&output, &division)?;
    println!("Division saved to {}", output.display());
    Ok(())
}

fn run_inspect(input: PathBuf, team: &str) -> CliResult<()> {
    let division = load_any(&input)?;
    let oracle = division.oracle();
    let id = division.team_id(team)?;

    if oracle.is_trivially_eliminated(id) {
        println!(
            "{team} is trivially eliminated: ceiling {} < {} wins of {}",
            division.team(id).ceiling(),
            division.team(division.leader()).wins,
            division.leader_name()
        );
        return Ok(());
    }

    let (network, flow) = oracle.solve(id)?;
    println!(
        "{team}: ceiling {}, {} vertices, {} edges, unbounded capacity {}",
        network.ceiling,
        network.network.vertex_count(),
        network.network.edge_count(),
        network.unbounded
    );
    for (k, &(a, b)) in network.games.iter().enumerate() {
        let edge = network
            .source_edges()
            .nth(k)
            .ok_or("game vertex without source edge")?;
        println!(
            "  game {:>3}  {} vs {}: {}/{}",
            k + 1,
            division.team(a).name,
            division.team(b).name,
            edge.flow,
            edge.capacity
        );
    }
    for (id, vertex) in network.team_vertices() {
        let side = if flow.in_cut(vertex) { "source" } else { "sink" };
        println!(
            "  team {:>3}  {} ({} side)",
            vertex,
            division.team(id).name,
            side
        );
    }
    println!(
        "max flow {} of {} ({} augmenting paths): {}",
        flow.value(),
        network.expected_flow,
        flow.augmentations(),
        if network.source_saturated() {
            "not eliminated"
        } else {
            "eliminated"
        }
    );
    Ok(())
}
