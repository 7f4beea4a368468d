use baseball_elimination::utils::parser::{parse_division, read_division, write_division};
use baseball_elimination::utils::serialization::{load_any, save_any};
use baseball_elimination::{Division, EliminationError, OutputFormat, ReportConfig, Team};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn assert_malformed<T: std::fmt::Debug>(result: Result<T, EliminationError>) {
    match result {
        Err(EliminationError::MalformedInput { .. }) => {}
        other => panic!("expected malformed input, got {other:?}"),
    }
}

#[test]
fn queries_follow_load_order() {
    let division = read_division(fixture("teams5.txt")).unwrap();
    assert_eq!(division.team_count(), 5);
    assert_eq!(
        division.team_names().collect::<Vec<_>>(),
        vec!["New_York", "Baltimore", "Boston", "Toronto", "Detroit"]
    );
    assert_eq!(division.wins("Boston").unwrap(), 69);
    assert_eq!(division.losses("Toronto").unwrap(), 72);
    assert_eq!(division.remaining("Detroit").unwrap(), 27);
    assert_eq!(division.against("New_York", "Boston").unwrap(), 8);
    assert_eq!(division.against("Boston", "New_York").unwrap(), 8);
    assert_eq!(division.against("Detroit", "Detroit").unwrap(), 0);
    assert_eq!(division.leader_name(), "New_York");
}

#[test]
fn unknown_team_is_rejected_by_every_query() {
    let division = read_division(fixture("teams4.txt")).unwrap();
    assert!(matches!(
        division.wins("Boston"),
        Err(EliminationError::InvalidTeam(name)) if name == "Boston"
    ));
    assert!(division.losses("Boston").is_err());
    assert!(division.remaining("Boston").is_err());
    assert!(division.against("Atlanta", "Boston").is_err());
    assert!(division.against("Boston", "Atlanta").is_err());
    assert!(division.oracle().is_eliminated("Boston").is_err());
    assert!(division.oracle().certificate("Boston").is_err());
}

#[test]
fn leader_ties_go_to_first_team() {
    let teams = vec![
        Team::new("A", 10, 5, 3),
        Team::new("B", 12, 3, 3),
        Team::new("C", 12, 4, 3),
    ];
    let games = vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]];
    let division = Division::new(teams, games).unwrap();
    assert_eq!(division.leader_name(), "B");

    let winless = Division::new(
        vec![Team::new("X", 0, 0, 2), Team::new("Y", 0, 0, 2)],
        vec![vec![0, 2], vec![2, 0]],
    )
    .unwrap();
    assert_eq!(winless.leader_name(), "X");
}

#[test]
fn inconsistent_schedules_are_malformed() {
    let pair = || vec![Team::new("A", 1, 1, 1), Team::new("B", 1, 1, 1)];
    assert_malformed(Division::new(Vec::new(), Vec::new()));
    assert_malformed(Division::new(pair(), vec![vec![0, 1]]));
    assert_malformed(Division::new(pair(), vec![vec![0, 1], vec![1]]));
    assert_malformed(Division::new(pair(), vec![vec![0, 1], vec![2, 0]]));
    assert_malformed(Division::new(pair(), vec![vec![1, 1], vec![1, 0]]));
    assert_malformed(Division::new(
        vec![Team::new("A", 1, 1, 1), Team::new("A", 1, 1, 1)],
        vec![vec![0, 1], vec![1, 0]],
    ));
}

#[test]
fn parser_reports_shape_errors() {
    assert_malformed(parse_division(""));
    assert_malformed(parse_division("0\n"));
    assert_malformed(parse_division("two\n"));
    assert_malformed(parse_division("2\nA 1 1 1 0 1\nB 1 1 1 1\n"));
    assert_malformed(parse_division("1\nA -1 1 1 0\n"));
    assert_malformed(parse_division("1\nA 1 1 1 0\nB\n"));
    assert_malformed(parse_division("18446744073709551615\nA 1 1 1 0\n"));
    assert_malformed(parse_division("100000000\nA 1 1 1 0\n"));

    match parse_division("2\nA 1 1 1 0 1\nB 1 x 1 1 0\n") {
        Err(EliminationError::MalformedInput { line, reason }) => {
            assert_eq!(line, Some(3));
            assert!(reason.contains("losses of 'B'"), "{reason}");
        }
        other => panic!("expected malformed input, got {other:?}"),
    }
}

#[test]
fn written_division_parses_back() {
    let division = read_division(fixture("teams5.txt")).unwrap();
    let text = write_division(&division);
    let reparsed = parse_division(&text).unwrap();

    assert_eq!(reparsed.teams(), division.teams());
    for a in division.team_ids() {
        for b in division.team_ids() {
            assert_eq!(reparsed.games_between(a, b), division.games_between(a, b));
        }
    }
}

#[test]
fn snapshot_and_text_files_load_alike() {
    let dir = tempfile::tempdir().unwrap();
    let division = read_division(fixture("teams4.txt")).unwrap();

    let snapshot = dir.path().join("teams4.bin");
    let text = dir.path().join("teams4.txt");
    save_any(&snapshot, &division).unwrap();
    save_any(&text, &division).unwrap();

    for path in [snapshot, text] {
        let loaded = load_any(&path).unwrap();
        assert_eq!(loaded.teams(), division.teams());
        assert_eq!(loaded.leader_name(), "Atlanta");
        assert_eq!(loaded.against("Atlanta", "New_York").unwrap(), 6);
    }
}

#[test]
fn report_config_reads_toml() {
    let config = ReportConfig::from_toml("format = \"json\"\nverify_certificates = true\n").unwrap();
    assert_eq!(config.format, OutputFormat::Json);
    assert!(config.verify_certificates);
    assert!(!config.only_eliminated);

    assert_eq!(ReportConfig::from_toml("").unwrap(), ReportConfig::default());
    assert!(ReportConfig::from_toml("colour = \"red\"\n").is_err());
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
}
