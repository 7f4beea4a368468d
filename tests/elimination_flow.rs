use baseball_elimination::utils::parser::read_division;
use baseball_elimination::utils::random_division::generate_division;
use baseball_elimination::{
    Division, EliminationError, EliminationKind, EliminationNetwork, EliminationReport, Team,
    TeamId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn fixture(name: &str) -> Division {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name);
    read_division(path).unwrap()
}

fn two_teams(a: (u32, u32, u32), b: (u32, u32, u32), between: u32) -> Division {
    Division::new(
        vec![Team::new("A", a.0, a.1, a.2), Team::new("B", b.0, b.1, b.2)],
        vec![vec![0, between], vec![between, 0]],
    )
    .unwrap()
}

/// Decides elimination by trying every split of the remaining games among the
/// other teams, with the candidate winning all of its own games.
fn eliminated_by_enumeration(division: &Division, candidate: TeamId) -> bool {
    let ceiling = division.team(candidate).ceiling();
    let others = division
        .team_ids()
        .filter(|&id| id != candidate)
        .collect::<Vec<_>>();
    let mut pairs = Vec::new();
    for (k, &a) in others.iter().enumerate() {
        for &b in &others[k + 1..] {
            let games = division.games_between(a, b);
            if games > 0 {
                pairs.push((a, b, games));
            }
        }
    }

    let mut wins = vec![0u64; division.team_count()];
    for id in division.team_ids() {
        wins[id.index()] = u64::from(division.team(id).wins);
    }
    !feasible(&pairs, &mut wins, ceiling, &others)
}

fn feasible(
    pairs: &[(TeamId, TeamId, u32)],
    wins: &mut [u64],
    ceiling: u64,
    others: &[TeamId],
) -> bool {
    let Some((&(a, b, games), rest)) = pairs.split_first() else {
        return others.iter().all(|id| wins[id.index()] <= ceiling);
    };
    for a_wins in 0..=games {
        let b_wins = games - a_wins;
        wins[a.index()] += u64::from(a_wins);
        wins[b.index()] += u64::from(b_wins);
        let ok = feasible(rest, wins, ceiling, others);
        wins[a.index()] -= u64::from(a_wins);
        wins[b.index()] -= u64::from(b_wins);
        if ok {
            return true;
        }
    }
    false
}

#[test]
fn four_team_division_matches_known_results() {
    let division = fixture("teams4.txt");
    let oracle = division.oracle();

    assert!(!oracle.is_eliminated("Atlanta").unwrap());
    assert!(!oracle.is_eliminated("New_York").unwrap());
    assert!(oracle.certificate("Atlanta").unwrap().is_none());

    let philadelphia = oracle.certificate("Philadelphia").unwrap().unwrap();
    assert_eq!(philadelphia.kind, EliminationKind::Flow);
    assert_eq!(philadelphia.teams, vec!["Atlanta", "New_York"]);
    assert!(philadelphia.verify(&division, "Philadelphia").unwrap());

    let montreal = oracle.certificate("Montreal").unwrap().unwrap();
    assert_eq!(montreal.kind, EliminationKind::Trivial);
    assert_eq!(montreal.teams, vec!["Atlanta"]);
    let montreal_ceiling =
        division.wins("Montreal").unwrap() + division.remaining("Montreal").unwrap();
    assert!(division.wins("Atlanta").unwrap() > montreal_ceiling);
}

#[test]
fn detroit_needs_the_flow_check() {
    let division = fixture("teams5.txt");
    let oracle = division.oracle();
    let detroit = division.team_id("Detroit").unwrap();

    // 49 + 27 = 76 is not below New York's 75 wins.
    assert!(!oracle.is_trivially_eliminated(detroit));
    assert!(oracle.is_eliminated("Detroit").unwrap());

    let first = oracle.certificate("Detroit").unwrap().unwrap();
    let second = oracle.certificate("Detroit").unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.kind, EliminationKind::Flow);
    assert_eq!(
        first.teams,
        vec!["New_York", "Baltimore", "Boston", "Toronto"]
    );
    assert!(first.verify(&division, "Detroit").unwrap());

    for team in ["New_York", "Baltimore", "Boston", "Toronto"] {
        assert!(!oracle.is_eliminated(team).unwrap(), "{team}");
        assert!(oracle.certificate(team).unwrap().is_none(), "{team}");
    }
}

#[test]
fn flow_certificate_can_leave_teams_out() {
    let division = fixture("teams6.txt");
    let certificate = division.oracle().certificate("Seattle").unwrap().unwrap();
    assert_eq!(certificate.kind, EliminationKind::Flow);
    assert_eq!(
        certificate.teams,
        vec!["Chicago", "Cleveland", "Kansas_City", "Minnesota"]
    );
    assert!(!certificate.contains("Oakland"));
    assert!(certificate.verify(&division, "Seattle").unwrap());
}

#[test]
fn two_team_divisions() {
    let decided = two_teams((90, 60, 2), (80, 70, 3), 2);
    let oracle = decided.oracle();
    assert!(oracle.is_eliminated("B").unwrap());
    let certificate = oracle.certificate("B").unwrap().unwrap();
    assert_eq!(certificate.teams, vec!["A"]);
    assert_eq!(certificate.kind, EliminationKind::Trivial);
    assert!(!oracle.is_eliminated("A").unwrap());

    let open = two_teams((80, 70, 4), (78, 72, 4), 4);
    for team in ["A", "B"] {
        assert!(!open.oracle().is_eliminated(team).unwrap());
        assert!(open.oracle().certificate(team).unwrap().is_none());
    }
}

#[test]
fn single_team_is_never_eliminated() {
    let division = fixture("teams1.txt");
    let id = division.team_id("Turkey").unwrap();
    assert_eq!(division.leader(), id);
    assert!(!division.oracle().is_eliminated("Turkey").unwrap());
    assert!(division.oracle().certificate("Turkey").unwrap().is_none());

    let network = EliminationNetwork::build(&division, id);
    assert!(network.games.is_empty());
    assert_eq!(network.network.vertex_count(), 3);
    assert_eq!(network.network.edge_count(), 0);
    assert_eq!(network.team_vertex(id), None);
}

#[test]
fn team_ids_from_another_division_are_rejected() {
    let larger = fixture("teams5.txt");
    let smaller = fixture("teams1.txt");
    let detroit = larger.team_id("Detroit").unwrap();

    assert!(smaller.check(detroit).is_err());
    assert!(larger.check(detroit).is_ok());
    assert!(matches!(
        smaller.oracle().certificate_for(detroit),
        Err(EliminationError::InvalidTeam(_))
    ));
    assert!(matches!(
        smaller.oracle().solve(detroit),
        Err(EliminationError::InvalidTeam(_))
    ));
}

#[test]
fn network_layout_excludes_candidate() {
    let division = fixture("teams5.txt");
    let detroit = division.team_id("Detroit").unwrap();
    let network = EliminationNetwork::build(&division, detroit);

    // Five of the six pairs among the other four teams still meet; Boston and
    // Toronto do not.
    assert_eq!(network.games.len(), 5);
    assert_eq!(network.expected_flow, 3 + 8 + 7 + 2 + 7);
    assert_eq!(network.unbounded, network.expected_flow + 1);
    assert_eq!(network.source, 0);
    assert_eq!(network.sink, network.network.vertex_count() - 1);
    assert_eq!(network.network.vertex_count(), 5 + 5 + 2);
    assert_eq!(network.network.edge_count(), 5 * 3 + 4);
    assert_eq!(network.team_vertex(detroit), None);
    assert!(network.network.adj(6 + detroit.index()).is_empty());

    for edge in network.network.edges() {
        assert_ne!(edge.to, 6 + detroit.index());
    }
    for (team, vertex) in network.team_vertices() {
        let to_sink = network
            .network
            .outgoing(vertex)
            .find(|edge| edge.to == network.sink)
            .unwrap();
        assert_eq!(to_sink.capacity, 76 - u64::from(division.team(team).wins));
    }

    let again = EliminationNetwork::build(&division, detroit);
    assert_eq!(again.games, network.games);
    assert_eq!(again.network.edges(), network.network.edges());
}

#[test]
fn solved_network_saturates_source_unless_eliminated() {
    let division = fixture("teams4.txt");
    let oracle = division.oracle();

    let atlanta = division.team_id("Atlanta").unwrap();
    let (network, flow) = oracle.solve(atlanta).unwrap();
    assert!(network.source_saturated());
    assert_eq!(flow.value(), network.expected_flow);

    let philadelphia = division.team_id("Philadelphia").unwrap();
    let (network, flow) = oracle.solve(philadelphia).unwrap();
    assert!(!network.source_saturated());
    assert_eq!(flow.value(), 6);
    assert_eq!(network.expected_flow, 7);
    assert!(flow.in_cut(network.source));
    assert!(!flow.in_cut(network.sink));
}

#[test]
fn report_prints_each_team() {
    let division = fixture("teams4.txt");
    let report = EliminationReport::compute(&division).unwrap();
    assert_eq!(report.leader, "Atlanta");
    assert_eq!(report.eliminated().count(), 2);
    assert!(report.unverified(&division).unwrap().is_empty());

    let text = report.to_string();
    assert_eq!(
        text,
        "Atlanta is not eliminated\n\
         Philadelphia is eliminated by the subset R = { Atlanta New_York }\n\
         New_York is not eliminated\n\
         Montreal is eliminated by the subset R = { Atlanta }\n"
    );

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["standings"][1]["name"], "Philadelphia");
    assert_eq!(json["standings"][1]["eliminated"], true);
    assert_eq!(json["standings"][1]["certificate"]["kind"], "flow");
    assert_eq!(json["standings"][3]["certificate"]["kind"], "trivial");
    assert!(json["standings"][0]["certificate"].is_null());

    let single = EliminationReport::for_team(&division, "Montreal").unwrap();
    assert_eq!(single.standings.len(), 1);
    assert!(EliminationReport::for_team(&division, "Boston").is_err());
}

#[test]
fn random_divisions_agree_with_enumeration() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..40 {
        let division = generate_small(&mut rng);
        let oracle = division.oracle();
        for id in division.team_ids() {
            let name = division.team(id).name.clone();
            let certificate = oracle.certificate_for(id).unwrap();
            assert_eq!(
                certificate.is_some(),
                eliminated_by_enumeration(&division, id),
                "{name} in {division:?}"
            );
            assert_eq!(oracle.is_eliminated(&name).unwrap(), certificate.is_some());

            if division.team(id).ceiling() < u64::from(division.team(division.leader()).wins) {
                assert_eq!(
                    certificate.as_ref().map(|c| c.kind),
                    Some(EliminationKind::Trivial)
                );
            }
            if let Some(certificate) = certificate {
                assert!(!certificate.is_empty());
                assert!(!certificate.contains(&name));
                assert!(certificate.verify(&division, &name).unwrap());
            }
        }
    }
}

/// Small leagues with tight standings so the flow check is exercised.
fn generate_small(rng: &mut StdRng) -> Division {
    use rand::Rng;
    let n = rng.random_range(2..=5);
    let (division, _) = generate_division(n, rng).unwrap();
    let mut games = vec![vec![0u32; n]; n];
    for a in division.team_ids() {
        for b in division.team_ids() {
            games[a.index()][b.index()] = division.games_between(a, b).min(3);
        }
    }
    let teams = division
        .teams()
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let scheduled: u32 = games[i].iter().sum();
            Team::new(
                team.name.clone(),
                70 + rng.random_range(0..=8),
                team.losses,
                scheduled + rng.random_range(0..=2),
            )
        })
        .collect();
    Division::new(teams, games).unwrap()
}
