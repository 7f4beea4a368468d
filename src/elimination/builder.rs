use crate::division::{Division, TeamId};
use crate::flow::{FlowEdge, FlowNetwork};
use tracing::debug;

/// Flow network asking whether every remaining game among the other teams
/// can be played out without any of them passing the candidate's ceiling.
///
/// Vertex layout: `0` is the source, `1..=games.len()` are game vertices in
/// canonical pair order, then one slot per team index (the candidate's slot
/// stays unconnected), and the sink last.
#[derive(Debug, Clone)]
pub struct EliminationNetwork {
    pub network: FlowNetwork,
    pub source: usize,
    pub sink: usize,
    pub candidate: TeamId,
    pub ceiling: u64,
    /// Team pair behind each game vertex, in vertex order.
    pub games: Vec<(TeamId, TeamId)>,
    /// Total capacity leaving the source.
    pub expected_flow: u64,
    /// Capacity standing in for "unbounded" on game-to-team edges.
    pub unbounded: u64,
    team_vertices: Vec<Option<usize>>,
}

impl EliminationNetwork {
    /// # Panics
    ///
    /// If `candidate` was issued by a larger division.
    pub fn build(division: &Division, candidate: TeamId) -> Self {
        let n = division.team_count();
        let ceiling = division.team(candidate).ceiling();

        let mut games = Vec::new();
        let mut expected_flow = 0u64;
        for i in division.team_ids() {
            if i == candidate {
                continue;
            }
            for j in division.team_ids().skip(i.index() + 1) {
                if j == candidate {
                    continue;
                }
                let remaining = division.games_between(i, j);
                if remaining > 0 {
                    games.push((i, j));
                    expected_flow += u64::from(remaining);
                }
            }
        }

        let team_offset = games.len() + 1;
        let vertices = games.len() + n + 2;
        let source = 0;
        let sink = vertices - 1;
        let unbounded = expected_flow + 1;

        let mut network = FlowNetwork::new(vertices);
        for (k, &(i, j)) in games.iter().enumerate() {
            let game_vertex = k + 1;
            network.push_edge(
                source,
                game_vertex,
                u64::from(division.games_between(i, j)),
            );
            network.push_edge(game_vertex, team_offset + i.index(), unbounded);
            network.push_edge(game_vertex, team_offset + j.index(), unbounded);
        }

        let mut team_vertices = vec![None; n];
        for id in division.team_ids() {
            if id == candidate {
                continue;
            }
            let team_vertex = team_offset + id.index();
            let headroom = ceiling.saturating_sub(u64::from(division.team(id).wins));
            network.push_edge(team_vertex, sink, headroom);
            team_vertices[id.index()] = Some(team_vertex);
        }

        debug!(
            candidate = %division.team(candidate).name,
            ceiling,
            game_vertices = games.len(),
            vertices,
            edges = network.edge_count(),
            expected_flow,
            "built elimination network"
        );

        EliminationNetwork {
            network,
            source,
            sink,
            candidate,
            ceiling,
            games,
            expected_flow,
            unbounded,
            team_vertices,
        }
    }

    pub fn team_vertex(&self, team: TeamId) -> Option<usize> {
        self.team_vertices.get(team.index()).copied().flatten()
    }

    /// Non-candidate teams paired with their vertex, in team order.
    pub fn team_vertices(&self) -> impl Iterator<Item = (TeamId, usize)> + '_ {
        self.team_vertices
            .iter()
            .enumerate()
            .filter_map(|(i, vertex)| vertex.map(|v| (TeamId(i), v)))
    }

    pub fn source_edges(&self) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.network.outgoing(self.source)
    }

    /// True once every game edge out of the source carries its full capacity.
    pub fn source_saturated(&self) -> bool {
        self.source_edges().all(FlowEdge::is_saturated)
    }
}
