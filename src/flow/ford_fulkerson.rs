use crate::error::{EliminationError, Result};
use crate::flow::network::FlowNetwork;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Maximum flow by shortest augmenting paths (Edmonds-Karp).
///
/// Flow is written into the network's edges. After `run` returns, `in_cut`
/// reports the source side of the minimum cut: vertices reachable from the
/// source through edges with positive residual capacity.
#[derive(Debug, Clone)]
pub struct FordFulkerson {
    value: u64,
    marked: Vec<bool>,
    augmentations: usize,
}

impl FordFulkerson {
    pub fn run(network: &mut FlowNetwork, source: usize, sink: usize) -> Result<Self> {
        let vertices = network.vertex_count();
        if source >= vertices || sink >= vertices {
            return Err(EliminationError::malformed(format!(
                "source {source} or sink {sink} outside network of {vertices} vertices"
            )));
        }
        if source == sink {
            return Err(EliminationError::malformed("source equals sink"));
        }

        let mut value = network
            .outgoing(source)
            .map(|edge| edge.flow)
            .sum::<u64>();
        let mut augmentations = 0;
        let mut edge_to = vec![None; vertices];
        let mut marked = vec![false; vertices];

        while Self::has_augmenting_path(network, source, sink, &mut edge_to, &mut marked) {
            let mut bottleneck = u64::MAX;
            let mut v = sink;
            while v != source {
                let id = edge_to[v].expect("augmenting path reaches the source");
                let edge = network.edge(id);
                bottleneck = bottleneck.min(edge.residual_capacity_to(v));
                v = edge.other(v);
            }

            let mut v = sink;
            while v != source {
                let id = edge_to[v].expect("augmenting path reaches the source");
                let edge = network.edge_mut(id);
                edge.add_residual_flow_to(v, bottleneck);
                v = edge.other(v);
            }

            value += bottleneck;
            augmentations += 1;
            trace!(bottleneck, value, "augmented along shortest path");
        }

        debug!(
            vertices,
            edges = network.edge_count(),
            augmentations,
            value,
            "max flow converged"
        );

        Ok(FordFulkerson {
            value,
            marked,
            augmentations,
        })
    }

    fn has_augmenting_path(
        network: &FlowNetwork,
        source: usize,
        sink: usize,
        edge_to: &mut [Option<usize>],
        marked: &mut [bool],
    ) -> bool {
        edge_to.fill(None);
        marked.fill(false);

        let mut queue = VecDeque::new();
        marked[source] = true;
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            if marked[sink] {
                break;
            }
            for &id in network.adj(v) {
                let edge = network.edge(id);
                let w = edge.other(v);
                if !marked[w] && edge.residual_capacity_to(w) > 0 {
                    edge_to[w] = Some(id);
                    marked[w] = true;
                    queue.push_back(w);
                }
            }
        }

        marked[sink]
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn in_cut(&self, vertex: usize) -> bool {
        self.marked.get(vertex).copied().unwrap_or(false)
    }
}
