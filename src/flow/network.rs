use crate::error::{EliminationError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: u64,
    pub flow: u64,
}

impl FlowEdge {
    pub fn new(from: usize, to: usize, capacity: u64) -> Self {
        FlowEdge {
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    pub fn other(&self, vertex: usize) -> usize {
        if vertex == self.from {
            self.to
        } else {
            debug_assert_eq!(vertex, self.to, "vertex is not an endpoint");
            self.from
        }
    }

    /// Residual capacity in the direction of `vertex`. Backward residual is
    /// the flow already pushed; forward residual is the unused capacity.
    pub fn residual_capacity_to(&self, vertex: usize) -> u64 {
        if vertex == self.from {
            self.flow
        } else {
            self.capacity - self.flow
        }
    }

    pub fn add_residual_flow_to(&mut self, vertex: usize, delta: u64) {
        if vertex == self.from {
            self.flow -= delta;
        } else {
            self.flow += delta;
        }
        debug_assert!(self.flow <= self.capacity);
    }

    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }
}

/// Directed network with integer capacities. Each edge is listed in the
/// adjacency of both endpoints so residual traversal sees backward edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowNetwork {
    edges: Vec<FlowEdge>,
    adjacency: Vec<Vec<usize>>,
}

impl FlowNetwork {
    pub fn new(vertices: usize) -> Self {
        FlowNetwork {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertices],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds an edge and returns its index.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: u64) -> Result<usize> {
        let vertices = self.vertex_count();
        if from >= vertices || to >= vertices {
            return Err(EliminationError::malformed(format!(
                "edge {from}->{to} outside network of {vertices} vertices"
            )));
        }
        Ok(self.push_edge(from, to, capacity))
    }

    /// Adds an edge whose endpoints the caller already sized the network for.
    pub(crate) fn push_edge(&mut self, from: usize, to: usize, capacity: u64) -> usize {
        let id = self.edges.len();
        self.edges.push(FlowEdge::new(from, to, capacity));
        self.adjacency[from].push(id);
        if to != from {
            self.adjacency[to].push(id);
        }
        id
    }

    pub fn edge(&self, id: usize) -> &FlowEdge {
        &self.edges[id]
    }

    pub(crate) fn edge_mut(&mut self, id: usize) -> &mut FlowEdge {
        &mut self.edges[id]
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Edge indices incident to `vertex`, in insertion order.
    pub fn adj(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Edges leaving `vertex`.
    pub fn outgoing(&self, vertex: usize) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.adjacency[vertex]
            .iter()
            .map(move |&id| &self.edges[id])
            .filter(move |edge| edge.from == vertex)
    }
}
