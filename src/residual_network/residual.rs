use crate::residual_network::graph::Graph;
use num_traits::{NumAssign, PrimInt};
use std::collections::VecDeque;

// labels are the bfs depth or the accumulated path cost, depending on the search
pub struct Residual<Flow> {
    pub num_nodes: usize,
    pub num_edges: usize,

    pub residual_capacities: Vec<Flow>,
    pub visited: Vec<bool>,
    pub path: Vec<Option<usize>>,
    pub labels: Vec<Flow>,
}

impl<Flow> Default for Residual<Flow> {
    fn default() -> Self {
        Self { num_nodes: 0, num_edges: 0, residual_capacities: Vec::new(), visited: Vec::new(), path: Vec::new(), labels: Vec::new() }
    }
}

impl<Flow> Residual<Flow>
where
    Flow: PrimInt + NumAssign,
{
    // every arc starts at full capacity
    pub fn build(&mut self, graph: &Graph<Flow>) {
        self.num_nodes = graph.num_nodes();
        self.num_edges = graph.num_edges();

        self.residual_capacities.clear();
        self.residual_capacities.extend(graph.edges.iter().map(|e| e.capacity));

        self.visited.clear();
        self.visited.resize(self.num_nodes, false);
        self.path.clear();
        self.path.resize(self.num_nodes, None);
        self.labels.clear();
        self.labels.resize(self.num_nodes, Flow::zero());
    }

    #[inline]
    pub fn residual_capacity(&self, edge_id: usize) -> Flow {
        self.residual_capacities[edge_id]
    }

    // negative when the antiparallel lane carries more
    #[inline]
    pub fn flow(&self, graph: &Graph<Flow>, edge_id: usize) -> Flow {
        graph.edges[edge_id].capacity - self.residual_capacities[edge_id]
    }

    // built for this graph and both endpoints exist
    pub fn fits(&self, graph: &Graph<Flow>, src: usize, dest: usize) -> bool {
        self.num_nodes == graph.num_nodes() && self.num_edges == graph.num_edges() && src < self.num_nodes && dest < self.num_nodes
    }

    pub fn reset_search(&mut self, label: Flow) {
        self.visited.fill(false);
        self.path.fill(None);
        self.labels.fill(label);
    }

    // bottleneck of the predecessor chain ending at dest
    pub fn min_residual_along_path(&self, graph: &Graph<Flow>, src: usize, dest: usize) -> Flow {
        let mut delta = Flow::max_value();
        let mut v = dest;
        while v != src {
            let Some(edge_id) = self.path[v] else { break };
            delta = delta.min(self.residual_capacities[edge_id]);
            v = graph.edges[edge_id].from;
        }
        delta
    }

    pub fn augment_flow_along_path(&mut self, graph: &Graph<Flow>, src: usize, dest: usize, flow: Flow) {
        let mut v = dest;
        while v != src {
            let Some(edge_id) = self.path[v] else { break };
            let edge = &graph.edges[edge_id];
            self.residual_capacities[edge_id] -= flow;
            self.residual_capacities[edge.rev] += flow;
            v = edge.from;
        }
    }

    // vertices reachable from source over arcs with residual capacity left
    pub fn reachable_from(&self, graph: &Graph<Flow>, source: usize) -> Vec<usize> {
        let mut reached = vec![false; self.num_nodes];
        let mut cut = Vec::new();
        if source >= self.num_nodes {
            return cut;
        }

        let mut que = VecDeque::from([source]);
        reached[source] = true;
        while let Some(u) = que.pop_front() {
            cut.push(u);
            for (edge_id, edge) in graph.neighbors(u) {
                if !reached[edge.to] && self.residual_capacities[edge_id] > Flow::zero() {
                    reached[edge.to] = true;
                    que.push_back(edge.to);
                }
            }
        }

        cut
    }
}
