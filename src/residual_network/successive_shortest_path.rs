use crate::residual_network::graph::Graph;
use crate::residual_network::priority_queue::IndexedMinHeap;
use crate::residual_network::residual::Residual;
use num_traits::{NumAssign, PrimInt};

#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub struct FlowAndCost<Flow> {
    pub flow: Flow,
    pub cost: Flow,
}

pub struct SuccessiveShortestPath<Flow> {
    residual: Residual<Flow>,
    heap: IndexedMinHeap<Flow>,
}

impl<Flow> Default for SuccessiveShortestPath<Flow> {
    fn default() -> Self {
        Self { residual: Residual::default(), heap: IndexedMinHeap::default() }
    }
}

impl<Flow> SuccessiveShortestPath<Flow>
where
    Flow: PrimInt + NumAssign,
{
    // every augmentation adds path cost * bottleneck
    pub fn solve(&mut self, source: usize, sink: usize, graph: &Graph<Flow>) -> FlowAndCost<Flow> {
        let mut result = FlowAndCost { flow: Flow::zero(), cost: Flow::zero() };
        if graph.find_vertex(source).is_none() || graph.find_vertex(sink).is_none() || source == sink {
            return result;
        }
        self.reset(graph);

        while self.find_min_cost_augmenting_path(graph, source, sink) {
            let delta = self.residual.min_residual_along_path(graph, source, sink);
            self.residual.augment_flow_along_path(graph, source, sink, delta);

            let path_cost = self.residual.labels[sink];
            let cost = path_cost.checked_mul(&delta).unwrap_or_else(Flow::max_value);
            log::trace!("augmented {source} -> {sink}: path cost {:?}", path_cost.to_i64());

            result.flow = result.flow.saturating_add(delta);
            result.cost = result.cost.saturating_add(cost);
        }

        log::debug!("min cost {source} -> {sink}: flow {:?}, cost {:?}", result.flow.to_i64(), result.cost.to_i64());
        result
    }

    pub fn reset(&mut self, graph: &Graph<Flow>) {
        self.residual.build(graph);
        self.heap.reset(graph.num_nodes());
    }

    #[inline]
    pub fn residual(&self) -> &Residual<Flow> {
        &self.residual
    }

    // dijkstra; labels hold the accumulated cost of every settled vertex
    pub fn find_min_cost_augmenting_path(&mut self, graph: &Graph<Flow>, src: usize, dest: usize) -> bool {
        if !self.residual.fits(graph, src, dest) {
            return false;
        }
        let infinity = Flow::max_value();
        self.residual.reset_search(infinity);
        self.residual.labels[src] = Flow::zero();

        self.heap.reset(graph.num_nodes());
        self.heap.insert(src, Flow::zero());

        while let Some((v, d)) = self.heap.extract_min() {
            self.residual.visited[v] = true;

            for (edge_id, edge) in graph.neighbors(v) {
                let w = edge.to;
                if self.residual.visited[w] || self.residual.residual_capacity(edge_id) <= Flow::zero() {
                    continue;
                }

                let old_cost = self.residual.labels[w];
                let new_cost = d.saturating_add(edge.cost);
                if new_cost < old_cost {
                    self.residual.labels[w] = new_cost;
                    self.residual.path[w] = Some(edge_id);
                    if self.heap.contains(w) {
                        self.heap.decrease_key(w, new_cost);
                    } else {
                        self.heap.insert(w, new_cost);
                    }
                }
            }
        }

        self.residual.visited[dest]
    }
}

impl<Flow> Graph<Flow>
where
    Flow: PrimInt + NumAssign,
{
    pub fn min_cost(&self, source: usize, dest: usize) -> Flow {
        self.min_cost_flow(source, dest).cost
    }

    pub fn min_cost_flow(&self, source: usize, dest: usize) -> FlowAndCost<Flow> {
        SuccessiveShortestPath::default().solve(source, dest, self)
    }
}
