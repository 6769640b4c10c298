use crate::residual_network::graph::Graph;
use crate::residual_network::residual::Residual;
use num_traits::{NumAssign, PrimInt};
use std::collections::VecDeque;

pub struct EdmondsKarp<Flow> {
    residual: Residual<Flow>,
    que: VecDeque<usize>,
}

impl<Flow> Default for EdmondsKarp<Flow> {
    fn default() -> Self {
        Self { residual: Residual::default(), que: VecDeque::new() }
    }
}

impl<Flow> EdmondsKarp<Flow>
where
    Flow: PrimInt + NumAssign,
{
    pub fn solve(&mut self, source: usize, sink: usize, graph: &Graph<Flow>) -> Flow {
        if graph.find_vertex(source).is_none() || graph.find_vertex(sink).is_none() || source == sink {
            return Flow::zero();
        }
        self.reset(graph);

        let mut flow = Flow::zero();
        let mut augmentations = 0_usize;
        while self.find_augmenting_path(graph, source, sink) {
            let delta = self.residual.min_residual_along_path(graph, source, sink);
            self.residual.augment_flow_along_path(graph, source, sink, delta);
            flow = flow.saturating_add(delta);
            augmentations += 1;
        }

        log::debug!("max flow {source} -> {sink}: {augmentations} augmenting paths");
        flow
    }

    pub fn reset(&mut self, graph: &Graph<Flow>) {
        self.residual.build(graph);
    }

    #[inline]
    pub fn residual(&self) -> &Residual<Flow> {
        &self.residual
    }

    // bfs by hop count, never entering a super-source vertex
    pub fn find_augmenting_path(&mut self, graph: &Graph<Flow>, src: usize, dest: usize) -> bool {
        if !self.residual.fits(graph, src, dest) {
            return false;
        }
        self.residual.reset_search(Flow::zero());
        self.residual.visited[src] = true;

        self.que.clear();
        self.que.push_back(src);
        while let Some(v) = self.que.pop_front() {
            if self.residual.visited[dest] {
                break;
            }

            for (edge_id, edge) in graph.neighbors(v) {
                let w = edge.to;
                if graph.vertices[w].station().is_super_source() {
                    continue;
                }
                if self.residual.visited[w] || self.residual.residual_capacity(edge_id) <= Flow::zero() {
                    continue;
                }

                self.residual.visited[w] = true;
                self.residual.path[w] = Some(edge_id);
                self.residual.labels[w] = self.residual.labels[v] + Flow::one();
                self.que.push_back(w);
            }
        }

        self.residual.visited[dest]
    }

    // source side of the minimum cut left by the last solve
    pub fn min_cut(&self, graph: &Graph<Flow>, source: usize) -> Vec<usize> {
        self.residual.reachable_from(graph, source)
    }
}

impl<Flow> Graph<Flow>
where
    Flow: PrimInt + NumAssign,
{
    // 0 when either vertex is missing or both are the same
    pub fn max_flow(&self, source: usize, dest: usize) -> Flow {
        EdmondsKarp::default().solve(source, dest, self)
    }
}
