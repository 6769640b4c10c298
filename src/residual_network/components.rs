use crate::residual_network::graph::Graph;
use crate::station::Station;

impl<Flow> Graph<Flow> {
    // only arcs between two matching vertices are followed
    pub fn largest_component<P>(&self, pred: P) -> usize
    where
        P: Fn(&Station) -> bool,
    {
        let mut visited = vec![false; self.num_nodes()];
        let mut stack = Vec::new();
        let mut largest = 0;

        for start in 0..self.num_nodes() {
            if visited[start] || !pred(self.vertices[start].station()) {
                continue;
            }

            visited[start] = true;
            stack.push(start);
            let mut size = 0;
            while let Some(u) = stack.pop() {
                size += 1;
                for &edge_id in self.vertices[u].adj() {
                    let w = self.edges[edge_id].to;
                    if !visited[w] && pred(self.vertices[w].station()) {
                        visited[w] = true;
                        stack.push(w);
                    }
                }
            }
            largest = largest.max(size);
        }

        largest
    }
}
