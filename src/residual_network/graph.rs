use crate::station::{ServiceClass, Station, Tariff};
use num_traits::{NumAssign, PrimInt};

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub capacity: Flow,
    pub cost: Flow,
    pub service: ServiceClass,
    // antiparallel arc created alongside this one
    pub rev: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    id: usize,
    station: Station,
    adj: Vec<usize>,
}

impl Vertex {
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn station(&self) -> &Station {
        &self.station
    }

    #[inline]
    pub fn adj(&self) -> &[usize] {
        &self.adj
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.adj.len()
    }
}

// residual state lives in the solvers, the topology is never mutated by a computation
#[derive(Clone)]
pub struct Graph<Flow> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge<Flow>>,
    tariff: Tariff,
}

impl<Flow> Default for Graph<Flow> {
    fn default() -> Self {
        Self::with_tariff(Tariff::default())
    }
}

impl<Flow> Graph<Flow> {
    pub fn with_tariff(tariff: Tariff) -> Self {
        Self { num_nodes: 0, num_edges: 0, vertices: Vec::new(), edges: Vec::new(), tariff }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    // number of arcs, two per segment
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    pub fn find_vertex(&self, id: usize) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<&Edge<Flow>> {
        self.edges.get(edge_id)
    }

    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, &Edge<Flow>)> + '_ {
        self.vertices.get(u).into_iter().flat_map(|v| v.adj.iter()).map(move |&edge_id| (edge_id, &self.edges[edge_id]))
    }

    // return vertex id
    pub fn add_vertex(&mut self, id: usize, station: Station) -> Option<usize> {
        if id != self.num_nodes {
            log::debug!("rejected vertex {id} ({station}): next id is {}", self.num_nodes);
            return None;
        }

        self.vertices.push(Vertex { id, station, adj: Vec::new() });
        self.num_nodes += 1;
        Some(id)
    }

    pub fn add_node(&mut self, station: Station) -> usize {
        self.vertices.push(Vertex { id: self.num_nodes, station, adj: Vec::new() });
        self.num_nodes += 1;
        self.num_nodes - 1
    }
}

impl<Flow> Graph<Flow>
where
    Flow: PrimInt + NumAssign,
{
    // capacity of the arcs wired to super terminals
    #[inline]
    pub fn unlimited() -> Flow {
        let four = Flow::one() + Flow::one() + Flow::one() + Flow::one();
        Flow::max_value() / four
    }

    // return (forward, reverse) arc index
    pub fn add_edge(&mut self, source: usize, dest: usize, capacity: Flow, service: ServiceClass) -> Option<(usize, usize)> {
        if source >= self.num_nodes || dest >= self.num_nodes {
            return None;
        }

        // remainder of an odd capacity is dropped
        let lane = capacity / (Flow::one() + Flow::one());
        let cost = <Flow as num_traits::NumCast>::from(self.tariff.unit_cost(service)).unwrap_or_else(Flow::max_value);

        let (forward, reverse) = (self.num_edges, self.num_edges + 1);
        self.edges.push(Edge { from: source, to: dest, capacity: lane, cost, service, rev: reverse });
        self.edges.push(Edge { from: dest, to: source, capacity: lane, cost, service, rev: forward });
        self.vertices[source].adj.push(forward);
        self.vertices[dest].adj.push(reverse);

        self.num_edges += 2;
        Some((forward, reverse))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn station(name: &str) -> Station {
        Station::new(name, "Porto", "Porto", "Paranhos", "Linha do Norte")
    }

    #[test]
    fn vertices_are_dense() {
        let mut graph: Graph<i64> = Graph::default();
        assert_eq!(graph.add_vertex(0, station("A")), Some(0));
        assert_eq!(graph.add_vertex(0, station("B")), None);
        assert_eq!(graph.add_vertex(2, station("B")), None);
        assert_eq!(graph.add_vertex(1, station("B")), Some(1));
        assert_eq!(graph.add_node(station("C")), 2);
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.find_vertex(1).map(|v| v.station().name()), Some("B"));
        assert!(graph.find_vertex(3).is_none());
    }

    #[test]
    fn edge_is_split_into_two_lanes() {
        let mut graph: Graph<i64> = Graph::default();
        let a = graph.add_node(station("A"));
        let b = graph.add_node(station("B"));

        let (forward, reverse) = graph.add_edge(a, b, 7, ServiceClass::Alfa).unwrap();
        let (f, r) = (graph.get_edge(forward).unwrap(), graph.get_edge(reverse).unwrap());

        assert_eq!((f.from, f.to, r.from, r.to), (a, b, b, a));
        assert_eq!(f.capacity, 3);
        assert_eq!(f.capacity, r.capacity);
        assert_eq!((f.rev, r.rev), (reverse, forward));
        assert_eq!(f.cost, 4);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.find_vertex(a).unwrap().adj(), &[forward]);
        assert_eq!(graph.find_vertex(b).unwrap().adj(), &[reverse]);
    }

    #[test]
    fn edge_with_missing_endpoint_is_ignored() {
        let mut graph: Graph<i64> = Graph::default();
        let a = graph.add_node(station("A"));
        assert_eq!(graph.add_edge(a, 5, 10, ServiceClass::Standard), None);
        assert_eq!(graph.add_edge(5, a, 10, ServiceClass::Standard), None);
        assert_eq!(graph.neighbors(5).count(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.find_vertex(a).unwrap().degree(), 0);
    }

    #[test]
    fn cost_follows_tariff() {
        let mut graph: Graph<i32> = Graph::with_tariff(Tariff { standard: 3, alfa: 10 });
        let a = graph.add_node(station("A"));
        let b = graph.add_node(station("B"));
        let (standard, _) = graph.add_edge(a, b, 2, ServiceClass::Standard).unwrap();
        let (alfa, _) = graph.add_edge(a, b, 2, ServiceClass::Alfa).unwrap();
        let (virt, _) = graph.add_edge(a, b, Graph::<i32>::unlimited(), ServiceClass::Virtual).unwrap();

        assert_eq!(graph.get_edge(standard).unwrap().cost, 3);
        assert_eq!(graph.get_edge(alfa).unwrap().cost, 10);
        assert_eq!(graph.get_edge(virt).unwrap().cost, 0);
        assert_eq!(graph.get_edge(virt).unwrap().capacity, i32::MAX / 8);
    }
}
