use crate::network::outage::Outage;
use crate::network::{Capacity, Grouping, RailNetwork};
use crate::residual_network::graph::Graph;
use crate::residual_network::successive_shortest_path::FlowAndCost;
use crate::station::{ServiceClass, Station, Tariff};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

// ids are only meaningful for the graph they were built with
#[derive(Clone)]
pub struct StationGraph {
    graph: Graph<Capacity>,
    ids: HashMap<String, usize>,
}

impl StationGraph {
    fn new(tariff: Tariff) -> Self {
        Self { graph: Graph::with_tariff(tariff), ids: HashMap::new() }
    }

    // id of an existing vertex, or of the one created for it
    fn make_vertex(&mut self, station: &Station) -> usize {
        if let Some(&id) = self.ids.get(station.name()) {
            return id;
        }
        let id = self.graph.add_node(station.clone());
        self.ids.insert(station.name().to_string(), id);
        id
    }

    #[inline]
    pub fn graph(&self) -> &Graph<Capacity> {
        &self.graph
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Station names in vertex-id order.
    pub fn station_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.vertices().iter().map(|v| v.station().name())
    }

    pub fn max_flow(&self, source: &str, dest: &str) -> Capacity {
        match (self.id(source), self.id(dest)) {
            (Some(s), Some(t)) => self.graph.max_flow(s, t),
            _ => 0,
        }
    }

    pub fn min_cost(&self, source: &str, dest: &str) -> Capacity {
        self.min_cost_flow(source, dest).cost
    }

    pub fn min_cost_flow(&self, source: &str, dest: &str) -> FlowAndCost<Capacity> {
        match (self.id(source), self.id(dest)) {
            (Some(s), Some(t)) => self.graph.min_cost_flow(s, t),
            _ => FlowAndCost::default(),
        }
    }

    /// Adds the super-source, wired to every degree-1 vertex whose station is not skipped.
    fn attach_super_source<F>(&mut self, skip: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let ingress = self
            .graph
            .vertices()
            .iter()
            .filter(|v| v.degree() == 1 && !skip(v.station().name()))
            .map(|v| v.id())
            .collect::<Vec<_>>();

        let super_source = self.make_vertex(&Station::synthetic(Station::SUPER_SOURCE));
        for u in &ingress {
            self.graph.add_edge(super_source, *u, Graph::unlimited(), ServiceClass::Virtual);
        }

        log::debug!("super-source {super_source} feeds {} ingress stations", ingress.len());
        super_source
    }

    fn attach_super_sink(&mut self, targets: &HashSet<&str>) -> usize {
        let egress = targets.iter().filter_map(|name| self.id(name)).collect::<Vec<_>>();

        let super_sink = self.make_vertex(&Station::synthetic(Station::SUPER_SINK));
        for u in &egress {
            self.graph.add_edge(*u, super_sink, Graph::unlimited(), ServiceClass::Virtual);
        }
        super_sink
    }
}

/// Inbound capacity of one station before and after an outage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLoss {
    pub station: String,
    pub before: Capacity,
    pub after: Capacity,
}

impl FlowLoss {
    #[inline]
    pub fn loss(&self) -> Capacity {
        self.before - self.after
    }
}

impl RailNetwork {
    // rebuilds from the raw segment list, renumbering stations densely
    fn build(&self, outage: Option<&Outage>) -> StationGraph {
        let mut graph = StationGraph::new(*self.tariff());
        let mut excluded = 0;

        for segment in self.segments() {
            if outage.is_some_and(|o| o.excludes(self, segment)) {
                excluded += 1;
                continue;
            }
            let (Some(source), Some(dest)) = (self.station(&segment.source), self.station(&segment.dest)) else {
                continue;
            };
            let u = graph.make_vertex(source);
            let v = graph.make_vertex(dest);
            graph.graph.add_edge(u, v, segment.capacity, segment.service);
        }

        log::debug!("built graph with {} vertices, {} arcs ({excluded} segments excluded)", graph.graph.num_nodes(), graph.graph.num_edges());
        graph
    }

    pub fn base_graph(&self) -> StationGraph {
        self.build(None)
    }

    /// Graph of the network with every segment hit by `outage` removed.
    pub fn degraded(&self, outage: &Outage) -> StationGraph {
        self.build(Some(outage))
    }

    /// Base graph with a super-source on the ingress stations outside `targets` and a super-sink behind `targets`.
    pub fn super_terminal_graph(&self, targets: &HashSet<&str>) -> StationGraph {
        let mut graph = self.base_graph();
        graph.attach_super_source(|name| targets.contains(name));
        graph.attach_super_sink(targets);
        graph
    }

    /// Total flow the rest of the network can deliver into `targets`.
    pub fn aggregate_inflow<'a, I>(&self, targets: I) -> Capacity
    where
        I: IntoIterator<Item = &'a str>,
    {
        let targets = targets.into_iter().collect::<HashSet<_>>();
        let graph = self.super_terminal_graph(&targets);
        graph.max_flow(Station::SUPER_SOURCE, Station::SUPER_SINK)
    }

    /// Total flow the network's ingress stations can deliver into `name`.
    pub fn station_inflow(&self, name: &str) -> Capacity {
        self.station_inflow_on(None, name)
    }

    fn station_inflow_on(&self, outage: Option<&Outage>, name: &str) -> Capacity {
        let mut graph = self.build(outage);
        let Some(dest) = graph.id(name) else {
            return 0;
        };
        let super_source = graph.attach_super_source(|station| station == name);
        graph.graph.max_flow(super_source, dest)
    }

    /// Aggregate inflow of every group, largest first.
    pub fn transport_needs(&self, grouping: Grouping) -> Vec<(String, Capacity)> {
        let mut needs = self
            .groups(grouping)
            .into_iter()
            .map(|(group, stations)| (group.to_string(), self.aggregate_inflow(stations)))
            .collect::<Vec<_>>();
        needs.sort_by_key(|(group, flow)| (Reverse(*flow), group.clone()));
        needs
    }

    /// Largest max flow between two stations of the same group, per group, largest first.
    pub fn top_budget(&self, grouping: Grouping) -> Vec<(String, Capacity)> {
        let graph = self.base_graph();
        let mut budgets = self
            .groups(grouping)
            .into_iter()
            .map(|(group, stations)| {
                let ids = stations.iter().filter_map(|name| graph.id(name)).collect::<Vec<_>>();
                let best = ids
                    .iter()
                    .enumerate()
                    .flat_map(|(i, &s)| ids[i + 1..].iter().map(move |&t| (s, t)))
                    .map(|(s, t)| graph.graph().max_flow(s, t))
                    .max()
                    .unwrap_or(0);
                (group.to_string(), best)
            })
            .collect::<Vec<_>>();
        budgets.sort_by_key(|(group, flow)| (Reverse(*flow), group.clone()));
        budgets
    }

    /// Largest connected set of stations of every group, largest first.
    pub fn connected_ranking(&self, grouping: Grouping) -> Vec<(String, usize)> {
        let graph = self.base_graph();
        let mut ranking = self
            .groups(grouping)
            .into_keys()
            .map(|group| (group.to_string(), graph.graph().largest_component(|station| grouping.key(station) == group)))
            .collect::<Vec<_>>();
        ranking.sort_by_key(|(group, size)| (Reverse(*size), group.clone()));
        ranking
    }

    /// The `k` stations whose inbound capacity drops the most under `outage`.
    pub fn most_affected(&self, outage: &Outage, k: usize) -> Vec<FlowLoss> {
        let degraded = self.degraded(outage);
        let mut losses = degraded
            .station_names()
            .map(|name| FlowLoss { station: name.to_string(), before: self.station_inflow_on(None, name), after: self.station_inflow_on(Some(outage), name) })
            .collect::<Vec<_>>();

        losses.sort_by(|a, b| b.loss().cmp(&a.loss()).then_with(|| a.station.cmp(&b.station)));
        losses.truncate(k);
        losses
    }

    /// Size of the largest connected set of stations belonging to `group`.
    pub fn largest_component(&self, grouping: Grouping, group: &str) -> usize {
        self.base_graph().graph().largest_component(|station| grouping.key(station) == group)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::network::Segment;
    use rstest::*;

    #[fixture]
    fn network() -> RailNetwork {
        let stations = vec![
            Station::new("Viana", "Viana", "Viana", "Viana", "Linha do Minho"),
            Station::new("Braga", "Braga", "Braga", "Braga", "Linha do Minho"),
            Station::new("Nine", "Braga", "Famalicão", "Nine", "Linha do Minho"),
            Station::new("Porto", "Porto", "Porto", "Campanhã", "Linha do Norte"),
            Station::new("Aveiro", "Aveiro", "Aveiro", "Aveiro", "Linha do Norte"),
            Station::new("Guimarães", "Braga", "Guimarães", "Guimarães", "Linha de Guimarães"),
        ];
        let segments = vec![
            Segment::new("Viana", "Nine", 8, ServiceClass::Standard),
            Segment::new("Braga", "Nine", 6, ServiceClass::Standard),
            Segment::new("Nine", "Porto", 12, ServiceClass::Alfa),
            Segment::new("Guimarães", "Porto", 4, ServiceClass::Standard),
            Segment::new("Porto", "Aveiro", 10, ServiceClass::Alfa),
        ];
        RailNetwork::new(stations, segments).unwrap()
    }

    #[rstest]
    fn base_graph_numbers_in_segment_order(network: RailNetwork) {
        let graph = network.base_graph();
        assert_eq!(graph.station_names().collect::<Vec<_>>(), vec!["Viana", "Nine", "Braga", "Porto", "Guimarães", "Aveiro"]);
        assert_eq!(graph.graph().num_edges(), 10);
        assert_eq!(graph.max_flow("Viana", "Porto"), 4);
        assert_eq!(graph.min_cost_flow("Viana", "Porto"), FlowAndCost { flow: 4, cost: 4 * 6 });
        assert_eq!(graph.max_flow("Viana", "Lisboa"), 0);
        assert_eq!(graph.min_cost("Lisboa", "Porto"), 0);
    }

    #[rstest]
    fn line_outage_renumbers(network: RailNetwork) {
        let graph = network.degraded(&Outage::lines(["Linha do Minho"]));
        assert_eq!(graph.station_names().collect::<Vec<_>>(), vec!["Guimarães", "Porto", "Aveiro"]);
        assert_eq!(graph.id("Porto"), Some(1));
        assert!(!graph.contains("Viana"));
        assert!(!graph.contains("Nine"));
        assert_eq!(graph.max_flow("Guimarães", "Aveiro"), 2);
    }

    #[rstest]
    #[case::failed_segment(Outage::segments([("Nine", "Porto")]), 0)]
    #[case::direction_matters(Outage::segments([("Porto", "Nine")]), 4)]
    #[case::unrelated_station(Outage::stations(["Aveiro"]), 4)]
    #[case::failed_line(Outage::lines(["Linha do Norte"]), 0)]
    fn outage_cuts_capacity(network: RailNetwork, #[case] outage: Outage, #[case] expected: Capacity) {
        assert_eq!(network.degraded(&outage).max_flow("Viana", "Porto"), expected);
    }

    #[rstest]
    fn station_outage_drops_station(network: RailNetwork) {
        let graph = network.degraded(&Outage::stations(["Porto"]));
        assert_eq!(graph.station_names().collect::<Vec<_>>(), vec!["Viana", "Nine", "Braga"]);
        assert_eq!(graph.max_flow("Viana", "Braga"), 3);
    }

    #[rstest]
    #[case("Porto", 13)]
    #[case("Nine", 13)]
    #[case("Viana", 4)]
    #[case("Aveiro", 5)]
    #[case("Lisboa", 0)]
    fn station_inflow(network: RailNetwork, #[case] station: &str, #[case] expected: Capacity) {
        assert_eq!(network.station_inflow(station), expected);
    }

    #[rstest]
    fn super_terminals_are_wired(network: RailNetwork) {
        let targets = HashSet::from(["Nine", "Braga", "Guimarães"]);
        let graph = network.super_terminal_graph(&targets);

        let super_source = graph.id(Station::SUPER_SOURCE).unwrap();
        let super_sink = graph.id(Station::SUPER_SINK).unwrap();
        assert_eq!((super_source, super_sink), (6, 7));

        let fed = graph.graph().find_vertex(super_source).unwrap().adj().iter().map(|&e| graph.graph().get_edge(e).unwrap().to).collect::<HashSet<_>>();
        assert_eq!(fed, HashSet::from([graph.id("Viana").unwrap(), graph.id("Aveiro").unwrap()]));
        assert_eq!(graph.graph().find_vertex(super_sink).unwrap().degree(), 3);

        assert_eq!(network.aggregate_inflow(targets), 9);
    }

    #[rstest]
    fn transport_needs_by_district(network: RailNetwork) {
        assert_eq!(
            network.transport_needs(Grouping::District),
            vec![("Porto".to_string(), 13), ("Braga".to_string(), 9), ("Aveiro".to_string(), 5), ("Viana".to_string(), 4)]
        );
    }

    #[rstest]
    fn most_affected_by_segment_failure(network: RailNetwork) {
        let affected = network.most_affected(&Outage::segments([("Nine", "Porto")]), 3);
        let summary = affected.iter().map(|l| (l.station.as_str(), l.before, l.after)).collect::<Vec<_>>();
        assert_eq!(summary, vec![("Nine", 13, 7), ("Porto", 13, 7), ("Aveiro", 5, 2)]);
        assert_eq!(affected[0].loss(), 6);
    }

    #[rstest]
    fn largest_component_of_district(network: RailNetwork) {
        assert_eq!(network.largest_component(Grouping::District, "Braga"), 2);
        assert_eq!(network.largest_component(Grouping::Municipality, "Porto"), 1);
        assert_eq!(network.largest_component(Grouping::District, "Faro"), 0);
    }

    #[rstest]
    #[case::district(Grouping::District, vec![("Braga", 3), ("Aveiro", 0), ("Porto", 0), ("Viana", 0)])]
    #[case::municipality(Grouping::Municipality, vec![("Aveiro", 0), ("Braga", 0), ("Famalicão", 0), ("Guimarães", 0), ("Porto", 0), ("Viana", 0)])]
    fn top_budget_by_group(network: RailNetwork, #[case] grouping: Grouping, #[case] expected: Vec<(&str, Capacity)>) {
        let budgets = network.top_budget(grouping);
        assert_eq!(budgets.iter().map(|(group, flow)| (group.as_str(), *flow)).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    #[case::district(Grouping::District, vec![("Braga", 2), ("Aveiro", 1), ("Porto", 1), ("Viana", 1)])]
    #[case::municipality(Grouping::Municipality, vec![("Aveiro", 1), ("Braga", 1), ("Famalicão", 1), ("Guimarães", 1), ("Porto", 1), ("Viana", 1)])]
    fn connected_ranking_by_group(network: RailNetwork, #[case] grouping: Grouping, #[case] expected: Vec<(&str, usize)>) {
        let ranking = network.connected_ranking(grouping);
        assert_eq!(ranking.iter().map(|(group, size)| (group.as_str(), *size)).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn star_feeds_hub() {
        let stations = vec![
            Station::new("L1", "Coimbra", "Coimbra", "", "Linha da Beira"),
            Station::new("L2", "Coimbra", "Coimbra", "", "Linha da Beira"),
            Station::new("L3", "Coimbra", "Coimbra", "", "Linha da Beira"),
            Station::new("Hub", "Coimbra", "Coimbra B", "", "Linha da Beira"),
        ];
        let segments = vec![
            Segment::new("L1", "Hub", 4, ServiceClass::Standard),
            Segment::new("L2", "Hub", 6, ServiceClass::Standard),
            Segment::new("L3", "Hub", 8, ServiceClass::Alfa),
        ];
        let network = RailNetwork::new(stations, segments).unwrap();

        assert_eq!(network.aggregate_inflow(["Hub"]), 2 + 3 + 4);
        assert_eq!(network.station_inflow("Hub"), 9);
        assert_eq!(network.transport_needs(Grouping::Municipality), vec![("Coimbra B".to_string(), 9), ("Coimbra".to_string(), 0)]);

        assert_eq!(network.top_budget(Grouping::District), vec![("Coimbra".to_string(), 4)]);
        assert_eq!(network.top_budget(Grouping::Municipality), vec![("Coimbra".to_string(), 3), ("Coimbra B".to_string(), 0)]);
        assert_eq!(network.connected_ranking(Grouping::District), vec![("Coimbra".to_string(), 4)]);
        assert_eq!(network.connected_ranking(Grouping::Municipality), vec![("Coimbra".to_string(), 1), ("Coimbra B".to_string(), 1)]);
    }
}
