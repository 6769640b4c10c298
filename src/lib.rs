pub mod network;
pub mod residual_network;
pub mod station;

pub use network::error::NetworkError;
pub use network::outage::Outage;
pub use network::reduction::{FlowLoss, StationGraph};
pub use network::{Capacity, Grouping, RailNetwork, Segment};
pub use residual_network::graph::Graph;
pub use residual_network::successive_shortest_path::FlowAndCost;
pub use station::{ServiceClass, Station, Tariff};
