pub mod components;
pub mod edmonds_karp;
pub mod graph;
pub mod priority_queue;
pub mod residual;
pub mod successive_shortest_path;
