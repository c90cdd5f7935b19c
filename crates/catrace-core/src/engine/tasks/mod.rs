pub mod angle_scoring;
pub mod chain_assembly;
pub mod chain_validation;
pub mod neighbor_graph;
