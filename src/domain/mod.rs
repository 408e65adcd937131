// Domain layer: poll model, vote arithmetic and the ports the adapters implement.

pub mod model;
pub mod ports;
pub mod tally;
