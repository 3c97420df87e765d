// Domain layer: value types and ports. No HTTP framework or config types leak in here.

pub mod model;
pub mod ports;
