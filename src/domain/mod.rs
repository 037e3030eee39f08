// Domain layer: label data model and the ports the engine talks through.

pub mod measure_unit;
pub mod model;
pub mod ports;
