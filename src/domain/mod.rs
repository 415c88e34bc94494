// Domain layer: topology records, roles and the ports the core depends on.

pub mod model;
pub mod ports;
