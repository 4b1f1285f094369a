// Domain layer: data shapes and the config port. No IO in here.

pub mod model;
pub mod ports;
