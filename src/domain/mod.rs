// Domain layer: core models, ports (interfaces) and the application service.

pub mod model;
pub mod ports;

pub mod services;
