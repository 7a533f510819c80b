// Application layer: wires adapters, configuration and the core pipeline together.

pub mod report;
