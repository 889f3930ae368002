//! # Simulation Tests
//!
//! The `Simulator` facade, program loaders, and snapshot contents.
