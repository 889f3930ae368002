//! # Unit Components
//!
//! Fine-grained tests for each area of the simulator, laid out like `src/`.

/// Assembler: labels, operands, pseudo-instructions, error reporting.
pub mod asm;




/// Simulator facade, loaders, and snapshots.
pub mod sim;
