//! Pipeline stage implementations.
//!
//! Each stage reads the latch its predecessor produced in the previous cycle and
//! returns the value of its own output latch. None of them mutate the CPU; the
//! cycle driver in [`crate::core::cpu`] commits all outputs together.
//! 1. **Fetch:** Reads the instruction store at the PC.
//! 2. **Decode:** Decodes, reads operands, and resolves control transfers.
//! 3. **Execute:** Drives the ALU or computes the link address.
//! 4. **Memory:** Performs loads and validates stores.
//! 5. **Writeback:** Selects the register update, if any.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::{DecodeOutput, decode_stage};
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::{FetchOutput, fetch_stage};
/// Memory stage entry point (MEM stage).
pub use memory::{MemOutput, PendingStore, mem_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::{RegisterUpdate, wb_stage};
