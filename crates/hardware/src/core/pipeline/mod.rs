//! Instruction pipeline implementation.
//!
//! This module contains the five-stage in-order pipeline. It includes:
//! 1. **Latches:** Immutable inter-stage records rebuilt every cycle.
//! 2. **Signals:** Control signals generated during instruction decoding.
//! 3. **Stages:** Fetch, Decode, Execute, Memory, and Writeback as functions from the
//!    previous cycle's latch to the next one.
//!
//! There is no forwarding and no hazard interlock: a reader must be at least three
//! instructions behind its producer, which the program supplies with `nop`s.

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
