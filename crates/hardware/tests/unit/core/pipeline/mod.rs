//! # Pipeline Tests
//!
//! Stage functions in isolation, control transfers, drain timing, and fault
//! atomicity of the cycle driver.

pub mod stages;
