//! # General-Purpose Register Tests
//!
//! Tests for the register file and its name-annotated dump.

use proptest::prelude::*;
use rvpipe_core::common::SimError;
use rvpipe_core::core::arch::RegisterFile;
use rvpipe_core::isa::abi::AbiNames;

#[test]
fn test_gpr_new_initializes_to_zero() {
    let gpr = RegisterFile::new();
    for i in 0..32 {
        assert_eq!(gpr.read(i), Ok(0));
    }
}

#[test]
fn test_gpr_read_write_x31() {
    let mut gpr = RegisterFile::new();
    gpr.write(31, 0x9999_AAAA);
    assert_eq!(gpr.read(31), Ok(0x9999_AAAA));
}

#[test]
fn test_gpr_signed_view() {
    let mut gpr = RegisterFile::new();
    gpr.write(5, 0xFFFF_FFFE);
    assert_eq!(gpr.read_signed(5), Ok(-2));
    assert_eq!(gpr.read(5), Ok(0xFFFF_FFFE));
}

#[test]
fn test_gpr_read_out_of_range_fails() {
    let gpr = RegisterFile::new();
    assert_eq!(gpr.read(32), Err(SimError::InvalidRegister(32)));
    assert_eq!(gpr.read(usize::MAX), Err(SimError::InvalidRegister(usize::MAX)));
}

#[test]
fn test_gpr_write_out_of_range_is_ignored() {
    let mut gpr = RegisterFile::new();
    gpr.write(32, 7);
    assert_eq!(gpr, RegisterFile::new());
}

#[test]
fn test_gpr_dump_uses_abi_names() {
    let mut gpr = RegisterFile::new();
    gpr.write(5, 42);
    let dump = gpr.dump(&AbiNames::STANDARD);
    assert_eq!(dump.len(), 32);
    assert_eq!(dump[0], ("zero", 0));
    assert_eq!(dump[5], ("t0", 42));
    assert_eq!(dump[31], ("t6", 0));
}

proptest! {
    #[test]
    fn prop_x0_immutable(writes in proptest::collection::vec((0usize..40, any::<u32>()), 0..64)) {
        let mut gpr = RegisterFile::new();
        for (idx, val) in writes {
            gpr.write(idx, val);
            prop_assert_eq!(gpr.read(0), Ok(0));
        }
        prop_assert_eq!(gpr.get_all()[0], 0);
    }

    #[test]
    fn prop_last_write_wins(idx in 1usize..32, a in any::<u32>(), b in any::<u32>()) {
        let mut gpr = RegisterFile::new();
        gpr.write(idx, a);
        gpr.write(idx, b);
        prop_assert_eq!(gpr.read(idx), Ok(b));
    }
}
