//! Pipeline Stage Tests.
//!
//! Each stage function is driven directly with hand-built latches.

use pretty_assertions::assert_eq;
use rvpipe_core::common::SimError;
use rvpipe_core::core::arch::RegisterFile;
use rvpipe_core::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use rvpipe_core::core::pipeline::signals::{AluOp, ControlSignals, OpBSrc};
use rvpipe_core::core::pipeline::stages::{
    PendingStore, RegisterUpdate, decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use rvpipe_core::isa::encode::encode;
use rvpipe_core::isa::instruction::{Instruction, Mnemonic};
use rvpipe_core::soc::DataMemory;

fn word(inst: Instruction) -> u32 {
    encode(&inst).unwrap()
}

fn fetched(pc: u32, inst: Instruction) -> IfIdEntry {
    IfIdEntry {
        pc,
        inst: Some(word(inst)),
    }
}

fn id_ex(pc: u32, inst: Instruction, rv1: u32, rv2: u32) -> IdExEntry {
    IdExEntry {
        pc,
        raw: word(inst),
        inst: Some(inst),
        ctrl: ControlSignals::for_mnemonic(inst.mnemonic),
        rv1,
        rv2,
    }
}

fn ex_mem(inst: Instruction, alu: u32, store_data: u32) -> ExMemEntry {
    ExMemEntry {
        pc: 0,
        raw: word(inst),
        inst: Some(inst),
        ctrl: ControlSignals::for_mnemonic(inst.mnemonic),
        alu,
        store_data,
    }
}

// ── Fetch ────────────────────────────────────────────────────────────────────

#[test]
fn test_fetch_reads_word_and_advances() {
    let out = fetch_stage(&[0x11, 0x22], 4);
    assert_eq!(out.if_id, IfIdEntry { pc: 4, inst: Some(0x22) });
    assert_eq!(out.next_pc, 8);
}

#[test]
fn test_fetch_past_end_is_bubble_with_pc() {
    let out = fetch_stage(&[0x11], 4);
    assert_eq!(out.if_id, IfIdEntry::bubble(4));
    assert_eq!(out.next_pc, 4);
}

#[test]
fn test_fetch_misaligned_is_bubble() {
    let out = fetch_stage(&[0x11, 0x22], 2);
    assert!(out.if_id.is_bubble());
    assert_eq!(out.next_pc, 2);
}

// ── Decode ───────────────────────────────────────────────────────────────────

#[test]
fn test_decode_bubble_stays_bubble() {
    let out = decode_stage(&IfIdEntry::bubble(8), &RegisterFile::new()).unwrap();
    assert_eq!(out.id_ex, None);
    assert_eq!(out.redirect, None);
}

#[test]
fn test_decode_reads_operands_and_signals() {
    let mut regs = RegisterFile::new();
    regs.write(5, 3);
    regs.write(6, 4);
    let inst = Instruction::r(Mnemonic::Add, 7, 5, 6);
    let out = decode_stage(&fetched(12, inst), &regs).unwrap();
    let entry = out.id_ex.unwrap();
    assert_eq!(entry, id_ex(12, inst, 3, 4));
    assert!(entry.ctrl.reg_write);
    assert_eq!(entry.ctrl.alu_src, OpBSrc::Reg2);
    assert_eq!(entry.ctrl.alu, AluOp::Add);
    assert_eq!(out.redirect, None);
}

#[test]
fn test_decode_taken_branch_redirects() {
    let mut regs = RegisterFile::new();
    regs.write(5, 1);
    let bne = Instruction::b(Mnemonic::Bne, 5, 0, -8);
    let out = decode_stage(&fetched(16, bne), &regs).unwrap();
    assert_eq!(out.redirect, Some(8));
}

#[test]
fn test_decode_untaken_branch_falls_through() {
    let bne = Instruction::b(Mnemonic::Bne, 5, 0, -8);
    let out = decode_stage(&fetched(16, bne), &RegisterFile::new()).unwrap();
    assert_eq!(out.redirect, None);
    assert!(out.id_ex.is_some());
}

#[test]
fn test_decode_signed_branch_comparisons() {
    let mut regs = RegisterFile::new();
    regs.write(1, 0xFFFF_FFFF); // -1
    regs.write(2, 1);
    let blt = Instruction::b(Mnemonic::Blt, 1, 2, 12);
    assert_eq!(decode_stage(&fetched(0, blt), &regs).unwrap().redirect, Some(12));
    let bge = Instruction::b(Mnemonic::Bge, 1, 2, 12);
    assert_eq!(decode_stage(&fetched(0, bge), &regs).unwrap().redirect, None);
    let bge_eq = Instruction::b(Mnemonic::Bge, 2, 2, 12);
    assert_eq!(decode_stage(&fetched(0, bge_eq), &regs).unwrap().redirect, Some(12));
}

#[test]
fn test_decode_jalr_clears_low_bit() {
    let mut regs = RegisterFile::new();
    regs.write(1, 0x41);
    let jalr = Instruction::i(Mnemonic::Jalr, 0, 1, 4);
    assert_eq!(decode_stage(&fetched(0, jalr), &regs).unwrap().redirect, Some(0x44));
}

#[test]
fn test_decode_unknown_word_is_inert() {
    let if_id = IfIdEntry {
        pc: 4,
        inst: Some(0xFFFF_FFFF),
    };
    let out = decode_stage(&if_id, &RegisterFile::new()).unwrap();
    let entry = out.id_ex.unwrap();
    assert_eq!(entry.inst, None);
    assert_eq!(entry.raw, 0xFFFF_FFFF);
    assert_eq!(entry.ctrl, ControlSignals::default());
    assert_eq!(out.redirect, None);
}

// ── Execute ──────────────────────────────────────────────────────────────────

#[test]
fn test_execute_uses_immediate_for_i_type() {
    let addi = Instruction::i(Mnemonic::Addi, 5, 0, -3);
    let out = execute_stage(Some(&id_ex(0, addi, 10, 99))).unwrap().unwrap();
    assert_eq!(out.alu, 7);
}

#[test]
fn test_execute_store_computes_address_and_carries_data() {
    let sw = Instruction::s(Mnemonic::Sw, 2, 7, 8);
    let out = execute_stage(Some(&id_ex(0, sw, 0x100, 0xAB))).unwrap().unwrap();
    assert_eq!(out.alu, 0x108);
    assert_eq!(out.store_data, 0xAB);
}

#[test]
fn test_execute_link_is_pc_plus_four() {
    let jal = Instruction::j(Mnemonic::Jal, 1, 64);
    let out = execute_stage(Some(&id_ex(20, jal, 0, 0))).unwrap().unwrap();
    assert_eq!(out.alu, 24);
}

#[test]
fn test_execute_division_by_zero_fails() {
    let div = Instruction::r(Mnemonic::Div, 3, 1, 2);
    assert_eq!(
        execute_stage(Some(&id_ex(0, div, 7, 0))),
        Err(SimError::DivisionByZero { op: "DIV" })
    );
}

#[test]
fn test_execute_bubble() {
    assert_eq!(execute_stage(None), Ok(None));
}

// ── Memory ───────────────────────────────────────────────────────────────────

#[test]
fn test_mem_load_reads_word() {
    let mut memory = DataMemory::new(64);
    memory.write_word(16, 0xCAFE_BABE).unwrap();
    let lw = Instruction::i(Mnemonic::Lw, 5, 0, 16);
    let out = mem_stage(Some(&ex_mem(lw, 16, 0)), &memory).unwrap();
    assert_eq!(out.mem_wb.unwrap().result, 0xCAFE_BABE);
    assert_eq!(out.store, None);
}

#[test]
fn test_mem_store_is_deferred() {
    let memory = DataMemory::new(64);
    let sw = Instruction::s(Mnemonic::Sw, 0, 7, 0);
    let out = mem_stage(Some(&ex_mem(sw, 12, 0x55)), &memory).unwrap();
    assert_eq!(out.store, Some(PendingStore { addr: 12, value: 0x55 }));
    assert_eq!(memory.read_word(12), Ok(0));
}

#[test]
fn test_mem_out_of_range_fails() {
    let memory = DataMemory::new(64);
    let sw = Instruction::s(Mnemonic::Sw, 0, 7, 0);
    assert!(matches!(
        mem_stage(Some(&ex_mem(sw, 62, 1)), &memory),
        Err(SimError::Address { addr: 62, .. })
    ));
    let lw = Instruction::i(Mnemonic::Lw, 5, 0, 0);
    assert!(mem_stage(Some(&ex_mem(lw, 64, 0)), &memory).is_err());
}

#[test]
fn test_mem_passes_alu_result_through() {
    let add = Instruction::r(Mnemonic::Add, 7, 5, 6);
    let out = mem_stage(Some(&ex_mem(add, 9, 0)), &DataMemory::new(16)).unwrap();
    assert_eq!(out.mem_wb.unwrap().result, 9);
}

// ── Writeback ────────────────────────────────────────────────────────────────

fn mem_wb(inst: Instruction, result: u32) -> MemWbEntry {
    MemWbEntry {
        pc: 0,
        raw: word(inst),
        inst: Some(inst),
        ctrl: ControlSignals::for_mnemonic(inst.mnemonic),
        result,
    }
}

#[test]
fn test_wb_writes_destination() {
    let add = Instruction::r(Mnemonic::Add, 7, 5, 6);
    assert_eq!(
        wb_stage(Some(&mem_wb(add, 8))),
        Some(RegisterUpdate { rd: 7, value: 8 })
    );
}

#[test]
fn test_wb_skips_stores_and_branches() {
    let sw = Instruction::s(Mnemonic::Sw, 2, 7, 0);
    let beq = Instruction::b(Mnemonic::Beq, 1, 2, 8);
    assert_eq!(wb_stage(Some(&mem_wb(sw, 8))), None);
    assert_eq!(wb_stage(Some(&mem_wb(beq, 8))), None);
}

#[test]
fn test_wb_skips_unknown_and_bubbles() {
    let inert = MemWbEntry {
        raw: 0xFFFF_FFFF,
        ..MemWbEntry::default()
    };
    assert_eq!(wb_stage(Some(&inert)), None);
    assert_eq!(wb_stage(None), None);
}
