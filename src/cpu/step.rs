// License below.
//! The fetch-decode-execute driver: pulls a class out of the `DecodeTable`,
//! evaluates the condition field, performs the remaining bit-field
//! extraction each class still needs, and dispatches into the `alu`,
//! `multiply`, `load_store`, `branch` and `psr_transfer` modules.
//!
//! Every function here is free-standing rather than a method on `Arm7Tdmi` -
//! splitting register-file mutation from the `Memory`/`Board` generics keeps
//! the match in `dispatch` from turning into a wall of trait bounds.

use error::CoreError;
use memory::Memory;
use board::Board;
use super::condition::ArmCondition;
use super::dpop::ArmDPOP;
use super::shifter::ArmBSOP;
use super::psr::CPSR;
use super::instruction::ArmOpcode;
use super::decode_table::DecodeTable;
use super::registers::Registers;
use super::exception::Exception;
use super::{alu, multiply, addressing, load_store, branch, psr_transfer, CpuOptions};

/// What a single `step()` call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The instruction's condition held and it ran to completion.
    Executed,

    /// The instruction's condition field evaluated false (or was the
    /// reserved `NV` pattern); nothing but a prefetch cycle was charged.
    ConditionFailed,

    /// Execution vectored into an exception (`SWI` with architectural entry
    /// enabled, or an undefined/illegal encoding).
    Exception(Exception),
}

fn bit(raw: u32, n: u32) -> bool {
    (raw >> n) & 1 != 0
}

fn bits(raw: u32, hi: u32, lo: u32) -> u32 {
    (raw >> lo) & ((1 << (hi - lo + 1)) - 1)
}

/// Fetches, decodes and executes one instruction. `raw` has already been
/// fetched and PC already advanced by the caller (`Arm7Tdmi::step`) - this
/// function only ever reads PC through `Registers`, so it doesn't need to
/// know the fetch address itself.
pub fn dispatch<M: Memory, B: Board>(
    regs: &mut Registers,
    table: &DecodeTable,
    memory: &mut M,
    board: &mut B,
    options: &CpuOptions,
    cycles: &mut u64,
    raw: u32,
) -> Result<StepOutcome, CoreError> {
    let cond = ArmCondition::decode(raw);
    let taken = match cond.check(&regs.cpsr()) {
        Ok(t) => t,
        Err(_) => {
            warn!("reserved NV condition code at {:#010X}; treated as not-taken", raw);
            false
        },
    };

    *cycles += memory.active_prefetch_cycles32() as u64;
    if !taken {
        return Ok(StepOutcome::ConditionFailed);
    }

    match table.lookup(raw) {
        ArmOpcode::DataProcessing => exec_data_processing(regs, raw, cycles),
        ArmOpcode::MRS            => exec_mrs(regs, raw),
        ArmOpcode::MSR_Reg        => exec_msr(regs, raw, ArmOpcode::MSR_Reg),
        ArmOpcode::MSR_Flags      => exec_msr(regs, raw, ArmOpcode::MSR_Flags),
        ArmOpcode::MUL_MLA        => exec_mul_mla(regs, raw, memory, cycles),
        ArmOpcode::MULL_MLAL      => exec_mul_long(regs, raw, memory, cycles),
        ArmOpcode::LDR_STR        => exec_single_transfer(regs, memory, raw, cycles),
        ArmOpcode::LDRH_STRH_Reg  => exec_halfword_transfer(regs, memory, raw, ArmOpcode::LDRH_STRH_Reg, cycles),
        ArmOpcode::LDRH_STRH_Imm  => exec_halfword_transfer(regs, memory, raw, ArmOpcode::LDRH_STRH_Imm, cycles),
        ArmOpcode::LDM_STM        => exec_block_transfer(regs, memory, raw, cycles),
        ArmOpcode::B_BL           => exec_branch(regs, raw),
        ArmOpcode::BX             => exec_bx(regs, raw),
        ArmOpcode::SWI            => exec_swi(regs, board, raw, options),
        ArmOpcode::SWP |
        ArmOpcode::CDP |
        ArmOpcode::MRC_MCR |
        ArmOpcode::LDC_STC |
        ArmOpcode::Unknown        => exec_illegal(regs, board, raw),
    }
}

/// Reads an operand register for the barrel shifter, applying the extra
/// `+4` the architecture piles onto PC specifically when a register-
/// specified shift is in play (on top of the usual execution-time `+8`
/// `Registers::read` already gives it).
fn read_shifted_operand(regs: &Registers, reg: usize, register_shift_form: bool) -> u32 {
    let value = regs.read(reg);
    if register_shift_form && reg == Registers::PC { value.wrapping_add(4) } else { value }
}

fn exec_data_processing(regs: &mut Registers, raw: u32, cycles: &mut u64) -> Result<StepOutcome, CoreError> {
    let immediate_operand = bit(raw, 25);
    let set_flags = bit(raw, 20);
    let op = ArmDPOP::decode(raw);
    let rn = bits(raw, 19, 16) as usize;
    let rd = bits(raw, 15, 12) as usize;

    let (op2, shifter_carry) = if immediate_operand {
        let rotate = bits(raw, 11, 8);
        let imm8 = bits(raw, 7, 0);
        let value = imm8.rotate_right(rotate * 2);
        let carry = if rotate == 0 { regs.cpsr().C() } else { value & 0x8000_0000 != 0 };
        (value, carry)
    } else {
        let shift_type = bits(raw, 6, 5);
        let rm = bits(raw, 3, 0) as usize;
        if bit(raw, 4) {
            let rs = bits(raw, 11, 8) as usize;
            let shift = ArmBSOP::decode_register(shift_type, rs);
            let rm_value = read_shifted_operand(regs, rm, true);
            let rs_value = read_shifted_operand(regs, rs, true);
            let (value, carry) = shift.apply(rm_value as i32, rs_value, regs.cpsr().C());
            *cycles += 1; // register-specified shift: one extra internal cycle
            (value as u32, carry)
        } else {
            let amount = bits(raw, 11, 7);
            let shift = ArmBSOP::decode_immediate(shift_type, amount);
            let rm_value = regs.read(rm);
            let (value, carry) = shift.apply(rm_value as i32, 0, regs.cpsr().C());
            (value as u32, carry)
        }
    };

    let rn_value = regs.read(rn);
    let result = alu::execute(op, rn_value, op2, shifter_carry, regs.cpsr().C());

    if result.write_back {
        if rd == Registers::PC {
            regs.write(Registers::PC, result.value);
            if set_flags {
                match regs.spsr() {
                    Ok(spsr) => regs.set_cpsr_raw(spsr.0),
                    Err(_) => warn!("S-form data-processing op wrote PC with no SPSR bank; flags left untouched"),
                }
            }
        } else {
            regs.write(rd, result.value);
            if set_flags { apply_flags(regs, &result); }
        }
    } else {
        apply_flags(regs, &result);
    }

    Ok(StepOutcome::Executed)
}

fn apply_flags(regs: &mut Registers, result: &alu::AluResult) {
    let mut cpsr = regs.cpsr();
    cpsr.set_N(result.value & 0x8000_0000 != 0);
    cpsr.set_Z(result.value == 0);
    cpsr.set_C(result.carry);
    if let Some(v) = result.overflow { cpsr.set_V(v); }
    regs.set_cpsr_raw(cpsr.0);
}

fn exec_mrs(regs: &mut Registers, raw: u32) -> Result<StepOutcome, CoreError> {
    let rd = bits(raw, 15, 12) as usize;
    let target = if bit(raw, 22) { psr_transfer::PsrTarget::Spsr } else { psr_transfer::PsrTarget::Cpsr };
    let value = psr_transfer::mrs(regs, target);
    regs.write(rd, value);
    Ok(StepOutcome::Executed)
}

fn exec_msr(regs: &mut Registers, raw: u32, class: ArmOpcode) -> Result<StepOutcome, CoreError> {
    let target = if bit(raw, 22) { psr_transfer::PsrTarget::Spsr } else { psr_transfer::PsrTarget::Cpsr };
    let mut field_mask = 0_u32;
    if bit(raw, 19) { field_mask |= CPSR::USER_MASK; }
    if bit(raw, 16) { field_mask |= CPSR::PRIV_MASK; }

    let value = match class {
        ArmOpcode::MSR_Reg => regs.read(bits(raw, 3, 0) as usize),
        ArmOpcode::MSR_Flags => {
            if bit(raw, 25) {
                let rotate = bits(raw, 11, 8);
                let imm8 = bits(raw, 7, 0);
                imm8.rotate_right(rotate * 2)
            } else {
                regs.read(bits(raw, 3, 0) as usize)
            }
        },
        _ => unreachable!("exec_msr only ever called for MSR_Reg/MSR_Flags"),
    };

    psr_transfer::msr(regs, target, value, field_mask);
    Ok(StepOutcome::Executed)
}

fn exec_mul_mla<M: Memory>(regs: &mut Registers, raw: u32, memory: &M, cycles: &mut u64) -> Result<StepOutcome, CoreError> {
    let set_flags = bit(raw, 20);
    let accumulate = bit(raw, 21);
    let rd = bits(raw, 19, 16) as usize;
    let rn = bits(raw, 15, 12) as usize;
    let rs = bits(raw, 11, 8) as usize;
    let rm = bits(raw, 3, 0) as usize;

    let rm_val = regs.read(rm);
    let rs_val = regs.read(rs);
    let rn_val = regs.read(rn);
    let rn_opt = if accumulate { Some(rn) } else { None };

    let result = multiply::mul(rd, rm, rs, rn_opt, rm_val, rs_val, rn_val)?;
    regs.write(rd, result.value);
    if set_flags {
        let (n, z) = multiply::flags32(result.value);
        let mut cpsr = regs.cpsr();
        cpsr.set_N(n);
        cpsr.set_Z(z);
        regs.set_cpsr_raw(cpsr.0);
    }
    *cycles += memory.wait_mul(rs_val as i32) as u64;
    Ok(StepOutcome::Executed)
}

fn exec_mul_long<M: Memory>(regs: &mut Registers, raw: u32, memory: &M, cycles: &mut u64) -> Result<StepOutcome, CoreError> {
    let signed = bit(raw, 22);
    let accumulate = bit(raw, 21);
    let set_flags = bit(raw, 20);
    let rd_hi = bits(raw, 19, 16) as usize;
    let rd_lo = bits(raw, 15, 12) as usize;
    let rs = bits(raw, 11, 8) as usize;
    let rm = bits(raw, 3, 0) as usize;

    let rm_val = regs.read(rm) as i32;
    let rs_val = regs.read(rs) as i32;
    let acc = if accumulate { Some((regs.read(rd_hi), regs.read(rd_lo))) } else { None };

    let result = multiply::mul_long(rd_hi, rd_lo, rm, rs, rm_val, rs_val, signed, acc)?;
    regs.write(rd_lo, result.lo);
    regs.write(rd_hi, result.hi);
    if set_flags {
        let (n, z) = multiply::flags64(result.hi, result.lo);
        let mut cpsr = regs.cpsr();
        cpsr.set_N(n);
        cpsr.set_Z(z);
        regs.set_cpsr_raw(cpsr.0);
    }
    // One extra internal cycle over MUL/MLA for the wider accumulator.
    *cycles += memory.wait_mul(rs_val) as u64 + 1;
    Ok(StepOutcome::Executed)
}

fn exec_single_transfer<M: Memory>(regs: &mut Registers, memory: &mut M, raw: u32, cycles: &mut u64) -> Result<StepOutcome, CoreError> {
    let register_offset = bit(raw, 25);
    let pre_indexed = bit(raw, 24);
    let add = bit(raw, 23);
    let byte = bit(raw, 22);
    let writeback_bit = bit(raw, 21);
    let load = bit(raw, 20);
    let rn = bits(raw, 19, 16) as usize;
    let rd = bits(raw, 15, 12) as usize;

    let offset = if register_offset {
        let shift_type = bits(raw, 6, 5);
        let amount = bits(raw, 11, 7);
        let rm = bits(raw, 3, 0) as usize;
        addressing::Mode2Offset::Shifted { shift: ArmBSOP::decode_immediate(shift_type, amount), rm }.resolve(regs)
    } else {
        addressing::Mode2Offset::Immediate(bits(raw, 11, 0)).resolve(regs)
    };

    // Post-indexed addressing always writes back (it's how post-index is
    // defined); the W bit there instead flags the forced-User-mode T-variant.
    let writeback = if pre_indexed { writeback_bit } else { true };
    let force_user_mode = !pre_indexed && writeback_bit;

    let xfer = load_store::SingleTransfer {
        rn, rd, load,
        size: if byte { load_store::TransferSize::UnsignedByte } else { load_store::TransferSize::Word },
        pre_indexed, add, writeback, force_user_mode,
    };
    let extra = load_store::execute_single(regs, memory, &xfer, offset)?;
    *cycles += extra as u64;
    Ok(StepOutcome::Executed)
}

fn exec_halfword_transfer<M: Memory>(
    regs: &mut Registers, memory: &mut M, raw: u32, class: ArmOpcode, cycles: &mut u64,
) -> Result<StepOutcome, CoreError> {
    let pre_indexed = bit(raw, 24);
    let add = bit(raw, 23);
    let writeback_bit = bit(raw, 21);
    let load = bit(raw, 20);
    let rn = bits(raw, 19, 16) as usize;
    let rd = bits(raw, 15, 12) as usize;
    let sh = bits(raw, 6, 5);

    let offset = match class {
        ArmOpcode::LDRH_STRH_Imm => {
            let hi = bits(raw, 11, 8);
            let lo = bits(raw, 3, 0);
            addressing::Mode3Offset::Immediate((hi << 4) | lo).resolve(regs)
        },
        ArmOpcode::LDRH_STRH_Reg => addressing::Mode3Offset::Register(bits(raw, 3, 0) as usize).resolve(regs),
        _ => unreachable!("exec_halfword_transfer only ever called for the two LDRH/STRH classes"),
    };

    let size = match sh {
        0b01 => load_store::TransferSize::UnsignedHalfword,
        0b10 => load_store::TransferSize::SignedByte,
        0b11 => load_store::TransferSize::SignedHalfword,
        _    => load_store::TransferSize::UnsignedHalfword,
    };

    // Unlike word/byte transfers, this addressing mode has no T-variant -
    // post-indexed writeback with W set is simply not a thing ARMv4T defines.
    if !pre_indexed && writeback_bit {
        return Err(CoreError::InvalidOffsetWriteBack);
    }
    let writeback = if pre_indexed { writeback_bit } else { true };

    let xfer = load_store::SingleTransfer { rn, rd, load, size, pre_indexed, add, writeback, force_user_mode: false };
    let extra = load_store::execute_single(regs, memory, &xfer, offset)?;
    *cycles += extra as u64;
    Ok(StepOutcome::Executed)
}

fn exec_block_transfer<M: Memory>(regs: &mut Registers, memory: &mut M, raw: u32, cycles: &mut u64) -> Result<StepOutcome, CoreError> {
    let pre_indexed = bit(raw, 24);
    let add = bit(raw, 23);
    let force_user_bank = bit(raw, 22);
    let writeback = bit(raw, 21);
    let load = bit(raw, 20);
    let rn = bits(raw, 19, 16) as usize;
    let reg_list = bits(raw, 15, 0) as u16;
    let mode = addressing::BlockAddressingMode::decode(pre_indexed, add);
    let base = regs.raw(rn);

    let xfer = load_store::BlockTransfer { rn, load, mode, writeback, force_user_bank, reg_list };
    let (wait, outcome) = load_store::execute_block(regs, memory, &xfer)?;

    *cycles += wait as u64 + memory.wait_multiple(base, outcome.count) as u64;
    *cycles += if load { 1 } else { memory.active_nonseq_cycles32() as u64 };

    if outcome.loaded_pc {
        debug!(
            "LDM loaded PC -> {:#010X}{}", regs.raw(Registers::PC),
            if outcome.restores_cpsr { " (exception return, SPSR restored)" } else { "" },
        );
    }
    Ok(StepOutcome::Executed)
}

fn exec_branch(regs: &mut Registers, raw: u32) -> Result<StepOutcome, CoreError> {
    let link = bit(raw, 24);
    let offset = branch::branch_offset(bits(raw, 23, 0));
    if link {
        regs.write(Registers::LR, regs.raw(Registers::PC));
    }
    let target = (regs.read(Registers::PC) as i32).wrapping_add(offset) as u32;
    regs.write(Registers::PC, target);
    Ok(StepOutcome::Executed)
}

fn exec_bx(regs: &mut Registers, raw: u32) -> Result<StepOutcome, CoreError> {
    let rm_value = regs.read(bits(raw, 3, 0) as usize);
    let (state, target) = branch::exchange_target(rm_value);
    if state != regs.cpsr().state() {
        warn!("BX switching execution state to {}", state);
    }
    regs.set_state(state);
    regs.write(Registers::PC, target);
    Ok(StepOutcome::Executed)
}

fn exec_swi<B: Board>(regs: &mut Registers, board: &mut B, raw: u32, options: &CpuOptions) -> Result<StepOutcome, CoreError> {
    let comment = bits(raw, 23, 0);
    if options.optimise_swi {
        debug!("SWI #{:#08X} dispatched via HLE board hook", comment);
        board.swi32(comment);
        Ok(StepOutcome::Executed)
    } else {
        debug!("SWI #{:#08X}: entering architectural exception", comment);
        let return_addr = regs.raw(Registers::PC);
        regs.enter_exception(Exception::SoftwareInterrupt, return_addr);
        Ok(StepOutcome::Exception(Exception::SoftwareInterrupt))
    }
}

fn exec_illegal<B: Board>(regs: &mut Registers, board: &mut B, raw: u32) -> Result<StepOutcome, CoreError> {
    board.hit_stub(raw);
    error!("undefined instruction {:#010X}; vectoring to Undefined exception", raw);
    let return_addr = regs.raw(Registers::PC);
    regs.enter_exception(Exception::UndefinedInstruction, return_addr);
    Ok(StepOutcome::Exception(Exception::UndefinedInstruction))
}

#[cfg(test)]
mod test {
    use super::*;
    use cpu::psr::{Mode, State};

    struct FlatMemory { bytes: Vec<u8> }
    impl FlatMemory {
        fn new() -> FlatMemory { FlatMemory { bytes: vec![0; 0x10000] } }
    }
    impl Memory for FlatMemory {
        fn load32(&mut self, addr: u32, _cycles: &mut u32) -> u32 {
            let a = addr as usize;
            (self.bytes[a] as u32) | ((self.bytes[a+1] as u32) << 8)
                | ((self.bytes[a+2] as u32) << 16) | ((self.bytes[a+3] as u32) << 24)
        }
        fn load16(&mut self, addr: u32, cycles: &mut u32) -> i32 { self.load_u16(addr, cycles) as i16 as i32 }
        fn load_u16(&mut self, addr: u32, _cycles: &mut u32) -> u32 {
            let a = addr as usize;
            (self.bytes[a] as u32) | ((self.bytes[a+1] as u32) << 8)
        }
        fn load8(&mut self, addr: u32, _cycles: &mut u32) -> i32 { self.bytes[addr as usize] as i8 as i32 }
        fn load_u8(&mut self, addr: u32, _cycles: &mut u32) -> u32 { self.bytes[addr as usize] as u32 }
        fn store32(&mut self, addr: u32, value: u32, _cycles: &mut u32) {
            let a = addr as usize;
            self.bytes[a] = value as u8;
            self.bytes[a+1] = (value >> 8) as u8;
            self.bytes[a+2] = (value >> 16) as u8;
            self.bytes[a+3] = (value >> 24) as u8;
        }
        fn store16(&mut self, addr: u32, value: u32, _cycles: &mut u32) {
            let a = addr as usize;
            self.bytes[a] = value as u8;
            self.bytes[a+1] = (value >> 8) as u8;
        }
        fn store8(&mut self, addr: u32, value: u32, _cycles: &mut u32) { self.bytes[addr as usize] = value as u8; }
        fn wait_multiple(&self, _addr: u32, _count: u32) -> u32 { 0 }
    }

    struct StubBoard { swi_calls: Vec<u32> }
    impl StubBoard { fn new() -> StubBoard { StubBoard { swi_calls: Vec::new() } } }
    impl Board for StubBoard {
        fn swi32(&mut self, comment: u32) { self.swi_calls.push(comment); }
    }

    fn run(regs: &mut Registers, mem: &mut FlatMemory, board: &mut StubBoard, opts: &CpuOptions, raw: u32) -> StepOutcome {
        let table = DecodeTable::build();
        let mut cycles = 0_u64;
        dispatch(regs, &table, mem, board, opts, &mut cycles, raw).unwrap()
    }

    #[test]
    fn movs_immediate_sets_n() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        // MOVS r0, #0xFF000000 -> cond=AL, 00 I 1101 S 0000 Rd=0 rotate=4 imm=0xFF
        let raw = 0xE3B0_04FF;
        run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(regs.raw(0), 0xFF00_0000);
        assert!(regs.cpsr().N());
        assert!(!regs.cpsr().Z());
        assert!(regs.cpsr().C());
    }

    #[test]
    fn adds_detects_signed_overflow() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        regs.write(1, 0x7FFF_FFFF);
        regs.write(2, 1);
        // ADDS r0, r1, r2
        let raw = 0xE091_0002;
        run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(regs.raw(0), 0x8000_0000);
        assert!(regs.cpsr().N());
        assert!(!regs.cpsr().C());
        assert!(regs.cpsr().V());
    }

    #[test]
    fn subs_zero_minus_one_borrows() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        regs.write(1, 0);
        regs.write(2, 1);
        // SUBS r0, r1, r2
        let raw = 0xE051_0002;
        run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(regs.raw(0), 0xFFFF_FFFF);
        assert!(!regs.cpsr().C());
    }

    #[test]
    fn branch_plus_eight_advances_pc_by_sixteen_from_fetch() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        regs.write(Registers::PC, 0x1000); // raw PC == fetch_addr + 4 per step()'s advance
        // B #2 (word count), cond=AL
        let raw = 0xEA00_0002;
        run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(regs.raw(Registers::PC), 0x100C);
    }

    #[test]
    fn bx_switches_to_thumb() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        regs.write(0, 0x0800_0101);
        // BX r0
        let raw = 0xE12F_FF10;
        run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(regs.cpsr().state(), State::THUMB);
        assert_eq!(regs.raw(Registers::PC), 0x0800_0100);
    }

    #[test]
    fn ldm_ia_loads_three_registers_and_writes_back() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        mem.store32(0x1000, 1, &mut 0);
        mem.store32(0x1004, 3, &mut 0);
        mem.store32(0x1008, 5, &mut 0);
        regs.write(0, 0x1000);
        // LDMIA r0!, {r1,r3,r5}
        let raw = 0xE8B0_002A;
        run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(regs.raw(1), 1);
        assert_eq!(regs.raw(3), 3);
        assert_eq!(regs.raw(5), 5);
        assert_eq!(regs.raw(0), 0x100C);
    }

    #[test]
    fn swi_with_optimise_flag_calls_board_instead_of_vectoring() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions { optimise_swi: true, ..CpuOptions::default() };
        // SWI #5
        let raw = 0xEF00_0005;
        let outcome = run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(outcome, StepOutcome::Executed);
        assert_eq!(board.swi_calls, vec![5]);
        assert_eq!(regs.cpsr().mode(), Mode::User);
    }

    #[test]
    fn swi_without_optimise_flag_vectors_to_supervisor() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        regs.write(Registers::PC, 0x1000);
        let raw = 0xEF00_0005;
        let outcome = run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(outcome, StepOutcome::Exception(Exception::SoftwareInterrupt));
        assert_eq!(regs.cpsr().mode(), Mode::Supervisor);
        assert_eq!(regs.raw(Registers::LR), 0x1000);
    }

    #[test]
    fn unknown_encoding_vectors_to_undefined() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        // opcode[27:25]=110, opcode[4]=1: reserved by the architecture (Unknown class).
        let raw = 0xEC00_0010;
        let outcome = run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(outcome, StepOutcome::Exception(Exception::UndefinedInstruction));
        assert_eq!(regs.cpsr().mode(), Mode::Undefined);
    }

    #[test]
    fn condition_false_only_charges_prefetch() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard::new();
        let opts = CpuOptions::default();
        regs.write(0, 0xAAAA);
        // MOVEQ r0, #0 with Z clear -> should not run
        let raw = 0x03A0_0000;
        let outcome = run(&mut regs, &mut mem, &mut board, &opts, raw);
        assert_eq!(outcome, StepOutcome::ConditionFailed);
        assert_eq!(regs.raw(0), 0xAAAA);
    }
}


/*
Licensed to the Apache Software Foundation (ASF) under one
or more contributor license agreements.  See the NOTICE file
distributed with this work for additional information
regarding copyright ownership.  The ASF licenses this file
to you under the Apache License, Version 2.0 (the
"License"); you may not use this file except in compliance
with the License.  You may obtain a copy of the License at

  http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing,
software distributed under the License is distributed on an
"AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
KIND, either express or implied.  See the License for the
specific language governing permissions and limitations
under the License.
*/
