// License below.
//! The ARMv4T (A32) CPU core: register file, instruction semantics, and the
//! `step()` driver that ties them together.
//!
//! Everything under this module is organized by architectural concern
//! (condition codes, the barrel shifter, the ALU, the multiply unit, the
//! load/store unit, branches, PSR transfer, exceptions) rather than by
//! instruction mnemonic - most ARM mnemonics are a thin combination of
//! several of these, and decoding them one function per mnemonic would
//! multiply the same logic across dozens of near-duplicate handlers.

pub mod condition;
pub mod psr;
pub mod shifter;
pub mod dpop;
pub mod exception;
pub mod instruction;
pub mod decode_table;
pub mod registers;
pub mod addressing;
pub mod alu;
pub mod multiply;
pub mod load_store;
pub mod branch;
pub mod psr_transfer;
pub mod step;

use error::CoreError;
use memory::Memory;
use board::Board;
use self::psr::{CPSR, Mode, State};
use self::registers::Registers;
use self::decode_table::DecodeTable;
use self::exception::Exception;
pub use self::step::StepOutcome;

/// Construction-time configuration for an `Arm7Tdmi`.
///
/// There is no file-based configuration surface at this layer (see the
/// crate root docs) - everything a host can tune is passed in here, once,
/// when the CPU is built.
#[derive(Debug, Clone, Copy)]
pub struct CpuOptions {
    /// When `true`, `SWI` calls the `Board`'s `swi32` hook directly instead
    /// of performing the architectural exception entry. A host implementing
    /// its own BIOS HLE wants this; a host that actually emulates the
    /// Supervisor-mode handler wants it `false`.
    pub optimise_swi: bool,

    /// The privilege mode the CPU starts in. Plain construction normally
    /// wants `Mode::User`; a host that skips `reset()` and starts execution
    /// mid-BIOS may want `Mode::Supervisor` instead.
    pub initial_mode: Mode,
}

impl Default for CpuOptions {
    fn default() -> CpuOptions {
        CpuOptions { optimise_swi: false, initial_mode: Mode::User }
    }
}

/// A fetch-decode-execute interpreter for the ARMv4T instruction set.
///
/// Owns the register file, the cycle counter, and the decode table; knows
/// nothing about what it's plugged into beyond the `Memory` and `Board`
/// collaborators passed to `step()`.
pub struct Arm7Tdmi {
    regs: Registers,
    table: DecodeTable,
    options: CpuOptions,
    cycles: u64,
}

impl Arm7Tdmi {
    /// Builds a CPU with default options: User mode, ARM state, all
    /// registers and flags clear, architectural `SWI` exception entry (no
    /// HLE short-circuit).
    pub fn new() -> Arm7Tdmi {
        Arm7Tdmi::with_options(CpuOptions::default())
    }

    /// Builds a CPU with the given options.
    pub fn with_options(options: CpuOptions) -> Arm7Tdmi {
        let mut regs = Registers::new();
        regs.set_mode(options.initial_mode);
        Arm7Tdmi {
            regs,
            table: DecodeTable::build(),
            options,
            cycles: 0,
        }
    }

    /// Drives the architectural reset sequence (PC=0, Supervisor mode, ARM
    /// state, IRQ/FIQ disabled) and zeroes the cycle counter. GPR contents
    /// outside PC are left untouched, matching real hardware.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.cycles = 0;
    }

    /// Runs one instruction: services a pending IRQ if one is asserted and
    /// not masked, otherwise fetches at the current PC, advances PC by 4,
    /// and dispatches through the decode table.
    ///
    /// # Errors
    /// Propagates any `CoreError` an executed instruction's validation
    /// rejects (invalid register reuse, PC used where forbidden, and so
    /// on) - conditions the architecture itself defines as tolerable
    /// (a false/`NV` condition, a privileged PSR write from User mode) are
    /// handled internally and never reach the caller as `Err`.
    pub fn step<M: Memory, B: Board>(&mut self, memory: &mut M, board: &mut B) -> Result<StepOutcome, CoreError> {
        if board.irq_line() && !self.regs.cpsr().irq_disabled() {
            debug!("servicing pending IRQ at PC={:#010X}", self.regs.raw(Registers::PC));
            let return_addr = self.regs.raw(Registers::PC);
            self.regs.enter_exception(Exception::NormalInterrupt, return_addr);
            return Ok(StepOutcome::Exception(Exception::NormalInterrupt));
        }

        let fetch_addr = self.regs.raw(Registers::PC);
        let (raw, fetch_cycles) = fetch_instruction_word(memory, fetch_addr);
        self.cycles += fetch_cycles as u64;
        self.regs.write(Registers::PC, fetch_addr.wrapping_add(4));

        step::dispatch(&mut self.regs, &self.table, memory, board, &self.options, &mut self.cycles, raw)
    }

    /// Reads a register's literal stored value (no `PC+8` execution-time
    /// adjustment - see `Registers::raw`).
    pub fn reg(&self, i: usize) -> u32 {
        self.regs.raw(i)
    }

    /// Writes a register with no offsetting or mode-switch side effects.
    pub fn set_reg(&mut self, i: usize, value: u32) {
        self.regs.write(i, value);
    }

    /// The live CPSR.
    pub fn cpsr(&self) -> CPSR {
        self.regs.cpsr()
    }

    /// Overwrites the whole CPSR (reserved bits included), re-banking
    /// registers if the mode field changes.
    pub fn set_cpsr(&mut self, bits: u32) {
        self.regs.set_cpsr_raw(bits);
    }

    /// Atomically switches privilege mode, swapping in the banked copies of
    /// r8-r14 and SPSR for `mode`.
    pub fn set_privilege_mode(&mut self, mode: Mode) {
        self.regs.set_mode(mode);
    }

    /// Sets the execution state (ARM or THUMB) bit of CPSR directly, with
    /// no pipeline-refill side effect - each `step()` simply fetches
    /// whatever state is active at fetch time, so there is no instruction
    /// queue to flush.
    pub fn set_execution_mode(&mut self, state: State) {
        self.regs.set_state(state);
    }

    /// Total cycles charged since construction or the last `reset()`.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// Fetches the 32-bit instruction word at `addr`, preferring the memory
/// collaborator's `active_region` slice (when it covers `addr`) over a full
/// `load32` call. Returns `(word, wait_cycles)`.
fn fetch_instruction_word<M: Memory>(memory: &mut M, addr: u32) -> (u32, u32) {
    if let Some(region) = memory.active_region() {
        let index = (addr & memory.active_mask()) as usize;
        if index + 4 <= region.len() {
            let word = (region[index] as u32)
                | ((region[index + 1] as u32) << 8)
                | ((region[index + 2] as u32) << 16)
                | ((region[index + 3] as u32) << 24);
            return (word, 0);
        }
    }
    let mut cycles = 0_u32;
    let word = memory.load32(addr, &mut cycles);
    (word, cycles)
}

#[cfg(test)]
mod test {
    use super::*;

    struct FlatMemory { bytes: Vec<u8> }
    impl FlatMemory {
        fn new() -> FlatMemory { FlatMemory { bytes: vec![0; 0x1_0000] } }
        fn write_word(&mut self, addr: u32, value: u32) {
            let a = addr as usize;
            self.bytes[a] = value as u8;
            self.bytes[a + 1] = (value >> 8) as u8;
            self.bytes[a + 2] = (value >> 16) as u8;
            self.bytes[a + 3] = (value >> 24) as u8;
        }
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
        fn store32(&mut self, addr: u32, value: u32, _cycles: &mut u32) { self.write_word(addr, value); }
        fn store16(&mut self, addr: u32, value: u32, _cycles: &mut u32) {
            let a = addr as usize;
            self.bytes[a] = value as u8;
            self.bytes[a+1] = (value >> 8) as u8;
        }
        fn store8(&mut self, addr: u32, value: u32, _cycles: &mut u32) { self.bytes[addr as usize] = value as u8; }
        fn wait_multiple(&self, _addr: u32, _count: u32) -> u32 { 0 }
    }

    struct StubBoard { irq: bool }
    impl Board for StubBoard {
        fn swi32(&mut self, _comment: u32) {}
        fn irq_line(&self) -> bool { self.irq }
    }

    #[test]
    fn new_cpu_starts_in_user_mode_arm_state() {
        let cpu = Arm7Tdmi::new();
        assert_eq!(cpu.cpsr().mode(), Mode::User);
        assert_eq!(cpu.cpsr().state(), State::ARM);
    }

    #[test]
    fn reset_enters_supervisor_mode_at_pc_zero() {
        let mut cpu = Arm7Tdmi::new();
        cpu.set_reg(15, 0x8000);
        cpu.reset();
        assert_eq!(cpu.reg(15), 0);
        assert_eq!(cpu.cpsr().mode(), Mode::Supervisor);
        assert!(cpu.cpsr().irq_disabled());
    }

    #[test]
    fn step_executes_a_nop_shaped_mov_and_advances_pc() {
        let mut cpu = Arm7Tdmi::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard { irq: false };
        mem.write_word(0, 0xE1A0_0000); // MOV r0, r0
        let outcome = cpu.step(&mut mem, &mut board).unwrap();
        assert_eq!(outcome, StepOutcome::Executed);
        assert_eq!(cpu.reg(15), 4);
    }

    #[test]
    fn pending_irq_is_serviced_before_the_next_fetch() {
        let mut cpu = Arm7Tdmi::new();
        let mut mem = FlatMemory::new();
        let mut board = StubBoard { irq: true };
        mem.write_word(0, 0xE1A0_0000);
        let outcome = cpu.step(&mut mem, &mut board).unwrap();
        assert_eq!(outcome, StepOutcome::Exception(Exception::NormalInterrupt));
        assert_eq!(cpu.cpsr().mode(), Mode::IRQ);
    }

    #[test]
    fn optimise_swi_option_is_honored() {
        let opts = CpuOptions { optimise_swi: true, ..CpuOptions::default() };
        let mut cpu = Arm7Tdmi::with_options(opts);
        let mut mem = FlatMemory::new();
        let mut board = StubBoard { irq: false };
        mem.write_word(0, 0xEF00_0001); // SWI #1
        let outcome = cpu.step(&mut mem, &mut board).unwrap();
        assert_eq!(outcome, StepOutcome::Executed);
        assert_eq!(cpu.cpsr().mode(), Mode::User);
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
