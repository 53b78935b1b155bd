// License below.
//! Implements the register file: 16 general-purpose registers, CPSR, the
//! per-mode banked copies of r8-r14 and SPSR, and the bank-swap helper that
//! keeps them consistent across a mode change.

use error::CoreError;
use super::psr::{CPSR, Mode, State};
use super::exception::Exception;

/// Index into the per-mode bank arrays. User and System deliberately share
/// index 0 - they share r0-r14 and neither has an SPSR of its own.
fn bank_index(mode: Mode) -> usize {
    match mode {
        Mode::User | Mode::System => 0,
        Mode::FIQ                 => 1,
        Mode::IRQ                 => 2,
        Mode::Supervisor          => 3,
        Mode::Abort               => 4,
        Mode::Undefined           => 5,
    }
}

/// The CPU's register file.
///
/// `gpr` is always the *live* view: whatever bank the current mode selects
/// for r8-r14 is what's sitting in `gpr[8..=14]` right now. The `*_bank`
/// arrays hold the other modes' copies, swapped in and out by `set_mode`.
pub struct Registers {
    gpr: [u32; 16],
    cpsr: CPSR,
    r8_12_fiq: [u32; 5],
    r8_12_other: [u32; 5],
    r13_bank: [u32; 6],
    r14_bank: [u32; 6],
    spsr_bank: [CPSR; 6],
}

impl Registers {
    /// Register index for the stack pointer. May be used as a plain GPR in
    /// ARM state.
    pub const SP: usize = 13;

    /// Register index for the link register. Usually holds a return
    /// address; may be used as a plain GPR in ARM state.
    pub const LR: usize = 14;

    /// Register index for the program counter.
    pub const PC: usize = 15;

    /// Builds a register file with every GPR, CPSR and SPSR zeroed (CPSR
    /// zero decodes to User mode, ARM state, all flags clear).
    pub fn new() -> Registers {
        Registers {
            gpr: [0; 16],
            cpsr: CPSR::default(),
            r8_12_fiq: [0; 5],
            r8_12_other: [0; 5],
            r13_bank: [0; 6],
            r14_bank: [0; 6],
            spsr_bank: [CPSR::default(); 6],
        }
    }

    /// Reads a register, applying the ARM "PC reads as address+8" rule
    /// uniformly - every caller (ALU, shifter, load/store addressing,
    /// branch) goes through this instead of indexing `gpr` directly, so the
    /// pipeline offset lives in exactly one place.
    pub fn read(&self, i: usize) -> u32 {
        if i == Registers::PC { self.gpr[i].wrapping_add(4) } else { self.gpr[i] }
    }

    /// Writes a register with no offsetting. Callers that write r15 are
    /// responsible for whatever alignment or mode-switch behavior their
    /// instruction defines.
    pub fn write(&mut self, i: usize, value: u32) {
        self.gpr[i] = value;
    }

    /// Reads a register's literal stored value, with no `+8` PC
    /// adjustment. This is the view a host embedding the CPU sees (and
    /// what `Arm7Tdmi::reg(15)` reports) - the `+8` rule in `read` is an
    /// ARM *instruction-semantics* quirk, not a property of the register
    /// file itself.
    pub fn raw(&self, i: usize) -> u32 {
        self.gpr[i]
    }

    /// Reads r8-r14 through the *User* bank regardless of the current
    /// mode, as `LDM`/`STM`'s `S` bit requires for the registers in its
    /// list. r0-r7 and r15 are unaffected - they're not banked at all.
    pub fn read_user_bank(&self, i: usize) -> u32 {
        match i {
            0...7 | 15 => self.read(i),
            8...12 => if self.cpsr.mode() == Mode::FIQ { self.r8_12_other[i - 8] } else { self.gpr[i] },
            13 | 14 => {
                if self.cpsr.mode() == Mode::User || self.cpsr.mode() == Mode::System {
                    self.gpr[i]
                } else if i == 13 {
                    self.r13_bank[bank_index(Mode::User)]
                } else {
                    self.r14_bank[bank_index(Mode::User)]
                }
            },
            _ => unreachable!(),
        }
    }

    /// Writes r8-r14 through the *User* bank regardless of the current
    /// mode. See `read_user_bank`.
    pub fn write_user_bank(&mut self, i: usize, value: u32) {
        match i {
            0...7 | 15 => self.write(i, value),
            8...12 => if self.cpsr.mode() == Mode::FIQ { self.r8_12_other[i - 8] = value; } else { self.gpr[i] = value; },
            13 | 14 => {
                if self.cpsr.mode() == Mode::User || self.cpsr.mode() == Mode::System {
                    self.gpr[i] = value;
                } else if i == 13 {
                    self.r13_bank[bank_index(Mode::User)] = value;
                } else {
                    self.r14_bank[bank_index(Mode::User)] = value;
                }
            },
            _ => unreachable!(),
        }
    }

    /// The live CPSR.
    pub fn cpsr(&self) -> CPSR { self.cpsr }

    /// Overwrites the whole CPSR, reserved bits included, and re-banks if
    /// the mode field changed. This is the path exception entry and a
    /// privileged `MSR` (or an `S`-form data-processing op writing SPSR
    /// into CPSR) use.
    pub fn set_cpsr_raw(&mut self, bits: u32) {
        let mut next = CPSR(bits);
        next.clear_reserved_bits();
        let new_mode = next.mode();
        if new_mode != self.cpsr.mode() {
            self.rebank(new_mode);
        }
        self.cpsr = next;
    }

    /// Switches privilege mode, swapping banked registers into `gpr` so
    /// that the next instruction sees r8-r14 (and SPSR) for `new_mode`.
    /// Leaves every other CPSR field untouched.
    pub fn set_mode(&mut self, new_mode: Mode) {
        if new_mode != self.cpsr.mode() {
            self.rebank(new_mode);
        }
        self.cpsr.set_mode(new_mode);
    }

    /// Sets the execution state (ARM/THUMB) bit of CPSR.
    pub fn set_state(&mut self, state: State) {
        self.cpsr.set_state(state);
    }

    fn rebank(&mut self, new_mode: Mode) {
        let old_mode = self.cpsr.mode();
        let old_bi = bank_index(old_mode);
        let new_bi = bank_index(new_mode);

        self.r13_bank[old_bi] = self.gpr[13];
        self.r14_bank[old_bi] = self.gpr[14];
        self.gpr[13] = self.r13_bank[new_bi];
        self.gpr[14] = self.r14_bank[new_bi];

        let was_fiq = old_mode == Mode::FIQ;
        let now_fiq = new_mode == Mode::FIQ;
        if was_fiq != now_fiq {
            if now_fiq {
                for i in 0..5 { self.r8_12_other[i] = self.gpr[8 + i]; }
                for i in 0..5 { self.gpr[8 + i] = self.r8_12_fiq[i]; }
            } else {
                for i in 0..5 { self.r8_12_fiq[i] = self.gpr[8 + i]; }
                for i in 0..5 { self.gpr[8 + i] = self.r8_12_other[i]; }
            }
        }
    }

    /// Reads the SPSR of the current mode.
    ///
    /// # Errors
    /// `PrivilegedRegisterAccess` in User or System mode, which have no
    /// SPSR of their own. Instruction-level `MRS`/`MSR` handlers treat this
    /// as a silent no-op per §7 of the spec; this accessor itself stays
    /// strict so misuse from elsewhere in the crate is caught.
    pub fn spsr(&self) -> Result<CPSR, CoreError> {
        let mode = self.cpsr.mode();
        if !mode.has_spsr() { return Err(CoreError::PrivilegedRegisterAccess); }
        Ok(self.spsr_bank[bank_index(mode)])
    }

    /// Overwrites the SPSR of the current mode. See `spsr` for the error
    /// contract.
    pub fn set_spsr_raw(&mut self, bits: u32) -> Result<(), CoreError> {
        let mode = self.cpsr.mode();
        if !mode.has_spsr() { return Err(CoreError::PrivilegedRegisterAccess); }
        let bi = bank_index(mode);
        self.spsr_bank[bi] = CPSR(bits);
        Ok(())
    }

    /// Drives the architectural exception entry sequence: banks into the
    /// exception's mode, saves the pre-entry CPSR to the new mode's SPSR,
    /// sets LR to `return_value`, forces ARM state, masks IRQ (and FIQ
    /// where the exception demands it), and sets PC to the vector.
    pub fn enter_exception(&mut self, ex: Exception, return_value: u32) {
        let new_mode = ex.mode_on_entry();
        let saved_cpsr = self.cpsr;
        self.set_mode(new_mode);
        self.gpr[Registers::LR] = return_value;
        self.spsr_bank[bank_index(new_mode)] = saved_cpsr;
        self.cpsr.set_state(State::ARM);
        self.cpsr.disable_irq();
        if ex.disable_fiq_on_entry() { self.cpsr.disable_fiq(); }
        self.gpr[Registers::PC] = ex.vector_address();
    }

    /// Resets every register to its power-on state: PC=0, Supervisor mode,
    /// ARM state, IRQ and FIQ disabled. Other GPRs and banks are left as
    /// they were (matching real hardware, which does not clear the
    /// register file on reset).
    pub fn reset(&mut self) {
        self.gpr[Registers::PC] = 0;
        self.set_mode(Mode::Supervisor);
        self.cpsr.set_state(State::ARM);
        self.cpsr.disable_irq();
        self.cpsr.disable_fiq();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cpu::psr::{Mode, State};

    #[test]
    fn pc_reads_eight_ahead() {
        let mut r = Registers::new();
        r.write(Registers::PC, 0x1000);
        assert_eq!(r.read(Registers::PC), 0x1008);
    }

    #[test]
    fn mode_switch_banks_and_restores_r13_r14() {
        let mut r = Registers::new();
        r.write(13, 0xAAAA);
        r.write(14, 0xBBBB);
        r.set_mode(Mode::IRQ);
        r.write(13, 0x1111);
        r.write(14, 0x2222);
        r.set_mode(Mode::User);
        assert_eq!(r.read(13), 0xAAAA);
        assert_eq!(r.read(14), 0xBBBB);
        r.set_mode(Mode::IRQ);
        assert_eq!(r.read(13), 0x1111);
        assert_eq!(r.read(14), 0x2222);
    }

    #[test]
    fn fiq_banks_r8_through_r12() {
        let mut r = Registers::new();
        r.write(8, 0x1);
        r.set_mode(Mode::FIQ);
        r.write(8, 0x2);
        r.set_mode(Mode::User);
        assert_eq!(r.read(8), 0x1);
        r.set_mode(Mode::FIQ);
        assert_eq!(r.read(8), 0x2);
    }

    #[test]
    fn user_and_system_share_bank() {
        let mut r = Registers::new();
        r.write(13, 0x1234);
        r.set_mode(Mode::System);
        assert_eq!(r.read(13), 0x1234);
        r.write(13, 0x5678);
        r.set_mode(Mode::User);
        assert_eq!(r.read(13), 0x5678);
    }

    #[test]
    fn spsr_is_privileged() {
        let r = Registers::new();
        assert!(r.spsr().is_err());
    }

    #[test]
    fn spsr_accessible_after_mode_switch() {
        let mut r = Registers::new();
        r.set_mode(Mode::Supervisor);
        assert!(r.spsr().is_ok());
    }

    #[test]
    fn exception_entry_sets_lr_spsr_and_vector() {
        let mut r = Registers::new();
        r.write(Registers::PC, 0x1000);
        r.enter_exception(Exception::SoftwareInterrupt, 0x1004);
        assert_eq!(r.read(Registers::PC), 0x1008); // vector 0x08, then +8 on read
        assert_eq!(r.cpsr().mode(), Mode::Supervisor);
        assert_eq!(r.read(Registers::LR), 0x1004);
        assert!(r.cpsr().irq_disabled());
        assert_eq!(r.cpsr().state(), State::ARM);
    }

    #[test]
    fn user_bank_read_bypasses_current_mode_for_r13() {
        let mut r = Registers::new();
        r.write(13, 0xCAFE);
        r.set_mode(Mode::IRQ);
        r.write(13, 0xBEEF);
        assert_eq!(r.read_user_bank(13), 0xCAFE);
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
