// License below.
//! Implements `MRS` and `MSR`/`MSRI`.

use super::psr::CPSR;
use super::registers::Registers;

/// Which PSR an `MRS`/`MSR` instruction targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PsrTarget { Cpsr, Spsr }

/// `Rd = CPSR` or `Rd = SPSR`.
///
/// Reading SPSR in User/System mode is architecturally undefined; this
/// implementation reads back the live CPSR instead of erroring, matching
/// §7's "never halts unilaterally" contract (and logging the fact so a
/// host that cares can see it happened).
pub fn mrs(regs: &Registers, target: PsrTarget) -> u32 {
    match target {
        PsrTarget::Cpsr => regs.cpsr().0,
        PsrTarget::Spsr => match regs.spsr() {
            Ok(psr) => psr.0,
            Err(_) => {
                warn!("MRS from SPSR in a mode with no SPSR bank; reading CPSR instead.");
                regs.cpsr().0
            },
        },
    }
}

/// `MSR`/`MSRI`: writes `value`, masked by `field_mask`, into the target
/// PSR. `field_mask` is the union of `CPSR::USER_MASK` (flags) and
/// `CPSR::PRIV_MASK` (control byte) selected by the instruction's two mask
/// bits.
///
/// Bits of `field_mask` covering the privileged byte are silently dropped
/// when the CPU is in User mode, per §7's privilege-violation rule; a
/// User-mode write of the flag byte alone still applies normally.
/// Likewise, writing SPSR from User/System mode (no SPSR bank) is a silent
/// no-op.
pub fn msr(regs: &mut Registers, target: PsrTarget, value: u32, field_mask: u32) {
    let in_user_mode = regs.cpsr().mode() == super::psr::Mode::User;
    let mut mask = field_mask;
    if in_user_mode {
        if mask & CPSR::PRIV_MASK != 0 {
            warn!("MSR: privileged byte write attempted from User mode; ignoring those bits.");
        }
        mask &= CPSR::USER_MASK;
    }

    match target {
        PsrTarget::Cpsr => {
            let current = regs.cpsr().0;
            let next = (current & !mask) | (value & mask);
            regs.set_cpsr_raw(next);
        },
        PsrTarget::Spsr => {
            match regs.spsr() {
                Ok(current) => {
                    let next = (current.0 & !mask) | (value & mask);
                    let _ = regs.set_spsr_raw(next);
                },
                Err(_) => warn!("MSR to SPSR in a mode with no SPSR bank; ignored."),
            }
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cpu::registers::Registers;
    use cpu::psr::Mode;

    #[test]
    fn msr_flags_only_touches_top_byte() {
        let mut regs = Registers::new();
        regs.set_mode(Mode::Supervisor);
        msr(&mut regs, PsrTarget::Cpsr, 0xF000_0000, CPSR::USER_MASK);
        assert!(regs.cpsr().N());
        assert!(regs.cpsr().Z());
        assert!(regs.cpsr().C());
        assert!(regs.cpsr().V());
        assert_eq!(regs.cpsr().mode(), Mode::Supervisor);
    }

    #[test]
    fn msr_privileged_byte_ignored_from_user_mode() {
        let mut regs = Registers::new(); // defaults to User
        msr(&mut regs, PsrTarget::Cpsr, CPSR::MODE_SUPERVISOR, CPSR::PRIV_MASK);
        assert_eq!(regs.cpsr().mode(), Mode::User);
    }

    #[test]
    fn msr_privileged_byte_applies_from_privileged_mode() {
        let mut regs = Registers::new();
        regs.set_mode(Mode::Supervisor);
        msr(&mut regs, PsrTarget::Cpsr, CPSR::MODE_SYSTEM, CPSR::PRIV_MASK);
        assert_eq!(regs.cpsr().mode(), Mode::System);
    }

    #[test]
    fn mrs_spsr_in_user_mode_falls_back_to_cpsr() {
        let regs = Registers::new();
        assert_eq!(mrs(&regs, PsrTarget::Spsr), regs.cpsr().0);
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
