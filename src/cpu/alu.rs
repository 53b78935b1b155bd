// License below.
//! Implements the 16 data-processing ALU operations shared by every
//! `DataProcessing`-class instruction, independent of which of the 18
//! concrete shifter forms produced operand 2.

use super::dpop::ArmDPOP;

/// The result of applying a data-processing opcode to its operands.
pub struct AluResult {
    /// The computed value. Discarded by the caller for `TST`/`TEQ`/`CMP`/
    /// `CMN`, which only ever run to update flags.
    pub value: u32,

    /// Whether this opcode writes `value` back to `Rd` (false only for the
    /// four comparison ops).
    pub write_back: bool,

    /// The carry flag an `S`-variant of this opcode would set.
    pub carry: bool,

    /// The overflow flag an `S`-variant would set, or `None` for the
    /// logical ops (`AND`/`EOR`/`ORR`/`BIC`/`MOV`/`MVN`/`TST`/`TEQ`), which
    /// leave V untouched.
    pub overflow: Option<bool>,
}

/// Runs `op` against `(rn, op2)`.
///
/// `shifter_carry` is the carry-out the barrel shifter produced for op2
/// (used verbatim by the logical ops' `S`-variant); `carry_in` is CPSR.C
/// before this instruction (the input to `ADC`/`SBC`/`RSC`).
pub fn execute(op: ArmDPOP, rn: u32, op2: u32, shifter_carry: bool, carry_in: bool) -> AluResult {
    match op {
        ArmDPOP::AND => logical(rn & op2, true, shifter_carry),
        ArmDPOP::TST => logical(rn & op2, false, shifter_carry),
        ArmDPOP::EOR => logical(rn ^ op2, true, shifter_carry),
        ArmDPOP::TEQ => logical(rn ^ op2, false, shifter_carry),
        ArmDPOP::ORR => logical(rn | op2, true, shifter_carry),
        ArmDPOP::BIC => logical(rn & !op2, true, shifter_carry),
        ArmDPOP::MOV => logical(op2, true, shifter_carry),
        ArmDPOP::MVN => logical(!op2, true, shifter_carry),

        ArmDPOP::ADD => arithmetic(add_with_carry(rn, op2, false), true),
        ArmDPOP::CMN => arithmetic(add_with_carry(rn, op2, false), false),
        ArmDPOP::ADC => arithmetic(add_with_carry(rn, op2, carry_in), true),

        ArmDPOP::SUB => arithmetic(add_with_carry(rn, !op2, true), true),
        ArmDPOP::CMP => arithmetic(add_with_carry(rn, !op2, true), false),
        ArmDPOP::SBC => arithmetic(add_with_carry(rn, !op2, carry_in), true),

        ArmDPOP::RSB => arithmetic(add_with_carry(op2, !rn, true), true),
        ArmDPOP::RSC => arithmetic(add_with_carry(op2, !rn, carry_in), true),
    }
}

fn logical(value: u32, write_back: bool, carry: bool) -> AluResult {
    AluResult { value, write_back, carry, overflow: None }
}

fn arithmetic((value, carry, overflow): (u32, bool, bool), write_back: bool) -> AluResult {
    AluResult { value, write_back, carry, overflow: Some(overflow) }
}

/// The ARM "add with carry" primitive every arithmetic op reduces to:
/// `SUB`/`SBC`/`RSB`/`RSC`/`CMP` all pass `!b` and drive `carry_in` from
/// either a literal `true` or CPSR.C, which is exactly how the hardware's
/// shared adder/subtracter implements two's-complement subtraction.
///
/// Returns `(result, carry_out, signed_overflow)`.
fn add_with_carry(a: u32, b: u32, carry_in: bool) -> (u32, bool, bool) {
    let sum = (a as u64) + (b as u64) + (carry_in as u64);
    let result = sum as u32;
    let carry_out = sum > 0xFFFF_FFFF;
    let same_operand_sign = ((a ^ b) >> 31) & 1 == 0;
    let sign_flipped = ((a ^ result) >> 31) & 1 == 1;
    let overflow = same_operand_sign && sign_flipped;
    (result, carry_out, overflow)
}

#[cfg(test)]
mod test {
    use super::*;
    use cpu::dpop::ArmDPOP;

    #[test]
    fn adds_set_carry_and_overflow_on_signed_wrap() {
        let r = execute(ArmDPOP::ADD, 0x7FFF_FFFF, 1, false, false);
        assert_eq!(r.value, 0x8000_0000);
        assert_eq!(r.carry, false);
        assert_eq!(r.overflow, Some(true));
    }

    #[test]
    fn sub_zero_minus_one_borrows() {
        let r = execute(ArmDPOP::SUB, 0, 1, false, false);
        assert_eq!(r.value, 0xFFFF_FFFF);
        assert_eq!(r.carry, false); // borrow occurred -> C clear
        assert_eq!(r.overflow, Some(false));
    }

    #[test]
    fn cmp_does_not_write_back() {
        let r = execute(ArmDPOP::CMP, 5, 5, false, false);
        assert_eq!(r.write_back, false);
        assert_eq!(r.value, 0);
    }

    #[test]
    fn logical_ops_leave_overflow_untouched() {
        let r = execute(ArmDPOP::AND, 0xF, 0xF, true, false);
        assert_eq!(r.overflow, None);
        assert_eq!(r.carry, true);
    }

    #[test]
    fn adc_folds_in_carry_in() {
        let r = execute(ArmDPOP::ADC, 1, 1, false, true);
        assert_eq!(r.value, 3);
    }

    #[test]
    fn rsb_swaps_operands() {
        let r = execute(ArmDPOP::RSB, 1, 5, false, false);
        assert_eq!(r.value, 4);
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
