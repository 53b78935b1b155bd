// License below.
//! Implements the barrel shifter (addressing mode 1) shared by
//! data-processing and some load/store addressing forms.

use std::fmt;

/// A decoded barrel-shifter operation.
///
/// `_Imm` variants shift by a 5-bit immediate baked into the instruction;
/// `_Reg` variants shift by the low byte of a register read at execution
/// time. `NOP`, `LSR_32`, and `ASR_32` are the special immediate-shift-by-
/// zero encodings the architecture repurposes (see §4.2 of the module this
/// was built from): `LSL #0` is a literal no-op, `LSR #0` means `LSR #32`,
/// and `ASR #0` means `ASR #32`. `ROR #0` instead means `RRX`.
#[derive(Debug, PartialEq, Clone, Copy)]
#[allow(non_camel_case_types)]
pub enum ArmBSOP {
    #[doc = "Logical shift left by an immediate."]      LSL_Imm(u32),
    #[doc = "Logical shift right by an immediate."]     LSR_Imm(u32),
    #[doc = "Arithmetic shift right by an immediate."]  ASR_Imm(u32),
    #[doc = "Rotate right by an immediate."]            ROR_Imm(u32),
    #[doc = "No shift (`LSL #0`)."]                     NOP,
    #[doc = "Logical shift right by 32 (`LSR #0`)."]    LSR_32,
    #[doc = "Arithmetic shift right by 32 (`ASR #0`)."] ASR_32,
    #[doc = "Rotate right extended through carry."]     RRX,
    #[doc = "Logical shift left by a register."]        LSL_Reg(usize),
    #[doc = "Logical shift right by a register."]       LSR_Reg(usize),
    #[doc = "Arithmetic shift right by a register."]    ASR_Reg(usize),
    #[doc = "Rotate right by a register."]               ROR_Reg(usize),
}

impl ArmBSOP {
    /// Decodes an immediate-shift form. `op` selects LSL/LSR/ASR/ROR;
    /// `imm` is the raw 5-bit shift amount (0..=31).
    pub fn decode_immediate(op: u32, imm: u32) -> ArmBSOP {
        debug_assert!(imm < 32);
        match op & 0b11 {
            0 => if imm == 0 { ArmBSOP::NOP    } else { ArmBSOP::LSL_Imm(imm) },
            1 => if imm == 0 { ArmBSOP::LSR_32 } else { ArmBSOP::LSR_Imm(imm) },
            2 => if imm == 0 { ArmBSOP::ASR_32 } else { ArmBSOP::ASR_Imm(imm) },
            3 => if imm == 0 { ArmBSOP::RRX    } else { ArmBSOP::ROR_Imm(imm) },
            _ => unreachable!(),
        }
    }

    /// Decodes a register-shift form. `op` selects LSL/LSR/ASR/ROR; `reg`
    /// is the GPR index supplying the shift amount.
    pub fn decode_register(op: u32, reg: usize) -> ArmBSOP {
        debug_assert!(reg < 16);
        match op & 0b11 {
            0 => ArmBSOP::LSL_Reg(reg),
            1 => ArmBSOP::LSR_Reg(reg),
            2 => ArmBSOP::ASR_Reg(reg),
            3 => ArmBSOP::ROR_Reg(reg),
            _ => unreachable!(),
        }
    }

    /// Applies this shift to `value`, producing `(operand, carry_out)`.
    ///
    /// `reg_value` supplies the register-held shift amount for `_Reg`
    /// variants (ignored otherwise); `carry_in` is the current CPSR carry
    /// flag, needed by `RRX` and by every "shift amount is effectively
    /// zero" case, which the architecture defines as "pass the operand and
    /// the carry flag through unchanged".
    pub fn apply(self, value: i32, reg_value: u32, carry_in: bool) -> (i32, bool) {
        match self {
            ArmBSOP::LSL_Imm(x) => (value << x, 0 != ((value >> (32 - x)) & 0b1)),
            ArmBSOP::LSR_Imm(x) => (((value as u32) >> x) as i32, 0 != ((value >> (x - 1)) & 0b1)),
            ArmBSOP::ASR_Imm(x) => (value >> x, 0 != ((value >> (x - 1)) & 0b1)),
            ArmBSOP::ROR_Imm(x) => (value.rotate_right(x), 0 != ((value >> (x - 1)) & 0b1)),
            ArmBSOP::NOP        => (value, carry_in),
            ArmBSOP::LSR_32     => (0, 0 != ((value as u32) >> 31)),
            ArmBSOP::ASR_32     => (value >> 31, 0 != ((value as u32) >> 31)),
            ArmBSOP::RRX        => (
                ((carry_in as i32) << 31) | (((value as u32) >> 1) as i32),
                0 != (value & 0b1),
            ),
            ArmBSOP::LSL_Reg(_) => shift_by_register(value, reg_value & 0xFF, carry_in, ShiftKind::LSL),
            ArmBSOP::LSR_Reg(_) => shift_by_register(value, reg_value & 0xFF, carry_in, ShiftKind::LSR),
            ArmBSOP::ASR_Reg(_) => shift_by_register(value, reg_value & 0xFF, carry_in, ShiftKind::ASR),
            ArmBSOP::ROR_Reg(_) => shift_by_register(value, reg_value & 0xFF, carry_in, ShiftKind::ROR),
        }
    }

    /// The register index a `_Reg` variant reads its shift amount from.
    pub fn shift_register(self) -> Option<usize> {
        match self {
            ArmBSOP::LSL_Reg(r) | ArmBSOP::LSR_Reg(r) |
            ArmBSOP::ASR_Reg(r) | ArmBSOP::ROR_Reg(r) => Some(r),
            _ => None,
        }
    }

    /// The assembly mnemonic for this shift (empty for `NOP`).
    pub fn name(self) -> &'static str {
        match self {
            ArmBSOP::LSR_Imm(_) | ArmBSOP::LSR_Reg(_) | ArmBSOP::LSR_32 => "lsr",
            ArmBSOP::ASR_Imm(_) | ArmBSOP::ASR_Reg(_) | ArmBSOP::ASR_32 => "asr",
            ArmBSOP::LSL_Imm(_) | ArmBSOP::LSL_Reg(_) => "lsl",
            ArmBSOP::ROR_Imm(_) | ArmBSOP::ROR_Reg(_) => "ror",
            ArmBSOP::RRX => "rrx", ArmBSOP::NOP => "",
        }
    }
}

enum ShiftKind { LSL, LSR, ASR, ROR }

/// Register-shift edge cases (shift amount 0, 1..32, ==32, >32), pulled
/// out of `apply` since all four shift kinds share the same zero/overflow
/// structure and only differ in the 1..=32 body.
fn shift_by_register(value: i32, amount: u32, carry_in: bool, kind: ShiftKind) -> (i32, bool) {
    match (kind, amount) {
        (_, 0) => (value, carry_in),
        (ShiftKind::LSL, x) if x < 32 => ArmBSOP::LSL_Imm(x).apply(value, 0, carry_in),
        (ShiftKind::LSL, 32)          => (0, 0 != (value & 0b1)),
        (ShiftKind::LSL, _)           => (0, false),
        (ShiftKind::LSR, x) if x < 32 => ArmBSOP::LSR_Imm(x).apply(value, 0, carry_in),
        (ShiftKind::LSR, 32)          => (0, 0 != ((value as u32) >> 31)),
        (ShiftKind::LSR, _)           => (0, false),
        (ShiftKind::ASR, x) if x < 32 => ArmBSOP::ASR_Imm(x).apply(value, 0, carry_in),
        (ShiftKind::ASR, _)           => (value >> 31, 0 != ((value as u32) >> 31)),
        (ShiftKind::ROR, x) if x % 32 == 0 && x != 0 => (value, 0 != ((value as u32) >> 31)),
        (ShiftKind::ROR, x)           => ArmBSOP::ROR_Imm(x % 32).apply(value, 0, carry_in),
    }
}

impl fmt::Display for ArmBSOP {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArmBSOP::LSL_Imm(x) => write!(f, "lsl #{}", x),
            ArmBSOP::LSR_Imm(x) => write!(f, "lsr #{}", x),
            ArmBSOP::ASR_Imm(x) => write!(f, "asr #{}", x),
            ArmBSOP::ROR_Imm(x) => write!(f, "ror #{}", x),
            ArmBSOP::NOP        => Ok(()),
            ArmBSOP::LSR_32     => write!(f, "lsr #32"),
            ArmBSOP::ASR_32     => write!(f, "asr #32"),
            ArmBSOP::RRX        => write!(f, "rrx"),
            ArmBSOP::LSL_Reg(x) => write!(f, "lsl R{}", x),
            ArmBSOP::LSR_Reg(x) => write!(f, "lsr R{}", x),
            ArmBSOP::ASR_Reg(x) => write!(f, "asr R{}", x),
            ArmBSOP::ROR_Reg(x) => write!(f, "ror R{}", x),
        }
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
