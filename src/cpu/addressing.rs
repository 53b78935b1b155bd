// License below.
//! Implements the effective-address calculators for addressing modes 2, 3
//! and 4 - word/byte load-store offsets, half/signed-byte load-store
//! offsets, and load/store-multiple, respectively. Addressing mode 1 (the
//! data-processing shifter) lives in `cpu::shifter`.

use super::shifter::ArmBSOP;
use super::registers::Registers;

/// The offset operand of a mode-2 (word/byte) single transfer.
#[derive(Debug, Clone, Copy)]
pub enum Mode2Offset {
    /// A 12-bit immediate, taken verbatim.
    Immediate(u32),

    /// `Rm` shifted by one of the four immediate-shift forms. Only the
    /// shifted *value* is used here - its carry-out has no bearing on
    /// address calculation.
    Shifted { shift: ArmBSOP, rm: usize },
}

impl Mode2Offset {
    /// Resolves this offset to a concrete magnitude.
    pub fn resolve(self, regs: &Registers) -> u32 {
        match self {
            Mode2Offset::Immediate(v) => v,
            Mode2Offset::Shifted { shift, rm } => {
                let (value, _carry) = shift.apply(regs.read(rm) as i32, 0, regs.cpsr().C());
                value as u32
            },
        }
    }
}

/// The offset operand of a mode-3 (halfword/signed-byte) single transfer.
#[derive(Debug, Clone, Copy)]
pub enum Mode3Offset {
    /// An 8-bit immediate, assembled from the split `imm[11:8]:imm[3:0]`
    /// encoding by the caller.
    Immediate(u32),

    /// `Rm`, used unshifted.
    Register(usize),
}

impl Mode3Offset {
    /// Resolves this offset to a concrete magnitude.
    pub fn resolve(self, regs: &Registers) -> u32 {
        match self {
            Mode3Offset::Immediate(v) => v,
            Mode3Offset::Register(rm) => regs.read(rm),
        }
    }
}

/// Computes `(address_used_for_the_access, address_written_back_to_Rn)`
/// for a single transfer.
///
/// Pre-indexed addressing uses the offset address for both; post-indexed
/// addressing accesses the unmodified base and writes back the offset
/// address (which, critically, is computed either way - a post-indexed
/// form with `W` clear simply discards it).
pub fn single_transfer_address(base: u32, offset: u32, add: bool, pre_indexed: bool) -> (u32, u32) {
    let offset_address = if add { base.wrapping_add(offset) } else { base.wrapping_sub(offset) };
    if pre_indexed { (offset_address, offset_address) } else { (base, offset_address) }
}

/// The four `LDM`/`STM` addressing modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockAddressingMode {
    /// Increment After.
    IA,
    /// Increment Before.
    IB,
    /// Decrement After.
    DA,
    /// Decrement Before.
    DB,
}

impl BlockAddressingMode {
    /// Decodes the `P`,`U` bit pair of an `LDM`/`STM` encoding.
    pub fn decode(pre_indexed: bool, add: bool) -> BlockAddressingMode {
        match (pre_indexed, add) {
            (false, true)  => BlockAddressingMode::IA,
            (true,  true)  => BlockAddressingMode::IB,
            (false, false) => BlockAddressingMode::DA,
            (true,  false) => BlockAddressingMode::DB,
        }
    }
}

/// Computes `(first_transfer_address, writeback_address)` for a block
/// transfer of `count` registers starting from base `rn_value`.
///
/// Regardless of addressing mode, the registers in the list are always
/// assigned ascending addresses starting at `first_transfer_address` in
/// ascending register-number order - `IA`/`IB` versus `DA`/`DB` only moves
/// where that window sits relative to the base, never the direction memory
/// is walked in.
pub fn block_transfer_addresses(rn_value: u32, mode: BlockAddressingMode, count: u32) -> (u32, u32) {
    let span = count.wrapping_mul(4);
    match mode {
        BlockAddressingMode::IA => (rn_value, rn_value.wrapping_add(span)),
        BlockAddressingMode::IB => (rn_value.wrapping_add(4), rn_value.wrapping_add(span)),
        BlockAddressingMode::DA => (rn_value.wrapping_sub(span).wrapping_add(4), rn_value.wrapping_sub(span)),
        BlockAddressingMode::DB => (rn_value.wrapping_sub(span), rn_value.wrapping_sub(span)),
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
