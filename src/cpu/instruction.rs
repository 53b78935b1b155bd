// License below.
//! The coarse instruction classes the decode table resolves a 12-bit
//! `(opcode[27:20], opcode[7:4])` index to.
//!
//! These are *not* full decodes - `DataProcessing` still covers all 16 ALU
//! ops and 18 shifter forms, `LDR_STR` still covers byte/word x pre/post x
//! up/down x writeback, and so on. The step driver performs the remaining
//! field extraction once a class is known; see `cpu::step`.

/// A coarse ARM instruction class, as resolved by `DecodeTable::lookup`.
#[derive(Debug, PartialEq, Clone, Copy)]
#[allow(non_camel_case_types)]
pub enum ArmOpcode {
    /// Any of the 16 data-processing ALU ops, any shifter form.
    DataProcessing,

    /// `MRS` - move PSR to a register.
    MRS,

    /// `MSR` with a register source operand.
    MSR_Reg,

    /// `MSR` (or `MSRI`) updating only the flag/control byte(s).
    MSR_Flags,

    /// `MUL`/`MLA`.
    MUL_MLA,

    /// `UMULL`/`UMLAL`/`SMULL`/`SMLAL`.
    MULL_MLAL,

    /// `LDR`/`STR`/`LDRB`/`STRB`, including the `T` forced-user forms.
    LDR_STR,

    /// `LDRH`/`STRH`/`LDRSB`/`LDRSH` with a register offset.
    LDRH_STRH_Reg,

    /// `LDRH`/`STRH`/`LDRSB`/`LDRSH` with a split immediate offset.
    LDRH_STRH_Imm,

    /// `LDM`/`STM`, any addressing mode, with or without the `S` bit.
    LDM_STM,

    /// `B`/`BL`.
    B_BL,

    /// `BX`.
    BX,

    /// `SWI`.
    SWI,

    /// `SWP`/`SWPB` - reserved stub on this target (see §4.5 of the spec
    /// this module implements).
    SWP,

    /// Coprocessor data operation - illegal on this target.
    CDP,

    /// Coprocessor register transfer - illegal on this target.
    MRC_MCR,

    /// Coprocessor load/store - illegal on this target.
    LDC_STC,

    /// No recipe entry claimed this index; decodes to `UndefinedInstruction`.
    Unknown,
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
