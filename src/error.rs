// License below.
//! Implements the error taxonomy produced by the interpreter.

use std::error;
use std::fmt;

/// Everything that can go wrong while decoding or executing an ARM
/// instruction.
///
/// The ARM architecture defines behavior for almost every 32-bit word, so
/// this is deliberately small: only encodings and register combinations the
/// architecture reserves or forbids outright produce an `Err`. Conditions
/// the architecture defines as UNPREDICTABLE-but-tolerated (e.g. a
/// privileged CPSR write issued from User mode) are handled silently by the
/// caller instead, matching real hardware's "never halt unilaterally"
/// behavior.
#[derive(Debug)]
pub enum CoreError {
    /// The reserved `NV` condition code was encountered.
    ReservedArmConditionNV,

    /// PC (`r15`) was used as an operand or base register in a position the
    /// architecture forbids for this instruction.
    InvalidUseOfR15,

    /// A multiply instruction reused its accumulator/destination register
    /// as a source register in a combination the architecture forbids.
    InvalidRegisterReuse(usize, usize, usize, usize),

    /// Auto-increment (writeback) was requested on an addressing mode that
    /// cannot express it (e.g. post-indexed halfword transfer with `W` set).
    InvalidOffsetWriteBack,

    /// Code running in User mode attempted to read or write a register that
    /// only exists in a privileged mode (SPSR access, or the privileged
    /// byte of CPSR).
    PrivilegedRegisterAccess,

    /// The `Memory` collaborator reported a bus fault while translating an
    /// access into the Data Abort exception.
    MemoryFault(u32),
}

impl error::Error for CoreError {
    fn description(&self) -> &str {
        match *self {
            CoreError::ReservedArmConditionNV     => "reserved NV condition code",
            CoreError::InvalidUseOfR15            => "PC used where the architecture forbids it",
            CoreError::InvalidRegisterReuse(..)   => "forbidden register reuse in a multiply instruction",
            CoreError::InvalidOffsetWriteBack     => "writeback requested on a non-writeback addressing mode",
            CoreError::PrivilegedRegisterAccess   => "privileged register accessed from User mode",
            CoreError::MemoryFault(_)             => "memory collaborator reported a fault",
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CoreError::ReservedArmConditionNV   => write!(f, "reserved ARM condition NV"),
            CoreError::InvalidUseOfR15          => write!(f, "invalid use of R15 (PC)"),
            CoreError::InvalidRegisterReuse(rn, rd, rs, rm) =>
                write!(f, "invalid register reuse (Rn={}, Rd={}, Rs={}, Rm={})", rn, rd, rs, rm),
            CoreError::InvalidOffsetWriteBack   => write!(f, "invalid offset writeback combination"),
            CoreError::PrivilegedRegisterAccess => write!(f, "privileged register access from User mode"),
            CoreError::MemoryFault(addr)        => write!(f, "memory fault at {:#010X}", addr),
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
