// License below.
//! Implements the exceptions the ARM7TDMI can take.

use super::psr::Mode;

/// CPU exceptions, in the order the architecture assigns their vectors.
#[derive(Debug, PartialEq, Clone, Copy)]
#[repr(u8)]
pub enum Exception {
    #[doc = "Resetting the CPU."]                              Reset = 0,
    #[doc = "An undefined instruction was decoded."]            UndefinedInstruction,
    #[doc = "An `SWI` instruction was executed."]               SoftwareInterrupt,
    #[doc = "Instruction prefetch was aborted."]                 PrefetchAbort,
    #[doc = "A data access was aborted."]                        DataAbort,
    #[doc = "An address exceeded the 26-bit legacy address space."] AddressExceeds26Bit,
    #[doc = "A normal (IRQ) hardware interrupt."]                NormalInterrupt,
    #[doc = "A fast (FIQ) hardware interrupt."]                  FastInterrupt,
}

impl Exception {
    /// This exception's priority. 1 is highest, 7 is lowest.
    pub fn priority(self) -> u8 {
        match self {
            Exception::Reset                => 1,
            Exception::DataAbort            => 2,
            Exception::AddressExceeds26Bit |
            Exception::FastInterrupt        => 3,
            Exception::NormalInterrupt      => 4,
            Exception::PrefetchAbort        => 5,
            Exception::SoftwareInterrupt    => 6,
            Exception::UndefinedInstruction => 7,
        }
    }

    /// The mode the CPU enters to service this exception.
    pub fn mode_on_entry(self) -> Mode {
        match self {
            Exception::PrefetchAbort |
            Exception::DataAbort            => Mode::Abort,
            Exception::Reset |
            Exception::SoftwareInterrupt |
            Exception::AddressExceeds26Bit  => Mode::Supervisor,
            Exception::UndefinedInstruction => Mode::Undefined,
            Exception::NormalInterrupt      => Mode::IRQ,
            Exception::FastInterrupt        => Mode::FIQ,
        }
    }

    /// Whether FIQ should be disabled on entry, on top of IRQ (which every
    /// exception disables).
    pub fn disable_fiq_on_entry(self) -> bool {
        (self == Exception::Reset) | (self == Exception::FastInterrupt)
    }

    /// The physical address of this exception's vector.
    pub fn vector_address(self) -> u32 {
        (self as u8 as u32) * 4
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
