// License below.
//! Implements the `Board` collaborator interface.
//!
//! The CPU core knows nothing about interrupt controllers, BIOS HLE, or any
//! other machine-specific supervisor logic. It hands those decisions to a
//! `Board` implementation supplied by the host.

/// The supervisor a `SWI` instruction (and a handful of other exceptional
/// conditions) is handed off to.
pub trait Board {
    /// Services a software interrupt raised with the given 24-bit comment
    /// field.
    ///
    /// Called only when the CPU is *not* configured to vector through the
    /// architectural Software Interrupt exception (see
    /// `CpuOptions::optimise_swi`); the board is then free to implement the
    /// call however it likes (HLE'd BIOS routine, host-side debug hook,
    /// etc.) without the CPU taking an exception at all.
    fn swi32(&mut self, comment: u32);

    /// Reads the current state of the external IRQ line.
    fn irq_line(&self) -> bool { false }

    /// Sets the external IRQ line, e.g. because the board's interrupt
    /// controller latched a new pending source.
    fn set_irq_line(&mut self, _asserted: bool) {}

    /// Called when the CPU decodes an instruction it cannot give defined
    /// behavior to (reserved encodings, `BKPT`-shaped patterns). The
    /// default does nothing; a host wanting debugger attach can override
    /// it to pause execution.
    fn hit_stub(&mut self, _opcode: u32) {}
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
