// License below.
//! A fetch-decode-execute interpreter for the 32-bit ARM (ARMv4T/A32)
//! instruction set, modeled after the ARM7TDMI core found in the GameBoy
//! Advance.
//!
//! This crate does not own a memory map, a display, or a scheduler. It owns
//! the CPU's register file and its instruction semantics, and it executes
//! against two collaborators supplied by the host:
//!
//! - [`Memory`](trait.Memory.html), which answers loads and stores and
//!   reports the wait-state cost of doing so.
//! - [`Board`](trait.Board.html), which is handed `SWI` calls and decides
//!   how the surrounding machine wants to service them.
//!
//! There is no CLI, file format, or wire protocol at this layer - a host
//! embeds [`Arm7Tdmi`](cpu/struct.Arm7Tdmi.html) and drives it by calling
//! `step()` in a loop.
#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod cpu;
pub mod error;
pub mod memory;
pub mod board;

pub use cpu::Arm7Tdmi;
pub use error::CoreError;
pub use memory::Memory;
pub use board::Board;


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
