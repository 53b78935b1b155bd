// License below.
//! Implements the load/store unit: single word/byte/halfword transfers
//! (including the forced-user-mode `T` variants) and block transfers
//! (`LDM`/`STM`).

use error::CoreError;
use memory::Memory;
use super::registers::Registers;
use super::psr::Mode;
use super::addressing::{single_transfer_address, block_transfer_addresses, BlockAddressingMode};

/// The data size and signedness a single transfer operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransferSize {
    Word,
    UnsignedByte,
    SignedByte,
    UnsignedHalfword,
    SignedHalfword,
}

/// A fully decoded single `LDR`/`STR` family instruction.
pub struct SingleTransfer {
    pub rn: usize,
    pub rd: usize,
    pub load: bool,
    pub size: TransferSize,
    pub pre_indexed: bool,
    pub add: bool,
    pub writeback: bool,
    /// `T`-variant: force User-mode privilege for the duration of the
    /// access, then restore. Only legal alongside post-indexed addressing.
    pub force_user_mode: bool,
}

/// Executes a single transfer, returning the memory wait cycles the access
/// cost (on top of the instruction's baseline prefetch, which the step
/// driver charges separately).
///
/// # Errors
/// `InvalidUseOfR15` if `Rn` is r15 (the base register may not be the
/// program counter - its value during a multi-cycle address calculation is
/// architecturally undefined enough that this implementation rejects it
/// outright rather than guess).
pub fn execute_single<M: Memory>(regs: &mut Registers, mem: &mut M, xfer: &SingleTransfer, offset: u32)
    -> Result<u32, CoreError>
{
    if xfer.rn == Registers::PC {
        return Err(CoreError::InvalidUseOfR15);
    }

    let base = regs.read(xfer.rn);
    let (access_addr, writeback_addr) = single_transfer_address(base, offset, xfer.add, xfer.pre_indexed);

    let restore_mode = if xfer.force_user_mode {
        let current = regs.cpsr().mode();
        if current != Mode::User {
            regs.set_mode(Mode::User);
            Some(current)
        } else {
            None
        }
    } else {
        None
    };

    // Writeback happens before the transfer so that, when Rd == Rn on a
    // load, the loaded value (written after this call returns) is the one
    // that sticks - matching how real hardware resolves that UNPREDICTABLE
    // overlap in practice.
    if xfer.writeback || xfer.force_user_mode {
        regs.write(xfer.rn, writeback_addr);
    }

    let mut wait_cycles = 0_u32;
    if xfer.load {
        let value = match xfer.size {
            TransferSize::Word            => mem.load32(access_addr, &mut wait_cycles),
            TransferSize::UnsignedByte    => mem.load_u8(access_addr, &mut wait_cycles),
            TransferSize::SignedByte      => mem.load8(access_addr, &mut wait_cycles) as u32,
            TransferSize::UnsignedHalfword => mem.load_u16(access_addr, &mut wait_cycles),
            TransferSize::SignedHalfword  => mem.load16(access_addr, &mut wait_cycles) as u32,
        };
        regs.write(xfer.rd, value);
    } else {
        let value = regs.read(xfer.rd);
        match xfer.size {
            TransferSize::Word => mem.store32(access_addr, value, &mut wait_cycles),
            TransferSize::UnsignedByte | TransferSize::SignedByte =>
                mem.store8(access_addr, value, &mut wait_cycles),
            TransferSize::UnsignedHalfword | TransferSize::SignedHalfword =>
                mem.store16(access_addr, value, &mut wait_cycles),
        }
    }

    if let Some(previous) = restore_mode {
        regs.set_mode(previous);
    }

    Ok(wait_cycles)
}

/// A fully decoded `LDM`/`STM` instruction.
pub struct BlockTransfer {
    pub rn: usize,
    pub load: bool,
    pub mode: BlockAddressingMode,
    pub writeback: bool,
    /// The `S` bit: force the User bank for every register in the list
    /// that isn't r15 (see §4.5 - combined with r15 in the list on `LDM`
    /// this instead means "also copy SPSR to CPSR").
    pub force_user_bank: bool,
    pub reg_list: u16,
}

/// Outcome of a block transfer the step driver needs to react to.
pub struct BlockTransferOutcome {
    /// Registers actually moved (16 if the list was empty - see §4.5's
    /// ARM-defined empty-list behavior).
    pub count: u32,
    /// Whether r15 was in the list and this was a load (the step driver
    /// must then treat this as a branch, and - if `restores_cpsr` - also
    /// pull SPSR into CPSR).
    pub loaded_pc: bool,
    /// Whether an `LDM` with r15 in the list and the `S` bit set should
    /// copy SPSR into CPSR (exception return).
    pub restores_cpsr: bool,
}

/// Executes a block transfer, returning `(wait_cycles, outcome)`.
///
/// # Errors
/// `InvalidUseOfR15` if `Rn` is r15.
pub fn execute_block<M: Memory>(regs: &mut Registers, mem: &mut M, xfer: &BlockTransfer)
    -> Result<(u32, BlockTransferOutcome), CoreError>
{
    if xfer.rn == Registers::PC {
        return Err(CoreError::InvalidUseOfR15);
    }

    let reg_list: Vec<usize> = (0..16).filter(|i| xfer.reg_list & (1 << i) != 0).collect();
    // ARM-defined edge case: an empty register list still transfers r15
    // and moves the base as if all 16 registers had been listed.
    let (effective_list, count): (Vec<usize>, u32) = if reg_list.is_empty() {
        (vec![Registers::PC], 16)
    } else {
        let n = reg_list.len() as u32;
        (reg_list, n)
    };

    let base = regs.read(xfer.rn);
    let (first_addr, writeback_addr) = block_transfer_addresses(base, xfer.mode, count);

    let pc_in_list = effective_list.contains(&Registers::PC);
    let use_user_bank = xfer.force_user_bank && !(xfer.load && pc_in_list);

    let mut wait_cycles = 0_u32;
    let mut addr = first_addr;
    let mut loaded_pc = false;

    for &reg in &effective_list {
        if xfer.load {
            let value = mem.load32(addr, &mut wait_cycles);
            if reg == Registers::PC {
                regs.write(Registers::PC, value);
                loaded_pc = true;
            } else if use_user_bank {
                regs.write_user_bank(reg, value);
            } else {
                regs.write(reg, value);
            }
        } else {
            // The original Rn value is stored only when Rn is the first
            // (lowest-numbered) register in the list; any later occurrence
            // sees the already-written-back value, per §4.5.
            let value = if reg == xfer.rn && effective_list[0] != xfer.rn {
                writeback_addr
            } else if use_user_bank {
                regs.read_user_bank(reg)
            } else {
                regs.read(reg)
            };
            mem.store32(addr, value, &mut wait_cycles);
        }
        addr = addr.wrapping_add(4);
    }

    if xfer.writeback {
        regs.write(xfer.rn, writeback_addr);
    }

    let restores_cpsr = xfer.load && pc_in_list && xfer.force_user_bank;
    if restores_cpsr {
        if let Ok(spsr) = regs.spsr() {
            regs.set_cpsr_raw(spsr.0);
        }
    }

    Ok((wait_cycles, BlockTransferOutcome { count, loaded_pc, restores_cpsr }))
}

#[cfg(test)]
mod test {
    use super::*;
    use cpu::registers::Registers;

    struct FlatMemory { bytes: Vec<u8> }
    impl FlatMemory {
        fn new() -> FlatMemory { FlatMemory { bytes: vec![0; 0x10000] } }
    }
    impl Memory for FlatMemory {
        fn load32(&mut self, addr: u32, _cycles: &mut u32) -> u32 {
            let a = addr as usize;
            (self.bytes[a] as u32) | ((self.bytes[a+1] as u32) << 8)
                | ((self.bytes[a+2] as u32) << 16) | ((self.bytes[a+3] as u32) << 24)
        }
        fn load16(&mut self, addr: u32, cycles: &mut u32) -> i32 { self.load_u16(addr, cycles) as i16 as i32 }
        fn load_u16(&mut self, addr: u32, _cycles: &mut u32) -> u32 {
            let a = addr as usize;
            (self.bytes[a] as u32) | ((self.bytes[a+1] as u32) << 8)
        }
        fn load8(&mut self, addr: u32, _cycles: &mut u32) -> i32 { self.bytes[addr as usize] as i8 as i32 }
        fn load_u8(&mut self, addr: u32, _cycles: &mut u32) -> u32 { self.bytes[addr as usize] as u32 }
        fn store32(&mut self, addr: u32, value: u32, _cycles: &mut u32) {
            let a = addr as usize;
            self.bytes[a] = value as u8;
            self.bytes[a+1] = (value >> 8) as u8;
            self.bytes[a+2] = (value >> 16) as u8;
            self.bytes[a+3] = (value >> 24) as u8;
        }
        fn store16(&mut self, addr: u32, value: u32, _cycles: &mut u32) {
            let a = addr as usize;
            self.bytes[a] = value as u8;
            self.bytes[a+1] = (value >> 8) as u8;
        }
        fn store8(&mut self, addr: u32, value: u32, _cycles: &mut u32) { self.bytes[addr as usize] = value as u8; }
        fn wait_multiple(&self, _addr: u32, _count: u32) -> u32 { 0 }
    }

    #[test]
    fn ldm_ia_round_trips_stm_ia() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        regs.write(0, 0x1000);
        regs.write(1, 111);
        regs.write(3, 333);
        regs.write(5, 555);

        let stm = BlockTransfer {
            rn: 0, load: false, mode: BlockAddressingMode::IA,
            writeback: true, force_user_bank: false, reg_list: (1<<1)|(1<<3)|(1<<5),
        };
        execute_block(&mut regs, &mut mem, &stm).unwrap();
        assert_eq!(regs.read(0), 0x100C);

        regs.write(0, 0x1000);
        regs.write(1, 0);
        regs.write(3, 0);
        regs.write(5, 0);
        let ldm = BlockTransfer {
            rn: 0, load: true, mode: BlockAddressingMode::IA,
            writeback: true, force_user_bank: false, reg_list: (1<<1)|(1<<3)|(1<<5),
        };
        execute_block(&mut regs, &mut mem, &ldm).unwrap();
        assert_eq!(regs.read(1), 111);
        assert_eq!(regs.read(3), 333);
        assert_eq!(regs.read(5), 555);
        assert_eq!(regs.read(0), 0x100C);
    }

    #[test]
    fn single_word_store_then_load_round_trips() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        regs.write(0, 0x2000);
        regs.write(1, 0xDEADBEEF_u32 as u32);
        let store = SingleTransfer {
            rn: 0, rd: 1, load: false, size: TransferSize::Word,
            pre_indexed: true, add: true, writeback: false, force_user_mode: false,
        };
        execute_single(&mut regs, &mut mem, &store, 0).unwrap();

        regs.write(2, 0);
        let load = SingleTransfer {
            rn: 0, rd: 2, load: true, size: TransferSize::Word,
            pre_indexed: true, add: true, writeback: false, force_user_mode: false,
        };
        execute_single(&mut regs, &mut mem, &load, 0).unwrap();
        assert_eq!(regs.read(2), 0xDEADBEEF_u32 as u32);
    }

    #[test]
    fn post_indexed_writeback_moves_base_after_access() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        regs.write(0, 0x3000);
        regs.write(1, 42);
        let store = SingleTransfer {
            rn: 0, rd: 1, load: false, size: TransferSize::Word,
            pre_indexed: false, add: true, writeback: false, force_user_mode: false,
        };
        execute_single(&mut regs, &mut mem, &store, 4).unwrap();
        assert_eq!(regs.read(0), 0x3004);
        assert_eq!(mem.load32(0x3000, &mut 0), 42);
    }

    #[test]
    fn rn_as_pc_is_rejected() {
        let mut regs = Registers::new();
        let mut mem = FlatMemory::new();
        let store = SingleTransfer {
            rn: 15, rd: 1, load: false, size: TransferSize::Word,
            pre_indexed: true, add: true, writeback: false, force_user_mode: false,
        };
        assert!(execute_single(&mut regs, &mut mem, &store, 0).is_err());
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
