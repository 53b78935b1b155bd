// License below.
//! Implements the multiply unit: `MUL`/`MLA` and the 64-bit
//! `UMULL`/`UMLAL`/`SMULL`/`SMLAL` family.

use error::CoreError;

/// A 32x32 `MUL`/`MLA` result.
pub struct Mul32 {
    /// `Rm * Rs`, plus `Rn` for `MLA`.
    pub value: u32,
}

/// Computes `Rm * Rs (+ Rn)`.
///
/// # Errors
/// `InvalidRegisterReuse` if `Rd` aliases `Rm` - the architecture forbids
/// this because the multiplier reads `Rm` after `Rd` may already have been
/// partially written on some cores. `InvalidUseOfR15` if any operand or the
/// destination is r15.
pub fn mul(rd: usize, rm: usize, rs: usize, rn: Option<usize>, rm_val: u32, rs_val: u32, rn_val: u32)
    -> Result<Mul32, CoreError>
{
    if rd == 15 || rm == 15 || rs == 15 || rn == Some(15) {
        return Err(CoreError::InvalidUseOfR15);
    }
    if rd == rm {
        return Err(CoreError::InvalidRegisterReuse(rn.unwrap_or(0), rd, rs, rm));
    }
    let product = rm_val.wrapping_mul(rs_val);
    let value = match rn {
        Some(_) => product.wrapping_add(rn_val),
        None => product,
    };
    Ok(Mul32 { value })
}

/// A 64-bit `UMULL`/`UMLAL`/`SMULL`/`SMLAL` result, split into halves the
/// way the instruction writes them back (`RdLo`, `RdHi`).
pub struct Mul64 {
    pub lo: u32,
    pub hi: u32,
}

/// Computes the 64-bit product of `Rm` and `Rs`, signed or unsigned,
/// optionally accumulating into `{RdHiAcc, RdLoAcc}`.
///
/// # Errors
/// `InvalidRegisterReuse` if `RdHi`, `RdLo` and `Rm` are not all distinct.
/// `InvalidUseOfR15` if any register used is r15.
pub fn mul_long(rd_hi: usize, rd_lo: usize, rm: usize, rs: usize,
                 rm_val: i32, rs_val: i32, signed: bool, accumulate: Option<(u32, u32)>)
    -> Result<Mul64, CoreError>
{
    if rd_hi == 15 || rd_lo == 15 || rm == 15 || rs == 15 {
        return Err(CoreError::InvalidUseOfR15);
    }
    if rd_hi == rd_lo || rd_hi == rm || rd_lo == rm {
        return Err(CoreError::InvalidRegisterReuse(rd_hi, rd_lo, rs, rm));
    }

    let product: u64 = if signed {
        ((rm_val as i64).wrapping_mul(rs_val as i64)) as u64
    } else {
        (rm_val as u32 as u64).wrapping_mul(rs_val as u32 as u64)
    };

    let product = match accumulate {
        Some((acc_hi, acc_lo)) => {
            let acc = ((acc_hi as u64) << 32) | (acc_lo as u64);
            product.wrapping_add(acc)
        },
        None => product,
    };

    Ok(Mul64 { lo: product as u32, hi: (product >> 32) as u32 })
}

/// `N`/`Z` for an `S`-variant 32-bit multiply: `N` is the sign of the
/// result, `Z` is whether it's zero. `C` and `V` are left as they were -
/// the architecture leaves them UNPREDICTABLE and this implementation
/// chooses "unchanged", matching the spec's model of the multiply unit.
pub fn flags32(value: u32) -> (bool, bool) {
    (value & 0x8000_0000 != 0, value == 0)
}

/// `N`/`Z` for an `S`-variant 64-bit multiply: `N` from the high word's
/// sign, `Z` only if the full 64-bit result is zero.
pub fn flags64(hi: u32, lo: u32) -> (bool, bool) {
    (hi & 0x8000_0000 != 0, hi == 0 && lo == 0)
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
