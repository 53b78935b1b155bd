// License below.
//! Implements `B`, `BL` and `BX`.

use super::psr::State;

/// Sign-extends a 24-bit branch offset and shifts it left by 2, producing
/// the byte displacement `B`/`BL` add to PC.
pub fn branch_offset(signed24: u32) -> i32 {
    (((signed24 << 8) as i32) >> 6)
}

/// `BX Rm`: the new execution state is `Rm`'s low bit, and the new PC is
/// `Rm` with that bit (and, for ARM, bit 1 too) masked off.
pub fn exchange_target(rm_value: u32) -> (State, u32) {
    if rm_value & 1 != 0 {
        (State::THUMB, rm_value & !0b1)
    } else {
        (State::ARM, rm_value & !0b11)
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
