/*
 * Copyright (C) 2018, Nils Asmussen <nils@os.inf.tu-dresden.de>
 * Economic rights: Technische Universitaet Dresden (Germany)
 *
 * This file is part of M3 (Microkernel-based SysteM for Heterogeneous Manycores).
 *
 * M3 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License version 2 as
 * published by the Free Software Foundation.
 *
 * M3 is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * General Public License version 2 for more details.
 */

//! Contains the transformation that is applied to the data in near memory

/// Returns the transformed value of `val`: `val * 3` with 8-bit wraparound
#[inline]
pub fn transformed(val: u8) -> u8 {
    val.wrapping_mul(3)
}

/// Transforms every byte of `buf` in place
///
/// The transformation has no dependencies between bytes, so it can be applied to any part of the
/// buffer independently.
pub fn transform(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        *b = transformed(*b);
    }
}
