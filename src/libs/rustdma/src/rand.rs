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

//! Contains the deterministic sequence generator for the test data

const MULT: u32 = 1103515245;
const INC: u32  = 12345;
const MASK: u32 = 0x7FFF_FFFF;

/// A linear congruential generator with the parameters of glibc's `rand`
///
/// The sequence is fully determined by the seed, which makes the generated test data identical
/// for every run and every configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    seed: u32,
    state: u32,
}

impl Lcg {
    /// Creates a new generator with given seed
    pub fn new(seed: u32) -> Self {
        Lcg {
            seed: seed,
            state: seed & MASK,
        }
    }

    /// Restarts the sequence from the seed
    pub fn reset(&mut self) {
        self.state = self.seed & MASK;
    }

    /// Returns the next 31-bit value
    pub fn next(&mut self) -> u32 {
        self.state = MULT.wrapping_mul(self.state).wrapping_add(INC) & MASK;
        self.state
    }

    /// Returns the low byte of the next value
    pub fn next_byte(&mut self) -> u8 {
        (self.next() & 0xFF) as u8
    }

    /// Fills `buf` with the next `buf.len()` bytes of the sequence
    pub fn fill(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = self.next_byte();
        }
    }
}
