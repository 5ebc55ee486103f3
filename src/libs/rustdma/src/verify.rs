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

//! Contains the verification of the destination buffer

use std::fmt;

use base::cfg;
use base::errors::Code;

use crate::transform::transformed;

/// A single mismatching byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorSample {
    /// The index of the byte
    pub index: usize,
    /// The value that was expected, i.e., the transformed source byte
    pub expected: u8,
    /// The value that was found in the destination
    pub observed: u8,
    /// The source byte
    pub source: u8,
}

impl fmt::Display for ErrorSample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ERROR at index {}: expected {:#04x}, got {:#04x} (source: {:#04x})",
            self.index, self.expected, self.observed, self.source)
    }
}

/// The details of a failed verification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// The total number of mismatching bytes
    pub count: usize,
    /// The first `cfg::MAX_ERR_SAMPLES` mismatching bytes in index order
    pub samples: Vec<ErrorSample>,
}

impl Mismatch {
    /// Returns the index of the first mismatching byte
    pub fn first(&self) -> usize {
        // there is at least one sample for every mismatch
        self.samples[0].index
    }
}

/// The outcome of a single configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The destination holds the transformed source
    Success,
    /// The destination differs from the transformed source
    Mismatch(Mismatch),
    /// The configuration could not be executed
    Failed(Code),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        *self == Outcome::Success
    }
}

/// Checks whether `dst[i] == transformed(src[i])` for every `i`
///
/// The whole buffer is scanned; all mismatches are counted, but only the first
/// `cfg::MAX_ERR_SAMPLES` are kept. If the lengths differ, every byte without counterpart is a
/// mismatch, and the missing side reads as zero.
pub fn verify(src: &[u8], dst: &[u8]) -> Outcome {
    let len = src.len().max(dst.len());
    let mut res = Mismatch {
        count: 0,
        samples: Vec::new(),
    };

    for i in 0..len {
        let source = src.get(i).copied().unwrap_or(0);
        let observed = dst.get(i).copied().unwrap_or(0);
        let expected = transformed(source);
        let missing = i >= src.len() || i >= dst.len();

        if missing || observed != expected {
            if res.samples.len() < cfg::MAX_ERR_SAMPLES {
                res.samples.push(ErrorSample {
                    index: i,
                    expected: expected,
                    observed: observed,
                    source: source,
                });
            }
            res.count += 1;
        }
    }

    if res.count == 0 {
        Outcome::Success
    }
    else {
        Outcome::Mismatch(res)
    }
}
