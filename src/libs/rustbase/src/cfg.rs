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

//! The default configuration of the memory tiers and the sweep

/// The size of the buffer that is moved through the pipeline
pub const BUF_SIZE: usize           = 2048;
/// The capacity of the near memory (the TCDM of the cluster)
pub const NEAR_MEM_SIZE: usize      = 64 * 1024;
/// The alignment of near-memory allocations
pub const NEAR_MEM_ALIGN: usize     = 8;
/// The number of DTU channels, i.e., the number of transfers that can be in flight concurrently
pub const DTU_CHANNELS: usize       = 8;

/// The seed of the sequence generator
pub const SEED: u32                 = 1;
/// The default candidates for the number of transfers per pass
pub const CHUNK_COUNTS: [usize; 4]  = [1, 2, 4, 8];
/// The default candidates for the number of passes
pub const PASS_COUNTS: [usize; 4]   = [1, 2, 4, 8];

/// The maximum number of mismatching bytes that are reported in detail
pub const MAX_ERR_SAMPLES: usize    = 10;

const_assert!(BUF_SIZE <= NEAR_MEM_SIZE);
// every default combination has to yield an exact geometry
const_assert!(BUF_SIZE % (8 * 8) == 0);
const_assert!(NEAR_MEM_ALIGN.is_power_of_two());
