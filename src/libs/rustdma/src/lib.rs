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

//! The library for the chunked DMA transfer sweep
//!
//! The sweep moves a buffer from far memory into near memory, transforms it there and moves it
//! back, using a varying number of transfers per pass and passes. Every configuration is measured
//! and verified.

#[macro_use]
extern crate base;

pub mod plan;
pub mod rand;
pub mod report;
pub mod sweep;
pub mod transfer;
pub mod transform;
pub mod verify;

pub use crate::plan::{plan, Chunk, Geometry};
pub use crate::report::{Record, RunResult, Status, Summary};
pub use crate::sweep::{run_sweep, Sweep, SweepConfig};
pub use crate::verify::{verify, Outcome};
