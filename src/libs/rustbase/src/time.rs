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

//! Contains time measurement functions

use crate::arch::time;

/// A timestamp in cycles
pub type Time = u64;

/// Starts a time measurement with given id and returns the current timestamp
pub fn start(msg: usize) -> Time {
    time::start(msg)
}

/// Stops a time measurement with given id and returns the current timestamp
pub fn stop(msg: usize) -> Time {
    time::stop(msg)
}
