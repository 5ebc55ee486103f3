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

//! The base library: memory tiers, the DTU, and the infrastructure for measurements and tests

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate static_assertions;

#[cfg(unix)]
pub extern crate libc;

#[macro_use]
pub mod io;
#[macro_use]
pub mod util;
#[macro_use]
pub mod test;

pub mod cfg;
pub mod dtu;
pub mod errors;
pub mod kif;
pub mod mem;
pub mod profile;
pub mod time;

mod arch;
