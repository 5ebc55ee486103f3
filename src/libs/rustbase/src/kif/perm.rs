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

bitflags! {
    /// The permission bitmap that is used for memory regions that are accessed by the DTU.
    ///
    /// The permissions only restrict DTU transfers. The owner of a region may always access its
    /// contents directly.
    pub struct Perm : u8 {
        /// The DTU may read from the region
        const R = 1;
        /// The DTU may write to the region
        const W = 2;
        /// Read + write permission
        const RW = Self::R.bits | Self::W.bits;
    }
}
