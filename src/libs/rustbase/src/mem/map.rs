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

use std::fmt;

use crate::errors::{Code, Error};
use crate::util;

#[derive(Clone, Copy, PartialEq, Eq)]
struct Area {
    addr: usize,
    size: usize,
}

impl Area {
    pub fn new(addr: usize, size: usize) -> Self {
        Area {
            addr: addr,
            size: size,
        }
    }
}

impl fmt::Debug for Area {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Area[addr={:#x}, size={:#x}]", self.addr, self.size)
    }
}

/// A first-fit allocator for the address range of a memory region
///
/// The free areas are kept sorted by address and are merged with their neighbors on free.
pub struct MemMap {
    areas: Vec<Area>,
}

impl MemMap {
    /// Creates a map where `[addr, addr + size)` is free
    pub fn new(addr: usize, size: usize) -> Self {
        let mut areas = Vec::new();
        if size > 0 {
            areas.push(Area::new(addr, size));
        }
        MemMap {
            areas: areas,
        }
    }

    /// Allocates `size` bytes aligned to `align`, which has to be a power of two
    pub fn allocate(&mut self, size: usize, align: usize) -> Result<usize, Error> {
        if size == 0 || !util::is_pow2(align) {
            return Err(Error::new(Code::InvArgs));
        }

        // find an area with sufficient space
        let mut idx = self.areas.iter().position(|a| {
            let diff = util::round_up(a.addr, align) - a.addr;
            a.size >= diff && a.size - diff >= size
        }).ok_or_else(|| Error::new(Code::NoSpace))?;

        let a = self.areas[idx];

        // if we need to do some alignment, keep the part in front of it free
        let diff = util::round_up(a.addr, align) - a.addr;
        if diff != 0 {
            self.areas.insert(idx, Area::new(a.addr, diff));
            idx += 1;
            self.areas[idx] = Area::new(a.addr + diff, a.size - diff);
        }

        // take it from the front
        let area = &mut self.areas[idx];
        let res = area.addr;
        area.size -= size;
        area.addr += size;

        // if the area is empty now, remove it
        if area.size == 0 {
            self.areas.remove(idx);
        }

        Ok(res)
    }

    /// Frees the area `[addr, addr + size)`
    pub fn free(&mut self, addr: usize, size: usize) {
        // find the area behind ours
        let idx = self.areas.iter().position(|n| addr <= n.addr).unwrap_or(self.areas.len());

        let merge_prev = idx > 0 && {
            let p = &self.areas[idx - 1];
            p.addr + p.size == addr
        };
        let merge_next = idx < self.areas.len() && addr + size == self.areas[idx].addr;

        match (merge_prev, merge_next) {
            // merge with prev and next
            (true, true) => {
                let n = self.areas.remove(idx);
                self.areas[idx - 1].size += size + n.size;
            },

            // merge with prev
            (true, false) => self.areas[idx - 1].size += size,

            // merge with next
            (false, true) => {
                let n = &mut self.areas[idx];
                n.addr -= size;
                n.size += size;
            },

            (false, false) => self.areas.insert(idx, Area::new(addr, size)),
        }
    }

    /// Returns the number of free bytes and the number of free areas
    pub fn size(&self) -> (usize, usize) {
        let total = self.areas.iter().fold(0, |total, a| total + a.size);
        (total, self.areas.len())
    }
}

impl fmt::Debug for MemMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[")?;
        for a in &self.areas {
            writeln!(f, "    {:?}", a)?;
        }
        write!(f, "  ]")
    }
}
