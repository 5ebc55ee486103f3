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
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cfg;
use crate::dtu::{Region, Tier};
use crate::errors::{Code, Error};
use crate::kif::Perm;
use crate::mem::MemMap;

/// The near memory of a core
///
/// The near memory is a single DTU-accessible region of the near tier. Buffers are carved out of
/// it with `alloc` and returned automatically when the buffer is dropped.
#[derive(Clone)]
pub struct NearMem {
    region: Region,
    map: Arc<Mutex<MemMap>>,
}

fn lock(map: &Mutex<MemMap>) -> MutexGuard<'_, MemMap> {
    map.lock().unwrap_or_else(|e| e.into_inner())
}

impl NearMem {
    /// Creates a near memory with a capacity of `size` bytes
    pub fn new(size: usize) -> Self {
        NearMem {
            region: Region::new(Tier::NEAR, size, Perm::RW),
            map: Arc::new(Mutex::new(MemMap::new(0, size))),
        }
    }

    /// Returns the region that backs the near memory
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Returns the capacity in bytes
    pub fn capacity(&self) -> usize {
        self.region.size()
    }

    /// Returns the number of bytes that are currently available
    pub fn available(&self) -> usize {
        lock(&self.map).size().0
    }

    /// Allocates a buffer of `size` bytes
    ///
    /// Fails with `Code::NoSpace` if no free area is large enough.
    pub fn alloc(&self, size: usize) -> Result<NearBuf, Error> {
        let res = lock(&self.map).allocate(size, cfg::NEAR_MEM_ALIGN);
        let addr = match res {
            Ok(addr) => addr,
            Err(e)   => {
                log!(MEM, "Unable to allocate {:#x} bytes: {:?} ({:#x} available)",
                    size, e.code(), self.available());
                return Err(Error::new_msg(e.code(), format!("{:#x} bytes of near memory", size)));
            },
        };

        log!(MEM, "Allocated {:#x} bytes at {:#x}", size, addr);
        Ok(NearBuf {
            mem: self.clone(),
            addr: addr,
            size: size,
        })
    }
}

impl fmt::Debug for NearMem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let map = lock(&self.map);
        write!(f, "NearMem[capacity={:#x}, available={:#x}, map={:?}]",
            self.capacity(), map.size().0, *map)
    }
}

/// A buffer in near memory, freed on drop
pub struct NearBuf {
    mem: NearMem,
    addr: usize,
    size: usize,
}

impl NearBuf {
    /// Returns the region the buffer lives in
    pub fn region(&self) -> &Region {
        &self.mem.region
    }

    /// Returns the offset of the buffer within its region
    pub fn addr(&self) -> usize {
        self.addr
    }

    /// Returns the size of the buffer
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the offset within the region for offset `off` within the buffer
    pub fn offset(&self, off: usize) -> Result<usize, Error> {
        if off > self.size {
            return Err(Error::new(Code::InvArgs));
        }
        Ok(self.addr + off)
    }

    /// Calls `func` with the contents of the buffer
    ///
    /// The region is locked during `func`; no transfer into this region must be in flight.
    pub fn access<R, F: FnOnce(&mut [u8]) -> R>(&self, func: F) -> R {
        let mut data = self.mem.region.data();
        func(&mut data[self.addr..self.addr + self.size])
    }
}

impl Drop for NearBuf {
    fn drop(&mut self) {
        lock(&self.mem.map).free(self.addr, self.size);
        log!(MEM, "Freed {:#x} bytes at {:#x}", self.size, self.addr);
    }
}

impl fmt::Debug for NearBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NearBuf[addr={:#x}, size={:#x}]", self.addr, self.size)
    }
}
