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
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{Code, Error};
use crate::kif::Perm;
use crate::util;

int_enum! {
    /// The memory tier a region belongs to
    pub struct Tier : u8 {
        /// The large memory with high latency (L2)
        const FAR   = 0;
        /// The small memory with low latency, close to the core (L1)
        const NEAR  = 1;
    }
}

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

struct Inner {
    id: usize,
    tier: Tier,
    perm: Perm,
    data: Mutex<Box<[u8]>>,
}

/// A contiguous memory region that can be accessed by the DTU
///
/// A region is a cheap handle; clones refer to the same memory. The DTU addresses memory by
/// (region, offset) pairs and checks every access against the size and the permissions of the
/// region.
#[derive(Clone)]
pub struct Region {
    inner: Arc<Inner>,
}

impl Region {
    /// Creates a new zero-initialized region of `size` bytes in given tier
    pub fn new(tier: Tier, size: usize, perm: Perm) -> Self {
        Region {
            inner: Arc::new(Inner {
                id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
                tier: tier,
                perm: perm,
                data: Mutex::new(vec![0u8; size].into_boxed_slice()),
            }),
        }
    }

    /// Returns the unique id of the region
    pub fn id(&self) -> usize {
        self.inner.id
    }
    /// Returns the tier of the region
    pub fn tier(&self) -> Tier {
        self.inner.tier
    }
    /// Returns the permissions the DTU has for this region
    pub fn perm(&self) -> Perm {
        self.inner.perm
    }
    /// Returns the size of the region in bytes
    pub fn size(&self) -> usize {
        self.data().len()
    }

    /// Locks the region and returns its contents
    ///
    /// The DTU locks regions only for the duration of a single copy, so the lock should not be
    /// held while waiting for transfers that target this region.
    pub fn data(&self) -> MutexGuard<'_, Box<[u8]>> {
        // a panicking holder can not break the invariants of plain bytes
        self.inner.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copies `buf.len()` bytes at offset `off` of the region into `buf`
    pub fn read(&self, buf: &mut [u8], off: usize) -> Result<(), Error> {
        let data = self.data();
        let range = util::checked_range(off, buf.len(), data.len())
            .ok_or_else(|| Error::new(Code::InvArgs))?;
        buf.copy_from_slice(&data[range]);
        Ok(())
    }

    /// Copies `buf` to offset `off` of the region
    pub fn write(&self, buf: &[u8], off: usize) -> Result<(), Error> {
        let mut data = self.data();
        let range = util::checked_range(off, buf.len(), data.len())
            .ok_or_else(|| Error::new(Code::InvArgs))?;
        data[range].copy_from_slice(buf);
        Ok(())
    }

    /// Sets all bytes of the region to `val`
    pub fn fill(&self, val: u8) {
        for b in self.data().iter_mut() {
            *b = val;
        }
    }

    /// Returns a copy of the contents
    pub fn to_vec(&self) -> Vec<u8> {
        self.data().to_vec()
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Region[id={}, tier={:?}, size={:#x}, perm={:?}]",
            self.id(), self.tier(), self.size(), self.perm())
    }
}
