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

//! Contains the chunk planner
//!
//! The buffer is processed in `pass_count` passes of `pass_size` bytes. Every pass is split into
//! `chunk_count` transfers of `chunk_size` bytes. Chunk `i` of pass `j` covers the bytes
//! `[j * pass_size + i * chunk_size, j * pass_size + (i + 1) * chunk_size)` in the far buffers as
//! well as in the staging buffer.

use std::fmt;
use std::ops::Range;

use base::errors::{Code, Error};

/// A single transfer of the plan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// The pass the chunk belongs to
    pub pass: usize,
    /// The index of the chunk within its pass
    pub index: usize,
    /// The byte offset within the buffers
    pub offset: usize,
    /// The number of bytes
    pub size: usize,
}

impl Chunk {
    /// Returns the byte range the chunk covers
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }
}

/// The transfer geometry for one configuration
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    buf_size: usize,
    chunk_count: usize,
    pass_count: usize,
}

/// Computes the geometry for moving `buf_size` bytes with `chunk_count` transfers per pass and
/// `pass_count` passes
///
/// Fails with `Code::InvalidGeometry` if one of the arguments is zero or if `buf_size` is not a
/// multiple of `chunk_count * pass_count`, because the trailing bytes would not be transferred.
pub fn plan(buf_size: usize, chunk_count: usize, pass_count: usize) -> Result<Geometry, Error> {
    Geometry::new(buf_size, chunk_count, pass_count)
}

impl Geometry {
    /// See `plan`
    pub fn new(buf_size: usize, chunk_count: usize, pass_count: usize) -> Result<Self, Error> {
        let transfers = chunk_count.checked_mul(pass_count).unwrap_or(0);
        if buf_size == 0 || transfers == 0 || buf_size % transfers != 0 {
            return Err(Error::new_msg(Code::InvalidGeometry, format!(
                "{} bytes in {} passes with {} chunks", buf_size, pass_count, chunk_count
            )));
        }

        Ok(Geometry {
            buf_size: buf_size,
            chunk_count: chunk_count,
            pass_count: pass_count,
        })
    }

    pub fn buf_size(&self) -> usize {
        self.buf_size
    }
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }
    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// Returns the number of bytes per pass
    pub fn pass_size(&self) -> usize {
        self.buf_size / self.pass_count
    }

    /// Returns the number of bytes per transfer
    pub fn chunk_size(&self) -> usize {
        self.pass_size() / self.chunk_count
    }

    /// Returns the byte range that is covered by pass `pass`
    pub fn pass_range(&self, pass: usize) -> Range<usize> {
        assert!(pass < self.pass_count, "pass {} out of {}", pass, self.pass_count);
        let start = pass * self.pass_size();
        start..start + self.pass_size()
    }

    /// Returns chunk `index` of pass `pass`
    pub fn chunk(&self, pass: usize, index: usize) -> Chunk {
        assert!(index < self.chunk_count, "chunk {} out of {}", index, self.chunk_count);
        Chunk {
            pass: pass,
            index: index,
            offset: self.pass_range(pass).start + index * self.chunk_size(),
            size: self.chunk_size(),
        }
    }

    /// Returns an iterator over the chunks of pass `pass` in issue order
    pub fn pass_chunks(&self, pass: usize) -> impl Iterator<Item = Chunk> {
        let geom = *self;
        (0..self.chunk_count).map(move |i| geom.chunk(pass, i))
    }

    /// Returns an iterator over all chunks, pass by pass
    pub fn chunks(&self) -> impl Iterator<Item = Chunk> {
        let geom = *self;
        (0..self.pass_count).flat_map(move |p| geom.pass_chunks(p))
    }
}

impl fmt::Debug for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Geometry[buf={}, passes={}x{}b, chunks={}x{}b]",
            self.buf_size, self.pass_count, self.pass_size(), self.chunk_count, self.chunk_size())
    }
}
