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

//! Contains the transfer stage, which moves one pass between far and near memory

use base::dtu::{Direction, Region, Request, TransferCmd, DTU};
use base::errors::{Code, Error};
use base::mem::NearBuf;
use base::util;

use crate::plan::{Chunk, Geometry};

/// Moves the data of single passes between the far buffers and the staging buffer
///
/// `EXT2LOC` transfers read from the far source, `LOC2EXT` transfers write to the far
/// destination. Far and staging buffers use the same offsets.
pub struct TransferStage<'a> {
    dtu: &'a DTU,
    src: &'a Region,
    dst: &'a Region,
    staging: &'a NearBuf,
}

impl<'a> TransferStage<'a> {
    /// Creates a new transfer stage between the far buffers `src` and `dst` and `staging`
    pub fn new(dtu: &'a DTU, src: &'a Region, dst: &'a Region, staging: &'a NearBuf) -> Self {
        TransferStage {
            dtu: dtu,
            src: src,
            dst: dst,
            staging: staging,
        }
    }

    fn far(&self, dir: Direction) -> &Region {
        if dir == Direction::EXT2LOC {
            self.src
        }
        else {
            self.dst
        }
    }

    fn issue(&self, dir: Direction, chunk: &Chunk) -> Result<Request, Error> {
        // the DTU only knows the bounds of the whole near memory
        if util::checked_range(chunk.offset, chunk.size, self.staging.size()).is_none() {
            return Err(Error::new_msg(Code::InvArgs, format!(
                "chunk {}/{} exceeds staging buffer of {:#x} bytes", chunk.pass, chunk.index,
                self.staging.size()
            )));
        }

        let cmd = TransferCmd::new(
            self.far(dir), chunk.offset,
            self.staging.region(), self.staging.offset(chunk.offset)?,
            chunk.size, dir
        );
        self.dtu.issue(cmd)
    }

    /// Transfers pass `pass` of `geom` in direction `dir`
    ///
    /// All chunks of the pass are issued before the first one is waited for. The requests are
    /// waited for in issue order, and all of them are waited for even if issuing or waiting
    /// failed, so that nothing of this pass is in flight afterwards. The first error is returned,
    /// unless a later one is fatal.
    pub fn pass(&self, dir: Direction, pass: usize, geom: &Geometry) -> Result<(), Error> {
        let mut reqs = Vec::with_capacity(geom.chunk_count());
        let mut res = Ok(());

        for chunk in geom.pass_chunks(pass) {
            match self.issue(dir, &chunk) {
                Ok(req) => reqs.push(req),
                Err(e)  => {
                    res = Err(e);
                    break;
                },
            }
        }

        for req in reqs {
            if let Err(e) = self.dtu.wait(req) {
                res = match res {
                    Ok(())                                 => Err(e),
                    Err(old) if !old.code().is_fatal() &&
                                e.code().is_fatal()        => Err(e),
                    Err(old)                               => Err(old),
                };
            }
        }

        if let Err(ref e) = res {
            log!(SWEEP, "{:?} pass {} failed: {}", dir, pass, e);
        }
        res
    }

    /// Runs the whole pipeline for `geom`
    ///
    /// Every pass is moved into near memory, transformed there, and moved back into far memory
    /// before the next pass starts.
    pub fn process(&self, geom: &Geometry) -> Result<(), Error> {
        if geom.buf_size() > self.staging.size() {
            return Err(Error::new_msg(Code::InvArgs, format!(
                "staging buffer too small ({} < {})", self.staging.size(), geom.buf_size()
            )));
        }

        for pass in 0..geom.pass_count() {
            self.pass(Direction::EXT2LOC, pass, geom)?;

            let range = geom.pass_range(pass);
            self.staging.access(|buf| crate::transform::transform(&mut buf[range]));

            self.pass(Direction::LOC2EXT, pass, geom)?;
        }
        Ok(())
    }
}
