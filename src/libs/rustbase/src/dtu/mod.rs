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

//! The Data Transfer Unit interface
//!
//! The DTU moves data between far and near memory asynchronously. A transfer is started with
//! `DTU::issue`, which returns immediately with a `Request`. The request has to be handed back to
//! `DTU::wait` exactly once, which blocks until the transfer is complete. On the host, the DTU is
//! emulated by a number of channel threads that execute the transfers concurrently.

mod region;
mod thread;

use std::cell::Cell;
use std::fmt;
use std::sync::mpsc;

use crate::cfg;
use crate::errors::{Code, Error};
use crate::kif::Perm;
use crate::util;

pub use self::region::{Region, Tier};

pub type ChanId = usize;
pub type ReqId  = u64;

int_enum! {
    /// The direction of a transfer
    pub struct Direction : u8 {
        /// From far memory (external) to near memory (local)
        const EXT2LOC   = 0;
        /// From near memory (local) to far memory (external)
        const LOC2EXT   = 1;
    }
}

bitflags! {
    /// Faults the emulated DTU can inject to exercise the error paths of its users
    pub struct FaultFlags : u8 {
        /// Invert the first byte of every transfer into far memory
        const FLIP_BYTE         = 0x1;
        /// Execute transfers, but never signal their completion
        const DROP_COMPLETION   = 0x2;
    }
}

/// A transfer command
///
/// Like the hardware command, it names the external and the local side of the transfer; the
/// direction determines which side is read and which is written.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    ext: Region,
    ext_off: usize,
    loc: Region,
    loc_off: usize,
    size: usize,
    dir: Direction,
}

impl TransferCmd {
    /// Creates a command that transfers `size` bytes between `ext`+`ext_off` and `loc`+`loc_off`
    /// in direction `dir`
    pub fn new(ext: &Region, ext_off: usize, loc: &Region, loc_off: usize,
               size: usize, dir: Direction) -> Self {
        TransferCmd {
            ext: ext.clone(),
            ext_off: ext_off,
            loc: loc.clone(),
            loc_off: loc_off,
            size: size,
            dir: dir,
        }
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn ext_off(&self) -> usize {
        self.ext_off
    }
    pub fn loc_off(&self) -> usize {
        self.loc_off
    }

    /// Returns (source, source offset, destination, destination offset)
    fn resolve(&self) -> (&Region, usize, &Region, usize) {
        if self.dir == Direction::EXT2LOC {
            (&self.ext, self.ext_off, &self.loc, self.loc_off)
        }
        else {
            (&self.loc, self.loc_off, &self.ext, self.ext_off)
        }
    }

    fn check(&self) -> Result<(), Error> {
        if self.size == 0 {
            return Err(Error::new_msg(Code::InvArgs, "empty transfer"));
        }
        if self.dir != Direction::EXT2LOC && self.dir != Direction::LOC2EXT {
            return Err(Error::new_msg(Code::InvArgs, format!("invalid direction {}", self.dir.val)));
        }
        if self.ext.tier() != Tier::FAR || self.loc.tier() != Tier::NEAR {
            return Err(Error::new_msg(Code::InvTier, format!(
                "ext={:?}, loc={:?}", self.ext.tier(), self.loc.tier()
            )));
        }

        let (src, src_off, dst, dst_off) = self.resolve();
        if !src.perm().contains(Perm::R) || !dst.perm().contains(Perm::W) {
            return Err(Error::new_msg(Code::NoPerm, format!(
                "{:?} from {:?} to {:?}", self.dir, src.perm(), dst.perm()
            )));
        }
        if util::checked_range(src_off, self.size, src.size()).is_none() ||
           util::checked_range(dst_off, self.size, dst.size()).is_none() {
            return Err(Error::new_msg(Code::InvArgs, format!(
                "out of bounds (src={}+{:#x}, dst={}+{:#x}, size={:#x})",
                src.id(), src_off, dst.id(), dst_off, self.size
            )));
        }
        Ok(())
    }
}

/// The handle for an issued transfer
///
/// The request has to be passed to `DTU::wait`, which consumes it.
#[must_use = "every issued transfer has to be waited for"]
pub struct Request {
    id: ReqId,
    done: mpsc::Receiver<Result<(), Error>>,
}

impl Request {
    /// Returns the id of the request
    pub fn id(&self) -> ReqId {
        self.id
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Request[id={}]", self.id)
    }
}

/// The arguments for the DTU creation
pub struct DTUArgs {
    channels: usize,
    faults: FaultFlags,
}

impl DTUArgs {
    /// Creates the default arguments (`cfg::DTU_CHANNELS` channels, no faults)
    pub fn new() -> Self {
        DTUArgs {
            channels: cfg::DTU_CHANNELS,
            faults: FaultFlags::empty(),
        }
    }

    /// Sets the number of channels, i.e., the number of transfers that execute concurrently
    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Sets the faults to inject
    pub fn faults(mut self, faults: FaultFlags) -> Self {
        self.faults = faults;
        self
    }
}

impl Default for DTUArgs {
    fn default() -> Self {
        Self::new()
    }
}

/// The emulated data transfer unit
///
/// The DTU is driven by a single thread; the transfers itself are executed by the channels.
pub struct DTU {
    chans: thread::Channels,
    faults: FaultFlags,
    next_id: Cell<ReqId>,
    issued: Cell<u64>,
    waited: Cell<u64>,
    peak: Cell<u64>,
}

impl DTU {
    /// Creates a DTU with the default arguments
    pub fn new() -> Result<Self, Error> {
        Self::new_with(DTUArgs::new())
    }

    /// Creates a DTU with given arguments
    pub fn new_with(args: DTUArgs) -> Result<Self, Error> {
        if args.channels == 0 {
            return Err(Error::new_msg(Code::InvArgs, "DTU needs at least one channel"));
        }

        Ok(DTU {
            chans: thread::Channels::new(args.channels)?,
            faults: args.faults,
            next_id: Cell::new(0),
            issued: Cell::new(0),
            waited: Cell::new(0),
            peak: Cell::new(0),
        })
    }

    /// Returns the number of channels
    pub fn channels(&self) -> usize {
        self.chans.count()
    }

    /// Returns the number of issued transfers that have not been waited for
    pub fn outstanding(&self) -> u64 {
        self.issued.get() - self.waited.get()
    }

    /// Returns the total number of issued transfers
    pub fn issued(&self) -> u64 {
        self.issued.get()
    }

    /// Returns the highest number of transfers that have been outstanding at the same time
    pub fn peak_outstanding(&self) -> u64 {
        self.peak.get()
    }

    /// Starts the given transfer and returns the request to wait for it
    ///
    /// The command is checked before it is started; a rejected command does not produce a
    /// request.
    pub fn issue(&self, cmd: TransferCmd) -> Result<Request, Error> {
        if let Err(e) = cmd.check() {
            log!(DTU, "DTU-error: rejecting {:?}: {}", cmd.dir(), e);
            return Err(e);
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let (tx, rx) = mpsc::channel();
        log!(
            DTU, "#{} {:?} {:#x}b ext={:#x} loc={:#x}",
            id, cmd.dir(), cmd.size(), cmd.ext_off(), cmd.loc_off()
        );
        self.chans.submit(thread::Job::new(id, cmd, self.faults, tx))?;

        self.issued.set(self.issued.get() + 1);
        self.peak.set(self.peak.get().max(self.outstanding()));
        Ok(Request {
            id: id,
            done: rx,
        })
    }

    /// Blocks until the transfer of given request is complete
    ///
    /// If the DTU can never signal the completion, `Code::StalledTransfer` is returned.
    pub fn wait(&self, req: Request) -> Result<(), Error> {
        self.waited.set(self.waited.get() + 1);
        match req.done.recv() {
            Ok(res) => res,
            Err(_)  => {
                log!(DTU, "DTU-error: #{} will never complete", req.id);
                Err(Error::new_msg(Code::StalledTransfer, format!("request #{}", req.id)))
            },
        }
    }
}

impl fmt::Debug for DTU {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DTU[chans={}, issued={}, outstanding={}, faults={:?}]",
            self.channels(), self.issued(), self.outstanding(), self.faults)
    }
}
