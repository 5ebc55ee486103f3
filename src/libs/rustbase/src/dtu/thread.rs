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

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::dtu::{ChanId, Direction, FaultFlags, ReqId, TransferCmd};
use crate::errors::{Code, Error};
use crate::io;

pub(crate) struct Job {
    id: ReqId,
    cmd: TransferCmd,
    faults: FaultFlags,
    done: mpsc::Sender<Result<(), Error>>,
}

impl Job {
    pub fn new(id: ReqId, cmd: TransferCmd, faults: FaultFlags,
               done: mpsc::Sender<Result<(), Error>>) -> Self {
        Job {
            id: id,
            cmd: cmd,
            faults: faults,
            done: done,
        }
    }
}

type Queue = Arc<Mutex<mpsc::Receiver<Job>>>;

/// The channels of the DTU, each executing one transfer at a time
pub(crate) struct Channels {
    queue: Option<mpsc::Sender<Job>>,
    threads: Vec<thread::JoinHandle<()>>,
}

impl Channels {
    pub fn new(count: usize) -> Result<Self, Error> {
        let (tx, rx) = mpsc::channel();
        let rx: Queue = Arc::new(Mutex::new(rx));

        let mut chans = Channels {
            queue: Some(tx),
            threads: Vec::with_capacity(count),
        };
        for chan in 0..count {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("dtu-chan{}", chan))
                .spawn(move || run(chan, rx))
                .map_err(|e| Error::new_msg(Code::Abort, format!(
                    "unable to start channel {}: {}", chan, e
                )))?;
            chans.threads.push(handle);
        }
        Ok(chans)
    }

    pub fn count(&self) -> usize {
        self.threads.len()
    }

    pub fn submit(&self, job: Job) -> Result<(), Error> {
        let queue = self.queue.as_ref().ok_or_else(|| Error::new(Code::Abort))?;
        queue.send(job).map_err(|e| {
            Error::new_msg(Code::StalledTransfer, format!("no channel accepts request #{}", e.0.id))
        })
    }
}

impl Drop for Channels {
    fn drop(&mut self) {
        // closing the queue stops all channels once they are idle
        self.queue = None;
        for t in self.threads.drain(..) {
            t.join().ok();
        }
    }
}

fn transfer(bounce: &mut Vec<u8>, job: &Job) -> Result<(), Error> {
    let (src, src_off, dst, dst_off) = job.cmd.resolve();
    let size = job.cmd.size();

    // never hold two region locks at once
    bounce.resize(size, 0);
    src.read(&mut bounce[..size], src_off)?;
    if job.faults.contains(FaultFlags::FLIP_BYTE) && job.cmd.dir() == Direction::LOC2EXT {
        bounce[0] ^= 0xFF;
    }
    dst.write(&bounce[..size], dst_off)?;

    log!(
        DTU, "#{} {:?} {:#x}b {}+{:#x} -> {}+{:#x}",
        job.id, job.cmd.dir(), size, src.id(), src_off, dst.id(), dst_off
    );
    Ok(())
}

fn run(chan: ChanId, queue: Queue) {
    io::log::reinit(chan + 1);

    let mut bounce = Vec::new();
    loop {
        let job = {
            let q = queue.lock().unwrap_or_else(|e| e.into_inner());
            q.recv()
        };

        match job {
            Ok(job) => {
                let res = transfer(&mut bounce, &job);
                if job.faults.contains(FaultFlags::DROP_COMPLETION) {
                    log!(DTU, "DTU-error: dropping completion of #{}", job.id);
                    continue;
                }
                // the issuer might be gone already, which leaves nobody to inform
                job.done.send(res).ok();
            },
            Err(_) => break,
        }
    }

    log!(DTU, "channel {} stopped", chan);
}
