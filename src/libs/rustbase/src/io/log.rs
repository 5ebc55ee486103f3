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

//! Contains the logger

use std::cell::RefCell;
use std::env;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::io::Serial;

bitflags! {
    /// The log categories
    pub struct LogFlags : u32 {
        /// Default log message type
        const DEF       = 0x1;
        /// Logs DTU operations (issue, completion, channel activity)
        const DTU       = 0x2;
        /// Logs near-memory allocations
        const MEM       = 0x4;
        /// Logs the progress of a sweep
        const SWEEP     = 0x8;
        /// All categories
        const ALL       = Self::DEF.bits | Self::DTU.bits | Self::MEM.bits | Self::SWEEP.bits;
    }
}

/// The environment variable that selects the log categories (e.g., "dtu,mem" or "all")
pub const ENV_VAR: &str = "DMASWEEP_LOG";

const MAX_LINE_LEN: usize = 160;
const SUFFIX: &[u8] = b"\x1B[0m";

static FLAGS: AtomicU32 = AtomicU32::new(LogFlags::DEF.bits());

thread_local! {
    static LOG: RefCell<Log> = RefCell::new(Log::new());
}

/// Returns true if the given category is enabled
pub fn enabled(flags: LogFlags) -> bool {
    LogFlags::from_bits_truncate(FLAGS.load(Ordering::Relaxed)).intersects(flags)
}

/// Replaces the set of enabled categories
pub fn set_flags(flags: LogFlags) {
    FLAGS.store(flags.bits(), Ordering::Relaxed);
}

/// Returns the set of enabled categories
pub fn flags() -> LogFlags {
    LogFlags::from_bits_truncate(FLAGS.load(Ordering::Relaxed))
}

/// Parses a comma-separated list of category names
///
/// Unknown names are ignored. `DEF` is always part of the result.
pub fn parse_flags(spec: &str) -> LogFlags {
    let mut flags = LogFlags::DEF;
    for name in spec.split(',').map(|s| s.trim()) {
        flags |= match name.to_ascii_lowercase().as_str() {
            "def"   => LogFlags::DEF,
            "dtu"   => LogFlags::DTU,
            "mem"   => LogFlags::MEM,
            "sweep" => LogFlags::SWEEP,
            "all"   => LogFlags::ALL,
            _       => LogFlags::empty(),
        };
    }
    flags
}

/// A buffered logger that writes to the serial line
///
/// Every thread has its own logger, identified by a channel id that is part of the line prefix.
pub struct Log {
    serial: Serial,
    buf: [u8; MAX_LINE_LEN],
    pos: usize,
    start_pos: usize,
}

impl Log {
    /// Calls `func` with the logger of the current thread
    pub fn with<F: FnOnce(&mut Log)>(func: F) {
        // logging during thread teardown is silently dropped
        LOG.try_with(|l| func(&mut l.borrow_mut())).ok();
    }

    /// Creates a new logger
    pub fn new() -> Self {
        let mut log = Log {
            serial: Serial::new(),
            buf: [0; MAX_LINE_LEN],
            pos: 0,
            start_pos: 0,
        };
        log.init(0);
        log
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.put_char(*b)
        }
    }

    fn put_char(&mut self, c: u8) {
        self.buf[self.pos] = c;
        self.pos += 1;

        if c == b'\n' || self.pos + SUFFIX.len() + 1 >= MAX_LINE_LEN {
            for s in SUFFIX {
                self.buf[self.pos] = *s;
                self.pos += 1;
            }
            if c != b'\n' {
                self.buf[self.pos] = b'\n';
                self.pos += 1;
            }

            // there is no better place to report a broken stderr
            self.flush().ok();
        }
    }

    pub(crate) fn init(&mut self, chan: usize) {
        let colors = ["31", "32", "33", "34", "35", "36"];
        let name = env::args().next().unwrap_or_else(|| String::from("Unknown"));
        let begin = match name.rfind('/') {
            Some(b) => b + 1,
            None    => 0,
        };

        self.pos = 0;
        self.write_fmt(format_args!(
            "\x1B[0;{}m[{:.8}@{:x}] ",
            colors[chan % colors.len()],
            &name[begin..],
            chan
        )).ok();
        self.start_pos = self.pos;
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for Log {
    fn flush(&mut self) -> io::Result<()> {
        self.serial.write_all(&self.buf[0..self.pos])?;
        self.pos = self.start_pos;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }
}

/// Initializes the logger from the environment
pub fn init() {
    if let Ok(spec) = env::var(ENV_VAR) {
        set_flags(parse_flags(&spec));
    }
    reinit(0);
}

/// Reinitializes the logger of the current thread with the given channel id
pub fn reinit(chan: usize) {
    Log::with(|l| l.init(chan));
}
