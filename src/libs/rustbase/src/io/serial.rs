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

//! Contains the serial struct

use std::io::{self, Write};

/// The serial line
///
/// On the host, the serial line is the standard error stream of the process. Every write is
/// performed with the stream locked, so that lines of different channels do not interleave.
#[derive(Default)]
pub struct Serial {
}

impl Serial {
    /// Creates a new serial line
    pub fn new() -> Self {
        Serial {}
    }
}

impl Write for Serial {
    fn flush(&mut self) -> io::Result<()> {
        io::stderr().lock().flush()
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write_all(buf)?;
        Ok(buf.len())
    }
}
