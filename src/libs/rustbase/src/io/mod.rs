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

//! Contains the modules for serial output, logging, etc.

pub mod log;
mod serial;

pub use self::serial::Serial;

#[macro_export]
macro_rules! log_impl {
    ($type:expr, $($args:tt)*) => ({
        if $crate::io::log::enabled($type) {
            $crate::io::log::Log::with(|l| {
                #[allow(unused_imports)]
                use std::io::Write;
                l.write_fmt(format_args!($($args)*)).ok();
            });
        }
    })
}

/// Macro for logging (includes a trailing newline)
///
/// The arguments are printed if the category `io::log::LogFlags::$type` is enabled.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate base;
/// # fn main() {
/// log!(DTU, "my log entry: {}, {}", 1, "test");
/// # }
/// ```
#[macro_export]
macro_rules! log {
    ($type:tt, $fmt:expr)              => (
        $crate::log_impl!($crate::io::log::LogFlags::$type, concat!($fmt, "\n"))
    );
    ($type:tt, $fmt:expr, $($arg:tt)*) => (
        $crate::log_impl!($crate::io::log::LogFlags::$type, concat!($fmt, "\n"), $($arg)*)
    );
}

/// Initializes the I/O module
///
/// The enabled log categories are taken from the environment variable `DMASWEEP_LOG`.
pub fn init() {
    log::init();
}
