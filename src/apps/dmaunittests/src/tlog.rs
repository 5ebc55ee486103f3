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

use base::io::log::{self, LogFlags};
use base::test;

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, parse);
    run_test!(t, enable);
}

fn parse() {
    assert_eq!(log::parse_flags(""), LogFlags::DEF);
    assert_eq!(log::parse_flags("dtu"), LogFlags::DEF | LogFlags::DTU);
    assert_eq!(log::parse_flags("dtu, MEM,foo"), LogFlags::DEF | LogFlags::DTU | LogFlags::MEM);
    assert_eq!(log::parse_flags("all"), LogFlags::ALL);
}

fn enable() {
    let old = log::flags();

    log::set_flags(LogFlags::DEF | LogFlags::SWEEP);
    assert!(log::enabled(LogFlags::SWEEP));
    assert!(!log::enabled(LogFlags::DTU));
    log!(SWEEP, "logging with {} and {:#x}", "args", 0x10);
    log!(DTU, "this one is dropped");

    log::set_flags(old);
    assert_eq!(log::flags(), old);
}
