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

use base::errors::{Code, Error};
use base::test;

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, codes);
    run_test!(t, display);
    run_test!(t, fatal);
}

fn codes() {
    for raw in 1..9 {
        let code = Code::from(raw);
        assert_eq!(code as u32, raw);
        assert_eq!(Error::from(raw).code(), code);
    }
    assert_eq!(Code::from(0), Code::Abort);
    assert_eq!(Code::from(9), Code::Abort);
    assert_eq!(Code::from(42), Code::Abort);
}

fn display() {
    let e = Error::new(Code::NoSpace);
    assert_eq!(e.to_string(), "NoSpace");
    assert_eq!(e.msg(), None);

    let e = Error::new_msg(Code::InvalidGeometry, "2048 bytes in 5 passes with 3 chunks");
    assert_eq!(e.to_string(), "InvalidGeometry: 2048 bytes in 5 passes with 3 chunks");
    assert_eq!(e.msg(), Some("2048 bytes in 5 passes with 3 chunks"));
    assert!(format!("{:?}", e).starts_with("InvalidGeometry (2048 bytes"));

    // errors compare by code only
    assert_eq!(e, Error::from(Code::InvalidGeometry));
}

fn fatal() {
    assert!(Code::StalledTransfer.is_fatal());
    for code in &[Code::InvalidGeometry, Code::NoSpace, Code::InvArgs, Code::NoPerm, Code::InvTier] {
        assert!(!code.is_fatal());
    }
}
