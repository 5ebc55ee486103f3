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

use base::errors::Code;
use base::mem::{MemMap, NearMem};
use base::test;

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, map_alloc_free);
    run_test!(t, map_align);
    run_test!(t, map_errors);
    run_test!(t, near_alloc);
    run_test!(t, near_exhausted);
    run_test!(t, near_access);
}

fn map_alloc_free() {
    let mut map = MemMap::new(0, 0x1000);
    assert_eq!(map.size(), (0x1000, 1));

    let a = assert_ok!(map.allocate(0x100, 8));
    let b = assert_ok!(map.allocate(0x100, 8));
    let c = assert_ok!(map.allocate(0x100, 8));
    assert_eq!((a, b, c), (0, 0x100, 0x200));
    assert_eq!(map.size(), (0xD00, 1));

    // freeing in the middle leaves a hole
    map.free(b, 0x100);
    assert_eq!(map.size(), (0xE00, 2));

    // first fit takes the hole again
    assert_eq!(assert_ok!(map.allocate(0x80, 8)), 0x100);
    map.free(0x100, 0x80);

    map.free(a, 0x100);
    assert_eq!(map.size(), (0xF00, 2));
    map.free(c, 0x100);
    assert_eq!(map.size(), (0x1000, 1));
}

fn map_align() {
    let mut map = MemMap::new(0x4, 0x100);
    assert_eq!(assert_ok!(map.allocate(0x10, 0x10)), 0x10);
    // the part in front of the aligned area stays free
    assert_eq!(map.size(), (0xF0, 2));
    assert_eq!(assert_ok!(map.allocate(0x8, 0x4)), 0x4);

    map.free(0x4, 0x8);
    map.free(0x10, 0x10);
    assert_eq!(map.size(), (0x100, 1));
}

fn map_errors() {
    let mut map = MemMap::new(0, 0x100);
    assert_err!(map.allocate(0, 8), Code::InvArgs);
    assert_err!(map.allocate(8, 3), Code::InvArgs);
    assert_err!(map.allocate(0x101, 8), Code::NoSpace);

    let mut empty = MemMap::new(0, 0);
    assert_err!(empty.allocate(1, 1), Code::NoSpace);
}

fn near_alloc() {
    let mem = NearMem::new(0x1000);
    assert_eq!(mem.capacity(), 0x1000);
    assert_eq!(mem.available(), 0x1000);

    {
        let a = assert_ok!(mem.alloc(0x800));
        let b = assert_ok!(mem.alloc(0x400));
        assert_eq!(a.size(), 0x800);
        assert_eq!(b.addr(), 0x800);
        assert_eq!(mem.available(), 0x400);
        assert_eq!(a.region().id(), mem.region().id());
    }

    // dropped buffers are returned to the pool
    assert_eq!(mem.available(), 0x1000);
}

fn near_exhausted() {
    let mem = NearMem::new(0x1000);
    assert_err!(mem.alloc(0x1001), Code::NoSpace);

    let _buf = assert_ok!(mem.alloc(0xC00));
    assert_err!(mem.alloc(0x800), Code::NoSpace);
    assert_eq!(mem.available(), 0x400);
}

fn near_access() {
    let mem = NearMem::new(0x100);
    let _pad = assert_ok!(mem.alloc(0x10));
    let buf = assert_ok!(mem.alloc(0x20));

    assert_eq!(assert_ok!(buf.offset(0)), 0x10);
    assert_eq!(assert_ok!(buf.offset(0x20)), 0x30);
    assert_err!(buf.offset(0x21), Code::InvArgs);

    buf.access(|data| {
        assert_eq!(data.len(), 0x20);
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }
    });

    let mut out = [0u8; 4];
    assert_ok!(mem.region().read(&mut out, 0x10));
    assert_eq!(out, [0, 1, 2, 3]);
}
