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

use base::dtu::{DTUArgs, Direction, FaultFlags, Region, Tier, TransferCmd, DTU};
use base::errors::Code;
use base::kif::Perm;
use base::test;

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, create);
    run_test!(t, roundtrip);
    run_test!(t, reject);
    run_test!(t, concurrent);
    run_test!(t, flip_byte);
    run_test!(t, drop_completion);
}

fn pattern(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 7 + 3) as u8).collect()
}

fn create() {
    assert_err!(DTU::new_with(DTUArgs::new().channels(0)), Code::InvArgs);

    let dtu = assert_ok!(DTU::new_with(DTUArgs::new().channels(3)));
    assert_eq!(dtu.channels(), 3);
    assert_eq!(dtu.issued(), 0);
    assert_eq!(dtu.outstanding(), 0);
}

fn roundtrip() {
    let dtu = assert_ok!(DTU::new());
    let src = Region::new(Tier::FAR, 0x400, Perm::R);
    let dst = Region::new(Tier::FAR, 0x400, Perm::W);
    let loc = Region::new(Tier::NEAR, 0x1000, Perm::RW);
    assert_ok!(src.write(&pattern(0x400), 0));

    let req = assert_ok!(dtu.issue(TransferCmd::new(&src, 0x100, &loc, 0x800, 0x200, Direction::EXT2LOC)));
    assert_eq!(dtu.outstanding(), 1);
    assert_ok!(dtu.wait(req));
    assert_eq!(dtu.outstanding(), 0);
    assert_eq!(&loc.to_vec()[0x800..0xA00], &pattern(0x400)[0x100..0x300]);

    let req = assert_ok!(dtu.issue(TransferCmd::new(&dst, 0x0, &loc, 0x800, 0x200, Direction::LOC2EXT)));
    assert_ok!(dtu.wait(req));
    let out = dst.to_vec();
    assert_eq!(&out[0..0x200], &pattern(0x400)[0x100..0x300]);
    assert!(out[0x200..].iter().all(|b| *b == 0));
}

fn reject() {
    let dtu = assert_ok!(DTU::new());
    let src = Region::new(Tier::FAR, 0x100, Perm::R);
    let dst = Region::new(Tier::FAR, 0x100, Perm::W);
    let loc = Region::new(Tier::NEAR, 0x100, Perm::RW);

    // empty transfer
    assert_err!(dtu.issue(TransferCmd::new(&src, 0, &loc, 0, 0, Direction::EXT2LOC)), Code::InvArgs);
    // invalid direction
    assert_err!(dtu.issue(TransferCmd::new(&src, 0, &loc, 0, 8, Direction::from(7))), Code::InvArgs);
    // the local side has to be near memory
    assert_err!(dtu.issue(TransferCmd::new(&src, 0, &dst, 0, 8, Direction::EXT2LOC)), Code::InvTier);
    assert_err!(dtu.issue(TransferCmd::new(&loc, 0, &loc, 0, 8, Direction::EXT2LOC)), Code::InvTier);
    // the source is read-only and the destination is write-only
    assert_err!(dtu.issue(TransferCmd::new(&dst, 0, &loc, 0, 8, Direction::EXT2LOC)), Code::NoPerm);
    assert_err!(dtu.issue(TransferCmd::new(&src, 0, &loc, 0, 8, Direction::LOC2EXT)), Code::NoPerm);
    // out of bounds on either side
    assert_err!(dtu.issue(TransferCmd::new(&src, 0xF8, &loc, 0, 16, Direction::EXT2LOC)), Code::InvArgs);
    assert_err!(dtu.issue(TransferCmd::new(&dst, 0, &loc, 0xF8, 16, Direction::LOC2EXT)), Code::InvArgs);
    assert_err!(dtu.issue(TransferCmd::new(&src, usize::max_value(), &loc, 0, 1, Direction::EXT2LOC)),
        Code::InvArgs);

    // rejected commands do not produce requests
    assert_eq!(dtu.issued(), 0);
    assert_eq!(dtu.outstanding(), 0);
}

fn concurrent() {
    let dtu = assert_ok!(DTU::new_with(DTUArgs::new().channels(4)));
    let src = Region::new(Tier::FAR, 0x1000, Perm::R);
    let loc = Region::new(Tier::NEAR, 0x1000, Perm::RW);
    assert_ok!(src.write(&pattern(0x1000), 0));

    let mut reqs = Vec::new();
    for i in 0..16 {
        let off = i * 0x100;
        reqs.push(assert_ok!(dtu.issue(TransferCmd::new(&src, off, &loc, off, 0x100, Direction::EXT2LOC))));
    }
    assert_eq!(dtu.outstanding(), 16);

    for req in reqs {
        assert_ok!(dtu.wait(req));
    }
    assert_eq!(dtu.issued(), 16);
    assert_eq!(dtu.outstanding(), 0);
    assert_eq!(loc.to_vec(), pattern(0x1000));
}

fn flip_byte() {
    let dtu = assert_ok!(DTU::new_with(DTUArgs::new().faults(FaultFlags::FLIP_BYTE)));
    let src = Region::new(Tier::FAR, 0x10, Perm::R);
    let dst = Region::new(Tier::FAR, 0x10, Perm::W);
    let loc = Region::new(Tier::NEAR, 0x10, Perm::RW);
    assert_ok!(src.write(&pattern(0x10), 0));

    // only transfers into far memory are corrupted
    let req = assert_ok!(dtu.issue(TransferCmd::new(&src, 0, &loc, 0, 0x10, Direction::EXT2LOC)));
    assert_ok!(dtu.wait(req));
    assert_eq!(loc.to_vec(), pattern(0x10));

    let req = assert_ok!(dtu.issue(TransferCmd::new(&dst, 0, &loc, 0, 0x10, Direction::LOC2EXT)));
    assert_ok!(dtu.wait(req));
    let out = dst.to_vec();
    assert_eq!(out[0], !pattern(0x10)[0]);
    assert_eq!(&out[1..], &pattern(0x10)[1..]);
}

fn drop_completion() {
    let dtu = assert_ok!(DTU::new_with(DTUArgs::new().faults(FaultFlags::DROP_COMPLETION)));
    let src = Region::new(Tier::FAR, 0x10, Perm::R);
    let loc = Region::new(Tier::NEAR, 0x10, Perm::RW);

    let req = assert_ok!(dtu.issue(TransferCmd::new(&src, 0, &loc, 0, 0x10, Direction::EXT2LOC)));
    assert_err!(dtu.wait(req), Code::StalledTransfer);
    assert_eq!(dtu.outstanding(), 0);
}
