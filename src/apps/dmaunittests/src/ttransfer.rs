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

use base::dtu::{DTUArgs, Direction, FaultFlags, Region, Tier, DTU};
use base::errors::Code;
use base::kif::Perm;
use base::mem::NearMem;
use base::test;
use dma::plan::plan;
use dma::rand::Lcg;
use dma::transfer::TransferStage;
use dma::transform;

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, single_pass);
    run_test!(t, all_geometries);
    run_test!(t, in_flight);
    run_test!(t, issue_failure);
    run_test!(t, small_staging);
    run_test!(t, stalled);
}

struct Env {
    dtu: DTU,
    src: Region,
    dst: Region,
    near: NearMem,
}

impl Env {
    fn new(args: DTUArgs) -> Self {
        let src = Region::new(Tier::FAR, 2048, Perm::R);
        Lcg::new(1).fill(&mut src.data());
        Env {
            dtu: assert_ok!(DTU::new_with(args)),
            src: src,
            dst: Region::new(Tier::FAR, 2048, Perm::W),
            near: NearMem::new(0x4000),
        }
    }
}

fn single_pass() {
    let env = Env::new(DTUArgs::new());
    let staging = assert_ok!(env.near.alloc(2048));
    let stage = TransferStage::new(&env.dtu, &env.src, &env.dst, &staging);
    let geom = assert_ok!(plan(2048, 2, 4));

    assert_ok!(stage.pass(Direction::EXT2LOC, 1, &geom));
    assert_eq!(env.dtu.issued(), 2);
    assert_eq!(env.dtu.outstanding(), 0);

    let src = env.src.to_vec();
    let data = staging.access(|d| d.to_vec());
    assert_eq!(&data[512..1024], &src[512..1024]);
    assert!(data[..512].iter().chain(data[1024..].iter()).all(|b| *b == 0));

    // moving the pass back does not touch the other passes in far memory
    assert_ok!(stage.pass(Direction::LOC2EXT, 1, &geom));
    let dst = env.dst.to_vec();
    assert_eq!(&dst[512..1024], &src[512..1024]);
    assert!(dst[..512].iter().chain(dst[1024..].iter()).all(|b| *b == 0));
}

fn all_geometries() {
    let env = Env::new(DTUArgs::new().channels(3));
    let mut expected = env.src.to_vec();
    transform::transform(&mut expected);

    for &chunks in &[1, 2, 4, 8] {
        for &passes in &[1, 2, 4, 8] {
            env.dst.fill(0);
            let staging = assert_ok!(env.near.alloc(2048));
            let geom = assert_ok!(plan(2048, chunks, passes));

            let before = env.dtu.issued();
            assert_ok!(TransferStage::new(&env.dtu, &env.src, &env.dst, &staging).process(&geom));
            assert_eq!(env.dtu.issued() - before, 2 * (chunks * passes) as u64);
            // one pass in flight at a time
            assert_eq!(env.dtu.peak_outstanding(), chunks as u64);
            assert_eq!(env.dst.to_vec(), expected);
        }
    }
    assert_eq!(env.near.available(), env.near.capacity());
}

fn in_flight() {
    let env = Env::new(DTUArgs::new().channels(2));
    let staging = assert_ok!(env.near.alloc(2048));
    let stage = TransferStage::new(&env.dtu, &env.src, &env.dst, &staging);
    let geom = assert_ok!(plan(2048, 8, 2));

    // all chunks of a pass are issued before the first one is waited for
    assert_ok!(stage.pass(Direction::EXT2LOC, 0, &geom));
    assert_eq!(env.dtu.issued(), 8);
    assert_eq!(env.dtu.peak_outstanding(), 8);
    assert_eq!(env.dtu.outstanding(), 0);

    // passes do not overlap
    assert_ok!(stage.pass(Direction::EXT2LOC, 1, &geom));
    assert_eq!(env.dtu.issued(), 16);
    assert_eq!(env.dtu.peak_outstanding(), 8);
}

fn issue_failure() {
    let env = Env::new(DTUArgs::new());
    let staging = assert_ok!(env.near.alloc(1024));
    let stage = TransferStage::new(&env.dtu, &env.src, &env.dst, &staging);
    let geom = assert_ok!(plan(2048, 2, 1));

    // the second chunk does not fit, but the first one is still completed
    assert_err!(stage.pass(Direction::EXT2LOC, 0, &geom), Code::InvArgs);
    assert_eq!(env.dtu.issued(), 1);
    assert_eq!(env.dtu.outstanding(), 0);
    assert_eq!(staging.access(|d| d.to_vec()), env.src.to_vec()[..1024].to_vec());
}

fn small_staging() {
    let env = Env::new(DTUArgs::new());
    let staging = assert_ok!(env.near.alloc(1024));
    let geom = assert_ok!(plan(2048, 1, 1));

    assert_err!(TransferStage::new(&env.dtu, &env.src, &env.dst, &staging).process(&geom), Code::InvArgs);
    assert_eq!(env.dtu.issued(), 0);
}

fn stalled() {
    let env = Env::new(DTUArgs::new().faults(FaultFlags::DROP_COMPLETION));
    let staging = assert_ok!(env.near.alloc(2048));
    let stage = TransferStage::new(&env.dtu, &env.src, &env.dst, &staging);
    let geom = assert_ok!(plan(2048, 4, 2));

    assert_err!(stage.pass(Direction::EXT2LOC, 0, &geom), Code::StalledTransfer);
    // every issued request has been waited for
    assert_eq!(env.dtu.issued(), 4);
    assert_eq!(env.dtu.outstanding(), 0);
}
