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

use base::dtu::FaultFlags;
use base::errors::Code;
use base::test;
use dma::rand::Lcg;
use dma::report::Status;
use dma::sweep::{run_sweep, Sweep, SweepConfig};
use dma::transform::transform;
use dma::verify::Outcome;

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, defaults);
    run_test!(t, full_sweep);
    run_test!(t, deterministic);
    run_test!(t, single_chunk);
    run_test!(t, two_by_four);
    run_test!(t, invalid_geometry);
    run_test!(t, no_memory);
    run_test!(t, corrupted);
    run_test!(t, stalled);
    run_test!(t, stalled_keeps_records);
    run_test!(t, repeats);
    run_test!(t, bad_engine);
}

fn expected_output(size: usize) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    Lcg::new(1).fill(&mut buf);
    transform(&mut buf);
    buf
}

fn defaults() {
    let cfg = SweepConfig::default();
    assert_eq!(cfg.get_buf_size(), 2048);
    assert_eq!(cfg.get_chunk_counts(), &[1, 2, 4, 8]);
    assert_eq!(cfg.get_pass_counts(), &[1, 2, 4, 8]);
    assert_eq!(cfg.get_seed(), 1);
}

fn full_sweep() {
    let mut sweep = assert_ok!(Sweep::new(SweepConfig::new()));
    let results = assert_ok!(sweep.run());

    assert_eq!(results.len(), 16);
    let mut idx = 0;
    for &chunks in &[1, 2, 4, 8] {
        for &passes in &[1, 2, 4, 8] {
            let r = &results[idx];
            assert_eq!((r.chunk_count, r.pass_count, r.buf_size), (chunks, passes, 2048));
            assert_eq!(r.outcome, Outcome::Success);
            assert_eq!(r.record().status, Status::SUCCESS);
            idx += 1;
        }
    }

    // staging is released after every configuration
    assert_eq!(sweep.near_mem().available(), sweep.near_mem().capacity());
    assert_eq!(sweep.dtu().outstanding(), 0);
    assert_eq!(sweep.destination().to_vec(), expected_output(2048));
}

fn deterministic() {
    let cfg = SweepConfig::new().chunk_counts(&[2, 8]).pass_counts(&[1, 4]);

    let mut a = assert_ok!(Sweep::new(cfg.clone()));
    let mut b = assert_ok!(Sweep::new(cfg));
    let ra = assert_ok!(a.run());
    let rb = assert_ok!(b.run());

    let outcomes = |r: &[dma::RunResult]| r.iter().map(|x| x.outcome.clone()).collect::<Vec<_>>();
    assert_eq!(outcomes(&ra), outcomes(&rb));
    assert_eq!(a.source().to_vec(), b.source().to_vec());
    assert_eq!(a.destination().to_vec(), b.destination().to_vec());
}

fn single_chunk() {
    let mut sweep = assert_ok!(Sweep::new(SweepConfig::new()));
    let res = assert_ok!(sweep.run_config(1, 1));
    assert_eq!(res.outcome, Outcome::Success);
    assert_eq!(res.chunk_size(), 2048);
    assert_eq!(sweep.dtu().issued(), 2);

    let src = sweep.source().to_vec();
    let dst = sweep.destination().to_vec();
    assert_eq!(src[0], 0xA6);
    assert_eq!(dst[0], 0xF2);
    assert_eq!(dst, expected_output(2048));
}

fn two_by_four() {
    let mut sweep = assert_ok!(Sweep::new(SweepConfig::new()));
    let res = assert_ok!(sweep.run_config(2, 4));
    assert_eq!(res.outcome, Outcome::Success);
    assert_eq!(res.chunk_size(), 256);
    // 8 transfers per direction
    assert_eq!(sweep.dtu().issued(), 16);
    assert_eq!(sweep.destination().to_vec(), expected_output(2048));
}

fn invalid_geometry() {
    let cfg = SweepConfig::new().chunk_counts(&[3, 1]).pass_counts(&[5, 1]);
    let results = assert_ok!(run_sweep(&cfg));

    let status: Vec<Status> = results.iter().map(|r| r.record().status).collect();
    assert_eq!(status, vec![Status::INVALID, Status::INVALID, Status::INVALID, Status::SUCCESS]);
    assert_matches!(results[0].outcome, Outcome::Failed(Code::InvalidGeometry));
    assert_eq!(results[0].cycles, 0);
}

fn no_memory() {
    let mut sweep = assert_ok!(Sweep::new(SweepConfig::new().near_size(1024).pass_counts(&[1, 2])));
    let results = assert_ok!(sweep.run());

    assert_eq!(results.len(), 8);
    for r in &results {
        assert_matches!(r.outcome, Outcome::Failed(Code::NoSpace));
        assert_eq!(r.record().status, Status::NOMEM);
    }
    // no transfer has been started
    assert_eq!(sweep.dtu().issued(), 0);
}

fn corrupted() {
    let cfg = SweepConfig::new().faults(FaultFlags::FLIP_BYTE);
    let mut sweep = assert_ok!(Sweep::new(cfg));
    let res = assert_ok!(sweep.run_config(2, 4));

    match res.outcome {
        Outcome::Mismatch(ref m) => {
            // the first byte of every transfer into far memory
            assert_eq!(m.count, 8);
            let idx: Vec<usize> = m.samples.iter().map(|s| s.index).collect();
            assert_eq!(idx, vec![0, 256, 512, 768, 1024, 1280, 1536, 1792]);
            assert_eq!(m.samples[0].source, 0xA6);
            assert_eq!(m.samples[0].expected, 0xF2);
            assert_eq!(m.samples[0].observed, 0x0D);
        },
        ref o => panic!("unexpected outcome {:?}", o),
    }
    assert_eq!(res.record().status, Status::FAIL);

    // the sweep continues after a failed verification
    let results = assert_ok!(sweep.run());
    assert_eq!(results.len(), 16);
    assert!(results.iter().all(|r| r.record().status == Status::FAIL));
    assert_eq!(sweep.near_mem().available(), sweep.near_mem().capacity());
}

fn stalled() {
    let cfg = SweepConfig::new().faults(FaultFlags::DROP_COMPLETION);
    assert_err!(run_sweep(&cfg), Code::StalledTransfer);

    let mut sweep = assert_ok!(Sweep::new(SweepConfig::new().faults(FaultFlags::DROP_COMPLETION)));
    assert_err!(sweep.run_config(4, 2), Code::StalledTransfer);
    assert_eq!(sweep.dtu().outstanding(), 0);
    assert_eq!(sweep.near_mem().available(), sweep.near_mem().capacity());
}

fn stalled_keeps_records() {
    let cfg = SweepConfig::new().chunk_counts(&[3, 1]).pass_counts(&[5, 1]);

    // every result is delivered as soon as it is recorded
    let mut seen = Vec::new();
    let mut sweep = assert_ok!(Sweep::new(cfg.clone()));
    let results = assert_ok!(sweep.run_with(|r| seen.push(r.record())));
    let records: Vec<_> = results.iter().map(|r| r.record()).collect();
    assert_eq!(seen, records);

    // the configurations before the stalled one are still reported
    let mut seen = Vec::new();
    let mut sweep = assert_ok!(Sweep::new(cfg.faults(FaultFlags::DROP_COMPLETION)));
    let res = sweep.run_with(|r| seen.push(r.record()));
    assert_err!(res, Code::StalledTransfer);

    let keys: Vec<(usize, usize, Status)> = seen.iter()
        .map(|r| (r.chunk_count, r.pass_count, r.status))
        .collect();
    assert_eq!(keys, vec![
        (3, 5, Status::INVALID),
        (3, 1, Status::INVALID),
        (1, 5, Status::INVALID),
    ]);
}

fn repeats() {
    let cfg = SweepConfig::new().repeats(3).warmup(1);
    let mut sweep = assert_ok!(Sweep::new(cfg));
    let res = assert_ok!(sweep.run_config(4, 2));

    assert_eq!(res.outcome, Outcome::Success);
    // 4 runs with 8 transfers per direction
    assert_eq!(sweep.dtu().issued(), 4 * 2 * 8);
    assert_eq!(sweep.destination().to_vec(), expected_output(2048));
}

fn bad_engine() {
    assert_err!(run_sweep(&SweepConfig::new().channels(0)), Code::InvArgs);
}
