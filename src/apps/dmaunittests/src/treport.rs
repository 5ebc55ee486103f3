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
use base::test;
use dma::report::{Record, RunResult, Status, Summary};
use dma::verify::{ErrorSample, Mismatch, Outcome};

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, format);
    run_test!(t, status);
    run_test!(t, parse);
    run_test!(t, parse_errors);
    run_test!(t, summary);
}

fn result(chunks: usize, passes: usize, outcome: Outcome) -> RunResult {
    RunResult {
        chunk_count: chunks,
        pass_count: passes,
        buf_size: 2048,
        cycles: 1234,
        outcome: outcome,
    }
}

fn mismatch() -> Outcome {
    Outcome::Mismatch(Mismatch {
        count: 1,
        samples: vec![ErrorSample { index: 0, expected: 0xF2, observed: 0x0D, source: 0xA6 }],
    })
}

fn format() {
    let res = result(2, 4, Outcome::Success);
    assert_eq!(res.chunk_size(), 256);
    assert_eq!(
        res.record().to_string(),
        "NB_COPY=2 NB_ITER=4 Buffer=2048 Cycles=1234 Result=SUCCESS"
    );

    let res = RunResult::failed(3, 5, 2048, Code::InvalidGeometry);
    assert_eq!(res.chunk_size(), 0);
    assert_eq!(
        res.record().to_string(),
        "NB_COPY=3 NB_ITER=5 Buffer=2048 Cycles=0 Result=INVALID"
    );
}

fn status() {
    assert_eq!(Status::from(&Outcome::Success), Status::SUCCESS);
    assert_eq!(Status::from(&mismatch()), Status::FAIL);
    assert_eq!(Status::from(&Outcome::Failed(Code::InvalidGeometry)), Status::INVALID);
    assert_eq!(Status::from(&Outcome::Failed(Code::NoSpace)), Status::NOMEM);
    assert_eq!(Status::from(&Outcome::Failed(Code::NoPerm)), Status::ERROR);
    assert_eq!(Status::FAIL.name(), "FAIL");
}

fn parse() {
    let rec = assert_ok!("NB_COPY=8 NB_ITER=1 Buffer=2048 Cycles=98765 Result=FAIL".parse::<Record>());
    assert_eq!(rec, Record {
        chunk_count: 8,
        pass_count: 1,
        buf_size: 2048,
        cycles: 98765,
        status: Status::FAIL,
    });

    for res in &[
        result(1, 1, Outcome::Success),
        result(4, 8, mismatch()),
        RunResult::failed(1, 3, 2048, Code::InvalidGeometry),
        RunResult::failed(8, 8, 2048, Code::NoSpace),
    ] {
        let line = res.record().to_string();
        assert_eq!(assert_ok!(line.parse::<Record>()), res.record());
    }
}

fn parse_errors() {
    let lines = [
        "",
        "NB_COPY=1 NB_ITER=1 Buffer=2048 Cycles=5",
        "NB_COPY=1 NB_ITER=1 Buffer=2048 Cycles=5 Result=SUCCESS extra",
        "NB_ITER=1 NB_COPY=1 Buffer=2048 Cycles=5 Result=SUCCESS",
        "NB_COPY=x NB_ITER=1 Buffer=2048 Cycles=5 Result=SUCCESS",
        "NB_COPY=1 NB_ITER=1 Buffer=-1 Cycles=5 Result=SUCCESS",
        "NB_COPY=1 NB_ITER=1 Buffer=2048 Cycles=5 Result=PASSED",
        "NB_COPY 1 NB_ITER=1 Buffer=2048 Cycles=5 Result=SUCCESS",
    ];
    for l in &lines {
        assert_err!(l.parse::<Record>(), Code::InvalidRecord);
    }
}

fn summary() {
    let results = vec![
        result(1, 1, Outcome::Success),
        result(1, 2, Outcome::Success),
        result(2, 1, mismatch()),
        RunResult::failed(3, 5, 2048, Code::InvalidGeometry),
    ];

    let sum = Summary::new(&results);
    assert_eq!(sum, Summary { total: 4, passed: 2, failed: 1, skipped: 1 });
    assert!(!sum.all_passed());
    assert_eq!(sum.to_string(), "2/4 configurations passed (1 failed, 1 skipped)");

    let sum = Summary::new(&results[..2]);
    assert!(sum.all_passed());

    // configurations that could not run are not a pass
    let skipped = vec![
        result(1, 1, Outcome::Success),
        RunResult::failed(1, 2, 2048, Code::NoSpace),
        RunResult::failed(1, 4, 2048, Code::NoPerm),
    ];
    let sum = Summary::new(&skipped);
    assert_eq!(sum, Summary { total: 3, passed: 1, failed: 0, skipped: 2 });
    assert!(!sum.all_passed());
    assert!(!Summary::new(&skipped[1..2]).all_passed());
}
