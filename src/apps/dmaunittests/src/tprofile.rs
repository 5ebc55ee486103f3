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

use base::profile;
use base::test;
use base::time;
use dma::sweep::{Sweep, SweepConfig};

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, measure);
    run_test!(t, profiler);
    run_test!(t, pipeline);
}

fn measure() {
    let (res, cycles) = profile::measure(|| (0..1000u64).sum::<u64>(), 0x10);
    assert_eq!(res, 499500);

    let before = time::start(0x11);
    let after = time::stop(0x11);
    assert!(after >= before);
    assert!(cycles < u64::max_value() / 2);
}

fn profiler() {
    let mut prof = profile::Profiler::new().repeats(5).warmup(2);
    let mut calls = 0;
    let res = prof.run_with_id(|| calls += 1, 0x12);

    assert_eq!(calls, 7);
    assert_eq!(res.runs(), 5);
    assert_eq!(res.times().len(), 5);
    assert!(res.min() <= res.avg() && res.avg() <= res.max());
    assert!(res.stddev() >= 0.0);
    println!("empty closure: {}", res);
}

fn pipeline() {
    let cfg = SweepConfig::new().chunk_counts(&[1, 8]).pass_counts(&[1, 8]).repeats(5).warmup(1);
    let mut sweep = assert_ok!(Sweep::new(cfg));

    for r in assert_ok!(sweep.run()) {
        assert!(r.outcome.is_success());
        println!("{} ({:.2} cycles/byte)", r.record(), r.cycles as f64 / (2 * r.buf_size) as f64);
    }
}
