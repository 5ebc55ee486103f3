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

use base::test;
use dma::rand::Lcg;
use dma::transform::{transform, transformed};
use dma::verify::{verify, ErrorSample, Outcome};

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, transform_values);
    run_test!(t, success);
    run_test!(t, mismatch);
    run_test!(t, many_mismatches);
    run_test!(t, length);
    run_test!(t, sample_format);
}

fn input() -> (Vec<u8>, Vec<u8>) {
    let mut src = vec![0u8; 2048];
    Lcg::new(1).fill(&mut src);
    let mut dst = src.clone();
    transform(&mut dst);
    (src, dst)
}

fn transform_values() {
    for v in 0..=255u8 {
        assert_eq!(transformed(v) as u32, (v as u32 * 3) % 256);
    }
    assert_eq!(transformed(0xA6), 0xF2);
    assert_eq!(transformed(0x80), 0x80);

    let mut buf = [0x01, 0x55, 0xFF];
    transform(&mut buf);
    assert_eq!(buf, [0x03, 0xFF, 0xFD]);
}

fn success() {
    let (src, dst) = input();
    assert_eq!(verify(&src, &dst), Outcome::Success);
    assert!(verify(&[], &[]).is_success());
}

fn mismatch() {
    let (src, mut dst) = input();
    dst[100] ^= 0x01;
    dst[7] = 0;

    match verify(&src, &dst) {
        Outcome::Mismatch(m) => {
            assert_eq!(m.count, 2);
            assert_eq!(m.first(), 7);
            assert_eq!(m.samples, vec![
                ErrorSample { index: 7, expected: transformed(src[7]), observed: 0, source: src[7] },
                ErrorSample {
                    index: 100,
                    expected: transformed(src[100]),
                    observed: transformed(src[100]) ^ 0x01,
                    source: src[100],
                },
            ]);
        },
        o => panic!("unexpected outcome {:?}", o),
    }
}

fn many_mismatches() {
    let (src, dst) = input();

    // an untouched destination differs everywhere except where the transform yields zero
    let zeros = vec![0u8; dst.len()];
    let expected = dst.iter().filter(|b| **b != 0).count();
    match verify(&src, &zeros) {
        Outcome::Mismatch(m) => {
            assert_eq!(m.count, expected);
            assert_eq!(m.samples.len(), 10);
            assert!(m.samples.windows(2).all(|w| w[0].index < w[1].index));
            assert!(m.samples.iter().all(|s| s.observed == 0 && s.expected != 0));
        },
        o => panic!("unexpected outcome {:?}", o),
    }
}

fn length() {
    let (src, dst) = input();

    match verify(&src, &dst[..2045]) {
        Outcome::Mismatch(m) => {
            assert_eq!(m.count, 3);
            assert_eq!(m.first(), 2045);
        },
        o => panic!("unexpected outcome {:?}", o),
    }
    match verify(&src[..16], &dst[..17]) {
        Outcome::Mismatch(m) => {
            assert_eq!(m.count, 1);
            assert_eq!(m.samples[0].index, 16);
            assert_eq!(m.samples[0].observed, dst[16]);
        },
        o => panic!("unexpected outcome {:?}", o),
    }
}

fn sample_format() {
    let s = ErrorSample { index: 5, expected: 0x03, observed: 0x00, source: 0x01 };
    assert_eq!(s.to_string(), "ERROR at index 5: expected 0x03, got 0x00 (source: 0x01)");
    let s = ErrorSample { index: 2047, expected: 0xF2, observed: 0x0D, source: 0xA6 };
    assert_eq!(s.to_string(), "ERROR at index 2047: expected 0xf2, got 0x0d (source: 0xa6)");
}
