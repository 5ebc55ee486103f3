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
use dma::plan::{plan, Chunk};

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, invalid);
    run_test!(t, single);
    run_test!(t, two_by_four);
    run_test!(t, partition);
    run_test!(t, pass_order);
}

fn invalid() {
    assert_err!(plan(2048, 3, 5), Code::InvalidGeometry);
    assert_err!(plan(2048, 3, 1), Code::InvalidGeometry);
    assert_err!(plan(0, 1, 1), Code::InvalidGeometry);
    assert_err!(plan(2048, 0, 1), Code::InvalidGeometry);
    assert_err!(plan(2048, 1, 0), Code::InvalidGeometry);
    assert_err!(plan(2048, usize::max_value(), 2), Code::InvalidGeometry);
    // more transfers than bytes
    assert_err!(plan(16, 8, 4), Code::InvalidGeometry);
}

fn single() {
    let geom = assert_ok!(plan(2048, 1, 1));
    assert_eq!(geom.pass_size(), 2048);
    assert_eq!(geom.chunk_size(), 2048);
    assert_eq!(geom.pass_range(0), 0..2048);

    let chunks: Vec<Chunk> = geom.chunks().collect();
    assert_eq!(chunks, vec![Chunk { pass: 0, index: 0, offset: 0, size: 2048 }]);
}

fn two_by_four() {
    let geom = assert_ok!(plan(2048, 2, 4));
    assert_eq!(geom.chunk_count(), 2);
    assert_eq!(geom.pass_count(), 4);
    assert_eq!(geom.pass_size(), 512);
    assert_eq!(geom.chunk_size(), 256);

    let offsets: Vec<usize> = geom.chunks().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![0, 256, 512, 768, 1024, 1280, 1536, 1792]);
    assert!(geom.chunks().all(|c| c.size == 256));

    let c = geom.chunk(2, 1);
    assert_eq!(c, Chunk { pass: 2, index: 1, offset: 1280, size: 256 });
    assert_eq!(c.range(), 1280..1536);
    assert_eq!(geom.pass_range(3), 1536..2048);
}

fn partition() {
    for &chunks in &[1, 2, 4, 8] {
        for &passes in &[1, 2, 4, 8] {
            let geom = assert_ok!(plan(2048, chunks, passes));
            assert_eq!(geom.chunks().count(), chunks * passes);

            // the chunks are contiguous, so every byte is covered exactly once
            let mut next = 0;
            for c in geom.chunks() {
                assert_eq!(c.offset, next);
                assert!(c.size > 0);
                next = c.range().end;
            }
            assert_eq!(next, 2048);
        }
    }
}

fn pass_order() {
    let geom = assert_ok!(plan(4096, 4, 2));
    for pass in 0..geom.pass_count() {
        let range = geom.pass_range(pass);
        let chunks: Vec<Chunk> = geom.pass_chunks(pass).collect();
        assert_eq!(chunks.len(), 4);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.pass, pass);
            assert_eq!(c.index, i);
            assert!(c.offset >= range.start && c.range().end <= range.end);
        }
    }
}
