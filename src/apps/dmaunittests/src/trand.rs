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

use dma::rand::Lcg;
use base::test;

pub fn run(t: &mut dyn test::Tester) {
    run_test!(t, sequence);
    run_test!(t, bytes);
    run_test!(t, restart);
    run_test!(t, seeds);
}

fn sequence() {
    let mut rng = Lcg::new(1);
    assert_eq!(rng.next(), 1103527590);
    assert_eq!(rng.next(), 377401575);
    assert_eq!(rng.next(), 662824084);
    assert_eq!(rng.next(), 1147902781);

    // the state never leaves 31 bits
    for _ in 0..1000 {
        assert!(rng.next() < 1 << 31);
    }
}

fn bytes() {
    let mut rng = Lcg::new(1);
    let mut buf = [0u8; 4];
    rng.fill(&mut buf);
    assert_eq!(buf, [0xA6, 0xE7, 0x94, 0x3D]);

    // the generator continues from its state
    let mut cont = Lcg::new(1147902781);
    assert_eq!(rng.next_byte(), cont.next_byte());
}

fn restart() {
    let mut rng = Lcg::new(1);
    let mut first = vec![0u8; 2048];
    let mut second = vec![0u8; 2048];

    rng.fill(&mut first);
    rng.reset();
    rng.fill(&mut second);
    assert_eq!(first, second);

    // a fresh generator produces the same sequence
    let mut third = vec![0u8; 2048];
    Lcg::new(1).fill(&mut third);
    assert_eq!(first, third);
}

fn seeds() {
    let mut a = vec![0u8; 64];
    let mut b = vec![0u8; 64];
    Lcg::new(1).fill(&mut a);
    Lcg::new(2).fill(&mut b);
    assert_ne!(a, b);
}
