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

#[macro_use]
extern crate base;

use std::process;

use base::io;
use base::test::Tester;
use dmaunittests::MyTester;

mod tdtu;
mod terrors;
mod tlog;
mod tmem;
mod tplan;
mod tprofile;
mod trand;
mod treport;
mod tsweep;
mod ttransfer;
mod tverify;

fn main() {
    io::init();

    let mut tester = MyTester::new();
    run_suite!(tester, terrors::run);
    run_suite!(tester, tlog::run);
    run_suite!(tester, trand::run);
    run_suite!(tester, tplan::run);
    run_suite!(tester, tmem::run);
    run_suite!(tester, tdtu::run);
    run_suite!(tester, ttransfer::run);
    run_suite!(tester, tverify::run);
    run_suite!(tester, treport::run);
    run_suite!(tester, tsweep::run);
    run_suite!(tester, tprofile::run);

    println!("{} tests, {} failed", tester.tests(), tester.failed().len());
    for name in tester.failed() {
        println!("  failed: {}", name);
    }
    if !tester.failed().is_empty() {
        process::exit(1);
    }
}
