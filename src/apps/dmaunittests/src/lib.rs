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

//! Contains the tester that drives the unittests

use std::panic::{self, AssertUnwindSafe};

use base::test::Tester;

/// Runs all tests, records the failed ones and continues with the next test on failures
#[derive(Default)]
pub struct MyTester {
    tests: usize,
    failed: Vec<String>,
}

impl MyTester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of executed tests
    pub fn tests(&self) -> usize {
        self.tests
    }

    /// Returns the names of the failed tests
    pub fn failed(&self) -> &[String] {
        &self.failed
    }
}

impl Tester for MyTester {
    fn run_suite(&mut self, name: &str, f: &dyn Fn(&mut dyn Tester)) {
        println!("Running test suite {} ...", name);
        f(self);
        println!("Done\n");
    }

    fn run_test(&mut self, name: &str, f: &dyn Fn()) {
        println!("-- Running test {} ...", name);
        self.tests += 1;
        match panic::catch_unwind(AssertUnwindSafe(|| f())) {
            Ok(())  => println!("-- Done"),
            Err(_)  => {
                println!("-- FAILED");
                self.failed.push(name.to_string());
            },
        }
    }
}
