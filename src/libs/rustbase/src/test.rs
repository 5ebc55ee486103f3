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

//! Contains the infrastructure for the unittests
//!
//! Tests are plain functions that panic on failure. They are grouped into suites, which are
//! functions that receive the `Tester` and run their tests with `run_test!`.

/// Executes test suites and tests
pub trait Tester {
    /// Runs the suite `f` with name `name`
    fn run_suite(&mut self, name: &str, f: &dyn Fn(&mut dyn Tester));
    /// Runs the test `f` with name `name`
    fn run_test(&mut self, name: &str, f: &dyn Fn());
}

/// Runs the suite `$func` on the tester `$t`, using the path of `$func` as name
#[macro_export]
macro_rules! run_suite {
    ($t:expr, $func:path) => (
        $t.run_suite(stringify!($func), &$func)
    );
}

/// Runs the test `$func` on the tester `$t`, using the path of `$func` as name
#[macro_export]
macro_rules! run_test {
    ($t:expr, $func:path) => (
        $t.run_test(stringify!($func), &$func)
    );
}

/// Evaluates to the value of `Ok` and panics with the error otherwise
#[macro_export]
macro_rules! assert_ok {
    ($res:expr) => ({
        match $res {
            Ok(v)   => v,
            Err(e)  => panic!("expected success, got error {:?}", e),
        }
    });
}

/// Panics unless the argument is an error with the code `$code`
#[macro_export]
macro_rules! assert_err {
    ($res:expr, $code:expr) => ({
        match $res {
            Ok(v)                           => panic!("expected {:?}, got Ok({:?})", $code, v),
            Err(ref e) if e.code() != $code => panic!("expected {:?}, got error {:?}", $code, e),
            Err(_)                          => (),
        }
    });
}

/// Panics unless the argument matches the pattern `$pat`
#[macro_export]
macro_rules! assert_matches {
    ($val:expr, $pat:pat) => ({
        match $val {
            $pat    => (),
            ref v   => panic!("expected {}, got {:?}", stringify!($pat), v),
        }
    });
}
