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

//! Contains the report records of a sweep

use std::fmt;
use std::str::FromStr;

use base::errors::{Code, Error};
use base::time::Time;

use crate::verify::Outcome;

/// The result of a single configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunResult {
    pub chunk_count: usize,
    pub pass_count: usize,
    pub buf_size: usize,
    /// The cycles of the measured pipeline (0 if the pipeline did not run)
    pub cycles: Time,
    pub outcome: Outcome,
}

impl RunResult {
    /// Creates the result for a configuration that could not be executed
    pub fn failed(chunk_count: usize, pass_count: usize, buf_size: usize, code: Code) -> Self {
        RunResult {
            chunk_count: chunk_count,
            pass_count: pass_count,
            buf_size: buf_size,
            cycles: 0,
            outcome: Outcome::Failed(code),
        }
    }

    /// Returns the chunk size of the configuration (0 for an invalid geometry)
    pub fn chunk_size(&self) -> usize {
        match self.chunk_count.checked_mul(self.pass_count) {
            Some(n) if n > 0 && self.buf_size % n == 0 => self.buf_size / n,
            _                                          => 0,
        }
    }

    /// Returns the report record for this result
    pub fn record(&self) -> Record {
        Record {
            chunk_count: self.chunk_count,
            pass_count: self.pass_count,
            buf_size: self.buf_size,
            cycles: self.cycles,
            status: Status::from(&self.outcome),
        }
    }
}

int_enum! {
    /// The status tag of a report record
    pub struct Status : u8 {
        /// The destination was verified successfully
        const SUCCESS   = 0;
        /// The destination did not match
        const FAIL      = 1;
        /// The buffer can not be split into the requested chunks
        const INVALID   = 2;
        /// The staging buffer could not be allocated
        const NOMEM     = 3;
        /// The pipeline failed for another reason
        const ERROR     = 4;
    }
}

impl<'a> From<&'a Outcome> for Status {
    fn from(outcome: &'a Outcome) -> Self {
        match *outcome {
            Outcome::Success                        => Status::SUCCESS,
            Outcome::Mismatch(_)                    => Status::FAIL,
            Outcome::Failed(Code::InvalidGeometry)  => Status::INVALID,
            Outcome::Failed(Code::NoSpace)          => Status::NOMEM,
            Outcome::Failed(_)                      => Status::ERROR,
        }
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Status::SUCCESS),
            "FAIL"    => Ok(Status::FAIL),
            "INVALID" => Ok(Status::INVALID),
            "NOMEM"   => Ok(Status::NOMEM),
            "ERROR"   => Ok(Status::ERROR),
            _         => Err(Error::new_msg(Code::InvalidRecord, format!("unknown result '{}'", s))),
        }
    }
}

/// A line of the sweep report
///
/// The textual form is `NB_COPY=<c> NB_ITER=<p> Buffer=<size> Cycles=<cycles> Result=<status>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub chunk_count: usize,
    pub pass_count: usize,
    pub buf_size: usize,
    pub cycles: Time,
    pub status: Status,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NB_COPY={} NB_ITER={} Buffer={} Cycles={} Result={}",
            self.chunk_count, self.pass_count, self.buf_size, self.cycles, self.status.name())
    }
}

const KEYS: [&str; 5] = ["NB_COPY", "NB_ITER", "Buffer", "Cycles", "Result"];

fn parse_num<T: FromStr>(key: &str, val: &str) -> Result<T, Error> {
    val.parse().map_err(|_| {
        Error::new_msg(Code::InvalidRecord, format!("invalid value '{}' for {}", val, key))
    })
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != KEYS.len() {
            return Err(Error::new_msg(Code::InvalidRecord, format!(
                "expected {} fields, found {}", KEYS.len(), fields.len()
            )));
        }

        let mut vals = [""; 5];
        for ((field, key), val) in fields.iter().zip(KEYS.iter()).zip(vals.iter_mut()) {
            *val = match field.split_once('=') {
                Some((k, v)) if k == *key => v,
                _                         => {
                    return Err(Error::new_msg(Code::InvalidRecord, format!(
                        "expected {}=<value>, found '{}'", key, field
                    )))
                },
            };
        }

        Ok(Record {
            chunk_count: parse_num(KEYS[0], vals[0])?,
            pass_count: parse_num(KEYS[1], vals[1])?,
            buf_size: parse_num(KEYS[2], vals[2])?,
            cycles: parse_num(KEYS[3], vals[3])?,
            status: vals[4].parse()?,
        })
    }
}

/// The summary of a sweep
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    /// Builds the summary of given results
    ///
    /// Configurations that could not be executed count as skipped.
    pub fn new(results: &[RunResult]) -> Self {
        let mut sum = Summary {
            total: results.len(),
            ..Summary::default()
        };
        for r in results {
            match r.outcome {
                Outcome::Success     => sum.passed += 1,
                Outcome::Mismatch(_) => sum.failed += 1,
                Outcome::Failed(_)   => sum.skipped += 1,
            }
        }
        sum
    }

    /// Returns true if every configuration was executed and verified successfully
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{} configurations passed ({} failed, {} skipped)",
            self.passed, self.total, self.failed, self.skipped)
    }
}
