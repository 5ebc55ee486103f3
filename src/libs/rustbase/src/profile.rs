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

//! Contains the cycle measurement of pipelines and benchmarks

use std::fmt;

use crate::errors::Error;
use crate::time::{self, Time};

/// Runs `func` between two counter reads and returns its result together with the elapsed cycles
///
/// Only `func` lies inside the measured window. `id` identifies the measurement for `time::start`
/// and `time::stop`.
#[inline(always)]
pub fn measure<T, F: FnOnce() -> T>(func: F, id: usize) -> (T, Time) {
    let begin = time::start(id);
    let res = func();
    let end = time::stop(id);
    (res, end.saturating_sub(begin))
}

/// The cycles of all measured runs of a benchmark
#[derive(Clone, Debug, Default)]
pub struct Results {
    times: Vec<Time>,
}

impl Results {
    fn with_capacity(runs: usize) -> Self {
        Results {
            times: Vec::with_capacity(runs),
        }
    }

    /// Returns the number of measured runs
    pub fn runs(&self) -> usize {
        self.times.len()
    }

    /// Returns the cycles of every run in execution order
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Returns the fastest run (0 without runs)
    pub fn min(&self) -> Time {
        self.times.iter().cloned().min().unwrap_or(0)
    }

    /// Returns the slowest run (0 without runs)
    pub fn max(&self) -> Time {
        self.times.iter().cloned().max().unwrap_or(0)
    }

    /// Returns the mean of all runs, rounded down (0 without runs)
    pub fn avg(&self) -> Time {
        match self.times.len() {
            0 => 0,
            n => self.times.iter().sum::<Time>() / n as Time,
        }
    }

    /// Returns the standard deviation from `avg`
    pub fn stddev(&self) -> f64 {
        if self.times.is_empty() {
            return 0.0;
        }

        let avg = self.avg() as f64;
        let var = self.times.iter()
            .map(|t| (*t as f64 - avg) * (*t as f64 - avg))
            .sum::<f64>() / self.times.len() as f64;
        var.sqrt()
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} cycles/iter (+/- {:.1}, min {}, max {}, {} runs)",
            self.avg(), self.stddev(), self.min(), self.max(), self.runs())
    }
}

/// A benchmark with setup and teardown steps
///
/// `pre` and `post` surround every run, but only `run` is measured. If `run` fails, `post` is
/// still called before the error is passed on.
pub trait Runner {
    /// Prepares the next run
    fn pre(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Executes the measured part
    fn run(&mut self) -> Result<(), Error>;

    /// Cleans up after a run
    fn post(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Runs benchmarks repeatedly and collects the cycles
///
/// The first `warmup` runs are executed, but not recorded.
///
/// # Examples
///
/// ```
/// use base::profile;
///
/// let mut prof = profile::Profiler::new().repeats(10).warmup(2);
/// let res = prof.run_with_id(|| { /* the benchmark */ }, 0);
/// assert_eq!(res.runs(), 10);
/// ```
pub struct Profiler {
    repeats: u64,
    warmup: u64,
}

impl Profiler {
    /// Creates a profiler with 100 recorded runs after 10 warmup runs
    pub fn new() -> Self {
        Profiler {
            repeats: 100,
            warmup: 10,
        }
    }

    /// Sets the number of recorded runs
    pub fn repeats(mut self, repeats: u64) -> Self {
        self.repeats = repeats;
        self
    }

    /// Sets the number of warmup runs
    pub fn warmup(mut self, warmup: u64) -> Self {
        self.warmup = warmup;
        self
    }

    fn total(&self) -> u64 {
        self.warmup + self.repeats
    }

    /// Measures `func`
    #[inline(always)]
    pub fn run<F: FnMut()>(&mut self, func: F) -> Results {
        self.run_with_id(func, 0)
    }

    /// Measures `func`, using `id` for the counter reads
    #[inline(always)]
    pub fn run_with_id<F: FnMut()>(&mut self, mut func: F, id: usize) -> Results {
        let mut res = Results::with_capacity(self.repeats as usize);
        for i in 0..self.total() {
            let (_, cycles) = measure(&mut func, id);
            if i >= self.warmup {
                res.times.push(cycles);
            }
        }
        res
    }

    /// Measures `runner`, using `id` for the counter reads
    ///
    /// Stops at the first error of any step and returns it.
    pub fn runner_with_id<R: Runner>(&mut self, runner: &mut R, id: usize) -> Result<Results, Error> {
        let mut res = Results::with_capacity(self.repeats as usize);
        for i in 0..self.total() {
            runner.pre()?;

            let (outcome, cycles) = measure(|| runner.run(), id);
            if let Err(e) = outcome {
                // an error of the cleanup is dropped in favor of the run error
                runner.post().ok();
                return Err(e);
            }
            runner.post()?;

            if i >= self.warmup {
                res.times.push(cycles);
            }
        }
        Ok(res)
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
