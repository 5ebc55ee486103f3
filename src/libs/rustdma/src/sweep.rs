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

//! Contains the sweep orchestrator
//!
//! A sweep runs the pipeline for every pair of chunk count and pass count and records one
//! `RunResult` per pair, in the order of the outer chunk-count loop and the inner pass-count loop.

use base::cfg;
use base::dtu::{DTUArgs, FaultFlags, Region, Tier, DTU};
use base::errors::{Code, Error};
use base::kif::Perm;
use base::mem::{NearBuf, NearMem};
use base::profile::{Profiler, Runner};

use crate::plan::{self, Geometry};
use crate::rand::Lcg;
use crate::report::RunResult;
use crate::transfer::TransferStage;
use crate::verify::{self, Outcome};

/// The configuration of a sweep
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    buf_size: usize,
    chunk_counts: Vec<usize>,
    pass_counts: Vec<usize>,
    seed: u32,
    near_size: usize,
    channels: usize,
    faults: FaultFlags,
    repeats: u64,
    warmup: u64,
}

impl SweepConfig {
    /// Creates the default configuration: `cfg::BUF_SIZE` bytes, the chunk and pass counts of
    /// `cfg`, a single run per configuration without warmup
    pub fn new() -> Self {
        SweepConfig {
            buf_size: cfg::BUF_SIZE,
            chunk_counts: cfg::CHUNK_COUNTS.to_vec(),
            pass_counts: cfg::PASS_COUNTS.to_vec(),
            seed: cfg::SEED,
            near_size: cfg::NEAR_MEM_SIZE,
            channels: cfg::DTU_CHANNELS,
            faults: FaultFlags::empty(),
            repeats: 1,
            warmup: 0,
        }
    }

    /// Sets the buffer size in bytes
    pub fn buf_size(mut self, size: usize) -> Self {
        self.buf_size = size;
        self
    }

    /// Sets the candidates for the number of transfers per pass
    pub fn chunk_counts(mut self, counts: &[usize]) -> Self {
        self.chunk_counts = counts.to_vec();
        self
    }

    /// Sets the candidates for the number of passes
    pub fn pass_counts(mut self, counts: &[usize]) -> Self {
        self.pass_counts = counts.to_vec();
        self
    }

    /// Sets the seed of the test data
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the capacity of the near memory
    pub fn near_size(mut self, size: usize) -> Self {
        self.near_size = size;
        self
    }

    /// Sets the number of DTU channels
    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Sets the faults the DTU injects
    pub fn faults(mut self, faults: FaultFlags) -> Self {
        self.faults = faults;
        self
    }

    /// Sets the number of measured runs per configuration (at least one run is always done)
    pub fn repeats(mut self, repeats: u64) -> Self {
        self.repeats = repeats;
        self
    }

    /// Sets the number of unmeasured runs per configuration
    pub fn warmup(mut self, warmup: u64) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn get_buf_size(&self) -> usize {
        self.buf_size
    }
    pub fn get_chunk_counts(&self) -> &[usize] {
        &self.chunk_counts
    }
    pub fn get_pass_counts(&self) -> &[usize] {
        &self.pass_counts
    }
    pub fn get_seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes one configuration per profiler run
struct PipelineRunner<'s> {
    dtu: &'s DTU,
    near: &'s NearMem,
    src: &'s Region,
    dst: &'s Region,
    rng: &'s mut Lcg,
    geom: Geometry,
    staging: Option<NearBuf>,
    outcome: Outcome,
}

impl<'s> Runner for PipelineRunner<'s> {
    fn pre(&mut self) -> Result<(), Error> {
        self.rng.reset();
        self.rng.fill(&mut self.src.data()[..self.geom.buf_size()]);
        self.dst.fill(0);

        self.staging = Some(self.near.alloc(self.geom.buf_size())?);
        Ok(())
    }

    fn run(&mut self) -> Result<(), Error> {
        let staging = self.staging.as_ref().ok_or_else(|| Error::new(Code::Abort))?;
        TransferStage::new(self.dtu, self.src, self.dst, staging).process(&self.geom)
    }

    fn post(&mut self) -> Result<(), Error> {
        let size = self.geom.buf_size();
        let res = verify::verify(&self.src.data()[..size], &self.dst.data()[..size]);
        self.staging = None;

        if self.outcome.is_success() {
            self.outcome = res;
        }
        Ok(())
    }
}

/// The sweep orchestrator
///
/// The sweep owns the DTU, the near memory, the far buffers and the generator. The far buffers
/// have the size of the configured buffer; the source is only readable and the destination only
/// writable by the DTU.
pub struct Sweep {
    cfg: SweepConfig,
    dtu: DTU,
    near: NearMem,
    src: Region,
    dst: Region,
    rng: Lcg,
}

impl Sweep {
    /// Creates a new sweep for the given configuration
    pub fn new(cfg: SweepConfig) -> Result<Self, Error> {
        let dtu = DTU::new_with(DTUArgs::new().channels(cfg.channels).faults(cfg.faults))?;

        log!(SWEEP, "Creating sweep with {}b buffers, {}b near memory, {:?}",
            cfg.buf_size, cfg.near_size, dtu);

        Ok(Sweep {
            dtu: dtu,
            near: NearMem::new(cfg.near_size),
            src: Region::new(Tier::FAR, cfg.buf_size, Perm::R),
            dst: Region::new(Tier::FAR, cfg.buf_size, Perm::W),
            rng: Lcg::new(cfg.seed),
            cfg: cfg,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.cfg
    }
    pub fn dtu(&self) -> &DTU {
        &self.dtu
    }
    pub fn near_mem(&self) -> &NearMem {
        &self.near
    }
    /// Returns the far source buffer
    pub fn source(&self) -> &Region {
        &self.src
    }
    /// Returns the far destination buffer
    pub fn destination(&self) -> &Region {
        &self.dst
    }

    /// Runs all configurations
    ///
    /// Configurations that can not be executed or that produce a wrong destination are recorded
    /// and the sweep continues. Only fatal errors abort the sweep.
    pub fn run(&mut self) -> Result<Vec<RunResult>, Error> {
        self.run_with(|_| {})
    }

    /// Runs all configurations and passes every result to `sink` as soon as it is recorded
    ///
    /// If the sweep is aborted by a fatal error, `sink` has seen all configurations before the
    /// failing one.
    pub fn run_with<F: FnMut(&RunResult)>(&mut self, mut sink: F) -> Result<Vec<RunResult>, Error> {
        let chunk_counts = self.cfg.chunk_counts.clone();
        let pass_counts = self.cfg.pass_counts.clone();

        let mut results = Vec::with_capacity(chunk_counts.len() * pass_counts.len());
        for &chunks in &chunk_counts {
            for &passes in &pass_counts {
                let res = self.run_config(chunks, passes)?;
                sink(&res);
                results.push(res);
            }
        }
        Ok(results)
    }

    /// Runs a single configuration with `chunk_count` transfers per pass and `pass_count` passes
    ///
    /// Returns an error only if the error is fatal; all other failures are part of the result.
    pub fn run_config(&mut self, chunk_count: usize, pass_count: usize) -> Result<RunResult, Error> {
        let buf_size = self.cfg.buf_size;
        let geom = match plan::plan(buf_size, chunk_count, pass_count) {
            Ok(g)  => g,
            Err(e) => {
                log!(SWEEP, "Skipping NB_COPY={} NB_ITER={}: {}", chunk_count, pass_count, e);
                return Ok(RunResult::failed(chunk_count, pass_count, buf_size, e.code()));
            },
        };

        log!(SWEEP, "Running NB_COPY={} NB_ITER={} with {:?}", chunk_count, pass_count, geom);

        let mut prof = Profiler::new().repeats(self.cfg.repeats.max(1)).warmup(self.cfg.warmup);
        let mut runner = PipelineRunner {
            dtu: &self.dtu,
            near: &self.near,
            src: &self.src,
            dst: &self.dst,
            rng: &mut self.rng,
            geom: geom,
            staging: None,
            outcome: Outcome::Success,
        };

        let id = chunk_count * pass_count;
        let res = match prof.runner_with_id(&mut runner, id) {
            Ok(times) => RunResult {
                chunk_count: chunk_count,
                pass_count: pass_count,
                buf_size: buf_size,
                cycles: times.avg(),
                outcome: runner.outcome,
            },
            Err(e) if e.code().is_fatal() => {
                log!(SWEEP, "Aborting sweep at NB_COPY={} NB_ITER={}: {}", chunk_count, pass_count, e);
                return Err(e);
            },
            Err(e) => {
                log!(SWEEP, "NB_COPY={} NB_ITER={} failed: {}", chunk_count, pass_count, e);
                RunResult::failed(chunk_count, pass_count, buf_size, e.code())
            },
        };

        log!(SWEEP, "NB_COPY={} NB_ITER={} took {} cycles ({} available in near memory)",
            chunk_count, pass_count, res.cycles, self.near.available());
        Ok(res)
    }
}

/// Runs a complete sweep with given configuration
pub fn run_sweep(cfg: &SweepConfig) -> Result<Vec<RunResult>, Error> {
    Sweep::new(cfg.clone())?.run()
}
