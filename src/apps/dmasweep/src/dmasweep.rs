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

//! Runs the chunked DMA transfer sweep and prints one report line per configuration

#[macro_use]
extern crate base;

use std::process;

use base::dtu::FaultFlags;
use base::errors::{Code, Error};
use base::io;
use dma::{Outcome, RunResult, Summary, Sweep, SweepConfig};

#[derive(clap::Parser, Debug)]
#[command(name = "dmasweep")]
#[command(about = "Measures and verifies chunked far/near memory transfers")]
struct Args {
    /// Buffer size in bytes
    #[clap(long, default_value_t = base::cfg::BUF_SIZE)]
    buffer: usize,

    /// Candidates for the number of transfers per pass (NB_COPY)
    #[clap(long, value_delimiter = ',', default_value = "1,2,4,8")]
    chunks: Vec<usize>,

    /// Candidates for the number of passes (NB_ITER)
    #[clap(long, value_delimiter = ',', default_value = "1,2,4,8")]
    passes: Vec<usize>,

    /// Run only the configuration NB_COPY,NB_ITER and print the details
    #[clap(long, value_delimiter = ',', value_name = "NB_COPY,NB_ITER")]
    single: Option<Vec<usize>>,

    /// Seed of the test data
    #[clap(long, default_value_t = base::cfg::SEED)]
    seed: u32,

    /// Capacity of the near memory in bytes
    #[clap(long, default_value_t = base::cfg::NEAR_MEM_SIZE)]
    near_size: usize,

    /// Number of DTU channels
    #[clap(long, default_value_t = base::cfg::DTU_CHANNELS)]
    channels: usize,

    /// Number of measured runs per configuration
    #[clap(long, default_value = "1")]
    repeats: u64,

    /// Number of unmeasured runs per configuration
    #[clap(long, default_value = "0")]
    warmup: u64,

    /// Let the DTU corrupt the first byte of every transfer into far memory
    #[clap(long)]
    flip_byte: bool,

    /// Let the DTU drop all completions
    #[clap(long)]
    drop_completion: bool,

    /// Log categories (e.g., "dtu,mem,sweep" or "all"); overrides DMASWEEP_LOG
    #[clap(long)]
    log: Option<String>,
}

impl Args {
    fn config(&self) -> SweepConfig {
        let mut faults = FaultFlags::empty();
        if self.flip_byte {
            faults |= FaultFlags::FLIP_BYTE;
        }
        if self.drop_completion {
            faults |= FaultFlags::DROP_COMPLETION;
        }

        SweepConfig::new()
            .buf_size(self.buffer)
            .chunk_counts(&self.chunks)
            .pass_counts(&self.passes)
            .seed(self.seed)
            .near_size(self.near_size)
            .channels(self.channels)
            .faults(faults)
            .repeats(self.repeats)
            .warmup(self.warmup)
    }
}

fn print_details(res: &RunResult) {
    println!("=== DMA Transfer Test ===");
    println!("Buffer size: {} bytes", res.buf_size);
    println!("Chunks per iteration: {}", res.chunk_count);
    println!("Number of iterations: {}", res.pass_count);
    println!("Chunk size: {} bytes", res.chunk_size());

    if let Outcome::Failed(code) = res.outcome {
        println!("TEST FAILED: unable to run the configuration ({:?})", code);
        return;
    }

    println!("DMA test completed in {} cycles", res.cycles);
    let bytes = 2 * res.buf_size;
    println!("Performance: {:.2} cycles per byte transferred", res.cycles as f64 / bytes as f64);

    match res.outcome {
        Outcome::Mismatch(ref m) => {
            for s in &m.samples {
                println!("{}", s);
            }
            print!("TEST FAILED: {} errors found", m.count);
            if m.count > m.samples.len() {
                print!(" ({} errors shown)", m.samples.len());
            }
            println!();
        },
        _ => println!("TEST PASSED: All {} bytes processed correctly", res.buf_size),
    }
}

fn run(args: &Args) -> Result<bool, Error> {
    let mut sweep = Sweep::new(args.config())?;

    if let Some(ref single) = args.single {
        if single.len() != 2 {
            return Err(Error::new_msg(Code::InvArgs, "--single expects NB_COPY,NB_ITER"));
        }

        let res = sweep.run_config(single[0], single[1])?;
        print_details(&res);
        println!("{}", res.record());
        return Ok(res.outcome.is_success());
    }

    println!("Starting DMA parameter sweep tests...");
    let results = sweep.run_with(|res| println!("{}", res.record()))?;

    let summary = Summary::new(&results);
    println!("{}", summary);
    Ok(summary.all_passed())
}

fn main() {
    let args = <Args as clap::Parser>::parse();

    io::init();
    if let Some(ref spec) = args.log {
        io::log::set_flags(io::log::parse_flags(spec));
    }

    match run(&args) {
        Ok(true)  => {},
        Ok(false) => process::exit(1),
        Err(e)    => {
            log!(DEF, "dmasweep failed: {:?}", e);
            process::exit(2);
        },
    }
}
