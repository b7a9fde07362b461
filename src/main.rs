// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod ui;

use fleet_report::error::ReportResult;
use fleet_report::report::{self, SmdManageOp};
use fleet_report::types::Batch;
use fleet_report::{aggregate, cli, config};
use log::debug;
use std::fs;
use std::io::{self, Read, Write};

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        ui::print_error(&e.to_string());
        std::process::exit(2);
    }
}

fn run(args: &cli::CliArgs) -> ReportResult<()> {
    let config = config::build_print_config(args)?;

    let batch = load_batch(args)?;
    debug!("Loaded {} host records", batch.responses.len());

    let aggregated = aggregate::aggregate(&batch)?;
    debug!(
        "Aggregated {} hosts into {} groups ({} error rows)",
        aggregated.host_count(),
        aggregated.groups.len(),
        aggregated.errors.rows().len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        out.write_all(report::export_json_report(&aggregated)?.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    let op = args.op.as_deref().map(str::parse::<SmdManageOp>).transpose()?;
    let rendered = report::render_report(args.kind, op, &aggregated, &config)?;

    if !rendered.err.is_empty() {
        let mut err = io::stderr().lock();
        err.write_all(rendered.err.as_bytes())?;
        err.flush()?;
    }
    out.write_all(rendered.out.as_bytes())?;
    out.flush()?;

    Ok(())
}

/// Read the input batch from a file or standard input
fn load_batch(args: &cli::CliArgs) -> ReportResult<Batch> {
    let contents = if args.reads_stdin() {
        debug!("Reading batch from stdin");
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        debug!("Reading batch from {}", args.input.display());
        fs::read_to_string(&args.input)?
    };

    Ok(serde_json::from_str(&contents)?)
}
