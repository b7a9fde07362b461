// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # fleet-report
//!
//! Aggregates per-host storage results from a server fleet into compact,
//! deterministic reports. Hosts with identical results share one group whose
//! name is a compressed host range such as `host[1-4,7]`.
//!
//! ## Modules
//!
//! - `hostlist` - Host identifier parsing, range compression and expansion
//! - `canonical` - Canonical payload form and result keys
//! - `aggregate` - Grouping of payloads and errors across hosts
//! - `report` - Text and JSON renderers for every report kind
//! - `console_format` - Table and banner primitives
//! - `config` - Print options from flags and an optional TOML file
//! - `cli` - Command-line arguments
//! - `types` - Input batch and storage payload structures
//! - `error` - Fatal report errors
pub mod aggregate;
pub mod canonical;
pub mod cli;
pub mod config;
pub mod console_format;
pub mod error;
pub mod hostlist;
pub mod report;
pub mod types;
