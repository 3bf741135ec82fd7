// Copyright (c) 2017 The twbot contributors
// See the README.md file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![warn(missing_docs)]
#![deny(non_camel_case_types)]

//! Startup plumbing for the Tribe Warfare Discord bot: reading and validating
//! `options.ini`, and the id lists the bot consults when serving commands.

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod store;
mod util;

pub use crate::config::{ConfigLoader, Settings};
pub use crate::error::{Error, HelpfulError, Result};
