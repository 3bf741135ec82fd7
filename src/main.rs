// Copyright (c) 2017 The twbot contributors
// See the README.md file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Starts the bot: loads `options.ini` and the blacklist, or explains what
//! needs fixing and exits.

#[macro_use]
extern crate log;

use std::env;
use std::process;

use twbot::config::DEFAULT_OPTIONS_FILE;
use twbot::store::Blacklist;
use twbot::{ConfigLoader, Error, Settings};

fn main() {
    // Initialize the `env_logger` to provide logging output.
    env_logger::init();

    let path = config_path();
    debug!("Loading config from: {}", path);

    let settings = match ConfigLoader::new().load(&path) {
        Ok(settings) => settings,
        Err(err) => exit_with(err),
    };

    if settings.debug_mode {
        info!("Debug mode enabled");
        match settings.to_json() {
            Ok(dump) => debug!("Settings:\n{}", dump),
            Err(err) => warn!("Failed to serialize settings: {}", err),
        }
    }

    let blacklist = match Blacklist::load(&settings.blacklist_file) {
        Ok(blacklist) => blacklist,
        Err(err) => exit_with(err),
    };

    print_summary(&settings, blacklist.len());
}

// The config path comes from the first argument, then `TWBOT_CONFIG`, then
// the default location.
fn config_path() -> String {
    env::args()
        .nth(1)
        .or_else(|| env::var("TWBOT_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_OPTIONS_FILE.to_owned())
}

fn print_summary(settings: &Settings, blacklisted: usize) {
    println!("[Ready] Config loaded for owner {}", settings.owner_id);
    println!("  Command prefix: {}", settings.command_prefix);
    println!("  Game server: {}:{}", settings.server_ip, settings.server_port);
    if settings.bound_channels.is_empty() {
        println!("  Not bound to any channels");
    } else {
        let mut channels = settings.bound_channels.iter().map(String::as_str).collect::<Vec<_>>();
        channels.sort();
        println!("  Bound to channels: {}", channels.join(", "));
    }
    println!("  Blacklisted ids: {}", blacklisted);
}

fn exit_with(err: Error) -> ! {
    match err {
        Error::Helpful(ref helpful) => eprintln!("\n{}\n", helpful.message()),
        Error::Bootstrap { ref message, .. } => eprintln!("\n{}", message),
        ref err => {
            error!("Failed to start: {}", err);
            eprintln!("{}", err);
        },
    }
    process::exit(err.exit_code());
}
