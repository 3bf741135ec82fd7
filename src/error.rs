// Copyright (c) 2017 The twbot contributors
// See the README.md file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::result::Result as StdResult;

/// A convenient alias type for results for `twbot`.
pub type Result<T> = StdResult<T, Error>;

/// Exit status used when the copied template still has no `OwnerID`.
pub const EXIT_UNCONFIGURED: i32 = 1;
/// Exit status used when the template could not be copied or re-read.
pub const EXIT_COPY_FAILED: i32 = 2;
/// Exit status used when the copied template has a non-numeric `OwnerID`.
pub const EXIT_INVALID_OWNER: i32 = 4;

/// An error an operator can fix by editing the config.
///
/// This is a plain data carrier: rendering is left to whoever receives it, so
/// the same value can end up on a console, in a log, or in a chat message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HelpfulError {
    /// Short, one-line description of what went wrong.
    pub title: String,
    /// What the operator should do about it.
    pub remediation: String,
    /// Optional context line printed before the title.
    pub preface: Option<String>,
}

impl HelpfulError {
    /// Creates a new `HelpfulError` without a preface.
    pub fn new<T, R>(title: T, remediation: R) -> Self
        where T: Into<String>,
              R: Into<String>,
    {
        HelpfulError {
            title: title.into(),
            remediation: remediation.into(),
            preface: None,
        }
    }

    /// Attaches a preface to the error.
    pub fn with_preface<P: Into<String>>(mut self, preface: P) -> Self {
        self.preface = Some(preface.into());
        self
    }

    /// Renders the error as a multi-line block suitable for a terminal.
    pub fn message(&self) -> String {
        let mut message = String::new();
        if let Some(ref preface) = self.preface {
            message.push_str(preface);
            message.push('\n');
        }
        message.push_str("Problem:\n  ");
        message.push_str(&self.title);
        message.push_str("\n\nSolution:\n  ");
        message.push_str(&self.remediation);
        message
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.title, self.remediation)
    }
}

impl StdError for HelpfulError {}

/// Represents errors which occur while starting `twbot`.
#[derive(Debug)]
pub enum Error {
    /// The template could not be turned into a usable config. There is no
    /// sensible recovery; the process should exit with `code`.
    Bootstrap {
        /// Process exit status to use.
        code: i32,
        /// Message to show the operator before exiting.
        message: String,
    },
    /// A config problem the operator can fix.
    Helpful(HelpfulError),
    /// An `ini` crate error.
    Ini(ini::Error),
    /// An IO error was encountered.
    Io(io::Error),
    /// A `serde` crate error.
    Serde(serde_json::Error),
}

impl Error {
    /// Returns the process exit status the binary should use for this error.
    pub fn exit_code(&self) -> i32 {
        match *self {
            Error::Bootstrap { code, .. } => code,
            _ => 1,
        }
    }

    /// Returns the structured error, if this is one.
    pub fn as_helpful(&self) -> Option<&HelpfulError> {
        match *self {
            Error::Helpful(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;

        match *self {
            Bootstrap { ref message, .. } => f.write_str(message),
            Helpful(ref e) => e.fmt(f),
            Ini(ref e) => e.fmt(f),
            Io(ref e) => e.fmt(f),
            Serde(ref e) => e.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        use self::Error::*;

        match *self {
            Bootstrap { .. } => None,
            Helpful(ref e) => Some(e),
            Ini(ref e) => Some(e),
            Io(ref e) => Some(e),
            Serde(ref e) => Some(e),
        }
    }
}

impl From<HelpfulError> for Error {
    fn from(error: HelpfulError) -> Error {
        Error::Helpful(error)
    }
}

impl From<ini::Error> for Error {
    fn from(error: ini::Error) -> Error {
        Error::Ini(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Serde(error)
    }
}
