// Copyright (c) 2017 The twbot contributors
// See the README.md file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::Result;
use crate::store::Store;
use crate::util::temp_path;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Identifiers the bot refuses to serve.
pub type Blacklist = IdList;
/// Identifiers the bot always serves.
pub type Whitelist = IdList;

/// A file-backed set of identifiers.
///
/// The file holds one identifier per line. Blank lines and lines starting with
/// `#` are ignored. Every successful mutation is written back to disk.
#[derive(Clone, Debug)]
pub struct IdList {
    path: PathBuf,
    ids: HashSet<String>,
}

impl IdList {
    /// Loads the list stored at `path`.
    ///
    /// If no file is present, the list starts out empty and the file is only
    /// created on the first mutation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(ref err) if err.kind() == ErrorKind::NotFound => {
                debug!("No id list at {}, starting empty", path.display());
                return Ok(IdList { path: path, ids: HashSet::new() });
            },
            Err(err) => return Err(err.into()),
        };
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let ids = contents.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToOwned::to_owned)
            .collect::<HashSet<_>>();
        debug!("Loaded {} ids from: {}", ids.len(), path.display());

        Ok(IdList { path: path, ids: ids })
    }

    /// Writes the list back to its file.
    pub fn save(&self) -> Result<()> {
        let mut ids = self.ids.iter().map(String::as_str).collect::<Vec<_>>();
        ids.sort();

        let temp = temp_path(&self.path);
        {
            let mut file = File::create(&temp)?;
            for id in ids {
                writeln!(file, "{}", id)?;
            }
            file.sync_all()?;
        }

        // Atomically replace the old list.
        fs::rename(&temp, &self.path)?;
        trace!("Saved {} ids to: {}", self.ids.len(), self.path.display());
        Ok(())
    }

    /// The file this list is stored in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of identifiers in the list.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the list holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over the identifiers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Store<String> for IdList {
    fn contains(&self, id: &String) -> bool {
        self.ids.contains(id.trim())
    }

    fn insert(&mut self, id: String) -> Result<bool> {
        let id = id.trim().to_owned();
        if id.is_empty() || !self.ids.insert(id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn remove(&mut self, id: &String) -> Result<bool> {
        if !self.ids.remove(id.trim()) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}
