// Copyright (c) 2017 The twbot contributors
// See the README.md file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Storage for lists of opaque identifiers (users, channels, servers).

mod id_list;

pub use self::id_list::{Blacklist, IdList, Whitelist};

use crate::error::Result;
use std::collections::HashSet;
use std::hash::Hash;

/// A set of identifiers.
pub trait Store<T> {
    /// Returns `true` if `id` is present.
    fn contains(&self, id: &T) -> bool;
    /// Adds `id`, returning `true` if it was not already present.
    fn insert(&mut self, id: T) -> Result<bool>;
    /// Removes `id`, returning `true` if it was present.
    fn remove(&mut self, id: &T) -> Result<bool>;
}

impl<T> Store<T> for HashSet<T>
    where T: Eq + Hash,
{
    fn contains(&self, id: &T) -> bool {
        HashSet::contains(self, id)
    }

    fn insert(&mut self, id: T) -> Result<bool> {
        Ok(HashSet::insert(self, id))
    }

    fn remove(&mut self, id: &T) -> Result<bool> {
        Ok(HashSet::remove(self, id))
    }
}
