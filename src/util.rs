// Copyright (c) 2017 The twbot contributors
// See the README.md file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// Parses an INI boolean.
///
/// Accepts `1`, `yes`, `true` and `on` as true and `0`, `no`, `false` and
/// `off` as false, ignoring case. Anything else yields `None`.
#[inline]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Returns `true` if `value` is non-empty and made of ASCII digits only.
#[inline]
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Splits a comma and/or whitespace separated list into a set of tokens,
/// dropping empty ones.
///
/// Applying this to the members of its own output yields the same set.
pub fn split_list<'a, I>(items: I) -> HashSet<String>
    where I: IntoIterator<Item = &'a str>,
{
    items.into_iter()
        .flat_map(|item| item.split(|c: char| c == ',' || c.is_whitespace()))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Builds a unique sibling path of `path` to write into before renaming it
/// over the original.
pub fn temp_path(path: &Path) -> std::path::PathBuf {
    let name = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
}
