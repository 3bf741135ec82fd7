// Copyright (c) 2017 The twbot contributors
// See the README.md file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loads and validates the bot's INI config.
//!
//! On first run the bundled example config is copied to the requested path.
//! The operator is expected to edit it and restart, so a copy that still has
//! no `OwnerID` stops startup with an [`Error::Bootstrap`].

use crate::error::{Error, HelpfulError, Result};
use crate::error::{EXIT_COPY_FAILED, EXIT_INVALID_OWNER, EXIT_UNCONFIGURED};
use crate::util::{is_digits, parse_bool, split_list};
use ini::{Ini, ParseOption};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where the binary looks for its config when none is given.
pub const DEFAULT_OPTIONS_FILE: &str = "config/options.ini";
/// The example config copied into place on first run.
pub const EXAMPLE_OPTIONS_FILE: &str = "config/example_options.ini";
/// Name of the section holding the game-specific settings.
pub const APP_SECTION: &str = "TribeWarfareBot";

const CONFIG_PREFACE: &str = "An error has occured reading the config:\n";
const PARSE_PREFACE: &str = "An error has occured parsing the config:\n";

// Discord snowflakes are far larger than this; anything below it is a
// placeholder someone forgot to replace.
const MIN_OWNER_ID: u64 = 10_000;

/// Fallback values for optional settings.
pub mod defaults {
    /// `[Chat] CommandPrefix`
    pub const COMMAND_PREFIX: &str = "!";
    /// `[TribeWarfareBot] ServerIp`
    pub const SERVER_IP: &str = "63.251.107.26";
    /// `[TribeWarfareBot] ServerPort`
    pub const SERVER_PORT: u16 = 27021;
    /// `[TribeWarfareBot] MinimumToRaid`
    pub const MINIMUM_TO_RAID: u32 = 5;
    /// `[TribeWarfareBot] DeleteMessages`
    pub const DELETE_MESSAGES: bool = true;
    /// `[TribeWarfareBot] DeleteInvoking`
    pub const DELETE_INVOKING: bool = false;
    /// `[TribeWarfareBot] DebugMode`
    pub const DEBUG_MODE: bool = false;
    /// `[Files] BlacklistFile`
    pub const BLACKLIST_FILE: &str = "config/blacklist.txt";
}

/// Validated bot settings.
///
/// Only produced by [`ConfigLoader::load`], so every instance has passed
/// validation.
#[derive(Clone, Serialize)]
pub struct Settings {
    #[serde(skip_serializing)]
    login_token: String,
    /// Discord ID of the bot's owner, as written in the config.
    pub owner_id: String,
    /// Prefix that marks a message as a command.
    pub command_prefix: String,
    /// Channels the bot listens in. Empty means every channel.
    pub bound_channels: HashSet<String>,
    /// Address of the game server.
    pub server_ip: String,
    /// Port of the game server.
    pub server_port: u16,
    /// Number of players online before a raid is announced.
    pub minimum_to_raid: u32,
    /// Whether the bot cleans up its own replies.
    pub delete_messages: bool,
    /// Whether the bot also deletes the message that invoked a command.
    /// Never `true` unless `delete_messages` is.
    pub delete_invoking: bool,
    /// Enables extra diagnostics.
    pub debug_mode: bool,
    /// File the blacklisted ids are stored in.
    pub blacklist_file: String,
}

impl Settings {
    /// Loads settings from `path` with the default loader.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigLoader::default().load(path)
    }

    /// The bot token used to log in.
    pub fn login_token(&self) -> &str {
        &self.login_token
    }

    /// Renders the settings as pretty-printed JSON, without the login token.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns `true` if the bot should respond in `channel`.
    pub fn is_bound_to(&self, channel: &str) -> bool {
        self.bound_channels.is_empty() || self.bound_channels.contains(channel)
    }

    fn validate(mut self, bound_channels: &str) -> Result<Self> {
        if self.login_token.is_empty() {
            return Err(HelpfulError::new(
                "No login credentials were specified in the config.",
                "Please fill in the Token field. The Token field is for Bot accounts only.",
            ).with_preface(CONFIG_PREFACE).into());
        }

        if !is_digits(&self.owner_id) {
            return Err(HelpfulError::new(
                "An invalid OwnerID was set.",
                format!("Correct your OwnerID. The ID should be just a number, approximately \
                         18 characters long. If you don't know what your ID is, use the {}id \
                         command. Current invalid OwnerID: {}",
                        self.command_prefix,
                        self.owner_id),
            ).with_preface(CONFIG_PREFACE).into());
        }
        // Overflowing u64 still means a long, plausible ID.
        if self.owner_id.parse::<u64>().map(|id| id < MIN_OWNER_ID).unwrap_or(false) {
            return Err(owner_not_set(&self.command_prefix).into());
        }

        self.bound_channels = match parse_channels(bound_channels) {
            Some(channels) => channels,
            None => {
                warn!("BindToChannels data invalid, will not bind to any channels");
                HashSet::new()
            },
        };

        self.delete_invoking = self.delete_invoking && self.delete_messages;

        Ok(self)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Settings")
            .field("login_token", &"<redacted>")
            .field("owner_id", &self.owner_id)
            .field("command_prefix", &self.command_prefix)
            .field("bound_channels", &self.bound_channels)
            .field("server_ip", &self.server_ip)
            .field("server_port", &self.server_port)
            .field("minimum_to_raid", &self.minimum_to_raid)
            .field("delete_messages", &self.delete_messages)
            .field("delete_invoking", &self.delete_invoking)
            .field("debug_mode", &self.debug_mode)
            .field("blacklist_file", &self.blacklist_file)
            .finish()
    }
}

/// Reads settings from disk, bootstrapping the config from a template when
/// needed.
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    template: PathBuf,
    app_section: String,
}

impl Default for ConfigLoader {
    fn default() -> ConfigLoader {
        ConfigLoader {
            template: PathBuf::from(EXAMPLE_OPTIONS_FILE),
            app_section: APP_SECTION.to_owned(),
        }
    }
}

impl ConfigLoader {
    /// Creates a loader using the bundled template and section names.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the template copied into place when the config is missing.
    pub fn template<P: Into<PathBuf>>(mut self, template: P) -> Self {
        self.template = template.into();
        self
    }

    /// Sets the name of the game-specific section.
    pub fn app_section<S: Into<String>>(mut self, name: S) -> Self {
        self.app_section = name.into();
        self
    }

    /// Loads and validates the config at `path`.
    ///
    /// If `path` is missing or cannot be parsed, the template is copied over
    /// it first. Failures the operator can fix by editing the config come back
    /// as [`Error::Helpful`]; a template that cannot be used comes back as
    /// [`Error::Bootstrap`] carrying the exit status to use.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Settings> {
        let path = path.as_ref();

        if let Err(err) = read_ini(path) {
            info!("Config file {} not usable ({}), copying {}",
                  path.display(),
                  err,
                  self.template.display());
            self.bootstrap(path)?;
        }

        let config = read_ini(path)?;
        self.check_sections(&config)?;
        debug!("Loaded config from: {}", path.display());

        let fields = Fields { config: &config };
        let app = self.app_section.as_str();
        let settings = Settings {
            login_token: fields.string("Credentials", "Token", ""),
            owner_id: fields.string("Permissions", "OwnerID", ""),
            command_prefix: fields.string("Chat", "CommandPrefix", defaults::COMMAND_PREFIX),
            bound_channels: HashSet::new(),
            server_ip: fields.string(app, "ServerIp", defaults::SERVER_IP),
            server_port: fields.parse(app, "ServerPort", defaults::SERVER_PORT)?,
            minimum_to_raid: fields.parse(app, "MinimumToRaid", defaults::MINIMUM_TO_RAID)?,
            delete_messages: fields.boolean(app, "DeleteMessages", defaults::DELETE_MESSAGES)?,
            delete_invoking: fields.boolean(app, "DeleteInvoking", defaults::DELETE_INVOKING)?,
            debug_mode: fields.boolean(app, "DebugMode", defaults::DEBUG_MODE)?,
            blacklist_file: fields.string("Files", "BlacklistFile", defaults::BLACKLIST_FILE),
        };
        let bound_channels = fields.string("Chat", "BindToChannels", "");

        settings.validate(&bound_channels)
    }

    fn bootstrap(&self, path: &Path) -> Result<()> {
        match fs::copy(&self.template, path) {
            Ok(_) => {},
            Err(ref err) if err.kind() == ErrorKind::NotFound => {
                return Err(HelpfulError::new(
                    format!("Your config files are missing. Neither {} nor {} were found.",
                            path.display(),
                            self.template.display()),
                    "Grab the files back from the archive or remake them yourself and copy \
                     paste the content from the repo. Stop removing important files!",
                ).into());
            },
            Err(err) => return Err(copy_failed(&self.template, path, &err)),
        }

        let copy = read_ini(path).map_err(|err| copy_failed(&self.template, path, &err))?;
        let owner_id = get(&copy, "Permissions", "OwnerID").unwrap_or("0").trim();
        let digits = owner_id.strip_prefix('-')
            .or_else(|| owner_id.strip_prefix('+'))
            .unwrap_or(owner_id);

        if !is_digits(digits) {
            return Err(Error::Bootstrap {
                code: EXIT_INVALID_OWNER,
                message: "Invalid value for OwnerID, config cannot be loaded.".to_owned(),
            });
        }
        if digits.bytes().all(|b| b == b'0') {
            return Err(Error::Bootstrap {
                code: EXIT_UNCONFIGURED,
                message: format!("Please configure {} and restart the bot.", path.display()),
            });
        }

        Ok(())
    }

    fn check_sections(&self, config: &Ini) -> Result<()> {
        let missing = ["Credentials", "Permissions", "Chat", self.app_section.as_str()]
            .iter()
            .filter(|name| config.section(Some(**name)).is_none())
            .map(|name| format!("[{}]", name))
            .collect::<Vec<_>>();

        if missing.is_empty() {
            return Ok(());
        }

        Err(HelpfulError::new(
            "One or more required config sections are missing.",
            format!("Fix your config. Each [Section] should be on its own line with nothing \
                     else on it. The following sections are missing: {}",
                    missing.join(", ")),
        ).with_preface(PARSE_PREFACE).into())
    }
}

/// Typed lookups with fallbacks.
struct Fields<'a> {
    config: &'a Ini,
}

impl<'a> Fields<'a> {
    fn string(&self, section: &str, key: &str, default: &str) -> String {
        get(self.config, section, key).unwrap_or(default).to_owned()
    }

    fn parse<T: FromStr>(&self, section: &str, key: &str, default: T) -> Result<T> {
        match get(self.config, section, key) {
            Some(value) => value.trim().parse().map_err(|_| invalid_value(section, key, value)),
            None => Ok(default),
        }
    }

    fn boolean(&self, section: &str, key: &str, default: bool) -> Result<bool> {
        match get(self.config, section, key) {
            Some(value) => parse_bool(value).ok_or_else(|| invalid_value(section, key, value)),
            None => Ok(default),
        }
    }
}

// Values are taken literally: no quote stripping and no backslash escapes.
// Indented lines continue the previous value.
fn read_ini(path: &Path) -> Result<Ini> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    };
    let config = Ini::load_from_file_opt(path, options)?;

    let stray = config.section(None::<String>)
        .and_then(|general| general.iter().next().map(|(key, _)| key.to_owned()));
    if let Some(key) = stray {
        return Err(HelpfulError::new(
            "The config has keys outside of any section.",
            format!("Move {} (and any other key above the first [Section]) into the section \
                     it belongs to.",
                    key),
        ).with_preface(PARSE_PREFACE).into());
    }

    Ok(config)
}

// Section names are case-sensitive, keys are not.
fn get<'a>(config: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    config.section(Some(section))?
        .iter()
        .find(|&(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

// Returns `None` if any channel contains characters that cannot appear in a
// channel name.
fn parse_channels(raw: &str) -> Option<HashSet<String>> {
    let channels = split_list(raw.split_whitespace());
    if channels.iter().any(|channel| channel.chars().any(char::is_control)) {
        return None;
    }
    Some(channels)
}

fn owner_not_set(command_prefix: &str) -> HelpfulError {
    HelpfulError::new(
        "OwnerID was not set.",
        format!("Please set the OwnerID in the config. If you don't know what that is, use \
                 the {}id command",
                command_prefix),
    ).with_preface(CONFIG_PREFACE)
}

fn invalid_value(section: &str, key: &str, value: &str) -> Error {
    HelpfulError::new(
        format!("An invalid value was set for {}.", key),
        format!("Correct the {} field in the [{}] section. Current invalid value: {}",
                key,
                section,
                value),
    ).with_preface(CONFIG_PREFACE).into()
}

fn copy_failed<E: fmt::Display>(template: &Path, path: &Path, err: &E) -> Error {
    Error::Bootstrap {
        code: EXIT_COPY_FAILED,
        message: format!("{}\nUnable to copy {} to {}", err, template.display(), path.display()),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use std::collections::HashSet;
    use std::env;
    use std::fs;
    use std::path::{Path, PathBuf};
    use super::{defaults, ConfigLoader, Settings};
    use uuid::Uuid;

    const FULL_CONFIG: &str = "\
[Credentials]
Token = MzI0.abc%sdef\\n

[Permissions]
OwnerID = 123456789012345678

[Chat]
CommandPrefix = ?
BindToChannels = 111 222

[TribeWarfareBot]
ServerIp = 10.0.0.1
ServerPort = 28000
MinimumToRaid = 3
DeleteMessages = yes
DeleteInvoking = on
DebugMode = true

[Files]
BlacklistFile = data/blacklist.txt
";

    struct Scratch {
        dir: PathBuf,
    }

    impl Scratch {
        fn new() -> Self {
            let dir = env::temp_dir().join(format!("twbot-{}", Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Scratch { dir: dir }
        }

        fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.dir.join(name);
            fs::write(&path, contents).unwrap();
            path
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.join(name)
        }

        fn loader(&self) -> ConfigLoader {
            ConfigLoader::new().template(self.path("example_options.ini"))
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    fn minimal(owner_id: &str, chat: &str, app: &str) -> String {
        format!("[Credentials]\nToken = token\n\n[Permissions]\nOwnerID = {}\n\n\
                 [Chat]\nUnused = 1\n{}\n\n[TribeWarfareBot]\nUnused = 1\n{}\n",
                owner_id,
                chat,
                app)
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn load(scratch: &Scratch, path: &Path) -> Error {
        match scratch.loader().load(path) {
            Ok(settings) => panic!("Expected an error, got {:?}", settings),
            Err(err) => err,
        }
    }

    #[test]
    fn test_explicit_values() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", FULL_CONFIG);
        let settings = scratch.loader().load(&path).unwrap();

        assert_eq!(settings.login_token(), "MzI0.abc%sdef\\n");
        assert_eq!(settings.owner_id, "123456789012345678");
        assert_eq!(settings.command_prefix, "?");
        assert_eq!(settings.bound_channels, set(&["111", "222"]));
        assert_eq!(settings.server_ip, "10.0.0.1");
        assert_eq!(settings.server_port, 28000);
        assert_eq!(settings.minimum_to_raid, 3);
        assert!(settings.delete_messages);
        assert!(settings.delete_invoking);
        assert!(settings.debug_mode);
        assert_eq!(settings.blacklist_file, "data/blacklist.txt");
    }

    #[test]
    fn test_defaults() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &minimal("123456789012345678", "", ""));
        let settings = scratch.loader().load(&path).unwrap();

        assert_eq!(settings.command_prefix, defaults::COMMAND_PREFIX);
        assert!(settings.bound_channels.is_empty());
        assert_eq!(settings.server_ip, "63.251.107.26");
        assert_eq!(settings.server_port, 27021);
        assert_eq!(settings.minimum_to_raid, 5);
        assert!(settings.delete_messages);
        assert!(!settings.delete_invoking);
        assert!(!settings.debug_mode);
        assert_eq!(settings.blacklist_file, "config/blacklist.txt");
        assert!(settings.is_bound_to("anything"));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 &minimal("123456789012345678", "commandprefix = $", "SERVERPORT = 1"));
        let settings = scratch.loader().load(&path).unwrap();
        assert_eq!(settings.command_prefix, "$");
        assert_eq!(settings.server_port, 1);
    }

    #[test]
    fn test_missing_sections() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 "[Credentials]\nToken = token\n\n[Permissions]\nOwnerID = 123456789\n");
        let err = load(&scratch, &path);
        let err = err.as_helpful().unwrap();

        assert_eq!(err.title, "One or more required config sections are missing.");
        assert!(err.remediation.ends_with("The following sections are missing: [Chat], [TribeWarfareBot]"));
        assert_eq!(err.preface.as_ref().unwrap(), "An error has occured parsing the config:\n");
    }

    #[test]
    fn test_custom_app_section() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &minimal("123456789012345678", "", ""));
        let err = match scratch.loader().app_section("Raid").load(&path) {
            Ok(_) => panic!("Expected missing [Raid]"),
            Err(err) => err,
        };
        assert!(err.as_helpful().unwrap().remediation.ends_with("missing: [Raid]"));
    }

    #[test]
    fn test_delete_invoking_requires_delete_messages() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 &minimal("123456789012345678",
                                          "",
                                          "DeleteMessages = false\nDeleteInvoking = true"));
        let settings = scratch.loader().load(&path).unwrap();
        assert!(!settings.delete_messages);
        assert!(!settings.delete_invoking);
    }

    #[test]
    fn test_bound_channels_are_normalized() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 &minimal("123456789012345678", "BindToChannels = a, b,,c", ""));
        let settings = scratch.loader().load(&path).unwrap();
        assert_eq!(settings.bound_channels, set(&["a", "b", "c"]));
        assert!(settings.is_bound_to("b"));
        assert!(!settings.is_bound_to("d"));
    }

    #[test]
    fn test_invalid_bound_channels_are_ignored() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 &minimal("123456789012345678", "BindToChannels = 111 2\u{7}22", ""));
        let settings = scratch.loader().load(&path).unwrap();
        assert!(settings.bound_channels.is_empty());
    }

    #[test]
    fn test_missing_token() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 "[Credentials]\nToken =\n[Permissions]\nOwnerID = 123456789\n\
                                  [Chat]\nCommandPrefix = !\n[TribeWarfareBot]\nDebugMode = no\n");
        let err = load(&scratch, &path);
        let err = err.as_helpful().unwrap();
        assert_eq!(err.title, "No login credentials were specified in the config.");
        assert!(err.remediation.contains("Token field"));
        assert_eq!(err.preface.as_ref().unwrap(), "An error has occured reading the config:\n");
    }

    #[test]
    fn test_small_owner_id() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &minimal("42", "", ""));
        let err = load(&scratch, &path);
        assert_eq!(err.as_helpful().unwrap().title, "OwnerID was not set.");
    }

    #[test]
    fn test_empty_owner_id() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &minimal("", "", ""));
        let err = load(&scratch, &path);
        let err = err.as_helpful().unwrap();
        assert_eq!(err.title, "An invalid OwnerID was set.");
        assert!(err.remediation.contains("!id command"));
    }

    #[test]
    fn test_absent_owner_id() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 "[Credentials]\nToken = token\n[Permissions]\nUnused = 1\n\
                                  [Chat]\nUnused = 1\n[TribeWarfareBot]\nUnused = 1\n");
        let err = load(&scratch, &path);
        assert_eq!(err.as_helpful().unwrap().title, "An invalid OwnerID was set.");
    }

    #[test]
    fn test_indented_lines_continue_values() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini",
                                 "[Credentials]\nToken = token\n[Permissions]\n\
                                  OwnerID = 123456789012345678\n[Chat]\nCommandPrefix = $\n\
                                  BindToChannels = 1\n  2\n[TribeWarfareBot]\nMinimumToRaid = 7\n");
        let settings = scratch.loader().load(&path).unwrap();
        assert_eq!(settings.bound_channels, set(&["1", "2"]));
        assert_eq!(settings.minimum_to_raid, 7);
    }

    #[test]
    fn test_keys_outside_sections_are_unparsable() {
        let scratch = Scratch::new();
        scratch.write("example_options.ini", FULL_CONFIG);
        let path = scratch.write("options.ini", &format!("Stray = 1\n{}", minimal("987654321", "", "")));

        // The file is replaced by the template rather than loaded as is.
        let settings = scratch.loader().load(&path).unwrap();
        assert_eq!(settings.owner_id, "123456789012345678");
        assert_eq!(fs::read_to_string(&path).unwrap(), FULL_CONFIG);
    }

    #[test]
    fn test_keys_outside_sections_without_template() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &format!("Stray = 1\n{}", minimal("987654321", "", "")));
        let err = load(&scratch, &path);
        assert!(err.as_helpful().unwrap().title.starts_with("Your config files are missing."));
    }

    #[test]
    fn test_invalid_owner_id() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &minimal("abc", "CommandPrefix = ?", ""));
        let err = load(&scratch, &path);
        let err = err.as_helpful().unwrap();
        assert_eq!(err.title, "An invalid OwnerID was set.");
        assert!(err.remediation.contains("Current invalid OwnerID: abc"));
        assert!(err.remediation.contains("?id command"));
    }

    #[test]
    fn test_huge_owner_id_is_accepted() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &minimal("123456789012345678901234567890", "", ""));
        assert!(scratch.loader().load(&path).is_ok());
    }

    #[test]
    fn test_invalid_typed_values() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", &minimal("123456789", "", "ServerPort = 70000"));
        let err = load(&scratch, &path);
        assert_eq!(err.as_helpful().unwrap().title, "An invalid value was set for ServerPort.");

        let path = scratch.write("options.ini", &minimal("123456789", "", "DebugMode = maybe"));
        let err = load(&scratch, &path);
        let err = err.as_helpful().unwrap();
        assert_eq!(err.title, "An invalid value was set for DebugMode.");
        assert!(err.remediation.contains("[TribeWarfareBot]"));
        assert!(err.remediation.contains("maybe"));
    }

    #[test]
    fn test_missing_config_and_template() {
        let scratch = Scratch::new();
        let path = scratch.path("options.ini");
        let err = load(&scratch, &path);
        let err = err.as_helpful().unwrap();
        assert!(err.title.starts_with("Your config files are missing."));
        assert!(!path.exists());
    }

    #[test]
    fn test_unconfigured_template() {
        let scratch = Scratch::new();
        scratch.write("example_options.ini", &minimal("0", "", ""));
        let path = scratch.path("options.ini");

        match load(&scratch, &path) {
            Error::Bootstrap { code, ref message } => {
                assert_eq!(code, 1);
                assert!(message.starts_with("Please configure"));
            },
            err => panic!("Unexpected error: {:?}", err),
        }
        // The template was still copied so the operator can edit it.
        assert_eq!(fs::read_to_string(&path).unwrap(), minimal("0", "", ""));
    }

    #[test]
    fn test_template_without_owner_id() {
        let scratch = Scratch::new();
        scratch.write("example_options.ini", "[Credentials]\nToken = token\n");
        let err = load(&scratch, &scratch.path("options.ini"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_template_with_invalid_owner_id() {
        let scratch = Scratch::new();
        scratch.write("example_options.ini", &minimal("not-a-number", "", ""));
        let err = load(&scratch, &scratch.path("options.ini"));
        match err {
            Error::Bootstrap { code, .. } => assert_eq!(code, 4),
            err => panic!("Unexpected error: {:?}", err),
        }
    }

    #[test]
    fn test_template_copy_failure() {
        let scratch = Scratch::new();
        fs::create_dir(scratch.path("example_options.ini")).unwrap();
        let err = load(&scratch, &scratch.path("options.ini"));
        match err {
            Error::Bootstrap { code, .. } => assert_eq!(code, 2),
            err => panic!("Unexpected error: {:?}", err),
        }
    }

    #[test]
    fn test_configured_template_is_loaded() {
        let scratch = Scratch::new();
        scratch.write("example_options.ini", FULL_CONFIG);
        let path = scratch.path("options.ini");

        let settings = scratch.loader().load(&path).unwrap();
        assert_eq!(settings.owner_id, "123456789012345678");
        assert!(path.exists());
    }

    #[test]
    fn test_unparsable_config_is_replaced() {
        let scratch = Scratch::new();
        scratch.write("example_options.ini", FULL_CONFIG);
        let path = scratch.write("options.ini", "[Credentials\nToken = token\n");

        let settings = scratch.loader().load(&path).unwrap();
        assert_eq!(settings.command_prefix, "?");
    }

    #[test]
    fn test_bundled_template_needs_configuring() {
        let scratch = Scratch::new();
        let template = Path::new(env!("CARGO_MANIFEST_DIR")).join(super::EXAMPLE_OPTIONS_FILE);
        let err = ConfigLoader::new()
            .template(template)
            .load(scratch.path("options.ini"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_settings_serialization_skips_token() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", FULL_CONFIG);
        let settings = scratch.loader().load(&path).unwrap();

        let json = settings.to_json().unwrap();
        assert!(!json.contains("MzI0"));
        assert!(json.contains("\"server_port\": 28000"));
        assert!(!format!("{:?}", settings).contains("MzI0"));
    }

    #[test]
    fn test_settings_load_uses_default_template() {
        let scratch = Scratch::new();
        let path = scratch.write("options.ini", FULL_CONFIG);
        assert_eq!(Settings::load(&path).unwrap().minimum_to_raid, 3);
    }
}
