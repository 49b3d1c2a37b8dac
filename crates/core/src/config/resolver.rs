use std::collections::HashMap;

use tracing::warn;

use super::Settings;
use crate::types::Resolved;

/// Option kind resolved through the layered lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Start,
    Update,
}

impl Flag {
    fn key(self) -> &'static str {
        match self {
            Flag::Start => "start",
            Flag::Update => "update",
        }
    }
}

/// Layered option resolution: explicit spec option, then the configured
/// scanner default from the settings source, then the hardcoded scheme
/// default
///
/// Settings-layer lookups are memoized per resolver instance; a fresh
/// resolver is created for every resolution pass, so nothing leaks across
/// requests. A malformed settings value degrades to "unset" at that layer
/// and falls through, with a warning.
pub struct OptionResolver<'a> {
    settings: &'a Settings,
    levels: HashMap<String, Option<u32>>,
    flags: HashMap<(String, Flag), Option<bool>>,
}

impl<'a> OptionResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            levels: HashMap::new(),
            flags: HashMap::new(),
        }
    }

    /// Resolve a start level; `fallback` is the scheme's hardcoded default,
    /// which may itself be absent
    pub fn resolve_start_level(
        &mut self,
        scheme: &str,
        explicit: Option<u32>,
        fallback: Option<u32>,
    ) -> Resolved<u32> {
        if let Some(level) = explicit {
            return Resolved::Explicit(level);
        }
        if let Some(level) = self.settings_level(scheme) {
            return Resolved::Defaulted(level);
        }
        match fallback {
            Some(level) => Resolved::Defaulted(level),
            None => Resolved::Unset,
        }
    }

    /// Resolve a boolean flag; the hardcoded default is always concrete, so
    /// the result is too
    pub fn resolve_flag(
        &mut self,
        scheme: &str,
        flag: Flag,
        explicit: Option<bool>,
        fallback: bool,
    ) -> bool {
        if let Some(value) = explicit {
            return value;
        }
        self.settings_flag(scheme, flag).unwrap_or(fallback)
    }

    fn settings_level(&mut self, scheme: &str) -> Option<u32> {
        if let Some(cached) = self.levels.get(scheme) {
            return *cached;
        }
        let parsed = self
            .settings
            .scanners
            .get(scheme)
            .and_then(|defaults| defaults.start_level.as_deref())
            .and_then(|raw| lenient_u32(scheme, "start_level", raw));
        self.levels.insert(scheme.to_string(), parsed);
        parsed
    }

    fn settings_flag(&mut self, scheme: &str, flag: Flag) -> Option<bool> {
        let key = (scheme.to_string(), flag);
        if let Some(cached) = self.flags.get(&key) {
            return *cached;
        }
        let raw = self.settings.scanners.get(scheme).and_then(|defaults| {
            match flag {
                Flag::Start => defaults.start.as_deref(),
                Flag::Update => defaults.update.as_deref(),
            }
        });
        let parsed = raw.and_then(|raw| lenient_bool(scheme, flag.key(), raw));
        self.flags.insert(key, parsed);
        parsed
    }
}

fn lenient_u32(scheme: &str, key: &str, raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(
                "ignoring malformed {} '{}' configured for scanner '{}'",
                key, raw, scheme
            );
            None
        }
    }
}

fn lenient_bool(scheme: &str, key: &str, raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => {
            warn!(
                "ignoring malformed {} '{}' configured for scanner '{}'",
                key, raw, scheme
            );
            None
        }
    }
}
