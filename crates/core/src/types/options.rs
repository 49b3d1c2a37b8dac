/// Install options carried by a single provisioning spec
///
/// The three slots are mutually exclusive per spec string: each can be set at
/// most once by the option segments (see `parser::options`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionSet {
    pub start_level: Option<u32>,
    pub should_start: Option<bool>,
    pub should_update: Option<bool>,
}

impl OptionSet {
    /// Fill unset slots from `fallback`; values already present win
    pub fn merge(self, fallback: OptionSet) -> OptionSet {
        OptionSet {
            start_level: self.start_level.or(fallback.start_level),
            should_start: self.should_start.or(fallback.should_start),
            should_update: self.should_update.or(fallback.should_update),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_level.is_none() && self.should_start.is_none() && self.should_update.is_none()
    }
}

/// Outcome of one layer of the option resolution chain
///
/// Only `Unset` falls through to the next layer; `Explicit` and `Defaulted`
/// short-circuit the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<T> {
    /// Value stated directly on the parsed spec
    Explicit(T),
    /// Value supplied by a configured or hardcoded default
    Defaulted(T),
    /// No layer produced a value
    Unset,
}

impl<T> Resolved<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Resolved::Explicit(v) | Resolved::Defaulted(v) => Some(v),
            Resolved::Unset => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Resolved::Unset)
    }
}
