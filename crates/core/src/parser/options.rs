use crate::{
    error::{Error, Result},
    types::OptionSet,
};

/// Keyword marking a bundle that is installed but not started
pub const KEYWORD_NOSTART: &str = "nostart";
/// Keyword requesting an update of an already installed bundle
pub const KEYWORD_UPDATE: &str = "update";
/// Keyword suppressing updates of an already installed bundle
pub const KEYWORD_NOUPDATE: &str = "noupdate";

const EXPECTED: &str =
    "expected an integer start level, 'nostart', 'update'/'noupdate', or startlevel=/start=/update=";

/// Classify the `@` option segments of one spec into an `OptionSet`
///
/// Segments are classified in fixed priority order: the no-start keyword, the
/// update keywords, then an integer start level, then a `key=value` form of
/// the same three slots. The first successful classification wins. A segment
/// matching no rule, or re-setting a slot that already holds a value, fails
/// with the offending segment named.
pub fn parse_segments(segments: &[String]) -> Result<OptionSet> {
    let mut options = OptionSet::default();

    for segment in segments {
        if segment == KEYWORD_NOSTART {
            set_flag(&mut options.should_start, false, segment, "start")?;
        } else if segment == KEYWORD_UPDATE {
            set_flag(&mut options.should_update, true, segment, "update")?;
        } else if segment == KEYWORD_NOUPDATE {
            set_flag(&mut options.should_update, false, segment, "update")?;
        } else if let Ok(level) = segment.parse::<u32>() {
            if options.start_level.is_some() {
                return Err(duplicate(segment, "start level"));
            }
            options.start_level = Some(level);
        } else if let Some((key, value)) = segment.split_once('=') {
            apply_keyed(&mut options, key, value, segment)?;
        } else {
            return Err(Error::MalformedSpec(format!(
                "invalid option segment '{segment}' ({EXPECTED})"
            )));
        }
    }

    Ok(options)
}

fn apply_keyed(options: &mut OptionSet, key: &str, value: &str, segment: &str) -> Result<()> {
    match key {
        "startlevel" => {
            let level = value.parse::<u32>().map_err(|_| {
                Error::MalformedSpec(format!(
                    "invalid start level '{value}' in option segment '{segment}'"
                ))
            })?;
            if options.start_level.is_some() {
                return Err(duplicate(segment, "start level"));
            }
            options.start_level = Some(level);
        }
        "start" => {
            let flag = parse_bool(value, segment)?;
            set_flag(&mut options.should_start, flag, segment, "start")?;
        }
        "update" => {
            let flag = parse_bool(value, segment)?;
            set_flag(&mut options.should_update, flag, segment, "update")?;
        }
        _ => {
            return Err(Error::MalformedSpec(format!(
                "unknown option key '{key}' in segment '{segment}' ({EXPECTED})"
            )));
        }
    }
    Ok(())
}

fn set_flag(slot: &mut Option<bool>, value: bool, segment: &str, kind: &str) -> Result<()> {
    if slot.is_some() {
        return Err(duplicate(segment, kind));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_bool(value: &str, segment: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::MalformedSpec(format!(
            "invalid boolean '{value}' in option segment '{segment}' (expected true or false)"
        ))),
    }
}

fn duplicate(segment: &str, kind: &str) -> Error {
    Error::MalformedSpec(format!(
        "duplicate {kind} option in segment '{segment}'; each option kind may appear at most once"
    ))
}
