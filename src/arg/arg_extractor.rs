use crate::arg::args::{Arg, ConfigKeyArg, FlagArg, PlatformArg, TextArg};
use crate::config::ConfigKey;
use crate::core::types::Flag;

/// Typed view into a parsed argument. `try_extract` returns `None` when
/// the variant does not match, leaving the caller to build its own
/// usage error.
pub trait ArgExtractor<'a> {
    type Out;

    fn try_extract(actual: &'a Arg) -> Option<Self::Out>;
}

/// Extract the argument at `idx`, if present and of the expected kind.
#[inline]
pub fn extract_at<'a, E: ArgExtractor<'a>>(args: &'a [Arg], idx: usize) -> Option<E::Out> {
    args.get(idx).and_then(E::try_extract)
}

impl<'a> ArgExtractor<'a> for TextArg {
    type Out = &'a String;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for PlatformArg {
    type Out = &'a String;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Platform(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for ConfigKeyArg {
    type Out = ConfigKey;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::ConfigKey(k) => Some(*k),
            _ => None,
        }
    }
}

impl<'a> ArgExtractor<'a> for FlagArg {
    type Out = Flag;
    fn try_extract(a: &'a Arg) -> Option<Self::Out> {
        match a {
            Arg::Flag(f) => Some(*f),
            _ => None,
        }
    }
}
