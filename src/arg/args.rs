use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::config::ConfigKey;
use crate::core::types::{Flag, KNOWN_PLATFORMS};
use crate::errors::{Error, Result};

/// A typed command argument. `Text` is the catch-all for paths and
/// config values; commands interpret it positionally.
#[derive(Debug, Clone)]
pub enum Arg {
    Flag(Flag),
    ConfigKey(ConfigKey),
    Platform(String),
    Text(String),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Flag(x) => write!(f, "{x}"),
            Arg::ConfigKey(x) => write!(f, "{x}"),
            Arg::Platform(x) => write!(f, "{x}"),
            Arg::Text(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStream {
    toks: Vec<String>,
    i: usize,
}

impl TokenStream {
    pub fn new(raw: &[String]) -> Self {
        Self {
            toks: raw.to_vec(),
            i: 0,
        }
    }
    pub fn eof(&self) -> bool {
        self.i >= self.toks.len()
    }
    pub fn peek(&self) -> Result<&str> {
        self.toks
            .get(self.i)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::Parse("EOF".into()))
    }
    pub fn next(&mut self) -> Result<String> {
        let s = self.peek()?.to_string();
        self.i += 1;
        Ok(s)
    }
}

pub trait SingleTokenArg {
    fn accepts(tok: &str) -> bool;
    fn new(tok: &str) -> Result<Arg>;
}

pub trait ArgFactory {
    fn can_start(&self, tok: &str) -> bool;
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg>;
}

pub struct SingleTokenFactory<A: SingleTokenArg>(PhantomData<A>);
impl<A: SingleTokenArg> SingleTokenFactory<A> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<A: SingleTokenArg> ArgFactory for SingleTokenFactory<A> {
    fn can_start(&self, tok: &str) -> bool {
        A::accepts(tok)
    }
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg> {
        let tok = ts.next()?;
        A::new(&tok)
    }
}

pub struct FlagArg;
impl SingleTokenArg for FlagArg {
    fn accepts(value: &str) -> bool {
        Flag::from_str(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Flag::from_str(value)
            .map(Arg::Flag)
            .map_err(|_| Error::Parse(format!("Invalid flag: '{}'.", value)))
    }
}

pub struct ConfigKeyArg;
impl SingleTokenArg for ConfigKeyArg {
    fn accepts(value: &str) -> bool {
        ConfigKey::from_str(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        ConfigKey::from_str(value)
            .map(Arg::ConfigKey)
            .map_err(|_| Error::Parse(format!("Invalid configuration key: '{}'.", value)))
    }
}

pub struct PlatformArg;
impl SingleTokenArg for PlatformArg {
    fn accepts(value: &str) -> bool {
        KNOWN_PLATFORMS.iter().any(|p| *p == value)
    }
    fn new(value: &str) -> Result<Arg> {
        if !Self::accepts(value) {
            return Err(Error::Parse(format!(
                "Unknown platform: '{}'. Known platforms: {}",
                value,
                KNOWN_PLATFORMS.join(", ")
            )));
        }
        Ok(Arg::Platform(value.to_string()))
    }
}

/// Catch-all: any non-empty token. Must stay last in the registry.
pub struct TextArg;
impl SingleTokenArg for TextArg {
    fn accepts(value: &str) -> bool {
        !value.is_empty()
    }
    fn new(value: &str) -> Result<Arg> {
        if value.is_empty() {
            return Err(Error::Parse("Empty argument.".into()));
        }
        Ok(Arg::Text(value.to_string()))
    }
}
