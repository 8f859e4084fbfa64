use crate::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Pre-release phase tag. Orders a < b < rc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreTag {
    Alpha,
    Beta,
    Rc,
}

impl PreTag {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "a" | "alpha" => Some(PreTag::Alpha),
            "b" | "beta" => Some(PreTag::Beta),
            "rc" | "c" | "pre" | "preview" => Some(PreTag::Rc),
            _ => None,
        }
    }
}

impl fmt::Display for PreTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreTag::Alpha => write!(f, "a"),
            PreTag::Beta => write!(f, "b"),
            PreTag::Rc => write!(f, "rc"),
        }
    }
}

/// A package version: optional epoch, dotted release, optional pre-release
/// and post-release parts. Release segments compare zero-padded, so
/// `1.0 == 1.0.0`.
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: u32,
    pub release: Vec<u64>,
    pub pre: Option<(PreTag, u64)>,
    pub post: Option<u64>,
}

impl Version {
    pub fn usage() -> String {
        "Supported formats: 1, 1.2, 1.2.3, 2!1.0, 1.0a1, 1.0rc2, 1.0.post1".to_string()
    }

    fn error_message(input: &str) -> String {
        format!("Invalid version: '{}'. {}", input, Self::usage())
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let raw = input.trim().to_ascii_lowercase();
        let mut s = raw.as_str();
        if s.is_empty() {
            return Err(Error::Parse(Self::error_message(input)));
        }
        // A leading 'v' is tolerated, as installers tolerate it.
        s = s.strip_prefix('v').unwrap_or(s);

        let mut epoch = 0u32;
        if let Some((head, tail)) = s.split_once('!') {
            epoch = head
                .parse::<u32>()
                .map_err(|_| Error::Parse(Self::error_message(input)))?;
            s = tail;
        }

        let (release, rest) = Self::take_release(s, input)?;
        let (pre, post) = Self::take_suffixes(rest, input)?;

        Ok(Version {
            epoch,
            release,
            pre,
            post,
        })
    }

    fn take_release<'a>(s: &'a str, input: &str) -> Result<(Vec<u64>, &'a str)> {
        let mut release = Vec::new();
        let mut rest = s;
        loop {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                return Err(Error::Parse(Self::error_message(input)));
            }
            release.push(
                digits
                    .parse::<u64>()
                    .map_err(|_| Error::Parse(Self::error_message(input)))?,
            );
            rest = &rest[digits.len()..];

            // Another dotted numeric segment?
            match rest.strip_prefix('.') {
                Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
                _ => break,
            }
        }
        Ok((release, rest))
    }

    fn take_suffixes(
        rest: &str,
        input: &str,
    ) -> Result<(Option<(PreTag, u64)>, Option<u64>)> {
        let mut pre = None;
        let mut post = None;
        let mut s = rest;

        while !s.is_empty() {
            s = s.trim_start_matches(['.', '-', '_']);
            let word: String = s.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
            if word.is_empty() {
                return Err(Error::Parse(Self::error_message(input)));
            }
            s = &s[word.len()..];
            s = s.trim_start_matches(['.', '-', '_']);
            let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
            let number = if digits.is_empty() {
                0
            } else {
                digits
                    .parse::<u64>()
                    .map_err(|_| Error::Parse(Self::error_message(input)))?
            };
            s = &s[digits.len()..];

            if let Some(tag) = PreTag::from_word(&word) {
                if pre.is_some() {
                    return Err(Error::Parse(Self::error_message(input)));
                }
                pre = Some((tag, number));
            } else if matches!(word.as_str(), "post" | "rev" | "r") {
                if post.is_some() {
                    return Err(Error::Parse(Self::error_message(input)));
                }
                post = Some(number);
            } else {
                return Err(Error::Parse(Self::error_message(input)));
            }
        }

        Ok((pre, post))
    }

    /// Release segment at `idx`, treating missing trailing segments as 0.
    pub fn segment(&self, idx: usize) -> u64 {
        self.release.get(idx).copied().unwrap_or(0)
    }

    fn cmp_release(&self, other: &Version) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            match self.segment(i).cmp(&other.segment(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    /// Rank of the pre/final phase: pre-releases sort below the final release.
    fn phase_rank(&self) -> (u8, u8, u64) {
        match self.pre {
            Some((tag, n)) => (0, tag as u8, n),
            None => (1, 0, 0),
        }
    }

    /// True when `other` starts with this version's release segments.
    /// Used for `==X.Y.*` wildcard matching.
    pub fn is_prefix_of(&self, other: &Version) -> bool {
        self.epoch == other.epoch
            && self
                .release
                .iter()
                .enumerate()
                .all(|(i, seg)| other.segment(i) == *seg)
    }

    /// The smallest version strictly above every version matching
    /// `==<self>.*`: the release with its last segment incremented.
    pub fn wildcard_upper_bound(&self) -> Version {
        let mut release = self.release.clone();
        if let Some(last) = release.last_mut() {
            *last += 1;
        }
        Version {
            epoch: self.epoch,
            release,
            pre: None,
            post: None,
        }
    }

    /// Upper bound implied by `~=<self>`: drop the final segment and
    /// increment what is now last, e.g. `~=1.4.5` allows `<1.5`.
    pub fn compatible_upper_bound(&self) -> Version {
        let mut release = self.release.clone();
        release.pop();
        if let Some(last) = release.last_mut() {
            *last += 1;
        }
        Version {
            epoch: self.epoch,
            release,
            pre: None,
            post: None,
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.cmp_release(other))
            .then_with(|| self.phase_rank().cmp(&other.phase_rank()))
            .then_with(|| self.post.cmp(&other.post))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release = self
            .release
            .iter()
            .map(|seg| seg.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{release}")?;
        if let Some((tag, n)) = &self.pre {
            write!(f, "{tag}{n}")?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{n}")?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Version, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        Version::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}
