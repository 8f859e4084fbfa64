use super::args::*;
use crate::errors::{Error, Result};

pub struct ArgParser {
    factories: Vec<Box<dyn ArgFactory>>,
}

impl ArgParser {
    pub fn new() -> Self {
        Self {
            factories: vec![
                Box::new(SingleTokenFactory::<FlagArg>::new()),
                Box::new(SingleTokenFactory::<ConfigKeyArg>::new()),
                Box::new(SingleTokenFactory::<PlatformArg>::new()),
                // Catch-all: paths and values. Keep last.
                Box::new(SingleTokenFactory::<TextArg>::new()),
            ],
        }
    }

    pub fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        let mut ts = TokenStream::new(raw);
        let mut out = Vec::new();

        while !ts.eof() {
            let tok = ts.peek()?.to_string();
            let mut claimed = false;

            for f in &self.factories {
                if f.can_start(&tok) {
                    out.push(f.parse(&mut ts)?);
                    claimed = true;
                    break;
                }
            }

            if !claimed {
                return Err(Error::Parse(format!("Unrecognized argument: '{}'.", tok)));
            }
        }
        Ok(out)
    }
}
