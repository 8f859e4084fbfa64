use std::path::PathBuf;

/// One-shot invocation: global path flags, then the command word and its
/// raw arguments, e.g. `reqlint --config cfg.json check requirements.txt`.
#[derive(Debug, Clone)]
pub struct CliInvocation {
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
    pub command: String,
    pub args: Vec<String>,
}

impl CliInvocation {
    pub fn from_env() -> Result<Self, String> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = String>,
    {
        let mut invocation = Self::defaults();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    invocation.config_path = Self::next_path(&mut args, "--config")?;
                }
                "--logs" => {
                    invocation.logs_dir = Self::next_path(&mut args, "--logs")?;
                }
                _ => {
                    invocation.command = arg;
                    invocation.args = args.collect();
                    break;
                }
            }
        }
        if invocation.command.is_empty() {
            return Err(
                "Missing command. Usage: reqlint [--config <path>] [--logs <dir>] <command> [args]. \
                 See 'reqlint man'."
                    .to_string(),
            );
        }
        Ok(invocation)
    }

    fn next_path<I>(args: &mut I, flag: &str) -> Result<PathBuf, String>
    where
        I: Iterator<Item = String>,
    {
        args.next()
            .map(PathBuf::from)
            .ok_or_else(|| format!("Missing value for {flag}"))
    }

    fn defaults() -> Self {
        Self {
            config_path: PathBuf::from("reqlint.json"),
            logs_dir: PathBuf::from("logs"),
            command: String::new(),
            args: Vec::new(),
        }
    }
}
