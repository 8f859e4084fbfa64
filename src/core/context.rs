use crate::config::Config;
use crate::core::models::Requirement;
use crate::core::repository::Repository;

use crate::errors::Result;
use crate::logging::Logger;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub requirements: Repository<Requirement>,
    pub logger: Logger,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppContext {
    pub fn new_with_paths(config_path: PathBuf, logs_dir: PathBuf) -> Result<Self> {
        let config = Config::load_or_default(&config_path)?;
        let requirements = Repository::<Requirement>::new();

        let logger = Logger::new();
        logger.set_log_dir(&logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());

        Ok(Self {
            config,
            requirements,
            logger,
            config_path,
            logs_dir,
        })
    }
}
