use std::env;
use std::fmt;
use std::fs;
use serde::Deserialize;
use log::LevelFilter;
use url::Url;

use crate::{
    Error,
    core::{
        config::Config,
        Result
    },
};

pub const DEFAULT_TOKEN_KEY: &str = "token";
const DEFAULT_TOKEN_STORE: &str = ".salesdesk/storage.json";

#[derive(Clone, Deserialize)]
struct LogCfg {
    #[serde(rename = "level")]
    level   : String,
    #[serde(rename = "logFile")]
    file    : Option<String>,
}

#[derive(Clone, Deserialize)]
struct ConfigFile {
    #[serde(rename = "apiUrl")]
    api_url     : Option<String>,
    #[serde(rename = "tokenStore")]
    token_store : Option<String>,
    #[serde(rename = "tokenKey")]
    token_key   : Option<String>,

    #[serde(rename = "logger")]
    logger      : Option<LogCfg>,
}

struct Configuration {
    api_url     : Url,
    token_store : String,
    token_key   : String,

    log_level   : LevelFilter,
    log_file    : Option<String>,
}

pub struct Builder<'a> {
    api_url     : Option<&'a str>,
    token_store : Option<String>,
    token_key   : Option<&'a str>,

    log_level   : Option<LevelFilter>,
    log_file    : Option<&'a str>,

    cfg         : Option<ConfigFile>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Builder<'a> {
        Self {
            api_url     : None,
            token_store : None,
            token_key   : None,
            log_level   : None,
            log_file    : None,
            cfg         : None,
        }
    }

    pub fn with_api_url(&mut self, url: &'a str) -> &mut Self {
        self.api_url = Some(url);
        self
    }

    pub fn with_token_store(&mut self, input: &str) -> &mut Self {
        self.token_store = Some(expand_home(input));
        self
    }

    pub fn with_token_key(&mut self, key: &'a str) -> &mut Self {
        self.token_key = Some(key);
        self
    }

    pub fn with_logger(&mut self, level: LevelFilter, file: Option<&'a str>) -> &mut Self {
        self.log_level = Some(level);
        self.log_file = file;
        self
    }

    pub fn load(&mut self, input: &str) -> Result<&mut Self> {
        let data = fs::read_to_string(input).map_err(|e| {
            Error::Io(format!("Reading config error: {}", e))
        })?;

        let cfg = serde_json::from_str::<ConfigFile>(&data).map_err(|e| {
            Error::Argument(format!("bad config, error: {}", e))
        })?;

        self.cfg = Some(cfg);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Box<dyn Config>> {
        Ok(Box::new(Configuration::new(self)?))
    }
}

impl Configuration {
    fn new(b: &Builder) -> Result<Self> {
        let file = b.cfg.as_ref();

        let Some(url) = b.api_url.or_else(|| file.and_then(|v| v.api_url.as_deref())) else {
            return Err(Error::Argument("Missing api url!!!".into()));
        };

        // A base without trailing slash would lose its last path segment on join.
        let mut api_url = Url::parse(url)?;
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let token_store = match b.token_store.as_ref() {
            Some(path) => path.clone(),
            None => match file.and_then(|v| v.token_store.as_deref()) {
                Some(path) => expand_home(path),
                None => {
                    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
                    format!("{}/{}", home, DEFAULT_TOKEN_STORE)
                }
            }
        };

        let token_key = b.token_key
            .or_else(|| file.and_then(|v| v.token_key.as_deref()))
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_TOKEN_KEY)
            .to_string();

        let (log_level, log_file) = match b.log_level {
            Some(level) => (level, b.log_file.map(|v| v.to_string())),
            None => match file.and_then(|v| v.logger.as_ref()) {
                Some(logger) => {
                    let level = logger.level.parse::<LevelFilter>().map_err(|_| {
                        Error::Argument(format!("Invalid log level: {}", logger.level))
                    })?;
                    (level, logger.file.clone())
                },
                None => (LevelFilter::Info, None)
            }
        };

        Ok(Self {
            api_url,
            token_store,
            token_key,
            log_level,
            log_file,
        })
    }
}

fn expand_home(input: &str) -> String {
    match input.strip_prefix("~/") {
        Some(rest) => {
            let home = env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{}/{}", home, rest)
        },
        None => input.to_string()
    }
}

impl Config for Configuration {
    fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn token_store(&self) -> &str {
        &self.token_store
    }

    fn token_key(&self) -> &str {
        &self.token_key
    }

    fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    #[cfg(feature = "inspect")]
    fn dump(&self) {
        println!("config: {}", self);
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "apiUrl:{},", self.api_url())?;
        write!(f, "tokenStore:{},", self.token_store())?;
        write!(f, "tokenKey:{},", self.token_key())?;
        write!(f, "logLevel:{}", self.log_level())?;
        if let Some(file) = self.log_file() {
            write!(f, ",logFile:{}", file)?;
        }
        Ok(())
    }
}
