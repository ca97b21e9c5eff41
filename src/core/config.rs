use log::LevelFilter;
use url::Url;

pub trait Config: Send + Sync {
    /// Base url of the sales backend; resource paths are joined onto it.
    fn api_url(&self) -> &Url;

    fn token_store(&self) -> &str;
    fn token_key(&self) -> &str;

    fn log_level(&self) -> LevelFilter;
    fn log_file(&self) -> Option<&str>;

    #[cfg(feature = "inspect")]
    fn dump(&self);
}
