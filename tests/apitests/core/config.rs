use log::LevelFilter;
use salesdesk::{
    Config,
    configuration
};

/**
# default_configuration::Builder
 - new
 - with_api_url
 - with_token_store
 - with_token_key
 - with_logger
 - load
 - build

# trait Config
 - api_url
 - token_store
 - token_key
 - log_level
 - log_file
 */
#[test]
fn test_build_cfg() {
    let cfg: Box<dyn Config> = configuration::Builder::new()
        .with_api_url("https://crm.example.com")
        .with_token_store("tests/storage.json")
        .with_token_key("jwt")
        .with_logger(LevelFilter::Warn, Some("desk.log"))
        .build()
        .map_err(|_| assert!(false))
        .unwrap();

    #[cfg(feature = "inspect")]
    cfg.dump();

    assert_eq!(cfg.api_url().as_str(), "https://crm.example.com/");
    assert_eq!(cfg.token_store(), "tests/storage.json");
    assert_eq!(cfg.token_key(), "jwt");
    assert_eq!(cfg.log_level(), LevelFilter::Warn);
    assert_eq!(cfg.log_file(), Some("desk.log"));
}

#[test]
fn test_build_cfg_defaults() {
    let cfg = configuration::Builder::new()
        .with_api_url("http://localhost:8000/api")
        .build()
        .unwrap();

    assert_eq!(cfg.api_url().as_str(), "http://localhost:8000/api/");
    assert_eq!(cfg.token_key(), configuration::DEFAULT_TOKEN_KEY);
    assert!(cfg.token_store().ends_with(".salesdesk/storage.json"));
    assert_eq!(cfg.log_level(), LevelFilter::Info);
    assert_eq!(cfg.log_file(), None);
}

#[test]
fn test_build_cfg_missing_url() {
    assert!(configuration::Builder::new().build().is_err());
    assert!(configuration::Builder::new().with_api_url("not a url").build().is_err());
}

#[test]
fn test_load_cfg() {
    let path = crate::conf_path("apitests1.conf");
    let cfg = configuration::Builder::new()
        .load(&path)
        .map_err(|_| assert!(false))
        .unwrap()
        .build()
        .map_err(|_| assert!(false))
        .unwrap();

    assert_eq!(cfg.api_url().as_str(), "https://crm.example.com/api/");
    assert_eq!(cfg.token_store(), "apitests1_data/storage.json");
    assert_eq!(cfg.token_key(), "access_token");
    assert_eq!(cfg.log_level(), LevelFilter::Info);
    assert_eq!(cfg.log_file(), None);
}

#[test]
fn test_load_cfg_for_log() {
    let path = crate::conf_path("apitests2.conf");
    let cfg = configuration::Builder::new()
        .load(&path)
        .map_err(|e| {println!("{e}"); assert!(false)})
        .unwrap()
        .build()
        .map_err(|_| assert!(false))
        .unwrap();

    assert_eq!(cfg.api_url().as_str(), "http://127.0.0.1:8000/");
    assert_eq!(cfg.token_key(), "token");
    assert_eq!(cfg.log_level(), LevelFilter::Debug);
    assert_eq!(cfg.log_file(), Some("apitests2.log"));
}

#[test]
fn test_builder_overrides_file() {
    let path = crate::conf_path("apitests2.conf");
    let cfg = configuration::Builder::new()
        .load(&path)
        .unwrap()
        .with_api_url("https://override.example.com/v2/")
        .with_token_key("bearer")
        .build()
        .unwrap();

    assert_eq!(cfg.api_url().as_str(), "https://override.example.com/v2/");
    assert_eq!(cfg.token_key(), "bearer");
    assert_eq!(cfg.log_level(), LevelFilter::Debug);
}

#[test]
fn test_load_missing_or_bad() {
    assert!(configuration::Builder::new().load("no-such-file.conf").is_err());

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut tmp, b"{ apiUrl: ").unwrap();
    assert!(configuration::Builder::new().load(tmp.path().to_str().unwrap()).is_err());
}

#[test]
fn test_load_cfg_bad_log_level() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut tmp,
        br#"{ "apiUrl": "http://127.0.0.1:8000/", "logger": { "level": "verbose" } }"#
    ).unwrap();

    let mut builder = configuration::Builder::new();
    builder.load(tmp.path().to_str().unwrap()).unwrap();
    let result = builder.build();
    assert!(matches!(result, Err(salesdesk::Error::Argument(_))));

    // An explicit level from the builder is taken as is.
    let cfg = builder.with_logger(LevelFilter::Trace, None).build().unwrap();
    assert_eq!(cfg.log_level(), LevelFilter::Trace);
}
