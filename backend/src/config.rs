use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "words.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub dictionary: DictionaryConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub address: SocketAddr,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DictionaryConfig {
    pub path: PathBuf,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

pub fn read_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let bytes = std::fs::read(path)?;
    let contents = std::str::from_utf8(&bytes)?;
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
address = "127.0.0.1:8000"

[dictionary]
path = "dictionary.txt"

[logging]
directory = "./logs"
file_prefix = "words-server.log"
"#;

    #[test]
    fn test_parse() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.address, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.dictionary.path, PathBuf::from("dictionary.txt"));
        assert_eq!(config.logging.file_prefix, "words-server.log");
    }

    #[test]
    fn test_missing_section() {
        let result: Result<Config, _> = toml::from_str("[server]\naddress = \"127.0.0.1:8000\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_config_missing_file() {
        assert!(read_config("/definitely/not/here/words.toml").is_err());
    }
}
