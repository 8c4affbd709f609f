use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use thiserror::Error as ThisError;
use tracing::info;

pub const HOST_ENV: &str = "RECIPE_BOOK_SERVER_HOST";
pub const PORT_ENV: &str = "RECIPE_BOOK_SERVER_PORT";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Config Error {0}")]
    Config(#[from] ConfigError),
    #[error("Port parse error: {0}")]
    ParsePort(String),
    #[error("Cannot resolve {0}")]
    Resolve(String, #[source] std::io::Error),
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HTTPConfig {
    pub host: String,
    pub port: u16,
}

impl HTTPConfig {
    pub fn connection_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let host_port = self.connection_string();
        host_port
            .to_socket_addrs()
            .map_err(|err| Error::Resolve(host_port.clone(), err))?
            .next()
            .ok_or_else(|| {
                Error::Resolve(
                    host_port.clone(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses"),
                )
            })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetsConfig {
    pub dist_dir: String,
    pub static_dir: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub http_config: HTTPConfig,
    pub assets_config: AssetsConfig,
}

impl AppConfig {
    pub fn load(path_str: &str) -> Result<Self, Error> {
        let mut conf = Config::default();
        conf.merge(File::new(path_str, FileFormat::Toml))?;
        Self::from_config(&conf, |key| std::env::var(key).ok())
    }

    /// Reads the `[http]` and `[assets]` tables, letting `env` override the
    /// listen address.
    fn from_config(conf: &Config, env: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut http_config = conf.get::<HTTPConfig>("http")?;
        if let Some(host) = env(HOST_ENV) {
            info!("getting server host from env: {host}");
            http_config.host = host;
        } else {
            info!("getting server host from file");
        }
        if let Some(port) = env(PORT_ENV) {
            info!("getting server port from env: {port}");
            http_config.port = port.parse::<u16>().map_err(|_| Error::ParsePort(port))?;
        }

        let assets_config = conf.get::<AssetsConfig>("assets")?;

        Ok(AppConfig {
            http_config,
            assets_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        [http]
        host = "127.0.0.1"
        port = 8081

        [assets]
        dist_dir = "dist"
        static_dir = "static"
    "#;

    fn parsed(toml: &str) -> Config {
        let mut conf = Config::default();
        conf.merge(File::from_str(toml, FileFormat::Toml)).unwrap();
        conf
    }

    #[test]
    fn reads_http_and_assets_tables() {
        let conf = AppConfig::from_config(&parsed(TOML), |_| None).unwrap();
        assert_eq!(
            conf,
            AppConfig {
                http_config: HTTPConfig {
                    host: "127.0.0.1".into(),
                    port: 8081,
                },
                assets_config: AssetsConfig {
                    dist_dir: "dist".into(),
                    static_dir: "static".into(),
                },
            }
        );
        assert_eq!(conf.http_config.connection_string(), "127.0.0.1:8081");
    }

    #[test]
    fn env_overrides_take_precedence() {
        let env = |key: &str| match key {
            HOST_ENV => Some("0.0.0.0".to_string()),
            PORT_ENV => Some("9000".to_string()),
            _ => None,
        };
        let conf = AppConfig::from_config(&parsed(TOML), env).unwrap();
        assert_eq!(conf.http_config.connection_string(), "0.0.0.0:9000");
        assert_eq!(conf.assets_config.dist_dir, "dist");
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let env = |key: &str| (key == PORT_ENV).then(|| "eighty".to_string());
        let err = AppConfig::from_config(&parsed(TOML), env).unwrap_err();
        assert!(matches!(err, Error::ParsePort(port) if port == "eighty"));
    }

    #[test]
    fn missing_assets_table_is_an_error() {
        let conf = parsed("[http]\nhost = \"127.0.0.1\"\nport = 8081\n");
        assert!(matches!(
            AppConfig::from_config(&conf, |_| None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn socket_addr_resolves_ip_hosts() {
        let http = HTTPConfig {
            host: "127.0.0.1".into(),
            port: 8081,
        };
        assert_eq!(http.socket_addr().unwrap(), "127.0.0.1:8081".parse().unwrap());
    }
}
