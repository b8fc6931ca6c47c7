use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub public_dir: PathBuf,
    /// Include raw storage error text in 500 responses.
    pub expose_error_details: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = var("APP_PORT")
            .or_else(|| var("PORT"))
            .map(|v| v.parse::<u16>().with_context(|| format!("invalid port {v:?}")))
            .transpose()?
            .unwrap_or(8080);

        let url = match var("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&var)?,
        };
        let max_connections = var("DB_MAX_CONNECTIONS")
            .map(|v| {
                v.parse::<u32>()
                    .with_context(|| format!("invalid DB_MAX_CONNECTIONS {v:?}"))
            })
            .transpose()?
            .unwrap_or(5);

        let public_dir = var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));
        let expose_error_details = var("EXPOSE_ERROR_DETAILS")
            .map(|v| parse_flag(&v))
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            database: DatabaseConfig {
                url,
                max_connections,
            },
            public_dir,
            expose_error_details,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn database_url_from_parts<F>(var: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let server = var("DB_SERVER")
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL or DB_SERVER must be set"))?;
    let database = var("DB_DATABASE").ok_or_else(|| anyhow::anyhow!("DB_DATABASE must be set"))?;
    let port = var("DB_PORT").unwrap_or_else(|| "5432".into());

    let credentials = match (var("DB_USERNAME"), var("DB_PASSWORD")) {
        (Some(user), Some(password)) => format!("{user}:{password}@"),
        (Some(user), None) => format!("{user}@"),
        _ => String::new(),
    };
    Ok(format!("postgres://{credentials}{server}:{port}/{database}"))
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean flag {other:?}"),
    }
}
