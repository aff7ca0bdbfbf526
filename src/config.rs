use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} missing, it is required")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("DATABASE_URL is not a valid connection string: {0}")]
    DatabaseUrl(#[from] sqlx::Error),
}

/// Where todos are persisted.
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    Postgres(PgConnectOptions),
    InMemory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv().is_ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse(&lookup, "PORT")?.ok_or(ConfigError::Missing("PORT"))?;
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let max_connections = parse(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(5);

        Ok(Self {
            host,
            port,
            database: database_from(&lookup)?,
            max_connections,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

// DATABASE_URL wins over the discrete DB_* variables
fn database_from<F>(lookup: &F) -> Result<DatabaseConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
        let options: PgConnectOptions = url.parse()?;
        return Ok(DatabaseConfig::Postgres(options));
    }

    let Some(host) = lookup("DB_HOST") else {
        return Ok(DatabaseConfig::InMemory);
    };

    let mut options = PgConnectOptions::new()
        .host(&host)
        .port(parse(lookup, "DB_PORT")?.unwrap_or(5432));

    if let Some(user) = lookup("DB_USER") {
        options = options.username(&user);
    }
    if let Some(password) = lookup("DB_PASSWORD") {
        options = options.password(&password);
    }
    if let Some(database) = lookup("DB_NAME") {
        options = options.database(&database);
    }

    Ok(DatabaseConfig::Postgres(options))
}
