use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Default schedule window length in days when none is given.
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: i64,
}

fn default_database_path() -> String {
    "rota.db".to_string()
}

fn default_lookahead_days() -> i64 {
    14
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            lookahead_days: default_lookahead_days(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("ROTA_"))
            .extract()
    }
}
