pub mod api;
pub mod config;
pub mod db;

use config::Config;
use db::Store;

pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }
}
