pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod resource;
pub mod seed;
pub mod store;

pub use config::{AppConfig, CollectionIds};
pub use error::{SeedError, StoreError};

// Export query functions and sampling
pub use logic::{
    get_latest_properties, get_properties, get_property_by_id, random_subset, PropertyQuery,
};

// Export all model types
pub use model::*;

pub use resource::{AsyncResource, ResourceOptions, ResourceState, SettlePolicy};

// Export seed module
pub use seed::*;

// Export store types
pub use store::{DocumentStore, MemoryStore, RestStore};

/// Info by default, HTTP internals at Warn; `RUST_LOG` overrides both.
/// Fails if a global logger is already installed.
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .parse_default_env()
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_logger_init_is_reported() {
        let _ = init_logging();
        assert!(init_logging().is_err());
    }
}
