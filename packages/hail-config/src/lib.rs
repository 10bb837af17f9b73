mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Fetch, Matching, Service, Store};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	for (label, collection) in [
		("store.users_collection", &cfg.store.users_collection),
		("store.drivers_collection", &cfg.store.drivers_collection),
		("store.rides_collection", &cfg.store.rides_collection),
	] {
		if collection.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if let Some(deadline) = cfg.fetch.overall_deadline_ms
		&& deadline == 0
	{
		return Err(Error::Validation {
			message: "fetch.overall_deadline_ms must be greater than zero.".to_string(),
		});
	}

	if !cfg.matching.radius_km.is_finite() {
		return Err(Error::Validation {
			message: "matching.radius_km must be a finite number.".to_string(),
		});
	}
	if cfg.matching.radius_km <= 0.0 {
		return Err(Error::Validation {
			message: "matching.radius_km must be greater than zero.".to_string(),
		});
	}

	if let Some(max_results) = cfg.matching.max_results
		&& max_results == 0
	{
		return Err(Error::Validation {
			message: "matching.max_results must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
