use std::env;

/// Longest accepted session lifetime, one year
pub const MAX_SESSION_HOURS: i64 = 24 * 365;

#[derive(Clone, Debug)]
pub struct Config {
	pub server_host: String,
	pub port: u16,
	pub database_url: String,
	pub secret_key: String,
	pub session_hours: i64,
	pub admin_password: String,
}

impl Config {
	pub fn from_env() -> Result<Self, ConfigError> {
		// Load .env file if it exists
		let _ = dotenvy::dotenv();

		Ok(Self {
			server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
			port: env::var("PORT")
				.unwrap_or_else(|_| "5000".to_string())
				.parse()
				.map_err(|_| ConfigError::InvalidPort)?,
			database_url: env::var("DATABASE_URL")
				.unwrap_or_else(|_| "sqlite://ventes.db".to_string()),
			secret_key: env::var("SECRET_KEY")
				.unwrap_or_else(|_| "supersecretkey123".to_string()),
			session_hours: parse_session_hours(
				&env::var("SESSION_HOURS").unwrap_or_else(|_| "24".to_string()),
			)?,
			admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
		})
	}

	pub fn server_addr(&self) -> String {
		format!("{}:{}", self.server_host, self.port)
	}
}

fn parse_session_hours(raw: &str) -> Result<i64, ConfigError> {
	raw.trim()
		.parse::<i64>()
		.ok()
		.filter(|hours| (1..=MAX_SESSION_HOURS).contains(hours))
		.ok_or(ConfigError::InvalidSessionHours)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid port number")]
	InvalidPort,
	#[error("SESSION_HOURS must be a whole number between 1 and 8760")]
	InvalidSessionHours,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn session_hours_within_range() {
		assert_eq!(parse_session_hours("24").unwrap(), 24);
		assert_eq!(parse_session_hours(" 8760 ").unwrap(), MAX_SESSION_HOURS);
	}

	#[test]
	fn session_hours_out_of_range_are_rejected() {
		for raw in ["0", "-5", "8761", "9223372036854775807", "vingt"] {
			assert!(matches!(
				parse_session_hours(raw),
				Err(ConfigError::InvalidSessionHours)
			));
		}
	}
}
