use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub retrieval: Retrieval,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Retrieval {
	/// Page size applied when a pagination request omits `page_size`.
	#[serde(default = "default_page_size")]
	pub default_page_size: u32,
	/// Upper bound on a single page; requests above it are rejected.
	#[serde(default = "default_max_page_size")]
	pub max_page_size: u32,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self { default_page_size: default_page_size(), max_page_size: default_max_page_size() }
	}
}

fn default_page_size() -> u32 {
	10
}

fn default_max_page_size() -> u32 {
	1_000
}
