use std::sync::Arc;

use corpus_service::CorpusService;
use corpus_storage::{db::Db, queries::PgRecordStore, store::RecordStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CorpusService>,
}
impl AppState {
	pub async fn new(config: corpus_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::with_store(config, Arc::new(PgRecordStore::new(db))))
	}

	/// Assemble the state around an already-built store. Tests use this
	/// to serve the router from an in-memory backend.
	pub fn with_store(config: corpus_config::Config, store: Arc<dyn RecordStore>) -> Self {
		Self { service: Arc::new(CorpusService::new(config, store)) }
	}
}
