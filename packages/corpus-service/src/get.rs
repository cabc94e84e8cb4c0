use uuid::Uuid;

use crate::{CorpusService, Error, RecordItem, Result};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct GetRecordRequest {
	pub record_id: Uuid,
}

impl CorpusService {
	pub async fn get_record(&self, req: GetRecordRequest) -> Result<RecordItem> {
		let record = self
			.store
			.find_by_id(req.record_id)
			.await
			.map_err(|e| {
				tracing::error!(record_id = %req.record_id, error = %e, "Failed to load record.");

				Error::from(e)
			})?
			.ok_or_else(|| Error::NotFound {
				message: format!("Record {} does not exist.", req.record_id),
			})?;

		Ok(record.into())
	}
}
