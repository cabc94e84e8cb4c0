use corpus_domain::{CreatedOrder, RecordFilter};
use uuid::Uuid;

use crate::{CorpusService, Error, RecordItem, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	Prev,
	Next,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct NavigateRequest {
	pub project_id: String,
	pub record_id: Uuid,
	pub direction: Direction,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct NavigateResponse {
	pub record: Option<RecordItem>,
}

impl CorpusService {
	/// The adjacent record of the same project along the creation-time
	/// axis. `Prev` means created strictly later, `Next` strictly
	/// earlier, matching a newest-first listing. `None` at either
	/// boundary.
	pub async fn navigate_record(&self, req: NavigateRequest) -> Result<NavigateResponse> {
		let filter = RecordFilter::new(&req.project_id)?;
		let reference = self
			.store
			.find_by_id(req.record_id)
			.await
			.map_err(|e| {
				tracing::error!(record_id = %req.record_id, error = %e, "Failed to load navigation reference.");

				Error::from(e)
			})?
			.ok_or_else(|| Error::NotFound {
				message: format!("Record {} does not exist.", req.record_id),
			})?;
		let (filter, order) = match req.direction {
			Direction::Prev => (filter.created_after(reference.created_at), CreatedOrder::Asc),
			Direction::Next => (filter.created_before(reference.created_at), CreatedOrder::Desc),
		};
		let adjacent = self.store.find_first(&filter, order).await.map_err(|e| {
			tracing::error!(record_id = %req.record_id, error = %e, "Failed to find adjacent record.");

			Error::from(e)
		})?;

		Ok(NavigateResponse { record: adjacent.map(RecordItem::from) })
	}
}
