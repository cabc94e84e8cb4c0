use corpus_domain::{CreatedOrder, TriState};

use crate::{CorpusService, Error, RecordItem, Result};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct PageRequest {
	pub project_id: String,
	pub page: Option<u32>,
	pub page_size: Option<u32>,
	pub confirmed: Option<bool>,
	pub field: Option<String>,
	pub input: Option<String>,
	#[serde(default)]
	pub has_cot: TriState,
	#[serde(default)]
	pub is_distill: TriState,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct PageResponse {
	pub data: Vec<RecordItem>,
	pub total: i64,
	pub confirmed_count: i64,
}

impl CorpusService {
	/// One page of matching records, newest first, alongside the total
	/// matching count and the count of confirmed records under the same
	/// criteria. The three reads run concurrently against the store.
	pub async fn page_records(&self, req: PageRequest) -> Result<PageResponse> {
		let page = req.page.unwrap_or(1);
		let page_size = req.page_size.unwrap_or(self.cfg.retrieval.default_page_size);

		if page < 1 {
			return Err(Error::InvalidRequest { message: "Page must be at least 1.".into() });
		}
		if page_size < 1 {
			return Err(Error::InvalidRequest { message: "Page size must be at least 1.".into() });
		}
		if page_size > self.cfg.retrieval.max_page_size {
			return Err(Error::InvalidRequest {
				message: format!(
					"Page size must not exceed {}.",
					self.cfg.retrieval.max_page_size
				),
			});
		}

		let filter = self.criteria_filter(
			&req.project_id,
			req.confirmed,
			req.field.as_deref(),
			req.input.as_deref(),
			req.has_cot,
			req.is_distill,
		)?;
		// The confirmed count keeps every other criterion so the two
		// totals describe the same result set.
		let confirmed_filter = filter.clone().confirmed(Some(true));
		let skip = i64::from(page - 1) * i64::from(page_size);
		let (data, total, confirmed_count) = tokio::try_join!(
			self.store.find_many(&filter, CreatedOrder::Desc, Some(skip), Some(page_size.into())),
			self.store.count(&filter),
			self.store.count(&confirmed_filter),
		)
		.map_err(|e| {
			tracing::error!(project_id = %req.project_id, error = %e, "Failed to page records.");

			Error::from(e)
		})?;

		Ok(PageResponse {
			data: data.into_iter().map(RecordItem::from).collect(),
			total,
			confirmed_count,
		})
	}
}
