use corpus_domain::DISTILLED_CHUNK_NAME;
use corpus_storage::models::DatasetRecord;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Builder for record fixtures. Defaults produce an unconfirmed,
/// non-distilled record without a chain of thought, created at the epoch.
#[derive(Clone, Debug)]
pub struct RecordBuilder {
	record: DatasetRecord,
}
impl RecordBuilder {
	pub fn new(project_id: &str) -> Self {
		Self {
			record: DatasetRecord {
				record_id: Uuid::new_v4(),
				project_id: project_id.to_string(),
				question: "What is a monad?".to_string(),
				answer: "A monoid in the category of endofunctors.".to_string(),
				cot: None,
				question_label: String::new(),
				chunk_name: "chunk-1".to_string(),
				confirmed: false,
				created_at: OffsetDateTime::UNIX_EPOCH,
			},
		}
	}

	pub fn question(mut self, question: &str) -> Self {
		self.record.question = question.to_string();

		self
	}

	pub fn answer(mut self, answer: &str) -> Self {
		self.record.answer = answer.to_string();

		self
	}

	pub fn cot(mut self, cot: &str) -> Self {
		self.record.cot = Some(cot.to_string());

		self
	}

	pub fn label(mut self, label: &str) -> Self {
		self.record.question_label = label.to_string();

		self
	}

	pub fn chunk_name(mut self, chunk_name: &str) -> Self {
		self.record.chunk_name = chunk_name.to_string();

		self
	}

	pub fn distilled(mut self) -> Self {
		self.record.chunk_name = DISTILLED_CHUNK_NAME.to_string();

		self
	}

	pub fn confirmed(mut self, confirmed: bool) -> Self {
		self.record.confirmed = confirmed;

		self
	}

	pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
		self.record.created_at = created_at;

		self
	}

	/// Shorthand for `created_at(epoch + seconds)`; keeps creation-order
	/// fixtures readable.
	pub fn created_at_secs(mut self, seconds: i64) -> Self {
		self.record.created_at = OffsetDateTime::UNIX_EPOCH + Duration::seconds(seconds);

		self
	}

	pub fn build(self) -> DatasetRecord {
		self.record
	}
}
