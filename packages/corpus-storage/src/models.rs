use corpus_domain::RecordView;
use time::OffsetDateTime;
use uuid::Uuid;

/// One labeled training example. `created_at` is assigned at creation and
/// never mutated; together with `record_id` it defines the total order used
/// for pagination and navigation.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct DatasetRecord {
	pub record_id: Uuid,
	pub project_id: String,
	pub question: String,
	pub answer: String,
	pub cot: Option<String>,
	pub question_label: String,
	pub chunk_name: String,
	pub confirmed: bool,
	pub created_at: OffsetDateTime,
}
impl DatasetRecord {
	pub fn view(&self) -> RecordView<'_> {
		RecordView {
			project_id: &self.project_id,
			question: &self.question,
			answer: &self.answer,
			cot: self.cot.as_deref(),
			question_label: &self.question_label,
			chunk_name: &self.chunk_name,
			confirmed: self.confirmed,
			created_at: self.created_at,
		}
	}

	pub fn export(&self) -> ExportRecord {
		ExportRecord {
			question: self.question.clone(),
			answer: self.answer.clone(),
			cot: self.cot.clone(),
			question_label: self.question_label.clone(),
		}
	}
}

/// Projection returned by export and balanced sampling.
#[derive(Clone, Debug, Eq, PartialEq, sqlx::FromRow)]
pub struct ExportRecord {
	pub question: String,
	pub answer: String,
	pub cot: Option<String>,
	pub question_label: String,
}

/// Per-label aggregation row. Labels with zero matching records are never
/// produced.
#[derive(Clone, Debug, Eq, PartialEq, sqlx::FromRow)]
pub struct TagCount {
	pub tag_label: String,
	pub dataset_count: i64,
}
