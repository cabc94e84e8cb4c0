use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, Result};

/// Provenance marker carried by records produced by a distillation pass
/// instead of direct extraction from a source document.
pub const DISTILLED_CHUNK_NAME: &str = "Distilled Content";

/// Tri-state criterion: `All` imposes no constraint.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
	#[default]
	All,
	Yes,
	No,
}

/// Record field targeted by a substring search.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
	#[default]
	Question,
	Answer,
	Cot,
	QuestionLabel,
}
impl SearchField {
	/// Unrecognized names return `None`, which callers treat as
	/// "no search constraint" rather than an error.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"question" => Some(Self::Question),
			"answer" => Some(Self::Answer),
			"cot" => Some(Self::Cot),
			"questionLabel" | "question_label" => Some(Self::QuestionLabel),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CreatedOrder {
	Asc,
	Desc,
}

/// A chain-of-thought is "empty" when the column is NULL or the text is
/// blank. Every filter path uses this one rule.
pub fn cot_is_empty(cot: Option<&str>) -> bool {
	cot.is_none_or(|text| text.is_empty())
}

/// Conjunctive filter over records in one project. Every optional
/// criterion left at its default imposes no constraint.
#[derive(Clone, Debug)]
pub struct RecordFilter {
	project_id: String,
	confirmed: Option<bool>,
	search: Option<(SearchField, String)>,
	has_cot: TriState,
	is_distill: TriState,
	question_label: Option<String>,
	created_after: Option<OffsetDateTime>,
	created_before: Option<OffsetDateTime>,
}
impl RecordFilter {
	pub fn new(project_id: &str) -> Result<Self> {
		let project_id = project_id.trim();

		if project_id.is_empty() {
			return Err(Error::InvalidArgument("project_id must be non-empty.".to_string()));
		}

		Ok(Self {
			project_id: project_id.to_string(),
			confirmed: None,
			search: None,
			has_cot: TriState::All,
			is_distill: TriState::All,
			question_label: None,
			created_after: None,
			created_before: None,
		})
	}

	pub fn confirmed(mut self, confirmed: Option<bool>) -> Self {
		self.confirmed = confirmed;

		self
	}

	/// Empty input or an unrecognized field (`None`) leaves the filter
	/// unchanged.
	pub fn search(mut self, field: Option<SearchField>, input: &str) -> Self {
		if let Some(field) = field
			&& !input.is_empty()
		{
			self.search = Some((field, input.to_string()));
		}

		self
	}

	pub fn has_cot(mut self, has_cot: TriState) -> Self {
		self.has_cot = has_cot;

		self
	}

	pub fn is_distill(mut self, is_distill: TriState) -> Self {
		self.is_distill = is_distill;

		self
	}

	pub fn question_label(mut self, label: &str) -> Self {
		self.question_label = Some(label.to_string());

		self
	}

	pub fn created_after(mut self, bound: OffsetDateTime) -> Self {
		self.created_after = Some(bound);

		self
	}

	pub fn created_before(mut self, bound: OffsetDateTime) -> Self {
		self.created_before = Some(bound);

		self
	}

	pub fn project_id_value(&self) -> &str {
		&self.project_id
	}

	pub fn confirmed_value(&self) -> Option<bool> {
		self.confirmed
	}

	pub fn search_value(&self) -> Option<(SearchField, &str)> {
		self.search.as_ref().map(|(field, input)| (*field, input.as_str()))
	}

	pub fn has_cot_value(&self) -> TriState {
		self.has_cot
	}

	pub fn is_distill_value(&self) -> TriState {
		self.is_distill
	}

	pub fn question_label_value(&self) -> Option<&str> {
		self.question_label.as_deref()
	}

	pub fn created_after_value(&self) -> Option<OffsetDateTime> {
		self.created_after
	}

	pub fn created_before_value(&self) -> Option<OffsetDateTime> {
		self.created_before
	}

	/// Evaluate the filter against one record's fields. This is the
	/// reference semantics; the SQL compilation must agree with it.
	pub fn matches(&self, record: &RecordView<'_>) -> bool {
		if record.project_id != self.project_id {
			return false;
		}
		if let Some(confirmed) = self.confirmed
			&& record.confirmed != confirmed
		{
			return false;
		}
		if let Some((field, input)) = self.search_value() {
			let haystack = match field {
				SearchField::Question => record.question,
				SearchField::Answer => record.answer,
				SearchField::Cot => record.cot.unwrap_or(""),
				SearchField::QuestionLabel => record.question_label,
			};

			if !haystack.contains(input) {
				return false;
			}
		}
		match self.has_cot {
			TriState::All => {},
			TriState::Yes =>
				if cot_is_empty(record.cot) {
					return false;
				},
			TriState::No =>
				if !cot_is_empty(record.cot) {
					return false;
				},
		}
		match self.is_distill {
			TriState::All => {},
			TriState::Yes =>
				if record.chunk_name != DISTILLED_CHUNK_NAME {
					return false;
				},
			TriState::No =>
				if record.chunk_name == DISTILLED_CHUNK_NAME {
					return false;
				},
		}
		if let Some(label) = self.question_label.as_deref()
			&& record.question_label != label
		{
			return false;
		}
		if let Some(bound) = self.created_after
			&& record.created_at <= bound
		{
			return false;
		}
		if let Some(bound) = self.created_before
			&& record.created_at >= bound
		{
			return false;
		}

		true
	}
}

/// Borrowed view of the record fields a filter can constrain.
#[derive(Clone, Copy, Debug)]
pub struct RecordView<'a> {
	pub project_id: &'a str,
	pub question: &'a str,
	pub answer: &'a str,
	pub cot: Option<&'a str>,
	pub question_label: &'a str,
	pub chunk_name: &'a str,
	pub confirmed: bool,
	pub created_at: OffsetDateTime,
}
