const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS dataset_records (
	record_id UUID PRIMARY KEY,
	project_id TEXT NOT NULL,
	question TEXT NOT NULL,
	answer TEXT NOT NULL,
	cot TEXT,
	question_label TEXT NOT NULL DEFAULT '',
	chunk_name TEXT NOT NULL DEFAULT '',
	confirmed BOOLEAN NOT NULL DEFAULT FALSE,
	created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_dataset_records_project_created
	ON dataset_records (project_id, created_at DESC, record_id DESC);

CREATE INDEX IF NOT EXISTS idx_dataset_records_project_label
	ON dataset_records (project_id, question_label);
";

pub fn render_schema() -> &'static str {
	SCHEMA
}
