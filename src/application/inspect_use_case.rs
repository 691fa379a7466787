// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Loads a single dataset file in one mode and reports what the
// normaliser made of it: how many records were produced, how
// many were skipped, the label distribution and the first few
// examples. Handy for checking a new dump before a full run.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::data::normalizer::{DatasetNormalizer, LoadReport, NormalizerConfig};
use crate::domain::collection::SplitSummary;
use crate::domain::example::Example;

pub struct InspectRequest {
    pub dataset_dir: PathBuf,
    pub file:        String,
    pub mode:        String,
    pub encoding:    String,
    /// How many examples to return as a preview
    pub preview:     usize,
    pub normalizer:  NormalizerConfig,
}

#[derive(Debug, Clone)]
pub struct InspectResult {
    pub report:  LoadReport,
    pub summary: SplitSummary,
    pub preview: Vec<Example>,
}

pub struct InspectUseCase {
    request: InspectRequest,
}

impl InspectUseCase {
    pub fn new(request: InspectRequest) -> Self {
        Self { request }
    }

    pub fn execute(&self) -> Result<InspectResult> {
        let req = &self.request;
        let mut normalizer = DatasetNormalizer::new(req.normalizer);

        let report = normalizer
            .load(&req.dataset_dir, &req.mode, Some(req.file.as_str()), &req.encoding)
            .with_context(|| format!("Cannot inspect '{}'", req.file))?;

        if !report.found {
            bail!("'{}' does not exist", report.path.display());
        }

        let records = normalizer.collection().get(report.destination);
        Ok(InspectResult {
            summary: SplitSummary::of(records),
            preview: records.iter().take(req.preview).cloned().collect(),
            report,
        })
    }
}
