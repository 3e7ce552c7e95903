//! Importing metrics computed by other tools
//!
//! Accepts a bare JSON array of result objects, or a document holding them
//! under `datasets` (per-dataset evaluation reports) or `results` (the
//! layout `logeval batch` itself writes). Each result names its `dataset`
//! and optionally its `method`; metrics are read from a nested `metrics`
//! object when present, otherwise from the top-level numeric fields. Alias
//! keys such as `predPurity` are normalised on the way in, and a `coverage`
//! figure is carried along. Entries reporting an `error` are skipped.

use anyhow::{bail, Context, Result};
use glob::{glob, Pattern};
use logeval_core::{JobOutcome, MetricsRecord};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve `path` to a results file: a directory yields its newest `*.json`
/// by name, which matches timestamped file naming
pub fn resolve_results_file(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_dir() {
        return Ok(Some(path.to_path_buf()));
    }

    let pattern = format!("{}/*.json", Pattern::escape(&path.to_string_lossy()));
    let mut files: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Invalid glob pattern: {pattern}"))?
        .filter_map(|p| p.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files.pop())
}

/// Load external results, keeping only the listed datasets
pub fn load_external(
    path: &Path,
    default_method: &str,
    datasets: &[String],
) -> Result<Vec<JobOutcome>> {
    let Some(file) = resolve_results_file(path)? else {
        log::warn!("No results JSON found in {}", path.display());
        return Ok(Vec::new());
    };

    let text = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read results file: {}", file.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse results file: {}", file.display()))?;

    let outcomes = parse_external(&document, default_method)?
        .into_iter()
        .filter(|o| datasets.is_empty() || datasets.contains(&o.dataset))
        .collect::<Vec<_>>();
    log::info!(
        "Loaded {} external results from {}",
        outcomes.len(),
        file.display()
    );
    Ok(outcomes)
}

/// Convert a parsed results document into outcomes
pub fn parse_external(document: &Value, default_method: &str) -> Result<Vec<JobOutcome>> {
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(obj) => match ["datasets", "results"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_array))
        {
            Some(entries) => entries,
            None => bail!("results document has no 'datasets' or 'results' array"),
        },
        _ => bail!("results document must be an array or an object"),
    };

    let mut outcomes = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let obj = entry
            .as_object()
            .with_context(|| format!("result #{i} is not an object"))?;
        if let Some(outcome) =
            parse_entry(obj, default_method).with_context(|| format!("result #{i}"))?
        {
            outcomes.push(outcome);
        }
    }
    Ok(outcomes)
}

fn parse_entry(obj: &Map<String, Value>, default_method: &str) -> Result<Option<JobOutcome>> {
    let method = obj
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or(default_method);

    if let Some(error) = obj.get("error").filter(|e| !is_falsy(e)) {
        log::debug!("Skipping failed external result for {method}: {error}");
        return Ok(None);
    }

    let dataset = obj
        .get("dataset")
        .and_then(Value::as_str)
        .context("missing 'dataset'")?;

    let source = match obj.get("metrics") {
        Some(Value::Object(metrics)) => metrics,
        _ => obj,
    };
    let values: HashMap<String, f64> = source
        .iter()
        .filter_map(|(k, v)| v.as_f64().map(|f| (k.clone(), f)))
        .collect();

    let mut outcome = JobOutcome::ok(method, dataset, MetricsRecord::from_external(&values));
    let coverage = values
        .get("coverage")
        .copied()
        .or_else(|| obj.get("coverage").and_then(Value::as_f64));
    if let Some(coverage) = coverage {
        outcome = outcome.with_coverage(coverage);
    }
    Ok(Some(outcome))
}

/// `null`, `false` and `""` do not mark an entry as failed
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logeval_core::record::keys;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_flat_entries_with_aliases() {
        let document = json!([
            {"dataset": "HDFS", "GA": 0.9, "PA": 0.8, "predPurity": 0.7, "coverage": 1.0},
            {"method": "Mine", "dataset": "BGL", "gtPurity": 0.5}
        ]);

        let outcomes = parse_external(&document, "Ours").unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].method, "Ours");
        let first = outcomes[0].metrics().unwrap();
        assert_eq!(first.get(keys::PRED_PURE), Some(0.7));
        assert_eq!(first.len(), 3);
        assert_eq!(outcomes[1].method, "Mine");
        assert_eq!(outcomes[1].metrics().unwrap().get(keys::GT_PURE), Some(0.5));
    }

    #[test]
    fn test_own_run_document() {
        let document = json!({
            "generated_at": "2024-01-01T00-00-00-000000",
            "results": [
                {"method": "Drain", "dataset": "HDFS", "metrics": {"GA": 1.0}},
                {"method": "Drain", "dataset": "BGL", "error": "boom"}
            ]
        });

        let outcomes = parse_external(&document, "Ours").unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].dataset, "HDFS");
        assert_eq!(outcomes[0].metrics().unwrap().get(keys::GA), Some(1.0));
    }

    #[test]
    fn test_per_dataset_report_document() {
        let document = json!({
            "datasets": [
                {"dataset": "HDFS", "GA": 0.9, "predPurity": 0.8, "coverage": 0.95},
                {"dataset": "BGL", "error": "parser crashed"},
                {"dataset": "Mac", "GA": 0.4, "error": null}
            ]
        });

        let outcomes = parse_external(&document, "Ours").unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].method, "Ours");
        assert_eq!(outcomes[0].metrics().unwrap().get(keys::GA), Some(0.9));
        assert_eq!(outcomes[0].metrics().unwrap().get(keys::PRED_PURE), Some(0.8));
        assert_eq!(outcomes[0].coverage, Some(0.95));
        assert_eq!(outcomes[1].dataset, "Mac");
        assert_eq!(outcomes[1].coverage, None);
    }

    #[test]
    fn test_entry_without_dataset_rejected() {
        let err = parse_external(&json!([{"GA": 1.0}]), "Ours").unwrap_err();
        assert!(format!("{err:#}").contains("missing 'dataset'"));
    }

    #[test]
    fn test_non_array_rejected() {
        assert!(parse_external(&json!({"rows": []}), "Ours").is_err());
        assert!(parse_external(&json!(3), "Ours").is_err());
    }

    #[test]
    fn test_load_latest_file_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("2024-01-01.json"),
            r#"[{"dataset": "HDFS", "GA": 0.1}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("2024-02-01.json"),
            r#"[{"dataset": "HDFS", "GA": 0.2}, {"dataset": "Mac", "GA": 0.3}]"#,
        )
        .unwrap();

        let outcomes = load_external(dir.path(), "Ours", &["HDFS".to_string()]).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].metrics().unwrap().get(keys::GA), Some(0.2));
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(load_external(dir.path(), "Ours", &[]).unwrap().is_empty());
    }
}
