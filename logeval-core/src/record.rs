//! Flat metric records handed to reporting layers

use std::collections::HashMap;

/// Metric names in canonical order
pub mod keys {
    /// Strict grouping accuracy
    pub const GA: &str = "GA";
    /// Strict pairwise precision
    pub const GA_PRECISION: &str = "GA_precision";
    /// Strict pairwise recall
    pub const GA_RECALL: &str = "GA_recall";
    /// Strict parsing accuracy
    pub const PA: &str = "PA";
    /// Grouping accuracy after collapsing pure clusters
    pub const GA_FRIENDLY: &str = "GA_friendly";
    /// Pairwise precision after collapsing pure clusters
    pub const GA_FRIENDLY_PRECISION: &str = "GA_friendly_precision";
    /// Pairwise recall after collapsing pure clusters
    pub const GA_FRIENDLY_RECALL: &str = "GA_friendly_recall";
    /// Parsing accuracy after collapsing pure clusters
    pub const PA_FRIENDLY: &str = "PA_friendly";
    /// Prediction purity
    pub const PRED_PURE: &str = "predPure";
    /// Ground-truth purity
    pub const GT_PURE: &str = "gtPure";
    /// Fraction of lines in pure predicted clusters
    pub const PURE_COVERAGE: &str = "pureCoverage";

    /// Every known key, in output order
    pub const ALL: [&str; 11] = [
        GA,
        GA_PRECISION,
        GA_RECALL,
        PA,
        GA_FRIENDLY,
        GA_FRIENDLY_PRECISION,
        GA_FRIENDLY_RECALL,
        PA_FRIENDLY,
        PRED_PURE,
        GT_PURE,
        PURE_COVERAGE,
    ];

    /// Alternative spellings accepted when importing foreign results
    pub(crate) const ALIASES: [(&str, &str); 2] = [("predPurity", PRED_PURE), ("gtPurity", GT_PURE)];

    /// Position of a key in [`ALL`]
    pub(crate) fn rank(key: &str) -> Option<usize> {
        ALL.iter().position(|k| *k == key)
    }

    /// Canonical spelling of a key or one of its aliases
    pub(crate) fn canonical(key: &str) -> Option<&'static str> {
        ALL.iter()
            .copied()
            .find(|k| *k == key)
            .or_else(|| ALIASES.iter().find(|(alias, _)| *alias == key).map(|(_, k)| *k))
    }
}

/// Metric name → value, always iterated in canonical key order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsRecord {
    entries: Vec<(&'static str, f64)>,
}

impl MetricsRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a metric, keeping canonical order. Unknown keys are ignored.
    pub fn insert(&mut self, key: &str, value: f64) {
        let Some(key) = keys::canonical(key) else {
            return;
        };
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => {
                self.entries.push((key, value));
                self.entries.sort_by_key(|(k, _)| keys::rank(k));
            }
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a metric
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Metric names present, in canonical order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// `(name, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of metrics present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record holds no metrics
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Import metrics produced by another tool
    ///
    /// Known keys and their aliases (`predPurity`, `gtPurity`) are kept;
    /// everything else is dropped. When both spellings are present the alias
    /// wins unless it is zero.
    pub fn from_external(values: &HashMap<String, f64>) -> Self {
        let mut record = Self::new();
        for key in keys::ALL {
            if let Some(value) = values.get(key) {
                record.insert(key, *value);
            }
        }
        for (alias, key) in keys::ALIASES {
            match values.get(alias) {
                Some(&value) if value != 0.0 || record.get(key).is_none() => {
                    record.insert(key, value)
                }
                _ => {}
            }
        }
        record
    }
}

impl<'a> IntoIterator for &'a MetricsRecord {
    type Item = (&'static str, f64);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (&'static str, f64)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MetricsRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MetricsRecord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = HashMap::<String, f64>::deserialize(deserializer)?;
        Ok(Self::from_external(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_canonical_order() {
        let record = MetricsRecord::new()
            .with(keys::PURE_COVERAGE, 0.5)
            .with(keys::PA, 0.4)
            .with(keys::GA, 0.6);

        let order: Vec<_> = record.keys().collect();
        assert_eq!(order, vec!["GA", "PA", "pureCoverage"]);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut record = MetricsRecord::new().with(keys::GA, 0.1);
        record.insert(keys::GA, 0.9);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("GA"), Some(0.9));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record = MetricsRecord::new().with("coverage", 0.3);
        assert!(record.is_empty());
        assert_eq!(record.get("coverage"), None);
    }

    #[test]
    fn test_from_external_resolves_aliases() {
        let mut values = HashMap::new();
        values.insert("GA".to_string(), 0.8);
        values.insert("predPurity".to_string(), 0.7);
        values.insert("gtPurity".to_string(), 0.6);
        values.insert("coverage".to_string(), 1.0);

        let record = MetricsRecord::from_external(&values);
        assert_eq!(record.len(), 3);
        assert_eq!(record.get(keys::PRED_PURE), Some(0.7));
        assert_eq!(record.get(keys::GT_PURE), Some(0.6));
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("GA", 0.8), ("predPure", 0.7), ("gtPure", 0.6)]
        );
    }

    #[test]
    fn test_alias_wins_over_canonical_spelling() {
        // Repeated so that any dependence on map iteration order shows up
        for _ in 0..100 {
            let values: HashMap<String, f64> = [
                ("predPure".to_string(), 0.1),
                ("predPurity".to_string(), 0.9),
                ("gtPure".to_string(), 0.4),
                ("gtPurity".to_string(), 0.0),
            ]
            .into_iter()
            .collect();

            let record = MetricsRecord::from_external(&values);
            assert_eq!(record.get(keys::PRED_PURE), Some(0.9));
            // a zero alias falls back to the canonical value
            assert_eq!(record.get(keys::GT_PURE), Some(0.4));
        }
    }

    #[test]
    fn test_zero_alias_alone_is_kept() {
        let values: HashMap<String, f64> = [("gtPurity".to_string(), 0.0)].into_iter().collect();
        let record = MetricsRecord::from_external(&values);
        assert_eq!(record.get(keys::GT_PURE), Some(0.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_as_ordered_map() {
        let record = MetricsRecord::new()
            .with(keys::PA, 0.5)
            .with(keys::GA, 1.0);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"GA":1.0,"PA":0.5}"#);

        let back: MetricsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
