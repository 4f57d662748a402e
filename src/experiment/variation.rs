//! Variation factors

use crate::provider::{create_value_provider, ValueProviderSpec};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of model mutation a factor performs; selects the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationKind {
    /// Iteration count of a loop action
    LoopIteration,
    /// Population of a closed workload
    ClosedWorkloadPopulation,
    /// Inter-arrival time of an open workload
    OpenWorkloadInterarrival,
    /// Processing rate of a processing resource
    ProcessingRate,
    /// Number of replicas of a resource container
    ResourceContainerReplication,
}

impl VariationKind {
    /// Every built-in kind.
    pub const ALL: [Self; 5] = [
        Self::LoopIteration,
        Self::ClosedWorkloadPopulation,
        Self::OpenWorkloadInterarrival,
        Self::ProcessingRate,
        Self::ResourceContainerReplication,
    ];

    /// Tag as written in experiment configuration files.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::LoopIteration => "loop_iteration",
            Self::ClosedWorkloadPopulation => "closed_workload_population",
            Self::OpenWorkloadInterarrival => "open_workload_interarrival",
            Self::ProcessingRate => "processing_rate",
            Self::ResourceContainerReplication => "resource_container_replication",
        }
    }
}

impl fmt::Display for VariationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Probe cap of a factor built with [`Variation::new`].
pub const DEFAULT_MAX_VARIATIONS: u64 = 1_000;

/// One independently varied factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Display and folder name, unique within the experiment
    pub name: String,
    /// Identifier of the varied element, resolved per combination
    pub varied_object_id: String,
    /// Mutation applied to the element
    pub kind: VariationKind,
    /// Candidate values by position
    pub value_provider: ValueProviderSpec,
    /// Smallest admissible value (smaller ones are skipped)
    pub min_value: i64,
    /// Largest admissible value (the first larger one ends the factor)
    pub max_value: i64,
    /// Number of provider positions probed at most
    pub max_variations: u64,
}

impl Variation {
    /// Create a factor admitting every value the provider yields within the
    /// first [`DEFAULT_MAX_VARIATIONS`] positions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        varied_object_id: impl Into<String>,
        kind: VariationKind,
        value_provider: ValueProviderSpec,
    ) -> Self {
        Self {
            name: name.into(),
            varied_object_id: varied_object_id.into(),
            kind,
            value_provider,
            min_value: i64::MIN,
            max_value: i64::MAX,
            max_variations: DEFAULT_MAX_VARIATIONS,
        }
    }

    /// Restrict admissible values to `min..=max`.
    #[must_use]
    pub const fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Probe at most `max_variations` provider positions.
    #[must_use]
    pub const fn with_max_variations(mut self, max_variations: u64) -> Self {
        self.max_variations = max_variations;
        self
    }

    /// Whether `value` lies in the admissible range.
    #[must_use]
    pub const fn admits(&self, value: i64) -> bool {
        value >= self.min_value && value <= self.max_value
    }

    /// Check the factor definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty name or target, an
    /// inverted range, or an unusable value provider.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Configuration(
                "variation with an empty name".to_string(),
            ));
        }
        if self.varied_object_id.trim().is_empty() {
            return Err(Error::Configuration(format!(
                "variation '{}' has no varied object id",
                self.name
            )));
        }
        if self.min_value > self.max_value {
            return Err(Error::Configuration(format!(
                "variation '{}' has min_value {} > max_value {}",
                self.name, self.min_value, self.max_value
            )));
        }
        create_value_provider(&self.value_provider).map_err(|e| {
            Error::Configuration(format!("variation '{}': {e}", self.name))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_roundtrip_serde() {
        for kind in VariationKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: std::result::Result<VariationKind, _> = serde_json::from_str("\"cpu_count\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_admits() {
        let v = Variation::new(
            "v",
            "x",
            VariationKind::LoopIteration,
            ValueProviderSpec::Set { values: vec![1] },
        )
        .with_range(2, 4);
        assert!(!v.admits(1));
        assert!(v.admits(2));
        assert!(v.admits(4));
        assert!(!v.admits(5));
    }

    #[test]
    fn test_max_variations_required_in_config() {
        let json = r#"{
            "name": "loops",
            "varied_object_id": "loop-1",
            "kind": "loop_iteration",
            "value_provider": {"type": "linear"},
            "min_value": 0,
            "max_value": 10
        }"#;
        let err = serde_json::from_str::<Variation>(json).unwrap_err();
        assert!(err.to_string().contains("max_variations"));
    }

    #[test]
    fn test_new_caps_probes() {
        let v = Variation::new(
            "loops",
            "loop-1",
            VariationKind::LoopIteration,
            ValueProviderSpec::Linear { start: 3, step: -1 },
        );
        assert_eq!(v.max_variations, DEFAULT_MAX_VARIATIONS);
    }

    #[test]
    fn test_invalid_provider() {
        let v = Variation::new(
            "v",
            "x",
            VariationKind::LoopIteration,
            ValueProviderSpec::Set { values: vec![] },
        );
        let err = v.validate().unwrap_err();
        assert!(err.to_string().contains("variation 'v'"));
    }
}
