//! Integer property mutation, the shape shared by all built-in kinds

use super::VariationStrategy;
use crate::experiment::VariationKind;
use crate::model::{ElementHandle, ElementKind, ResolutionContext};
use crate::{Error, Result};

/// Writes a factor value into a 32-bit integer property of one element kind.
///
/// Values above `i32::MAX` are clamped to `i32::MAX` with a warning; values
/// below the kind's minimum are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntPropertyVariation {
    kind: VariationKind,
    label: &'static str,
    target_kind: ElementKind,
    property: &'static str,
    minimum: i32,
}

impl IntPropertyVariation {
    /// Strategy for a built-in kind.
    #[must_use]
    pub fn for_kind(kind: VariationKind) -> Self {
        let (label, target_kind, property, minimum) = match kind {
            VariationKind::LoopIteration => {
                ("Loop Iteration Count", ElementKind::Loop, "iterations", 0)
            }
            VariationKind::ClosedWorkloadPopulation => {
                ("Population", ElementKind::ClosedWorkload, "population", 1)
            }
            VariationKind::OpenWorkloadInterarrival => (
                "Interarrival Time",
                ElementKind::OpenWorkload,
                "interarrival_time",
                1,
            ),
            VariationKind::ProcessingRate => (
                "Processing Rate",
                ElementKind::ProcessingResource,
                "processing_rate",
                1,
            ),
            VariationKind::ResourceContainerReplication => (
                "Replication Count",
                ElementKind::ResourceContainer,
                "replicas",
                1,
            ),
        };
        Self {
            kind,
            label,
            target_kind,
            property,
            minimum,
        }
    }

    /// Semantic label used in descriptions.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Property written by this strategy.
    #[must_use]
    pub const fn property(&self) -> &'static str {
        self.property
    }

    fn coerce(&self, target: &str, value: i64) -> Result<i32> {
        let coerced = if value > i64::from(i32::MAX) {
            tracing::warn!(
                target_id = target,
                value,
                property = self.property,
                "Value exceeds i32::MAX, clamping"
            );
            i32::MAX
        } else {
            i32::try_from(value).unwrap_or(i32::MIN)
        };

        if coerced < self.minimum {
            return Err(Error::Application {
                target: target.to_string(),
                value,
                reason: format!("{} must be at least {}", self.property, self.minimum),
            });
        }
        Ok(coerced)
    }
}

impl VariationStrategy for IntPropertyVariation {
    fn kind(&self) -> VariationKind {
        self.kind
    }

    fn bind(&self, target: &str, ctx: &ResolutionContext) -> Result<ElementHandle> {
        let handle = ctx.locate(target).ok_or_else(|| Error::TargetResolution {
            target: target.to_string(),
            reason: "no element with this id in the loaded model".to_string(),
        })?;
        let element = ctx.element(&handle).ok_or_else(|| Error::TargetResolution {
            target: target.to_string(),
            reason: "stale element handle".to_string(),
        })?;
        if element.kind != self.target_kind {
            return Err(Error::TargetResolution {
                target: target.to_string(),
                reason: format!("expected a {}, found a {}", self.target_kind, element.kind),
            });
        }
        Ok(handle)
    }

    fn apply(
        &self,
        handle: &ElementHandle,
        ctx: &mut ResolutionContext,
        value: i64,
    ) -> Result<String> {
        let coerced = self.coerce(handle.id(), value)?;
        let element = ctx
            .element_mut(handle)
            .ok_or_else(|| Error::TargetResolution {
                target: handle.id().to_string(),
                reason: "handle does not belong to this resolution context".to_string(),
            })?;
        element
            .properties
            .insert(self.property.to_string(), coerced.to_string());

        Ok(format!("{} = {value}: {}", self.label, element.summary()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelDocument, ModelElement};

    fn ctx() -> ResolutionContext {
        let mut ctx = ResolutionContext::new();
        ctx.add_resource(
            "usage.json",
            ModelDocument::new(vec![
                ModelElement::new("loop-1", "Retry", ElementKind::Loop)
                    .with_property("iterations", "1"),
                ModelElement::new("users", "Users", ElementKind::ClosedWorkload),
            ]),
        )
        .unwrap();
        ctx
    }

    #[test]
    fn test_apply_loop_iteration() {
        let mut ctx = ctx();
        let strategy = IntPropertyVariation::for_kind(VariationKind::LoopIteration);
        let handle = strategy.bind("loop-1", &ctx).unwrap();

        let desc = strategy.apply(&handle, &mut ctx, 12).unwrap();

        assert_eq!(desc, "Loop Iteration Count = 12: loop[loop-1] 'Retry' {iterations=12}");
        assert_eq!(
            ctx.find_element("loop-1").unwrap().property("iterations"),
            Some("12")
        );
        assert_eq!(ctx.dirty_paths().len(), 1);
    }

    #[test]
    fn test_bind_missing_target() {
        let ctx = ctx();
        let strategy = IntPropertyVariation::for_kind(VariationKind::LoopIteration);
        let err = strategy.bind("loop-404", &ctx).unwrap_err();
        assert!(matches!(err, Error::TargetResolution { .. }));
    }

    #[test]
    fn test_bind_wrong_kind() {
        let ctx = ctx();
        let strategy = IntPropertyVariation::for_kind(VariationKind::ClosedWorkloadPopulation);
        let err = strategy.bind("loop-1", &ctx).unwrap_err();
        assert!(err.to_string().contains("expected a closed_workload, found a loop"));
    }

    #[test]
    fn test_clamps_above_i32_max() {
        let mut ctx = ctx();
        let strategy = IntPropertyVariation::for_kind(VariationKind::LoopIteration);
        let handle = strategy.bind("loop-1", &ctx).unwrap();

        let big = i64::from(i32::MAX) + 10;
        let desc = strategy.apply(&handle, &mut ctx, big).unwrap();

        assert!(desc.starts_with(&format!("Loop Iteration Count = {big}")));
        assert_eq!(
            ctx.find_element("loop-1").unwrap().property("iterations"),
            Some(i32::MAX.to_string().as_str())
        );
    }

    #[test]
    fn test_rejects_below_minimum() {
        let mut ctx = ctx();
        let strategy = IntPropertyVariation::for_kind(VariationKind::ClosedWorkloadPopulation);
        let handle = strategy.bind("users", &ctx).unwrap();

        let err = strategy.apply(&handle, &mut ctx, 0).unwrap_err();

        assert!(matches!(err, Error::Application { value: 0, .. }));
        // nothing written on failure
        assert!(ctx.dirty_paths().is_empty());
    }

    #[test]
    fn test_handle_from_other_context() {
        let ctx_a = ctx();
        let mut ctx_b = ResolutionContext::new();
        let strategy = IntPropertyVariation::for_kind(VariationKind::LoopIteration);
        let handle = strategy.bind("loop-1", &ctx_a).unwrap();

        let err = strategy.apply(&handle, &mut ctx_b, 3).unwrap_err();
        assert!(matches!(err, Error::TargetResolution { .. }));
    }
}
