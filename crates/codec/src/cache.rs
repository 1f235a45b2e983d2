//! Field plan cache
//!
//! Plans are keyed by the record's `TypeId` and built at most once per cache.
//! Concurrent first requests for the same type race on a per-type
//! `OnceCell`: exactly one caller runs the reflector, the others block until
//! the result is published and then share it. Failures are cached as well,
//! so a bad shape is reported the same way on every call.
//!
//! A process-wide cache backs [`plan_for`]. Stores that need different
//! limits build their own [`PlanCache`].

use dashmap::DashMap;
use once_cell::sync::{Lazy, OnceCell};
use std::any::TypeId;
use std::sync::Arc;
use strata_core::Limits;
use tracing::trace;

use crate::error::PlanError;
use crate::plan::FieldPlan;
use crate::reflector::reflect;
use crate::shape::Record;

type PlanCell = Arc<OnceCell<Result<Arc<FieldPlan>, PlanError>>>;

/// Process-wide plan cache using default limits
static GLOBAL_PLANS: Lazy<Arc<PlanCache>> = Lazy::new(|| Arc::new(PlanCache::new()));

/// Plan for `R` from the process-wide cache
///
/// # Errors
///
/// Returns the (cached) [`PlanError`] if `R`'s shape is invalid.
pub fn plan_for<R: Record>() -> Result<Arc<FieldPlan>, PlanError> {
    GLOBAL_PLANS.plan_for::<R>()
}

/// Handle to the process-wide cache
pub fn shared() -> Arc<PlanCache> {
    Arc::clone(&GLOBAL_PLANS)
}

/// Concurrent cache of field plans keyed by record type
#[derive(Debug)]
pub struct PlanCache {
    limits: Limits,
    plans: DashMap<TypeId, PlanCell>,
}

impl PlanCache {
    /// Empty cache with default limits
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Empty cache validating shapes against `limits`
    pub fn with_limits(limits: Limits) -> Self {
        PlanCache {
            limits,
            plans: DashMap::new(),
        }
    }

    /// Limits applied when building plans
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Plan for `R`, building it on first use
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`PlanError`] if `R`'s shape is invalid.
    pub fn plan_for<R: Record>(&self) -> Result<Arc<FieldPlan>, PlanError> {
        // Clone the cell out so the shard lock is released before reflecting.
        let cell: PlanCell = self
            .plans
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();

        cell.get_or_init(|| reflect(&R::shape(), &self.limits).map(Arc::new))
            .clone()
    }

    /// Drop the cached plan for `R`; the next request rebuilds it
    ///
    /// Returns true if a plan (or cached failure) was present.
    pub fn invalidate<R: Record>(&self) -> bool {
        let removed = self.plans.remove(&TypeId::of::<R>()).is_some();
        trace!(
            record = std::any::type_name::<R>(),
            removed,
            "Invalidated field plan"
        );
        removed
    }

    /// Drop every cached plan
    pub fn clear(&self) {
        self.plans.clear();
    }

    /// Whether a plan for `R` has been requested
    pub fn contains<R: Record>(&self) -> bool {
        self.plans.contains_key(&TypeId::of::<R>())
    }

    /// Number of record types with a cache entry
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether no plan has been requested yet
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}
