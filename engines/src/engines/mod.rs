//! Engine specs for supported analytic datastores
//!
//! An engine spec translates generic query primitives (time grains,
//! timestamp literals, epoch conversions) into one datastore's SQL syntax
//! and derives driver connection parameters from the database record.

mod druid;
mod spec;
mod types;

pub use druid::DruidEngineSpec;
pub use spec::{EngineSpec, TimeGrainTable, parse_extra};
pub use types::{DatabaseInfo, FeatureFlags, TableColumn, TemporalType};

use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Registry of engine specs keyed by engine identifier
///
/// Built once at process start, so construction-time inputs (feature flags)
/// are read then; query builders look specs up by identifier afterwards.
#[derive(Default)]
pub struct EngineRegistry {
    specs: FxHashMap<&'static str, Arc<dyn EngineSpec>>,
}

impl EngineRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with all built-in engine specs
    pub fn with_defaults(flags: &FeatureFlags) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DruidEngineSpec::new(flags)));
        registry
    }

    /// Register a spec under its engine identifier, replacing any previous one
    pub fn register(&mut self, spec: Arc<dyn EngineSpec>) {
        tracing::debug!(engine = spec.engine(), "Registered engine spec");
        self.specs.insert(spec.engine(), spec);
    }

    /// Look up a spec by engine identifier
    pub fn get(&self, engine: &str) -> Option<&dyn EngineSpec> {
        self.specs.get(engine).map(|spec| spec.as_ref())
    }

    /// Shared handle to a spec, for storing alongside a query plan
    pub fn get_arc(&self, engine: &str) -> Option<Arc<dyn EngineSpec>> {
        self.specs.get(engine).cloned()
    }

    /// Identifiers of all registered engines
    pub fn engines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }
}
