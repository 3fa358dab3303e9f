//! Engine configuration: which sources exist and how to read them.

use crate::domain::SourceId;
use crate::sources::{NormalizerRegistry, RecordNormalizer, SourceSchema, TimetableSchema};

/// Source mappings the engine is built with.
///
/// The normalizer order is the source priority order: the first registered
/// source wins deduplication ties.
pub struct EngineConfig {
    /// One normalizer per schedule source, highest priority first.
    pub normalizers: NormalizerRegistry,

    /// Field mapping for the timetable.
    pub timetable: TimetableSchema,
}

impl EngineConfig {
    /// Create a configuration from schema-driven sources.
    pub fn new(schemas: impl IntoIterator<Item = SourceSchema>, timetable: TimetableSchema) -> Self {
        Self {
            normalizers: NormalizerRegistry::from_schemas(schemas),
            timetable,
        }
    }

    /// Add a custom normalizer at the lowest priority.
    pub fn with_normalizer(mut self, normalizer: Box<dyn RecordNormalizer>) -> Self {
        self.normalizers.register(normalizer);
        self
    }

    /// Configured source ids, highest priority first.
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.normalizers.source_ids().cloned().collect()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(
            [SourceSchema::schedules(), SourceSchema::cleartrip()],
            TimetableSchema::default(),
        )
    }
}
