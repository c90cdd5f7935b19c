use super::config::{ChainConfig, validate};
use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::models::point::Point;
use std::collections::HashSet;

/// Shared, read-only inputs of every engine task.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub points: &'a [Point],
    pub config: &'a ChainConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> Context<'a> {
    /// Creates a context after checking that point ids are unique and that
    /// the configuration values are in range.
    pub fn new(
        points: &'a [Point],
        config: &'a ChainConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Result<Self, EngineError> {
        validate(config)?;
        ensure_unique_ids(points)?;
        Ok(Self {
            points,
            config,
            reporter,
        })
    }
}

pub(crate) fn ensure_unique_ids(points: &[Point]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(point.id()) {
            return Err(EngineError::DuplicatePointId(point.id()));
        }
    }
    Ok(())
}
