//! Error types for the coverage planner.

use std::fmt;

use thiserror::Error;

/// Which polygon of a planning request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonRef {
    Area,
    Obstacle(usize),
}

impl fmt::Display for PolygonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonRef::Area => write!(f, "area polygon"),
            PolygonRef::Obstacle(index) => write!(f, "obstacle polygon #{}", index),
        }
    }
}

/// What is wrong with a rejected polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryIssue {
    TooFewVertices(usize),
    ZeroArea,
    SelfIntersecting,
    NonFiniteCoordinate,
}

impl fmt::Display for GeometryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryIssue::TooFewVertices(n) => write!(f, "{} vertices, at least 3 required", n),
            GeometryIssue::ZeroArea => write!(f, "zero area"),
            GeometryIssue::SelfIntersecting => write!(f, "self-intersecting ring"),
            GeometryIssue::NonFiniteCoordinate => write!(f, "non-finite coordinate"),
        }
    }
}

/// Planner error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid geometry in {polygon}: {issue}")]
    InvalidGeometry {
        polygon: PolygonRef,
        issue: GeometryIssue,
    },

    #[error("invalid resolution {0}: must be a positive finite number")]
    InvalidResolution(f64),

    #[error("grid buffer holds {actual} cells, expected {expected}")]
    GridShapeMismatch { expected: usize, actual: usize },

    #[error("grid of {width}x{height} cells does not fit in memory")]
    GridTooLarge { width: usize, height: usize },

    #[error("no geometry available for area {0}")]
    UnknownArea(String),

    #[error("no sweep strategies configured")]
    NoStrategies,
}

pub type Result<T> = std::result::Result<T, PlannerError>;
