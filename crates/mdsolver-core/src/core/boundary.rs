//! Boundary conditions applied to positions, velocities and pair displacements.
//!
//! A [`BoundaryPolicy`] is a small immutable value. The integrators hand it the freshly
//! advanced positions and velocities, and the potential hands it every pair displacement
//! before measuring a distance. None of the operations look at particle identity.

use super::models::fields::{Positions, Velocities};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum BoundaryError {
    #[error("Box length must be finite and strictly positive (got {0})")]
    InvalidBoxLength(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryPolicy {
    /// No boundary: all three checks are the identity.
    #[default]
    Open,
    /// Hard walls at `0` and `box_length` along every axis.
    ///
    /// Only a single reflection per step is handled. A particle must never move more than
    /// one box length within one timestep; beyond that the result is unspecified.
    Reflective { box_length: f64 },
    /// Periodic images with the minimum-image convention for distances.
    ///
    /// Wrapped coordinates lie in `[0, box_length)` up to rounding: a coordinate a few ulps
    /// below zero wraps to exactly `box_length`.
    Periodic { box_length: f64 },
}

impl BoundaryPolicy {
    pub fn open() -> Self {
        Self::Open
    }

    pub fn reflective(box_length: f64) -> Result<Self, BoundaryError> {
        validate_box_length(box_length)?;
        Ok(Self::Reflective { box_length })
    }

    pub fn periodic(box_length: f64) -> Result<Self, BoundaryError> {
        validate_box_length(box_length)?;
        Ok(Self::Periodic { box_length })
    }

    pub fn box_length(&self) -> Option<f64> {
        match *self {
            Self::Open => None,
            Self::Reflective { box_length } | Self::Periodic { box_length } => Some(box_length),
        }
    }

    /// Maps freshly integrated positions back into the allowed region.
    pub fn check_position(&self, positions: &Positions) -> Positions {
        match *self {
            Self::Open => positions.clone(),
            Self::Reflective { box_length } => positions.map(|x| reflect(x, box_length)),
            Self::Periodic { box_length } => positions.map(|x| wrap(x, box_length)),
        }
    }

    /// Adjusts velocities after a position update.
    ///
    /// `raw_positions` are the positions of the same step *before* [`check_position`]
    /// was applied. Under reflective walls a velocity component is negated whenever the
    /// matching raw coordinate left `[0, box_length)`.
    ///
    /// [`check_position`]: BoundaryPolicy::check_position
    pub fn check_velocity(&self, velocities: Velocities, raw_positions: &Positions) -> Velocities {
        match *self {
            Self::Reflective { box_length } => {
                debug_assert_eq!(velocities.shape(), raw_positions.shape());
                let mut velocities = velocities;
                for (v, &x) in velocities.iter_mut().zip(raw_positions.iter()) {
                    if crossing_count(x, box_length) != 0.0 {
                        *v = -*v;
                    }
                }
                velocities
            }
            Self::Open | Self::Periodic { .. } => velocities,
        }
    }

    /// Corrects a single pair displacement in place.
    pub fn check_distance(&self, displacement: &mut [f64]) {
        if let Self::Periodic { box_length } = *self {
            for component in displacement.iter_mut() {
                *component = minimum_image(*component, box_length);
            }
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open boundaries"),
            Self::Reflective { box_length } => {
                write!(f, "Reflective boundaries with box length {}", box_length)
            }
            Self::Periodic { box_length } => {
                write!(f, "Periodic boundaries with box length {}", box_length)
            }
        }
    }
}

fn validate_box_length(box_length: f64) -> Result<(), BoundaryError> {
    if box_length.is_finite() && box_length > 0.0 {
        Ok(())
    } else {
        Err(BoundaryError::InvalidBoxLength(box_length))
    }
}

#[inline]
fn crossing_count(x: f64, box_length: f64) -> f64 {
    (x / box_length).floor()
}

#[inline]
fn reflect(x: f64, box_length: f64) -> f64 {
    let x = if x > box_length { 2.0 * box_length - x } else { x };
    if x < 0.0 { -x } else { x }
}

#[inline]
fn wrap(x: f64, box_length: f64) -> f64 {
    x - crossing_count(x, box_length) * box_length
}

#[inline]
fn minimum_image(dx: f64, box_length: f64) -> f64 {
    dx - (dx / box_length).round() * box_length
}
