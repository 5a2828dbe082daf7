//! # Mechanics
//!
//! Projectile motion, free fall, Newton's second law and universal
//! gravitation. SI units throughout: metres, seconds, kilograms, newtons.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{to_exponential, to_fixed};

/// Standard gravity used by the projectile model (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Newtonian constant of gravitation (N·m²/kg²).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

// =============================================================================
// KINEMATICS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileInput {
    /// Launch speed (m/s)
    pub velocity: f64,
    /// Launch angle above horizontal (degrees)
    pub angle_deg: f64,
    /// Launch height above the landing plane (m)
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileResult {
    pub max_height: f64,
    pub time_to_max: f64,
    pub flight_time: f64,
    pub range: f64,
}

impl ProjectileInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.velocity < 0.0 {
            return Err(CalcError::invalid_input(
                "initial-velocity",
                self.velocity.to_string(),
                "Initial velocity must be non-negative",
            ));
        }
        if self.height < 0.0 {
            return Err(CalcError::invalid_input(
                "initial-height",
                self.height.to_string(),
                "Initial height must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Trajectory of a point mass launched over flat ground, no drag.
///
/// # Formulas
/// - v₀ₓ = v₀ cos θ, v₀ᵧ = v₀ sin θ
/// - t_max = v₀ᵧ / g
/// - H = h₀ + v₀ᵧ t_max − ½ g t_max²
/// - T = (v₀ᵧ + √(v₀ᵧ² + 2 g h₀)) / g
/// - R = v₀ₓ T
pub fn projectile(input: &ProjectileInput) -> CalcResult<ProjectileResult> {
    input.validate()?;
    let g = STANDARD_GRAVITY;
    let angle = input.angle_deg.to_radians();
    let vx = input.velocity * angle.cos();
    let vy = input.velocity * angle.sin();

    let time_to_max = vy / g;
    let max_height = input.height + vy * time_to_max - 0.5 * g * time_to_max * time_to_max;
    let disc = vy * vy + 2.0 * g * input.height;
    if disc < 0.0 {
        return Err(CalcError::out_of_range(
            "projectile",
            "Invalid combination: projectile cannot reach the ground with these parameters",
        ));
    }
    let flight_time = (vy + disc.sqrt()) / g;
    Ok(ProjectileResult {
        max_height,
        time_to_max,
        flight_time,
        range: vx * flight_time,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeFallResult {
    pub time: f64,
    pub impact_velocity: f64,
}

/// Drop from rest: t = √(2h/g), v = g·t.
pub fn free_fall(height: f64, gravity: f64) -> CalcResult<FreeFallResult> {
    if height < 0.0 || gravity <= 0.0 {
        return Err(CalcError::out_of_range("free-fall", "Invalid height or gravity"));
    }
    let time = (2.0 * height / gravity).sqrt();
    Ok(FreeFallResult {
        time,
        impact_velocity: gravity * time,
    })
}

// =============================================================================
// DYNAMICS
// =============================================================================

/// F = m·a
#[inline]
pub fn force(mass: f64, acceleration: f64) -> f64 {
    mass * acceleration
}

/// F = G·m₁·m₂ / r²
pub fn gravitational_force(mass1: f64, mass2: f64, distance: f64) -> CalcResult<f64> {
    if mass1 <= 0.0 || mass2 <= 0.0 || distance <= 0.0 {
        return Err(CalcError::out_of_range("gravity", "Values must be positive"));
    }
    Ok(GRAVITATIONAL_CONSTANT * mass1 * mass2 / (distance * distance))
}

/// Tiny forces in exponent form, everything else to ten places.
pub fn format_force(newtons: f64) -> String {
    if newtons < 0.01 {
        to_exponential(newtons, 4)
    } else {
        to_fixed(newtons, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projectile_from_ground() {
        let r = projectile(&ProjectileInput {
            velocity: 20.0,
            angle_deg: 45.0,
            height: 0.0,
        })
        .unwrap();
        // R = v² sin 2θ / g
        assert_relative_eq!(r.range, 400.0 / 9.81, max_relative = 1e-9);
        assert_relative_eq!(r.flight_time, 2.0 * r.time_to_max, max_relative = 1e-9);
        assert_relative_eq!(r.max_height, 100.0 / 9.81, max_relative = 1e-9);
    }

    #[test]
    fn test_projectile_from_height() {
        let r = projectile(&ProjectileInput {
            velocity: 0.0,
            angle_deg: 0.0,
            height: 19.62,
        })
        .unwrap();
        assert_relative_eq!(r.flight_time, 2.0, max_relative = 1e-9);
        assert_relative_eq!(r.range, 0.0);
    }

    #[test]
    fn test_projectile_validation() {
        let bad = ProjectileInput {
            velocity: -1.0,
            angle_deg: 30.0,
            height: 0.0,
        };
        assert_eq!(projectile(&bad).unwrap_err().user_message(), "Initial velocity must be non-negative");
        let bad = ProjectileInput {
            velocity: 1.0,
            angle_deg: 30.0,
            height: -2.0,
        };
        assert_eq!(projectile(&bad).unwrap_err().user_message(), "Initial height must be non-negative");
    }

    #[test]
    fn test_free_fall() {
        let r = free_fall(19.62, 9.81).unwrap();
        assert_relative_eq!(r.time, 2.0, max_relative = 1e-12);
        assert_relative_eq!(r.impact_velocity, 19.62, max_relative = 1e-12);
        assert!(free_fall(10.0, 0.0).is_err());
        assert!(free_fall(-1.0, 9.81).is_err());
    }

    #[test]
    fn test_gravitation() {
        let f = gravitational_force(5.972e24, 70.0, 6.371e6).unwrap();
        assert_relative_eq!(f, 687.0, max_relative = 0.01);
        assert_eq!(format_force(f), to_fixed(f, 10));
        assert_eq!(format_force(gravitational_force(1.0, 1.0, 1.0).unwrap()), "6.6743e-11");
        assert_eq!(gravitational_force(1.0, 0.0, 1.0).unwrap_err().user_message(), "Values must be positive");
        assert_relative_eq!(force(10.0, 9.81), 98.1);
    }
}
