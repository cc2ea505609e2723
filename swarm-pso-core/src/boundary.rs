//! Boundary policies
//!
//! A policy decides where a particle lands when `position + velocity` would
//! leave `[lower, upper]`. Policies act on one dimension at a time and are
//! applied once per dimension per update.

use rand::Rng;

use crate::bounds::uniform_between;

/// Out-of-bounds resolution strategy, fixed at swarm construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Clip the stepped position to the wall; velocity is kept as computed.
    #[default]
    Clamp,
    /// Resample between the old position and the crossed wall, with a
    /// rebound velocity pointing back inside.
    Bounce,
}

impl BoundaryPolicy {
    /// Resolve one dimension: returns the bounded position and the velocity to keep.
    ///
    /// `position` must already lie in `[lower, upper]`. Only [`BoundaryPolicy::Bounce`]
    /// draws from `rng`, and only when the step crosses a wall.
    pub fn apply<R: Rng + ?Sized>(
        self,
        position: f64,
        velocity: f64,
        lower: f64,
        upper: f64,
        rng: &mut R,
    ) -> (f64, f64) {
        match self {
            BoundaryPolicy::Clamp => clamp(position, velocity, lower, upper),
            BoundaryPolicy::Bounce => bounce(position, velocity, lower, upper, rng),
        }
    }
}

/// Hard clamp. A velocity that still points outward keeps the particle
/// pinned to the wall until inertia and attraction turn it around.
pub fn clamp(position: f64, velocity: f64, lower: f64, upper: f64) -> (f64, f64) {
    ((position + velocity).max(lower).min(upper), velocity)
}

/// Stochastic bounce-back.
pub fn bounce<R: Rng + ?Sized>(
    position: f64,
    velocity: f64,
    lower: f64,
    upper: f64,
    rng: &mut R,
) -> (f64, f64) {
    let target = position + velocity;
    if target > upper {
        let landed = uniform_between(rng, position, upper);
        (landed, landed - upper)
    } else if target < lower {
        let landed = uniform_between(rng, lower, position);
        (landed, landed - lower)
    } else {
        (target, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn clamp_pins_to_wall_and_keeps_velocity() {
        assert_eq!(clamp(9.9, 0.5, -10.0, 10.0), (10.0, 0.5));
        assert_eq!(clamp(-9.0, -3.0, -10.0, 10.0), (-10.0, -3.0));
        assert_eq!(clamp(1.0, 2.0, -10.0, 10.0), (3.0, 2.0));
    }

    #[test]
    fn bounce_off_upper_wall_rebounds_inward() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let (position, velocity) = bounce(9.9, 0.5, -10.0, 10.0, &mut rng);
            assert!((9.9..=10.0).contains(&position));
            assert_eq!(velocity, position - 10.0);
            assert!(velocity <= 0.0);
        }
    }

    #[test]
    fn bounce_off_lower_wall_rebounds_inward() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            let (position, velocity) = bounce(-9.5, -2.0, -10.0, 10.0, &mut rng);
            assert!((-10.0..=-9.5).contains(&position));
            assert_eq!(velocity, position + 10.0);
            assert!(velocity >= 0.0);
        }
    }

    #[test]
    fn bounce_inside_is_a_plain_step() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(bounce(1.0, 0.25, -10.0, 10.0, &mut rng), (1.25, 0.25));
    }

    #[test]
    fn bounce_at_the_wall_stays_on_it() {
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(bounce(10.0, 1.0, -10.0, 10.0, &mut rng), (10.0, 0.0));
    }

    #[test]
    fn policy_dispatch() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            BoundaryPolicy::Clamp.apply(9.9, 0.5, -10.0, 10.0, &mut rng),
            (10.0, 0.5)
        );
        let (position, velocity) = BoundaryPolicy::Bounce.apply(9.9, 0.5, -10.0, 10.0, &mut rng);
        assert!(position <= 10.0 && velocity <= 0.0);
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::Clamp);
    }
}
