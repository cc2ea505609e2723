//! Neighborhood topologies
//!
//! A topology picks, for each particle, the best-known position that the
//! social term of the velocity update pulls towards.

use crate::particle::Particle;

/// Which particles' bests influence a given particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Every particle follows the swarm-wide incumbent
    #[default]
    GlobalBest,
    /// Each particle follows the personal best of the particle currently
    /// closest to it (squared Euclidean distance, lowest index on ties)
    NearestBest,
}

impl Topology {
    /// Freeze the guides of every particle for the coming update step.
    ///
    /// The snapshot owns its data, so particles can move while it is read.
    pub fn neighborhood(&self, particles: &[Particle], swarm_best: Option<&[f64]>) -> Neighborhood {
        if particles.len() < 2 {
            return Neighborhood::Isolated;
        }
        match self {
            Topology::GlobalBest => match swarm_best {
                Some(best) => Neighborhood::Global(best.to_vec()),
                None => Neighborhood::Isolated,
            },
            Topology::NearestBest => Neighborhood::Nearest {
                bests: particles.iter().map(|p| p.best_position().to_vec()).collect(),
                neighbors: (0..particles.len())
                    .map(|i| nearest_neighbor(particles, i))
                    .collect(),
            },
        }
    }
}

/// Frozen per-iteration view of every particle's social guide.
#[derive(Debug, Clone, PartialEq)]
pub enum Neighborhood {
    /// No neighbor influence (single-particle swarm, or nothing evaluated yet)
    Isolated,
    /// The same incumbent for everyone
    Global(Vec<f64>),
    /// Personal bests plus, per particle, the index of its nearest neighbor
    Nearest {
        bests: Vec<Vec<f64>>,
        neighbors: Vec<Option<usize>>,
    },
}

impl Neighborhood {
    pub fn best_for(&self, index: usize) -> Option<&[f64]> {
        match self {
            Neighborhood::Isolated => None,
            Neighborhood::Global(best) => Some(best.as_slice()),
            Neighborhood::Nearest { bests, neighbors } => neighbors
                .get(index)
                .copied()
                .flatten()
                .map(|j| bests[j].as_slice()),
        }
    }
}

/// Index of the particle whose current position is closest to particle `index`.
///
/// Ties resolve to the lowest index. Costs `O(n * d)` per call.
pub fn nearest_neighbor(particles: &[Particle], index: usize) -> Option<usize> {
    let origin = particles[index].position();
    let mut nearest: Option<(usize, f64)> = None;
    for (j, other) in particles.iter().enumerate() {
        if j == index {
            continue;
        }
        let distance = squared_distance(origin, other.position());
        match nearest {
            Some((_, closest)) if distance >= closest => {}
            _ => nearest = Some((j, distance)),
        }
    }
    nearest.map(|(j, _)| j)
}

pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(position: &[f64], best: &[f64]) -> Particle {
        let mut p = Particle::new(position.to_vec(), vec![0.0; position.len()]);
        p.set_best_position(best);
        p
    }

    #[test]
    fn nearest_uses_current_positions_not_bests() {
        let particles = vec![
            at(&[0.0, 0.0], &[0.0, 0.0]),
            at(&[5.0, 5.0], &[0.1, 0.1]),
            at(&[1.0, 0.0], &[9.0, 9.0]),
        ];
        assert_eq!(nearest_neighbor(&particles, 0), Some(2));
        assert_eq!(
            Topology::NearestBest.neighborhood(&particles, None).best_for(0),
            Some(&[9.0, 9.0][..])
        );
    }

    #[test]
    fn nearest_ties_go_to_lowest_index() {
        let particles = vec![
            at(&[0.0], &[0.0]),
            at(&[1.0], &[1.0]),
            at(&[-1.0], &[-1.0]),
        ];
        assert_eq!(nearest_neighbor(&particles, 0), Some(1));
        // particle 1 sees 0 at distance 1 and 2 at distance 4
        assert_eq!(nearest_neighbor(&particles, 1), Some(0));
    }

    #[test]
    fn global_best_shares_incumbent() {
        let particles = vec![at(&[0.0], &[0.0]), at(&[1.0], &[1.0])];
        let incumbent = [0.5];
        let frozen = Topology::GlobalBest.neighborhood(&particles, Some(&incumbent));
        for i in 0..2 {
            assert_eq!(frozen.best_for(i), Some(&incumbent[..]));
        }
        assert_eq!(
            Topology::GlobalBest.neighborhood(&particles, None),
            Neighborhood::Isolated
        );
    }

    #[test]
    fn single_particle_has_no_neighbor_in_either_topology() {
        let particles = vec![at(&[3.0], &[2.0])];
        let incumbent = [2.0];
        for topology in [Topology::GlobalBest, Topology::NearestBest] {
            assert_eq!(
                topology.neighborhood(&particles, Some(&incumbent)),
                Neighborhood::Isolated
            );
        }
        assert_eq!(nearest_neighbor(&particles, 0), None);
    }

    #[test]
    fn nearest_snapshot_reads_each_neighbors_best() {
        let particles = vec![
            at(&[0.0, 0.0], &[1.0, 1.0]),
            at(&[3.0, 0.0], &[2.0, 2.0]),
            at(&[0.0, 2.0], &[3.0, 3.0]),
            at(&[3.0, 3.0], &[4.0, 4.0]),
        ];
        let frozen = Topology::NearestBest.neighborhood(&particles, Some(&[1.0, 1.0]));
        for i in 0..particles.len() {
            let j = nearest_neighbor(&particles, i).unwrap();
            assert_eq!(frozen.best_for(i), Some(particles[j].best_position()));
        }
        // 0 -> 2 at distance 4, 3 -> 1 at distance 9 (2 is at 10)
        assert_eq!(frozen.best_for(0), Some(&[3.0, 3.0][..]));
        assert_eq!(frozen.best_for(3), Some(&[2.0, 2.0][..]));
    }
}
