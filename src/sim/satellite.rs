//! Satellite entities and their placement in the room

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BASE_CLEARANCE, PLACEMENT_MARGIN};
use crate::settings::RoomBounds;

/// Attempts before accepting a sample that sits close to the base
const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

/// A retrievable satellite
///
/// `index` is its position in the delivery order and never changes.
/// `position` is where the host should spawn it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatelliteEntity {
    pub index: usize,
    pub position: Vec3,
}

/// Seed for one generation of a level's satellites
///
/// Mixes the run seed, the tier and the reset epoch so every reset gets a
/// fresh but reproducible layout.
pub fn placement_seed(run_seed: u64, tier: usize, epoch: u32) -> u64 {
    let mut x = run_seed ^ ((tier as u64) << 32) ^ u64::from(epoch);
    // splitmix64 finalizer
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Generate `count` satellites, indices `0..count`, inside the room
pub fn generate_satellites(count: usize, room: &RoomBounds, seed: u64) -> Vec<SatelliteEntity> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let min = room.inner_min(PLACEMENT_MARGIN);
    let max = room.inner_max(PLACEMENT_MARGIN);

    (0..count)
        .map(|index| SatelliteEntity {
            index,
            position: sample_position(&mut rng, min, max),
        })
        .collect()
}

fn sample_position(rng: &mut Pcg32, min: Vec3, max: Vec3) -> Vec3 {
    let mut pos = Vec3::ZERO;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        pos = Vec3::new(
            rng.random_range(min.x..max.x),
            rng.random_range(min.y..max.y),
            rng.random_range(min.z..max.z),
        );
        if pos.length() >= BASE_CLEARANCE {
            break;
        }
    }
    pos
}
