//! Brute-force image source enumeration, used to check the counting routine.
//!
//! Scans the whole cube `[-order, order]³` of reflection offsets and places
//! every image source explicitly with the mirror formula
//! `x' = (1 - 2p) x_s + 2 q L`, so it shares no enumeration or parity code
//! with [`crate::image_sources`].
use crate::types::*;
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;

pub fn image_position(
    source: &Point3<f64>,
    dims: &Vector3<f64>,
    parity: ParityVector,
    index: ImageIndex,
) -> Point3<f64> {
    let mirror = |p: u8, s: f64| (1.0 - 2.0 * f64::from(p)) * s;
    Point3::new(
        mirror(parity.px, source.x) + 2.0 * index.qx as f64 * dims.x,
        mirror(parity.py, source.y) + 2.0 * index.qy as f64 * dims.y,
        mirror(parity.pz, source.z) + 2.0 * index.qz as f64 * dims.z,
    )
}

/// `q = (t + p) / 2` per axis, None unless every `t + p` is even.
fn lattice_index(offsets: [i64; 3], parity: ParityVector) -> Option<ImageIndex> {
    let parities = [parity.px, parity.py, parity.pz];
    let mut q = [0i64; 3];
    for axis in 0..3 {
        let shifted = offsets[axis] + i64::from(parities[axis]);
        if shifted.rem_euclid(2) == 1 {
            return None;
        }
        q[axis] = shifted.div_euclid(2);
    }
    Some(ImageIndex {
        qx: q[0],
        qy: q[1],
        qz: q[2],
    })
}

pub fn count_reflections_brute_force(
    order: u32,
    room: &RoomGeometry,
    acoustics: &AcousticParameters,
) -> i64 {
    let dims = room.as_vector();
    let source = Point3::origin();
    let receiver = Point3::from(dims);
    let max_distance_squared = acoustics.max_distance_squared();
    let n = i64::from(order);

    let mut images: HashSet<(ParityVector, ImageIndex)> = HashSet::new();
    for parity in ParityVector::all() {
        for i in -n..=n {
            for j in -n..=n {
                for k in -n..=n {
                    if i.abs() + j.abs() + k.abs() > n {
                        continue;
                    }
                    if let Some(index) = lattice_index([i, j, k], parity) {
                        let image = image_position(&source, &dims, parity, index);
                        if (image - receiver).norm_squared() < max_distance_squared {
                            images.insert((parity, index));
                        }
                    }
                }
            }
        }
    }
    images.len() as i64
}
