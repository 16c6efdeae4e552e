use crate::error::{check_positive, CountError};
use crate::types::*;
use rayon::prelude::*;

/// Values precomputed once per call.
#[derive(Debug, Clone, Copy)]
struct Limits {
    squared: [f64; 3],
    max_distance_squared: f64,
}

impl Limits {
    fn new(room: &RoomGeometry, acoustics: &AcousticParameters) -> Self {
        Limits {
            squared: room.squared(),
            max_distance_squared: acoustics.max_distance_squared(),
        }
    }
}

/// Signed values a single reflection magnitude can take: {0} or {-m, +m}.
#[derive(Debug, Clone, Copy)]
struct SignChoices {
    values: [i64; 2],
    len: usize,
}

impl SignChoices {
    fn new(magnitude: i64) -> Self {
        if magnitude == 0 {
            SignChoices {
                values: [0, 0],
                len: 1,
            }
        } else {
            SignChoices {
                values: [-magnitude, magnitude],
                len: 2,
            }
        }
    }

    fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values[..self.len].iter().copied()
    }
}

/// Calls `visit(r)` once for every image source of the parity class whose
/// reflection order `r` is at most `order` and whose path is strictly shorter
/// than the maximum distance.
fn visit_parity_class<F>(order: u32, parity: ParityVector, limits: &Limits, mut visit: F)
where
    F: FnMut(u32),
{
    for ref_order in 0..=order {
        let r = i64::from(ref_order);
        for i_abs in 0..=r {
            for j_abs in 0..=(r - i_abs) {
                let k_abs = r - i_abs - j_abs;
                let k_choices = SignChoices::new(k_abs);
                for i in SignChoices::new(i_abs).iter() {
                    for j in SignChoices::new(j_abs).iter() {
                        for k in k_choices.iter() {
                            let Some(index) = SignedTriple::new(i, j, k).image_index(parity)
                            else {
                                continue;
                            };
                            if index.distance_squared(&limits.squared)
                                < limits.max_distance_squared
                            {
                                visit(ref_order);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn count_parity_class(order: u32, parity: ParityVector, limits: &Limits) -> i64 {
    let mut count: i64 = 0;
    visit_parity_class(order, parity, limits, |_| count += 1);
    count
}

/// Number of image sources up to `order` reflections whose path from source to
/// receiver is shorter than `c * T60`.
///
/// Never panics. Non-physical inputs give a numeric answer, NaN anywhere in the
/// acoustic parameters or room gives 0.
pub fn count_reflections(order: u32, room: &RoomGeometry, acoustics: &AcousticParameters) -> i64 {
    let limits = Limits::new(room, acoustics);
    ParityVector::all()
        .iter()
        .map(|parity| count_parity_class(order, *parity, &limits))
        .sum()
}

/// Same as [`count_reflections`], with the 8 parity classes counted on the rayon pool.
pub fn count_reflections_parallel(
    order: u32,
    room: &RoomGeometry,
    acoustics: &AcousticParameters,
) -> i64 {
    let limits = Limits::new(room, acoustics);
    ParityVector::all()
        .par_iter()
        .map(|parity| count_parity_class(order, *parity, &limits))
        .sum()
}

/// Admissible image sources per reflection order, index `r` for `0..=order`.
pub fn count_reflections_by_order(
    order: u32,
    room: &RoomGeometry,
    acoustics: &AcousticParameters,
) -> Vec<i64> {
    let limits = Limits::new(room, acoustics);
    let mut histogram = vec![0i64; order as usize + 1];
    for parity in ParityVector::all() {
        visit_parity_class(order, parity, &limits, |r| histogram[r as usize] += 1);
    }
    histogram
}

/// Highest order the validating entry points accept. Work grows with order³.
pub const MAX_ORDER: u32 = 10_000;

pub fn validate(
    order: i64,
    room: &RoomGeometry,
    acoustics: &AcousticParameters,
) -> Result<u32, CountError> {
    let order = match u32::try_from(order) {
        Ok(order) if order <= MAX_ORDER => order,
        _ => {
            return Err(CountError::InvalidArgument {
                name: "order",
                value: order as f64,
                reason: "must be between 0 and 10000",
            })
        }
    };
    check_positive("lx", room.lx)?;
    check_positive("ly", room.ly)?;
    check_positive("lz", room.lz)?;
    check_positive("c", acoustics.speed_of_sound)?;
    check_positive("t60", acoustics.t60)?;
    Ok(order)
}

/// Validating entry point: rejects an order outside `0..=MAX_ORDER` and non-positive or
/// non-finite dimensions, speed of sound or T60.
pub fn try_count_reflections(
    order: i64,
    room: &RoomGeometry,
    acoustics: &AcousticParameters,
) -> Result<i64, CountError> {
    let order = validate(order, room, acoustics)?;
    Ok(count_reflections(order, room, acoustics))
}
