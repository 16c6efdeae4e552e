use nalgebra::Vector3;

/// Axis-aligned box. The source sits at the origin, the receiver at the opposite corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomGeometry {
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
}

impl RoomGeometry {
    pub fn new(lx: f64, ly: f64, lz: f64) -> Self {
        RoomGeometry { lx, ly, lz }
    }

    pub fn squared(&self) -> [f64; 3] {
        [self.lx * self.lx, self.ly * self.ly, self.lz * self.lz]
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.lx, self.ly, self.lz)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcousticParameters {
    pub speed_of_sound: f64,
    pub t60: f64,
}

impl AcousticParameters {
    pub fn new(speed_of_sound: f64, t60: f64) -> Self {
        AcousticParameters {
            speed_of_sound,
            t60,
        }
    }

    /// Longest path sound travels before decaying by 60 dB.
    pub fn max_distance(&self) -> f64 {
        self.speed_of_sound * self.t60
    }

    pub fn max_distance_squared(&self) -> f64 {
        let max_distance = self.max_distance();
        max_distance * max_distance
    }
}

/// Even/odd reflection pattern along each axis. Components are 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParityVector {
    pub px: u8,
    pub py: u8,
    pub pz: u8,
}

impl ParityVector {
    /// The 8 sublattices, p_z varying fastest.
    pub fn all() -> [ParityVector; 8] {
        let mut classes = [ParityVector { px: 0, py: 0, pz: 0 }; 8];
        for (n, class) in classes.iter_mut().enumerate() {
            class.px = ((n >> 2) & 1) as u8;
            class.py = ((n >> 1) & 1) as u8;
            class.pz = (n & 1) as u8;
        }
        classes
    }
}

/// Signed reflection offsets. Wide integers so `t + p` can never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedTriple {
    pub i: i64,
    pub j: i64,
    pub k: i64,
}

impl SignedTriple {
    pub fn new(i: i64, j: i64, k: i64) -> Self {
        SignedTriple { i, j, k }
    }

    pub fn order(&self) -> i64 {
        self.i.abs() + self.j.abs() + self.k.abs()
    }

    /// Lattice index of the image source, or None when the triple does not
    /// belong to the given parity class.
    pub fn image_index(&self, parity: ParityVector) -> Option<ImageIndex> {
        let x = self.i + i64::from(parity.px);
        let y = self.j + i64::from(parity.py);
        let z = self.k + i64::from(parity.pz);
        if x % 2 != 0 || y % 2 != 0 || z % 2 != 0 {
            return None;
        }
        Some(ImageIndex {
            qx: x / 2,
            qy: y / 2,
            qz: z / 2,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageIndex {
    pub qx: i64,
    pub qy: i64,
    pub qz: i64,
}

impl ImageIndex {
    /// Squared source-receiver path length of this image, for a source at the
    /// origin and the receiver in the far corner. `squared` holds Lx², Ly², Lz².
    pub fn distance_squared(&self, squared: &[f64; 3]) -> f64 {
        let dx = 2.0 * self.qx as f64 - 1.0;
        let dy = 2.0 * self.qy as f64 - 1.0;
        let dz = 2.0 * self.qz as f64 - 1.0;
        squared[0] * dx * dx + squared[1] * dy * dy + squared[2] * dz * dz
    }
}
