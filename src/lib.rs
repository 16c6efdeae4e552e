pub mod error;
pub mod image_sources;
pub mod reference;
pub mod types;

use std::os::raw::{c_double, c_int, c_longlong};

pub use error::CountError;
pub use image_sources::{
    count_reflections, count_reflections_by_order, count_reflections_parallel,
    try_count_reflections,
};
pub use reference::count_reflections_brute_force;
pub use types::{AcousticParameters, RoomGeometry};

/// C entry point for hosts loading the shared library directly (ctypes and friends).
///
/// Source at (0,0,0), receiver at (lx,ly,lz). Nothing is validated: a negative
/// order counts nothing, as does NaN anywhere in the inputs.
#[no_mangle]
pub extern "C" fn count_reflections_shoebox_test(
    order: c_int,
    lx: c_double,
    ly: c_double,
    lz: c_double,
    c: c_double,
    t60: c_double,
) -> c_longlong {
    let Ok(order) = u32::try_from(order) else {
        return 0;
    };
    let room = RoomGeometry::new(lx, ly, lz);
    let acoustics = AcousticParameters::new(c, t60);
    count_reflections(order, &room, &acoustics)
}

/// Room from a host-supplied `[Lx, Ly, Lz]` list.
pub fn room_from_dims(room_dims: &[f64]) -> Result<RoomGeometry, CountError> {
    match room_dims {
        [lx, ly, lz] => Ok(RoomGeometry::new(*lx, *ly, *lz)),
        _ => Err(CountError::RoomDimensions {
            len: room_dims.len(),
        }),
    }
}

#[cfg(feature = "python")]
mod python {
    use super::*;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    fn to_py_err(err: CountError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    /// Number of reflection paths up to `order` shorter than `c * t60`.
    #[pyfunction]
    #[pyo3(name = "count_reflections")]
    fn py_count_reflections(order: i64, room_dims: Vec<f64>, c: f64, t60: f64) -> PyResult<i64> {
        let room = room_from_dims(&room_dims).map_err(to_py_err)?;
        let acoustics = AcousticParameters::new(c, t60);
        try_count_reflections(order, &room, &acoustics).map_err(to_py_err)
    }

    #[pyfunction]
    #[pyo3(name = "count_reflections_by_order")]
    fn py_count_reflections_by_order(
        order: i64,
        room_dims: Vec<f64>,
        c: f64,
        t60: f64,
    ) -> PyResult<Vec<i64>> {
        let room = room_from_dims(&room_dims).map_err(to_py_err)?;
        let acoustics = AcousticParameters::new(c, t60);
        let order = image_sources::validate(order, &room, &acoustics).map_err(to_py_err)?;
        Ok(count_reflections_by_order(order, &room, &acoustics))
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    fn shoebox_reflections(_py: Python, m: &PyModule) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(py_count_reflections, m)?)?;
        m.add_function(wrap_pyfunction!(py_count_reflections_by_order, m)?)?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn setup() -> (Vec<f64>, f64, f64) {
            (vec![4.0, 4.0, 4.0], 343.0, 0.3)
        }

        #[test]
        fn counts_cube() {
            let (room_dims, c, t60) = setup();
            assert_eq!(py_count_reflections(3, room_dims.clone(), c, t60).ok(), Some(63));
            assert_eq!(
                py_count_reflections_by_order(3, room_dims, c, t60).ok(),
                Some(vec![1, 6, 18, 38])
            );
        }

        #[test]
        fn invalid_arguments_raise_value_error() {
            pyo3::prepare_freethreaded_python();
            let (room_dims, c, t60) = setup();
            Python::with_gil(|py| {
                let errors = [
                    py_count_reflections(-1, room_dims.clone(), c, t60).unwrap_err(),
                    py_count_reflections(3, vec![4.0, 4.0], c, t60).unwrap_err(),
                    py_count_reflections_by_order(3, room_dims.clone(), c, 0.0).unwrap_err(),
                ];
                for err in errors {
                    assert!(err.is_instance_of::<PyValueError>(py));
                }
            });
        }
    }
}
