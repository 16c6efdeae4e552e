use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CountError {
    #[error("invalid argument {name} = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("room_dims must hold exactly 3 values (Lx, Ly, Lz), got {len}")]
    RoomDimensions { len: usize },
}

pub fn check_positive(name: &'static str, value: f64) -> Result<(), CountError> {
    if !value.is_finite() {
        return Err(CountError::InvalidArgument {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(CountError::InvalidArgument {
            name,
            value,
            reason: "must be strictly positive",
        });
    }
    Ok(())
}
