use std::path::PathBuf;

use thiserror::Error;

/// Default I2C device node for the accelerometer.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/i2c-2";

/// 7-bit I2C slave address of the accelerometer.
pub const ACCELEROMETER_ADDR: u16 = 0x1d;

/// Power/control register and its power-on value (100 Hz, all axes).
pub const CTRL_REG: u8 = 0x20;
pub const CTRL_REG_POWER_ON: u8 = 0x57;

/// First axis-data register (X low byte).
pub const DATA_REG: u8 = 0x28;

/// Set on the register address to request auto-increment during burst reads.
pub const AUTO_INCREMENT: u8 = 0x80;

/// One raw accelerometer reading. The z axis is read off the bus but is
/// irrelevant for steering, so it is dropped at decode time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TiltSample {
    pub x: i16,
    pub y: i16,
}

/// Failures at the sensor seam. All of them are non-fatal to the game:
/// open/configure failures disable tilt input, read failures skip one
/// tick's sensor contribution.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("failed to open accelerometer at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },
    #[error("failed to configure accelerometer: {reason}")]
    ConfigFailed { reason: String },
    #[error("failed to read tilt sample: {reason}")]
    ReadFailed { reason: String },
}

/// Capability the engine needs from a motion sensor.
///
/// Anything that can produce tilt samples satisfies the engine's
/// dependency; tests substitute a scripted implementation.
pub trait TiltSensor {
    fn read_tilt(&mut self) -> Result<TiltSample, SensorError>;
}

/// Decodes a 6-byte burst read into a tilt sample.
///
/// Axis pairs are little-endian: X in bytes 0..2, Y in 2..4, Z in 4..6.
#[must_use]
pub fn decode_sample(raw: [u8; 6]) -> TiltSample {
    TiltSample {
        x: i16::from_le_bytes([raw[0], raw[1]]),
        y: i16::from_le_bytes([raw[2], raw[3]]),
    }
}

#[cfg(feature = "i2c")]
pub use self::i2c::I2cTiltSensor;

#[cfg(feature = "i2c")]
mod i2c {
    use std::path::Path;

    use i2cdev::core::I2CDevice;
    use i2cdev::linux::LinuxI2CDevice;

    use super::{
        ACCELEROMETER_ADDR, AUTO_INCREMENT, CTRL_REG, CTRL_REG_POWER_ON, DATA_REG, SensorError,
        TiltSample, TiltSensor, decode_sample,
    };

    /// Accelerometer on a Linux I2C character device.
    ///
    /// The bus handle closes exactly once when the sensor is dropped.
    pub struct I2cTiltSensor {
        device: LinuxI2CDevice,
    }

    impl I2cTiltSensor {
        /// Opens the device node and powers the sensor on.
        pub fn open(path: &Path) -> Result<Self, SensorError> {
            let mut device = LinuxI2CDevice::new(path, ACCELEROMETER_ADDR).map_err(|error| {
                SensorError::OpenFailed {
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                }
            })?;

            device
                .write(&[CTRL_REG, CTRL_REG_POWER_ON])
                .map_err(|error| SensorError::ConfigFailed {
                    reason: error.to_string(),
                })?;

            Ok(Self { device })
        }
    }

    impl TiltSensor for I2cTiltSensor {
        fn read_tilt(&mut self) -> Result<TiltSample, SensorError> {
            let read_failed = |error: <LinuxI2CDevice as I2CDevice>::Error| {
                SensorError::ReadFailed {
                    reason: error.to_string(),
                }
            };

            self.device
                .write(&[DATA_REG | AUTO_INCREMENT])
                .map_err(read_failed)?;

            let mut raw = [0u8; 6];
            self.device.read(&mut raw).map_err(read_failed)?;

            Ok(decode_sample(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TiltSample, decode_sample};

    #[test]
    fn decode_is_little_endian_per_axis() {
        // x = 0x1234, y = 0x0a0b, z bytes ignored.
        let sample = decode_sample([0x34, 0x12, 0x0b, 0x0a, 0xff, 0x7f]);

        assert_eq!(
            sample,
            TiltSample {
                x: 0x1234,
                y: 0x0a0b,
            }
        );
    }

    #[test]
    fn decode_preserves_sign() {
        // x = -1, y = -8500.
        let y = (-8500i16).to_le_bytes();
        let sample = decode_sample([0xff, 0xff, y[0], y[1], 0x00, 0x00]);

        assert_eq!(sample, TiltSample { x: -1, y: -8500 });
    }
}
