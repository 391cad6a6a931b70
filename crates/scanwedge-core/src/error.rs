use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Device lifecycle errors
    #[error("Device unavailable: {path}: {reason}")]
    DeviceUnavailable { path: String, reason: String },

    #[error("Device disconnected: {path}")]
    DeviceDisconnected { path: String },

    // Wire-format errors
    #[error("Invalid frame: {message}")]
    InvalidFrame { message: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Open failed: permission denied, not found, or busy. Non-fatal;
    /// discovery skips the candidate and the hot-plug pass retries later.
    pub fn unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short or zero-length read after a successful open. Terminates the
    /// affected reader only.
    pub fn disconnected(path: impl Into<String>) -> Self {
        Self::DeviceDisconnected { path: path.into() }
    }

    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let error = Error::unavailable("/dev/hidraw0", "permission denied");
        assert!(matches!(error, Error::DeviceUnavailable { .. }));
        assert_eq!(
            error.to_string(),
            "Device unavailable: /dev/hidraw0: permission denied"
        );
    }

    #[test]
    fn test_disconnected_display() {
        let error = Error::disconnected("/dev/input/event3");
        assert_eq!(error.to_string(), "Device disconnected: /dev/input/event3");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: Error = io.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
