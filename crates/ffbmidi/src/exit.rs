use std::fmt;
use std::io;

use ffbmidi_frame::FrameError;
use ffbmidi_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        io::ErrorKind::BrokenPipe | io::ErrorKind::WriteZero => TRANSPORT_ERROR,
        _ => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn serial_error(context: &str, err: serialport::Error) -> CliError {
    match err.kind() {
        serialport::ErrorKind::Io(kind) => io_error(context, io::Error::new(kind, err)),
        serialport::ErrorKind::NoDevice | serialport::ErrorKind::InvalidInput => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        _ => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
    }
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Open { source, path } => {
            serial_error(&format!("{context}: {}", path.display()), source)
        }
        TransportError::Io(source) => io_error(context, source),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::TransportFailure(err) => transport_error(context, err),
        FrameError::InvalidEffectType(_) | FrameError::ValueOutOfRange { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn json_error(context: &str, err: serde_json::Error) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_effect_type_is_data_invalid() {
        let err = frame_error("effect", FrameError::InvalidEffectType(0x42.into()));
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("effect: "));
    }

    #[test]
    fn closed_link_is_transport_error() {
        let err = frame_error(
            "send",
            FrameError::TransportFailure(TransportError::Closed),
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
    }

    #[test]
    fn open_failure_maps_io_kind() {
        let err = transport_error(
            "open",
            TransportError::Open {
                path: "/dev/ttyS9".into(),
                source: serialport::Error::new(
                    serialport::ErrorKind::Io(io::ErrorKind::PermissionDenied),
                    "Permission denied",
                ),
            },
        );
        assert_eq!(err.code, PERMISSION_DENIED);
        assert!(err.message.contains("/dev/ttyS9"));
    }

    #[test]
    fn missing_serial_device_is_usage() {
        let err = serial_error(
            "open port",
            serialport::Error::new(serialport::ErrorKind::NoDevice, "no such device"),
        );
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("no such device"));
    }
}
