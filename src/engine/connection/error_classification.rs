//! Maps `Bollard` errors onto semantic `ContainerError` variants.
//!
//! Socket-level failures (missing socket, wrong permissions) are reported
//! with the socket path so callers can tell which engine endpoint was at
//! fault. Anything else becomes a message-only variant.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::ContainerError;

/// Extract the filesystem path from a socket URI.
///
/// Only `unix://` and `npipe://` URIs carry a path; HTTP endpoints yield
/// `None`.
pub(super) fn extract_socket_path(socket_uri: &str) -> Option<&Path> {
    socket_uri
        .strip_prefix("unix://")
        .or_else(|| socket_uri.strip_prefix("npipe://"))
        .map(Path::new)
}

/// Socket-level cause of a failure, when one can be identified.
fn socket_cause(kind: ErrorKind, socket_path: Option<&Path>) -> Option<ContainerError> {
    let path = socket_path?.to_path_buf();
    match kind {
        ErrorKind::PermissionDenied => Some(ContainerError::PermissionDenied { path }),
        ErrorKind::NotFound => Some(ContainerError::SocketNotFound { path }),
        _ => None,
    }
}

/// Find the socket-level cause of a `Bollard` error.
fn classify_socket_cause(
    bollard_error: &bollard::errors::Error,
    socket_path: Option<&Path>,
) -> Option<ContainerError> {
    match bollard_error {
        bollard::errors::Error::SocketNotFoundError(_) => {
            socket_path.map(|path| ContainerError::SocketNotFound {
                path: path.to_path_buf(),
            })
        }
        bollard::errors::Error::IOError { err } => {
            let kind = io_error_kind_in_chain(err).unwrap_or_else(|| err.kind());
            socket_cause(kind, socket_path)
        }
        _ => io_error_kind_in_chain(bollard_error)
            .and_then(|kind| socket_cause(kind, socket_path)),
    }
}

/// Classify an error raised while building a client.
pub(super) fn classify_connection_error(
    bollard_error: &bollard::errors::Error,
    socket_uri: &str,
) -> ContainerError {
    classify_socket_cause(bollard_error, extract_socket_path(socket_uri)).unwrap_or_else(|| {
        ContainerError::ConnectionFailed {
            message: bollard_error.to_string(),
        }
    })
}

/// Classify an error raised while pinging an already-built client.
///
/// Without a socket-level cause the failure is reported as a failed
/// health check.
pub(super) fn classify_ping_error(
    bollard_error: &bollard::errors::Error,
    socket_uri: &str,
) -> ContainerError {
    classify_socket_cause(bollard_error, extract_socket_path(socket_uri)).unwrap_or_else(|| {
        ContainerError::HealthCheckFailed {
            message: bollard_error.to_string(),
        }
    })
}

/// Walk the error source chain looking for an `io::Error` kind.
fn io_error_kind_in_chain(error: &dyn std::error::Error) -> Option<ErrorKind> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = error.source();
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            return Some(io_err.kind());
        }
        current = err.source();
    }
    None
}
