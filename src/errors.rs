//! Error Types
//!
//! The main error type [`ViewerError`] covers all failure modes of the
//! viewer: GPU initialization, window/event-loop errors, and asset loading.
//!
//! Asset errors carry the originating resource URI so that a failed load can
//! be reported without aborting the session. Animation-set load failures are
//! recoverable: the playback controller falls back to its unloaded state and
//! the next play request retries the load.

use thiserror::Error;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // GPU & Windowing
    // ========================================================================
    /// Failed to request a compatible GPU adapter or surface.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    /// Unrecoverable surface error (recoverable ones are handled in-frame).
    #[error("Surface error: {0}")]
    SurfaceError(String),

    // ========================================================================
    // Asset Loading
    // ========================================================================
    /// The static scene asset could not be fetched or parsed.
    ///
    /// Fatal to the session's visual content but not to the process; no
    /// animation loading is attempted while the scene is absent.
    #[error("Failed to load static scene '{uri}': {reason}")]
    StaticAssetLoad { uri: String, reason: String },

    /// The animation asset could not be fetched or parsed.
    ///
    /// Recoverable: the playback controller returns to its unloaded state
    /// and a later play request retries the load.
    #[error("Failed to load animation set '{uri}': {reason}")]
    AnimationAssetLoad { uri: String, reason: String },

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP request error.
    #[cfg(all(feature = "http", not(target_arch = "wasm32")))]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// HTTP response carried a non-success status code.
    #[error("HTTP response error: status {status} for '{uri}'")]
    HttpResponseError { uri: String, status: u16 },

    /// glTF parsing or decoding error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// Data URI decoding error.
    #[error("Data URI error: {0}")]
    DataUriError(String),

    /// Feature not enabled at compile time.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),
}

impl From<gltf::Error> for ViewerError {
    fn from(err: gltf::Error) -> Self {
        ViewerError::GltfError(err.to_string())
    }
}

impl From<base64::DecodeError> for ViewerError {
    fn from(err: base64::DecodeError) -> Self {
        ViewerError::DataUriError(err.to_string())
    }
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
