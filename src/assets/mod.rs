//! Asset loading.
//!
//! Loading runs on a dedicated tokio runtime so the render loop never blocks
//! on I/O. [`spawn_clip_load`] is the bridge used for lazy animation
//! loading: it returns a channel the frame loop polls with `try_recv`, and
//! the playback controller consumes the result whenever it arrives.

pub mod io;
pub mod loaders;

pub use io::{AssetReader, AssetReaderVariant, FileAssetReader};
pub use loaders::gltf::GltfLoader;

use std::sync::OnceLock;

use tokio::runtime::Runtime;

use crate::animation::AnimationClip;
use crate::errors::Result;

/// Shared runtime for asset I/O.
pub fn asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("failed to create asset loader runtime"))
}

/// Starts an animation-set load in the background.
///
/// The returned receiver yields exactly one message. Dropping it cancels
/// nothing; the load simply completes unobserved.
pub fn spawn_clip_load(uri: String) -> flume::Receiver<Result<Vec<AnimationClip>>> {
    let (tx, rx) = flume::bounded(1);
    asset_runtime().spawn(async move {
        let result = GltfLoader::load_clips_async(&uri).await;
        // Receiver dropped means the session is shutting down
        let _ = tx.send(result);
    });
    rx
}
