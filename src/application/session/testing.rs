// SPDX-License-Identifier: MPL-2.0
//! Recording backend for session tests.

use super::DEFAULT_THUMBNAIL_SIZE;
use crate::application::port::{BackendError, BackendFuture, BackendGateway, OriginalSource};
use crate::domain::crop::{CropResult, CropSettings};
use crate::domain::image::{EncodedImage, ImageInfo};
use futures_util::FutureExt;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// A preview render call as seen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderCall {
    pub path: String,
    pub settings: CropSettings,
    pub max_size: Option<u32>,
}

/// A batch crop call as seen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BatchCall {
    pub paths: Vec<String>,
    pub settings: CropSettings,
    pub output_dir: Option<PathBuf>,
}

type PreviewReply = oneshot::Sender<Result<EncodedImage, BackendError>>;

#[derive(Default)]
struct Recorded {
    describe_failures: HashSet<String>,
    thumbnail_failures: HashSet<String>,
    original_failures: HashSet<String>,
    preview_failure: Option<String>,
    gate_previews: bool,
    pending_previews: VecDeque<PreviewReply>,
    renders: Vec<RenderCall>,
    describes: Vec<String>,
    originals: Vec<String>,
    batches: Vec<BatchCall>,
    batch_response: Option<Result<Vec<CropResult>, BackendError>>,
    batch_gate: Option<oneshot::Receiver<()>>,
}

/// In-memory [`BackendGateway`] and [`OriginalSource`].
///
/// - describe returns 1280x720 png unless the path is marked failing
/// - previews encode `"<path>|<settings>"` as their bytes
/// - batch crop succeeds for every path unless a response is queued
#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    recorded: Arc<Mutex<Recorded>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Recorded) -> R) -> R {
        f(&mut self.recorded.lock().unwrap())
    }

    pub fn fail_describe(&self, path: &str) {
        self.with(|r| r.describe_failures.insert(path.to_string()));
    }

    pub fn fail_thumbnail(&self, path: &str) {
        self.with(|r| r.thumbnail_failures.insert(path.to_string()));
    }

    pub fn fail_original(&self, path: &str) {
        self.with(|r| r.original_failures.insert(path.to_string()));
    }

    pub fn fail_previews(&self, message: &str) {
        self.with(|r| r.preview_failure = Some(message.to_string()));
    }

    /// Lets preview renders succeed again after [`fail_previews`](Self::fail_previews).
    pub fn recover_previews(&self) {
        self.with(|r| r.preview_failure = None);
    }

    /// Holds every preview render until [`release_preview`](Self::release_preview).
    pub fn gate_previews(&self) {
        self.with(|r| r.gate_previews = true);
    }

    /// Resolves the oldest held preview render. Returns `false` if its
    /// caller has already gone away.
    pub fn release_preview(&self, bytes: &str) -> bool {
        let reply = self.with(|r| r.pending_previews.pop_front());
        match reply {
            Some(reply) => reply.send(Ok(encoded(bytes))).is_ok(),
            None => panic!("no preview render is pending"),
        }
    }

    pub fn pending_previews(&self) -> usize {
        self.with(|r| r.pending_previews.len())
    }

    pub fn respond_to_batch(&self, response: Result<Vec<CropResult>, BackendError>) {
        self.with(|r| r.batch_response = Some(response));
    }

    /// Holds the next batch call until the returned sender fires.
    pub fn gate_batch(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.with(|r| r.batch_gate = Some(gate));
        release
    }

    /// Every render request, thumbnails included.
    pub fn renders(&self) -> Vec<RenderCall> {
        self.with(|r| r.renders.clone())
    }

    /// Preview renders, excluding thumbnails.
    pub fn previews(&self) -> Vec<RenderCall> {
        self.with(|r| {
            r.renders
                .iter()
                .filter(|call| call.max_size != Some(DEFAULT_THUMBNAIL_SIZE))
                .cloned()
                .collect()
        })
    }

    pub fn describes(&self) -> Vec<String> {
        self.with(|r| r.describes.clone())
    }

    pub fn originals(&self) -> Vec<String> {
        self.with(|r| r.originals.clone())
    }

    pub fn batches(&self) -> Vec<BatchCall> {
        self.with(|r| r.batches.clone())
    }
}

pub(crate) fn encoded(bytes: &str) -> EncodedImage {
    EncodedImage::new("png", bytes.as_bytes().to_vec())
}

pub(crate) fn preview_text(image: &EncodedImage) -> String {
    String::from_utf8_lossy(image.bytes()).into_owned()
}

impl BackendGateway for MockBackend {
    fn describe_image(&self, path: String) -> BackendFuture<ImageInfo> {
        let failing = self.with(|r| {
            r.describes.push(path.clone());
            r.describe_failures.contains(&path)
        });
        async move {
            if failing {
                Err(BackendError::Decode(format!("cannot read {path}")))
            } else {
                Ok(ImageInfo::new(1280, 720, "png"))
            }
        }
        .boxed()
    }

    fn render_preview(
        &self,
        path: String,
        settings: CropSettings,
        max_size: Option<u32>,
    ) -> BackendFuture<EncodedImage> {
        let call = RenderCall {
            path: path.clone(),
            settings,
            max_size,
        };
        let (failure, gate) = self.with(|r| {
            r.renders.push(call);
            if max_size == Some(DEFAULT_THUMBNAIL_SIZE) {
                let failure = r
                    .thumbnail_failures
                    .contains(&path)
                    .then(|| format!("no thumbnail for {path}"));
                return (failure, None);
            }
            if let Some(message) = r.preview_failure.clone() {
                return (Some(message), None);
            }
            if r.gate_previews {
                let (reply, gate) = oneshot::channel();
                r.pending_previews.push_back(reply);
                return (None, Some(gate));
            }
            (None, None)
        });

        async move {
            if let Some(message) = failure {
                return Err(BackendError::Decode(message));
            }
            match gate {
                Some(gate) => gate
                    .await
                    .unwrap_or_else(|_| Err(BackendError::Task("gate dropped".to_string()))),
                None => Ok(encoded(&format!("{path}|{settings}"))),
            }
        }
        .boxed()
    }

    fn batch_crop(
        &self,
        paths: Vec<String>,
        settings: CropSettings,
        output_dir: Option<PathBuf>,
    ) -> BackendFuture<Vec<CropResult>> {
        let (response, gate) = self.with(|r| {
            r.batches.push(BatchCall {
                paths: paths.clone(),
                settings,
                output_dir,
            });
            (r.batch_response.take(), r.batch_gate.take())
        });

        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            response.unwrap_or_else(|| {
                Ok(paths
                    .iter()
                    .map(|path| CropResult::succeeded(path.clone(), format!("{path}.cropped")))
                    .collect())
            })
        }
        .boxed()
    }
}

impl OriginalSource for MockBackend {
    fn read_original(&self, path: String) -> BackendFuture<Vec<u8>> {
        let failing = self.with(|r| {
            r.originals.push(path.clone());
            r.original_failures.contains(&path)
        });
        async move {
            if failing {
                Err(BackendError::Io(format!("{path}: permission denied")))
            } else {
                Ok(path.into_bytes())
            }
        }
        .boxed()
    }
}
