// SPDX-License-Identifier: MPL-2.0
//! File-system adapter implementing the [`OriginalSource`] port trait.
//!
//! [`OriginalSource`]: crate::application::port::OriginalSource

use futures_util::FutureExt;

use crate::application::port::{BackendError, BackendFuture, OriginalSource};

/// Reads original images straight from disk with `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOriginalSource;

impl FsOriginalSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl OriginalSource for FsOriginalSource {
    fn read_original(&self, path: String) -> BackendFuture<Vec<u8>> {
        async move {
            tokio::fs::read(&path)
                .await
                .map_err(|err| BackendError::Io(format!("{path}: {err}")))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_whole_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("original.bin");
        std::fs::write(&path, [1u8, 2, 3, 4]).expect("failed to write file");

        let bytes = FsOriginalSource::new()
            .read_original(path.to_string_lossy().into_owned())
            .await
            .expect("read should succeed");
        assert_eq!(bytes, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error_naming_path() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("missing.png").to_string_lossy().into_owned();

        let err = FsOriginalSource::new()
            .read_original(path.clone())
            .await
            .unwrap_err();
        match err {
            BackendError::Io(message) => assert!(message.contains(&path)),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
