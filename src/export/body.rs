use axum::body::{Body, Bytes};
use futures::stream;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::PortagenError;
use crate::export::staging::StagingDir;

const CHUNK_SIZE: usize = 64 * 1024;

/// A response body streaming `path`, plus its length.
///
/// The body owns `staging`: the directory goes away when the stream ends,
/// fails, or is dropped because the client went away.
pub async fn staged_file_body(
    path: &Path,
    staging: StagingDir,
) -> Result<(Body, u64), PortagenError> {
    let file = File::open(path).await?;
    let len = file.metadata().await?.len();

    let chunks = stream::unfold(Some((file, staging)), |state| async move {
        let (mut file, staging) = state?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        match file.read(&mut buf).await {
            Ok(0) => None,
            Ok(n) => {
                buf.truncate(n);
                Some((Ok(Bytes::from(buf)), Some((file, staging))))
            }
            Err(e) => Some((Err::<Bytes, std::io::Error>(e), None)),
        }
    });

    Ok((Body::from_stream(chunks), len))
}
