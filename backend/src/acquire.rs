//! Fetches the compressed demo of a match and unpacks it into the work folder.

use tokio::io::AsyncWriteExt;

#[tracing::instrument(skip(client, work_dir))]
pub async fn acquire(
    client: &reqwest::Client,
    url: &str,
    match_id: &str,
    work_dir: &std::path::Path,
) -> Result<std::path::PathBuf, crate::RunError> {
    if !tokio::fs::try_exists(work_dir).await.unwrap_or(false) {
        tokio::fs::create_dir_all(work_dir).await?;
    }

    let zipped_path = work_dir.join(format!("{}-demo.dem.gz", match_id));
    let demo_path = work_dir.join(format!("{}-demo.dem", match_id));

    let downloaded = match download(client, url, &zipped_path).await {
        Ok(d) => d,
        Err(e) => {
            discard(&zipped_path).await;
            return Err(crate::RunError::Acquire {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
    };
    tracing::info!("Downloaded {} bytes", downloaded);

    let unzipped = {
        let zipped_path = zipped_path.clone();
        let demo_path = demo_path.clone();
        tokio::task::spawn_blocking(move || gunzip(&zipped_path, &demo_path)).await
    };
    discard(&zipped_path).await;

    let unzipped = match unzipped {
        Ok(Ok(written)) => written,
        Ok(Err(e)) => {
            discard(&demo_path).await;
            return Err(crate::RunError::Acquire {
                url: url.to_string(),
                reason: format!("gunzip: {}", e),
            });
        }
        Err(e) => {
            discard(&demo_path).await;
            return Err(e.into());
        }
    };
    tracing::info!("Decompressed to {} bytes", unzipped);

    Ok(demo_path)
}

/// Removes a work file, a missing file is fine.
async fn discard(path: &std::path::Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Removing {:?}: {}", path, e),
    }
}

async fn download(
    client: &reqwest::Client,
    url: &str,
    path: &std::path::Path,
) -> Result<u64, crate::RunError> {
    let mut response = client.get(url).send().await?.error_for_status()?;

    let mut file = tokio::io::BufWriter::new(tokio::fs::File::create(path).await?);
    let mut written = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}

pub fn gunzip(src: &std::path::Path, dst: &std::path::Path) -> Result<u64, std::io::Error> {
    use std::io::Write;

    let mut reader = flate2::read::GzDecoder::new(std::io::BufReader::new(std::fs::File::open(src)?));
    let mut writer = std::io::BufWriter::new(std::fs::File::create(dst)?);

    let written = std::io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn gunzip_roundtrip() {
        let dir = std::env::temp_dir().join(format!("acquire-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let zipped = dir.join("1-demo.dem.gz");
        let unzipped = dir.join("1-demo.dem");

        let mut encoder = flate2::write::GzEncoder::new(
            std::fs::File::create(&zipped).unwrap(),
            flate2::Compression::default(),
        );
        encoder.write_all(b"{\"map\": \"de_dust2\"}\n").unwrap();
        encoder.finish().unwrap();

        let written = gunzip(&zipped, &unzipped).unwrap();

        assert_eq!(20, written);
        assert_eq!(
            "{\"map\": \"de_dust2\"}\n",
            std::fs::read_to_string(&unzipped).unwrap()
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    async fn serve(router: axum::Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        address
    }

    fn work_files(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn interrupted_download_leaves_nothing_behind() {
        let dir = std::env::temp_dir().join(format!("acquire-interrupted-{}", std::process::id()));
        let router = axum::Router::new().route(
            "/demo.dem.gz",
            axum::routing::get(|| async {
                let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
                    Ok(vec![0x1f, 0x8b, 0x08, 0x00]),
                    Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "connection lost")),
                ];
                axum::body::Body::from_stream(futures::stream::iter(chunks))
            }),
        );
        let address = serve(router).await;

        let result = acquire(
            &reqwest::Client::new(),
            &format!("http://{}/demo.dem.gz", address),
            "42",
            &dir,
        )
        .await;

        assert!(matches!(result, Err(crate::RunError::Acquire { .. })), "{:?}", result);
        assert_eq!(Vec::<String>::new(), work_files(&dir));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn failed_gunzip_leaves_nothing_behind() {
        let dir = std::env::temp_dir().join(format!("acquire-not-gzip-{}", std::process::id()));
        let router = axum::Router::new().route(
            "/demo.dem.gz",
            axum::routing::get(|| async { b"definitely not gzip".to_vec() }),
        );
        let address = serve(router).await;

        let result = acquire(
            &reqwest::Client::new(),
            &format!("http://{}/demo.dem.gz", address),
            "42",
            &dir,
        )
        .await;

        assert!(matches!(result, Err(crate::RunError::Acquire { .. })), "{:?}", result);
        assert_eq!(Vec::<String>::new(), work_files(&dir));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn gunzip_rejects_plain_files() {
        let dir = std::env::temp_dir().join(format!("acquire-plain-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let plain = dir.join("plain.dem.gz");
        std::fs::write(&plain, b"not gzip at all").unwrap();

        assert!(gunzip(&plain, &dir.join("plain.dem")).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
