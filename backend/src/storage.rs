use futures::FutureExt;

/// Where rendered heatmaps end up.
pub trait ImageStorage: Send + Sync {
    fn upload<'f, 'own>(
        &'own self,
        name: String,
        content: Vec<u8>,
        content_type: &'static str,
    ) -> futures::future::BoxFuture<'f, Result<(), String>>
    where
        'own: 'f;
}

pub struct FolderStorage {
    folder: std::path::PathBuf,
}

impl FolderStorage {
    pub fn new<P>(folder: P) -> Self
    where
        P: Into<std::path::PathBuf>,
    {
        Self {
            folder: folder.into(),
        }
    }
}

impl ImageStorage for FolderStorage {
    fn upload<'f, 'own>(
        &'own self,
        name: String,
        content: Vec<u8>,
        _content_type: &'static str,
    ) -> futures::future::BoxFuture<'f, Result<(), String>>
    where
        'own: 'f,
    {
        let path = self.folder.as_path();

        async move {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                tokio::fs::create_dir_all(path)
                    .await
                    .map_err(|e| format!("Creating {:?}: {}", path, e))?;
            }

            let file_path = path.join(&name);
            tokio::fs::write(&file_path, content)
                .await
                .map_err(|e| format!("Writing {:?}: {}", file_path, e))?;

            tracing::debug!("Stored {:?}", file_path);

            Ok(())
        }
        .boxed()
    }
}

pub struct S3Storage {
    bucket: Box<s3::Bucket>,
}

impl S3Storage {
    pub fn new(
        bucket_name: &str,
        region: s3::region::Region,
        credentials: s3::creds::Credentials,
    ) -> Result<Self, s3::error::S3Error> {
        let mut bucket = s3::bucket::Bucket::new(bucket_name, region, credentials)?;
        bucket.set_path_style();
        bucket.add_header("x-amz-acl", "public-read");

        Ok(Self { bucket })
    }
}

impl ImageStorage for S3Storage {
    fn upload<'f, 'own>(
        &'own self,
        name: String,
        content: Vec<u8>,
        content_type: &'static str,
    ) -> futures::future::BoxFuture<'f, Result<(), String>>
    where
        'own: 'f,
    {
        async move {
            let response = self
                .bucket
                .put_object_with_content_type(&name, &content, content_type)
                .await
                .map_err(|e| format!("Uploading to bucket: {:?}", e))?;

            match response.status_code() {
                200 => Ok(()),
                other => Err(format!("Bucket responded with {}", other)),
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn folder_storage_writes_file() {
        let folder = std::env::temp_dir().join(format!("storage-test-{}", std::process::id()));
        let storage = FolderStorage::new(&folder);

        storage
            .upload("1-me-kills.jpg".to_owned(), vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        let content = tokio::fs::read(folder.join("1-me-kills.jpg")).await.unwrap();
        assert_eq!(vec![1, 2, 3], content);

        tokio::fs::remove_dir_all(&folder).await.unwrap();
    }
}
