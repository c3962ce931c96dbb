#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageKind {
    /// S3 compatible bucket, images are uploaded as public-read
    S3,
    /// Local folder, mostly for development
    Folder,
}

#[derive(Debug, clap::Parser)]
#[command(about = "Analyses recorded matches and publishes stats and heatmaps")]
pub struct Args {
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:9090")]
    pub listen: String,

    /// Where downloaded demos are stored while they are analysed
    #[arg(long, env = "WORK_DIR", default_value = "work/")]
    pub work_dir: std::path::PathBuf,

    /// Folder containing one `<map>.jpg` overview per map
    #[arg(long, env = "MAPS_DIR", default_value = "maps/")]
    pub maps_dir: std::path::PathBuf,

    /// Endpoint the match statistics are POSTed to
    #[arg(long, env = "STATS_ENDPOINT")]
    pub stats_endpoint: String,

    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 300)]
    pub http_timeout_secs: u64,

    #[arg(long, value_enum, env = "STORAGE", default_value = "s3")]
    pub storage: StorageKind,

    #[arg(long, env = "OUTPUT_DIR", default_value = "output/")]
    pub output_dir: std::path::PathBuf,

    #[arg(long, env = "S3_BUCKET")]
    pub s3_bucket: Option<String>,
    #[arg(long, env = "S3_REGION", default_value = "fra1")]
    pub s3_region: String,
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,
    #[arg(long, env = "S3_ACCESS_KEY")]
    pub s3_access_key: Option<String>,
    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    pub s3_secret_key: Option<String>,
}

impl Args {
    pub fn image_storage(&self) -> Result<Box<dyn crate::storage::ImageStorage>, crate::ConfigError> {
        match self.storage {
            StorageKind::Folder => Ok(Box::new(crate::storage::FolderStorage::new(&self.output_dir))),
            StorageKind::S3 => {
                let bucket = self.s3_bucket.as_deref().ok_or(crate::ConfigError::Missing("s3-bucket"))?;
                let endpoint = self
                    .s3_endpoint
                    .clone()
                    .ok_or(crate::ConfigError::Missing("s3-endpoint"))?;
                let access_key = self
                    .s3_access_key
                    .as_deref()
                    .ok_or(crate::ConfigError::Missing("s3-access-key"))?;
                let secret_key = self
                    .s3_secret_key
                    .as_deref()
                    .ok_or(crate::ConfigError::Missing("s3-secret-key"))?;

                let region = s3::region::Region::Custom {
                    region: self.s3_region.clone(),
                    endpoint,
                };
                let credentials =
                    s3::creds::Credentials::new(Some(access_key), Some(secret_key), None, None, None)?;

                Ok(Box::new(crate::storage::S3Storage::new(bucket, region, credentials)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn folder_storage_needs_no_credentials() {
        let args = Args::try_parse_from([
            "backend",
            "--stats-endpoint",
            "http://localhost:8080/stats",
            "--storage",
            "folder",
        ])
        .unwrap();

        assert_eq!(StorageKind::Folder, args.storage);
        assert_eq!("0.0.0.0:9090", args.listen);
        assert_eq!(300, args.http_timeout_secs);
        assert!(args.image_storage().is_ok());
    }

    #[test]
    fn s3_storage_requires_bucket() {
        let args = Args::try_parse_from([
            "backend",
            "--stats-endpoint",
            "http://localhost:8080/stats",
            "--storage",
            "s3",
        ])
        .unwrap();

        assert!(matches!(
            args.image_storage(),
            Err(crate::ConfigError::Missing("s3-bucket"))
        ));
    }
}
