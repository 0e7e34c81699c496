use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use url::Url;

use super::mock::sample_summary;
use super::models::WrappedData;
use crate::config::{AppConfig, DataSourceKind};
use crate::{Error, Result};

/// Provider of the wrapped summary
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Short name for logs and the status line
    fn name(&self) -> &str;

    /// Fetch the summary
    async fn fetch(&self) -> Result<WrappedData>;
}

/// Built-in sample summary delivered after a simulated delay
pub struct MockSource {
    delay: Duration,
}

impl MockSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl DataSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<WrappedData> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(sample_summary())
    }
}

/// Summary read from a JSON file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DataSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<WrappedData> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::DataSource(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Summary fetched from a remote endpoint
pub struct HttpSource {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(endpoint: &str, token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }
}

#[async_trait::async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<WrappedData> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json");
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::DataSource(format!(
                "Failed to fetch data: HTTP {}",
                status
            )));
        }

        Ok(response.json::<WrappedData>().await?)
    }
}

/// Build the configured data source
pub fn from_config(app: &AppConfig, path_override: Option<PathBuf>) -> Result<Arc<dyn DataSource>> {
    if let Some(path) = path_override {
        return Ok(Arc::new(FileSource::new(path)));
    }

    let config = &app.data;
    match config.source {
        DataSourceKind::Mock => Ok(Arc::new(MockSource::new(Duration::from_millis(
            config.mock_delay_ms,
        )))),
        DataSourceKind::File => {
            let path = app
                .data_path()
                .ok_or_else(|| Error::Config("data.path is required for the file source".to_string()))?;
            Ok(Arc::new(FileSource::new(path)))
        }
        DataSourceKind::Http => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                Error::Config("data.endpoint is required for the http source".to_string())
            })?;
            Ok(Arc::new(HttpSource::new(
                endpoint,
                config.token.clone(),
                config.request_timeout_secs,
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_source_waits_for_delay() {
        let source = MockSource::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();
        let data = source.fetch().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(data.user.name, "Adebayo");
    }

    #[tokio::test]
    async fn test_file_source_round_trips_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.json");
        std::fs::write(&path, serde_json::to_string(&sample_summary()).unwrap()).unwrap();

        let data = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(data, sample_summary());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("missing.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DataSource(_)));
    }

    #[tokio::test]
    async fn test_file_source_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"user\": {}}").unwrap();
        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    fn config_with(source: DataSourceKind) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.source = source;
        config
    }

    #[test]
    fn test_from_config_requires_settings() {
        let config = config_with(DataSourceKind::Http);
        assert!(matches!(from_config(&config, None), Err(Error::Config(_))));

        let config = config_with(DataSourceKind::File);
        assert!(matches!(from_config(&config, None), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_config_mock_by_default() {
        let source = from_config(&AppConfig::default(), None).unwrap();
        assert_eq!(source.name(), "mock");
    }

    #[test]
    fn test_from_config_override_wins() {
        let config = config_with(DataSourceKind::Http);
        let source = from_config(&config, Some(PathBuf::from("summary.json"))).unwrap();
        assert_eq!(source.name(), "file");
    }

    #[test]
    fn test_http_source_rejects_bad_endpoint() {
        assert!(matches!(
            HttpSource::new("not a url", None, 5),
            Err(Error::UrlParse(_))
        ));
    }
}
