use serde::Deserialize;

/// Main configuration structure for magpie
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Total fetch attempts per page, including the first
    #[serde(rename = "retry-attempts", default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between fetch attempts (milliseconds)
    #[serde(rename = "retry-backoff-ms", default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Maximum number of file downloads running at once
    #[serde(
        rename = "max-concurrent-downloads",
        default = "default_max_concurrent_downloads"
    )]
    pub max_concurrent_downloads: u32,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    ///
    /// The default mimics a desktop browser; plenty of servers answer 403
    /// to anything that does not look like one.
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for page fetches (seconds)
    #[serde(rename = "page-timeout-secs", default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Timeout for file downloads (seconds)
    #[serde(rename = "file-timeout-secs", default = "default_file_timeout_secs")]
    pub file_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory the category folders are created under
    #[serde(rename = "download-root", default = "default_download_root")]
    pub download_root: String,
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    2000
}

fn default_max_concurrent_downloads() -> u32 {
    4
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_page_timeout_secs() -> u64 {
    10
}

fn default_file_timeout_secs() -> u64 {
    20
}

fn default_download_root() -> String {
    "downloads".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_concurrent_downloads: default_max_concurrent_downloads(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            page_timeout_secs: default_page_timeout_secs(),
            file_timeout_secs: default_file_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_root: default_download_root(),
        }
    }
}
