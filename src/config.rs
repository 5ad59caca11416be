use std::env;
use anyhow::{bail, Context, Result};

const DEFAULT_CLOUDINARY_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1";
const DEFAULT_CLOUDINARY_FOLDER: &str = "school-website";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which content store implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Spanner,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "spanner" => Ok(StoreBackend::Spanner),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!(
                "CONTENT_STORE_BACKEND must be one of: spanner, memory, got '{}'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    fn from_env() -> Result<Self> {
        let emulator_host = env::var("SPANNER_EMULATOR_HOST").ok();

        let project = env::var("SPANNER_PROJECT")
            .context("SPANNER_PROJECT environment variable is required")?;

        let instance = env::var("SPANNER_INSTANCE")
            .context("SPANNER_INSTANCE environment variable is required")?;

        let database = env::var("SPANNER_DATABASE")
            .context("SPANNER_DATABASE environment variable is required")?;

        Ok(SpannerConfig {
            emulator_host,
            project,
            instance,
            database,
        })
    }
}

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    pub upload_base_url: String,
}

// Keeps the API secret out of logs and panic messages.
impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("folder", &self.folder)
            .field("upload_base_url", &self.upload_base_url)
            .finish()
    }
}

impl CloudinaryConfig {
    fn from_env() -> Result<Self> {
        let cloud_name = env::var("CLOUDINARY_CLOUD_NAME")
            .context("CLOUDINARY_CLOUD_NAME environment variable is required")?;

        let api_key = env::var("CLOUDINARY_API_KEY")
            .context("CLOUDINARY_API_KEY environment variable is required")?;

        let api_secret = env::var("CLOUDINARY_API_SECRET")
            .context("CLOUDINARY_API_SECRET environment variable is required")?;

        let folder = env::var("CLOUDINARY_FOLDER")
            .unwrap_or_else(|_| DEFAULT_CLOUDINARY_FOLDER.to_string());

        let upload_base_url = env::var("CLOUDINARY_UPLOAD_URL")
            .unwrap_or_else(|_| DEFAULT_CLOUDINARY_UPLOAD_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(CloudinaryConfig {
            cloud_name,
            api_key,
            api_secret,
            folder,
            upload_base_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Present whenever `store_backend` is `Spanner`
    pub spanner: Option<SpannerConfig>,
    pub cloudinary: CloudinaryConfig,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let store_backend = match env::var("CONTENT_STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value)?,
            Err(_) => StoreBackend::Spanner,
        };

        let spanner = match store_backend {
            StoreBackend::Spanner => Some(SpannerConfig::from_env()?),
            StoreBackend::Memory => None,
        };

        let cloudinary = CloudinaryConfig::from_env()?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(value) => value
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive number of bytes")?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            store_backend,
            spanner,
            cloudinary,
            cors_allowed_origins,
            max_upload_bytes,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Content store backend: {:?}", self.store_backend);
        if let Some(spanner) = &self.spanner {
            tracing::info!("  Spanner emulator: {}",
                spanner.emulator_host.as_deref().unwrap_or("disabled (using production)"));
            tracing::info!("  Spanner project: {}", spanner.project);
            tracing::info!("  Spanner instance: {}", spanner.instance);
            tracing::info!("  Spanner database: {}", spanner.database);
        }
        tracing::info!("  Cloudinary cloud: {} (folder: {})",
            self.cloudinary.cloud_name, self.cloudinary.folder);
        tracing::info!("  CORS allowed origins: {}", self.cors_allowed_origins.join(", "));
        tracing::info!("  Max upload size: {} bytes", self.max_upload_bytes);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: &[&str] = &[
        "CONTENT_STORE_BACKEND",
        "SPANNER_EMULATOR_HOST",
        "SPANNER_PROJECT",
        "SPANNER_INSTANCE",
        "SPANNER_DATABASE",
        "CLOUDINARY_CLOUD_NAME",
        "CLOUDINARY_API_KEY",
        "CLOUDINARY_API_SECRET",
        "CLOUDINARY_FOLDER",
        "CLOUDINARY_UPLOAD_URL",
        "CORS_ALLOWED_ORIGINS",
        "MAX_UPLOAD_BYTES",
        "SERVICE_PORT",
        "SERVICE_HOST",
    ];

    fn clear_env_vars() {
        for var in ALL_VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    fn set_required_vars() {
        unsafe {
            env::set_var("SPANNER_PROJECT", "test-project");
            env::set_var("SPANNER_INSTANCE", "test-instance");
            env::set_var("SPANNER_DATABASE", "test-database");
            env::set_var("CLOUDINARY_CLOUD_NAME", "demo-cloud");
            env::set_var("CLOUDINARY_API_KEY", "123456");
            env::set_var("CLOUDINARY_API_SECRET", "shh");
        }
    }

    #[test]
    fn test_config_with_all_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
            env::set_var("CLOUDINARY_FOLDER", "staging");
            env::set_var("CLOUDINARY_UPLOAD_URL", "http://localhost:8081/v1_1/");
            env::set_var("CORS_ALLOWED_ORIGINS", "https://school.example, http://localhost:8080");
            env::set_var("MAX_UPLOAD_BYTES", "2048");
            env::set_var("SERVICE_PORT", "8080");
            env::set_var("SERVICE_HOST", "127.0.0.1");
        }

        let config = Config::from_env().unwrap();
        let spanner = config.spanner.as_ref().unwrap();

        assert_eq!(config.store_backend, StoreBackend::Spanner);
        assert_eq!(spanner.emulator_host, Some("localhost:9010".to_string()));
        assert_eq!(spanner.project, "test-project");
        assert_eq!(spanner.instance, "test-instance");
        assert_eq!(spanner.database, "test-database");
        assert_eq!(config.cloudinary.cloud_name, "demo-cloud");
        assert_eq!(config.cloudinary.folder, "staging");
        assert_eq!(config.cloudinary.upload_base_url, "http://localhost:8081/v1_1");
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://school.example".to_string(), "http://localhost:8080".to_string()]
        );
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
    }

    #[test]
    fn test_config_with_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.store_backend, StoreBackend::Spanner);
        assert_eq!(config.cloudinary.folder, "school-website");
        assert_eq!(config.cloudinary.upload_base_url, "https://api.cloudinary.com/v1_1");
        assert_eq!(config.cors_allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.service_port, 5000);
        assert_eq!(config.service_host, "0.0.0.0");
    }

    #[test]
    fn test_memory_backend_skips_spanner_vars() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("CONTENT_STORE_BACKEND", "Memory");
            env::set_var("CLOUDINARY_CLOUD_NAME", "demo-cloud");
            env::set_var("CLOUDINARY_API_KEY", "123456");
            env::set_var("CLOUDINARY_API_SECRET", "shh");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.spanner.is_none());
    }

    #[test]
    fn test_unknown_backend() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("CONTENT_STORE_BACKEND", "mongodb");
        }

        let error = Config::from_env().unwrap_err();
        assert!(error.to_string().contains("CONTENT_STORE_BACKEND"));
    }

    #[test]
    fn test_missing_required_spanner_var() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::remove_var("SPANNER_DATABASE");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SPANNER_DATABASE"));
    }

    #[test]
    fn test_missing_cloudinary_secret() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::remove_var("CLOUDINARY_API_SECRET");
        }

        let error = Config::from_env().unwrap_err();
        assert!(error.to_string().contains("CLOUDINARY_API_SECRET"));
    }

    #[test]
    fn test_invalid_port() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "not-a-number");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_port_out_of_range() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "99999");
        }

        let result = Config::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_max_upload_bytes() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        set_required_vars();
        unsafe {
            env::set_var("MAX_UPLOAD_BYTES", "ten megabytes");
        }

        let error = Config::from_env().unwrap_err();
        assert!(error.to_string().contains("MAX_UPLOAD_BYTES"));
    }

    #[test]
    fn test_cloudinary_debug_redacts_secret() {
        let config = CloudinaryConfig {
            cloud_name: "demo-cloud".to_string(),
            api_key: "123456".to_string(),
            api_secret: "super-secret".to_string(),
            folder: "school-website".to_string(),
            upload_base_url: DEFAULT_CLOUDINARY_UPLOAD_URL.to_string(),
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
