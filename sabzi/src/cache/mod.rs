use fresh_api::endpoints::{
    bills::Bill, providers::Provider, signers::Signer, vegetables::Vegetable,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug)]
pub enum CacheError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::Io(e) => write!(f, "IO error: {}", e),
            CacheError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Io(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedBills {
    pub bills: Vec<Bill>,
    pub cached_at: i64, // Unix timestamp
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedProviders {
    pub providers: Vec<Provider>,
    pub cached_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSigners {
    pub signers: Vec<Signer>,
    pub cached_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedVegetables {
    pub vegetables: Vec<Vegetable>,
    pub cached_at: i64,
}

/// Async cache layer using tokio::fs for non-blocking file I/O.
/// The backend has no change-tracking protocol, so refreshes replace the
/// cached collection wholesale.
#[derive(Clone)]
pub struct Cache {
    cache_dir: PathBuf,
}

impl Cache {
    pub async fn new() -> Result<Self, CacheError> {
        let cache_dir = Self::get_cache_dir()?;
        fs::create_dir_all(&cache_dir).await?;

        Ok(Self { cache_dir })
    }

    fn get_cache_dir() -> Result<PathBuf, CacheError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| {
                CacheError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No cache directory on this platform",
                ))
            })?
            .join("sabzi")
            .join("data");

        Ok(cache_dir)
    }

    // Bills cache
    pub async fn get_bills(&self) -> Result<Option<CachedBills>, CacheError> {
        let path = self.cache_dir.join("bills.json");
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).await?;
        let cached: CachedBills = serde_json::from_str(&data)?;
        Ok(Some(cached))
    }

    pub async fn set_bills(&self, bills: &[Bill]) -> Result<(), CacheError> {
        let cached = CachedBills {
            bills: bills.to_vec(),
            cached_at: chrono::Utc::now().timestamp(),
        };

        let path = self.cache_dir.join("bills.json");
        let json = serde_json::to_string_pretty(&cached)?;
        fs::write(&path, json).await?;
        Ok(())
    }

    // Providers cache
    pub async fn get_providers(&self) -> Result<Option<CachedProviders>, CacheError> {
        let path = self.cache_dir.join("providers.json");
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).await?;
        let cached: CachedProviders = serde_json::from_str(&data)?;
        Ok(Some(cached))
    }

    pub async fn set_providers(&self, providers: &[Provider]) -> Result<(), CacheError> {
        let cached = CachedProviders {
            providers: providers.to_vec(),
            cached_at: chrono::Utc::now().timestamp(),
        };

        let path = self.cache_dir.join("providers.json");
        let json = serde_json::to_string_pretty(&cached)?;
        fs::write(&path, json).await?;
        Ok(())
    }

    // Signers cache
    pub async fn get_signers(&self) -> Result<Option<CachedSigners>, CacheError> {
        let path = self.cache_dir.join("signers.json");
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).await?;
        let cached: CachedSigners = serde_json::from_str(&data)?;
        Ok(Some(cached))
    }

    pub async fn set_signers(&self, signers: &[Signer]) -> Result<(), CacheError> {
        let cached = CachedSigners {
            signers: signers.to_vec(),
            cached_at: chrono::Utc::now().timestamp(),
        };

        let path = self.cache_dir.join("signers.json");
        let json = serde_json::to_string_pretty(&cached)?;
        fs::write(&path, json).await?;
        Ok(())
    }

    // Vegetables cache (candidate pool for item autocomplete)
    pub async fn get_vegetables(&self) -> Result<Option<CachedVegetables>, CacheError> {
        let path = self.cache_dir.join("vegetables.json");
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).await?;
        let cached: CachedVegetables = serde_json::from_str(&data)?;
        Ok(Some(cached))
    }

    pub async fn set_vegetables(&self, vegetables: &[Vegetable]) -> Result<(), CacheError> {
        let cached = CachedVegetables {
            vegetables: vegetables.to_vec(),
            cached_at: chrono::Utc::now().timestamp(),
        };

        let path = self.cache_dir.join("vegetables.json");
        let json = serde_json::to_string_pretty(&cached)?;
        fs::write(&path, json).await?;
        Ok(())
    }

    // Invalidate bills cache (after creating a new bill)
    pub async fn invalidate_bills(&self) -> Result<(), CacheError> {
        let path = self.cache_dir.join("bills.json");

        if path.exists() {
            fs::remove_file(&path).await?;
            tracing::debug!("Invalidated bills cache");
        }

        Ok(())
    }

    // Invalidate providers cache (after creating a new provider)
    pub async fn invalidate_providers(&self) -> Result<(), CacheError> {
        let path = self.cache_dir.join("providers.json");

        if path.exists() {
            fs::remove_file(&path).await?;
            tracing::debug!("Invalidated providers cache");
        }

        Ok(())
    }
}
