use crate::cache::Cache;
use crate::events::DataEvent;
use crate::export;
use crate::state::filter::FilterCriteria;
use fresh_api::endpoints::bills::{Bill, NewBill};
use fresh_api::endpoints::providers::NewProvider;
use fresh_api::endpoints::vegetables::NewVegetable;
use fresh_api::{Client, Request};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Data loader that implements cache-first loading: cached data is sent
/// immediately, then the collection is refreshed from the API.
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub cache: Arc<Cache>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(
        api_client: Arc<Client>,
        cache: Arc<Cache>,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            api_client,
            cache,
            data_tx,
        }
    }

    /// Load bills with cache-first strategy
    pub async fn load_bills(&self, force_refresh: bool) {
        tracing::info!("Loading bills (force_refresh={})", force_refresh);

        // Step 1: Try cache first (fast path)
        let mut served_from_cache = false;
        if !force_refresh {
            if let Ok(Some(cached)) = self.cache.get_bills().await {
                tracing::debug!("Loaded {} bills from cache", cached.bills.len());
                let _ = self.data_tx.send(DataEvent::BillsCacheLoaded {
                    bills: cached.bills,
                });
                served_from_cache = true;
            } else {
                tracing::debug!("No cached bills found");
            }
        }

        // Step 2: Refresh from the API. The backend has no change tracking,
        // so this is always a full fetch.
        tracing::debug!("Fetching bills from API");
        match self.api_client.send(Request::bills().list()).await {
            Ok(bills) => {
                tracing::info!("Loaded {} bills from API", bills.len());
                let _ = self.data_tx.send(DataEvent::BillsLoaded {
                    bills: bills.clone(),
                });

                // Update cache in background
                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let _ = cache.set_bills(&bills).await;
                    tracing::debug!("Cached bills updated");
                });
            }
            Err(e) => {
                tracing::error!("Failed to load bills from API: {}", e);
                // Stale data beats an error screen; only surface the
                // failure when there was nothing to show
                if !served_from_cache {
                    let _ = self.data_tx.send(DataEvent::LoadError {
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    /// Load providers with cache-first strategy
    pub async fn load_providers(&self, force_refresh: bool) {
        tracing::info!("Loading providers (force_refresh={})", force_refresh);

        let mut served_from_cache = false;
        if !force_refresh {
            if let Ok(Some(cached)) = self.cache.get_providers().await {
                tracing::debug!("Loaded {} providers from cache", cached.providers.len());
                let _ = self.data_tx.send(DataEvent::ProvidersCacheLoaded {
                    providers: cached.providers,
                });
                served_from_cache = true;
            }
        }

        match self.api_client.send(Request::providers().list()).await {
            Ok(providers) => {
                tracing::info!("Loaded {} providers from API", providers.len());
                let _ = self.data_tx.send(DataEvent::ProvidersLoaded {
                    providers: providers.clone(),
                });

                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let _ = cache.set_providers(&providers).await;
                });
            }
            Err(e) => {
                tracing::error!("Failed to load providers from API: {}", e);
                if !served_from_cache {
                    let _ = self.data_tx.send(DataEvent::LoadError {
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    /// Load signers with cache-first strategy
    pub async fn load_signers(&self) {
        tracing::info!("Loading signers");

        if let Ok(Some(cached)) = self.cache.get_signers().await {
            tracing::debug!("Loaded {} signers from cache", cached.signers.len());
            let _ = self.data_tx.send(DataEvent::SignersCacheLoaded {
                signers: cached.signers,
            });
        }

        match self.api_client.send(Request::signers().list()).await {
            Ok(signers) => {
                tracing::info!("Loaded {} signers from API", signers.len());
                let _ = self.data_tx.send(DataEvent::SignersLoaded {
                    signers: signers.clone(),
                });

                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let _ = cache.set_signers(&signers).await;
                });
            }
            Err(e) => {
                // Signers are secondary reference data; a miss only degrades
                // the filter panel
                tracing::warn!("Failed to load signers from API: {}", e);
            }
        }
    }

    /// Load the vegetable catalog (autocomplete candidate pool)
    pub async fn load_vegetables(&self, force_refresh: bool) {
        tracing::info!("Loading vegetables (force_refresh={})", force_refresh);

        if !force_refresh {
            if let Ok(Some(cached)) = self.cache.get_vegetables().await {
                tracing::debug!("Loaded {} vegetables from cache", cached.vegetables.len());
                let _ = self.data_tx.send(DataEvent::VegetablesCacheLoaded {
                    vegetables: cached.vegetables,
                });
            }
        }

        match self.api_client.send(Request::vegetables().list()).await {
            Ok(vegetables) => {
                tracing::info!("Loaded {} vegetables from API", vegetables.len());
                let _ = self.data_tx.send(DataEvent::VegetablesLoaded {
                    vegetables: vegetables.clone(),
                });

                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let _ = cache.set_vegetables(&vegetables).await;
                });
            }
            Err(e) => {
                tracing::warn!("Failed to load vegetables from API: {}", e);
            }
        }
    }

    /// Create a bill, then save any item names the catalog doesn't know yet
    pub async fn create_bill(&self, bill: NewBill, new_item_names: Vec<String>) {
        tracing::info!(
            "Creating bill for provider {} ({} items)",
            bill.provider_name,
            bill.items.len()
        );

        match self.api_client.send(Request::bills().create(bill)).await {
            Ok(created) => {
                tracing::info!("Bill {} created", created.id);
                let _ = self.data_tx.send(DataEvent::BillCreated { bill: created });

                // The cached list no longer matches the server
                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let _ = cache.invalidate_bills().await;
                });

                for name in new_item_names {
                    let request = Request::vegetables().create(NewVegetable {
                        name: name.clone(),
                        is_available: true,
                    });
                    match self.api_client.send(request).await {
                        Ok(vegetable) => {
                            let _ = self.data_tx.send(DataEvent::VegetableCreated { vegetable });
                        }
                        Err(e) => {
                            tracing::warn!("Failed to save catalog entry '{}': {}", name, e);
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!("Failed to create bill: {}", e);
                let _ = self.data_tx.send(DataEvent::BillCreateFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    /// Create a provider
    pub async fn create_provider(&self, provider: NewProvider) {
        tracing::info!("Creating provider {}", provider.name);

        match self
            .api_client
            .send(Request::providers().create(provider))
            .await
        {
            Ok(created) => {
                tracing::info!("Provider {} created", created.id);
                let _ = self
                    .data_tx
                    .send(DataEvent::ProviderCreated { provider: created });

                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let _ = cache.invalidate_providers().await;
                });
            }
            Err(e) => {
                tracing::error!("Failed to create provider: {}", e);
                let _ = self.data_tx.send(DataEvent::ProviderCreateFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    /// Write the CSV report for an already-filtered bill list
    pub async fn export_bills(&self, bills: Vec<Bill>, criteria: FilterCriteria) {
        tracing::info!("Exporting {} bills", bills.len());

        let result = tokio::task::spawn_blocking(move || {
            export::write_report(&bills, &criteria, &export::default_export_dir())
        })
        .await;

        match result {
            Ok(Ok(paths)) => {
                tracing::info!(
                    "Export written to {} (summary: {})",
                    paths.rows.display(),
                    paths.summary.display()
                );
                let _ = self.data_tx.send(DataEvent::ExportFinished {
                    path: paths.rows,
                });
            }
            Ok(Err(e)) => {
                let _ = self.data_tx.send(DataEvent::ExportFailed {
                    error: e.to_string(),
                });
            }
            Err(e) => {
                let _ = self.data_tx.send(DataEvent::ExportFailed {
                    error: format!("export task failed: {}", e),
                });
            }
        }
    }
}
