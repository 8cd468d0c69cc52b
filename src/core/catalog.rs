use crate::core::normalize::{extract_payload, normalize_services};
use crate::core::seed;
use crate::core::tree::ServiceTree;
use crate::domain::model::{Service, ServiceWithTariffs};
use crate::domain::ports::{ConfigProvider, JsonSource};
use std::sync::Arc;
use tokio::sync::watch;

pub const SERVICES_ERROR_MESSAGE: &str = "API недоступен: показаны временные данные";

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub tree: Arc<ServiceTree>,
    pub loading: bool,
    pub loaded: bool,
    pub error: String,
}

/// What a call to [`ServiceCatalog::load`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Already loaded, or another load was in flight.
    Skipped,
    Live,
    Seed,
}

/// Normalized seed catalogue; every call works on a fresh copy.
pub fn seed_tree() -> Vec<Service> {
    normalize_services(seed::snapshot())
}

/// Owns the service catalogue state. At most one load runs at a time.
pub struct ServiceCatalog<S: JsonSource> {
    source: S,
    endpoint: String,
    state: watch::Sender<CatalogState>,
}

impl<S: JsonSource> ServiceCatalog<S> {
    pub fn new<C: ConfigProvider>(source: S, config: &C) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            source,
            endpoint: config.services_endpoint(),
            state,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn tree(&self) -> Arc<ServiceTree> {
        Arc::clone(&self.state.borrow().tree)
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    pub fn error(&self) -> String {
        self.state.borrow().error.clone()
    }

    pub fn get_service_by_path(&self, path: &str) -> Option<Service> {
        self.tree().get(path).cloned()
    }

    pub fn get_service_by_segments<T: AsRef<str>>(&self, segments: &[T]) -> Option<Service> {
        self.tree().get_segments(segments).cloned()
    }

    pub fn services_with_tariffs(&self) -> Vec<ServiceWithTariffs> {
        self.tree().services_with_tariffs()
    }

    pub async fn load(&self, force: bool) -> LoadOutcome {
        let started = self.state.send_if_modified(|s| {
            if (s.loaded && !force) || s.loading {
                return false;
            }
            s.loading = true;
            s.error.clear();
            true
        });
        if !started {
            tracing::debug!(endpoint = %self.endpoint, "[services] load skipped");
            return LoadOutcome::Skipped;
        }
        let guard = Loading {
            state: &self.state,
            armed: true,
        };

        let (roots, outcome, raw_count) = match self.source.get_json(&self.endpoint).await {
            Ok(payload) => {
                let items = extract_payload(payload);
                let raw_count = items.len();
                let normalized = normalize_services(items);
                if normalized.is_empty() {
                    tracing::warn!(endpoint = %self.endpoint, "[services] empty catalogue from api, using seed");
                    (seed_tree(), LoadOutcome::Seed, raw_count)
                } else {
                    (normalized, LoadOutcome::Live, raw_count)
                }
            }
            Err(e) => {
                tracing::warn!("[services] fallback to seed due to api error");
                tracing::error!(transport = e.is_transport(), "[services] {}", e);
                (seed_tree(), LoadOutcome::Seed, 0)
            }
        };

        let source = match outcome {
            LoadOutcome::Live => "api",
            _ => "seed",
        };
        tracing::info!(
            endpoint = %self.endpoint,
            raw_count,
            root_count = roots.len(),
            source,
            "[services] loaded"
        );

        let tree = Arc::new(ServiceTree::new(roots));
        guard.complete(|s| {
            s.tree = tree;
            s.loaded = true;
            if outcome == LoadOutcome::Seed {
                s.error = SERVICES_ERROR_MESSAGE.to_string();
            }
        });
        outcome
    }
}

/// Clears `loading` on every exit path of a load.
struct Loading<'a> {
    state: &'a watch::Sender<CatalogState>,
    armed: bool,
}

impl Loading<'_> {
    fn complete(mut self, apply: impl FnOnce(&mut CatalogState)) {
        self.armed = false;
        self.state.send_modify(|s| {
            apply(s);
            s.loading = false;
        });
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(|s| s.loading = false);
        }
    }
}
