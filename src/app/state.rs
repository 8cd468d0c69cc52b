use crate::adapters::ReqwestSource;
use crate::core::catalog::ServiceCatalog;
use crate::core::hero::HeroLoader;
use crate::core::{ConfigProvider, JsonSource};

/// Application-wide state: created at start-up, dropped at shutdown, and
/// handed to consumers by reference. Each loader is the only writer of its
/// own state.
pub struct AppState<S: JsonSource + Clone> {
    pub hero: HeroLoader<S>,
    pub services: ServiceCatalog<S>,
}

impl<S: JsonSource + Clone> AppState<S> {
    pub fn new<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self {
            hero: HeroLoader::new(source.clone(), config),
            services: ServiceCatalog::new(source, config),
        }
    }
}

impl AppState<ReqwestSource> {
    pub fn with_reqwest<C: ConfigProvider>(config: &C) -> Self {
        Self::new(ReqwestSource::new(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_loaders_share_configured_endpoints() {
        let state = AppState::with_reqwest(&ApiConfig::new(Some("https://api.example.com/")));

        assert_eq!(state.hero.endpoint(), "https://api.example.com/api/hero/");
        assert_eq!(state.services.endpoint(), "https://api.example.com/api/services/");
        assert!(state.hero.hero().is_none());
        assert!(!state.services.is_loaded());
        assert!(state.services.tree().is_empty());
    }
}
