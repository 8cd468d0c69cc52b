use crate::core::coerce;
use crate::domain::model::Hero;
use crate::domain::ports::{ConfigProvider, JsonSource};
use crate::utils::error::Result;
use serde_json::Value;
use tokio::sync::watch;

pub const HERO_ERROR_MESSAGE: &str = "Не удалось загрузить Hero-данные";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroState {
    pub hero: Option<Hero>,
    pub loading: bool,
    pub error: String,
    in_flight: usize,
}

/// Prefixes relative paths with `origin`; absolute http(s) URLs pass through.
pub fn resolve_url(origin: &str, raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let is_absolute = ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    if is_absolute {
        return raw.to_string();
    }

    if raw.starts_with('/') {
        format!("{}{}", origin, raw)
    } else {
        format!("{}/{}", origin, raw)
    }
}

/// Any parseable body yields a hero; non-object bodies read as empty.
pub fn hero_from_payload(payload: &Value, origin: &str) -> Hero {
    let f = coerce::fields(payload);

    Hero {
        id: coerce::entity_id(f.get("id")),
        title: coerce::text(&[f.get("title")]),
        description: coerce::text(&[f.get("description")]),
        background_image: resolve_url(origin, &coerce::text(&[f.get("background_image")])),
        avatar: resolve_url(origin, &coerce::text(&[f.get("avatar")])),
    }
}

/// Owns the hero banner state. Calls are not deduplicated; the last one to
/// finish decides `hero` and `error`.
pub struct HeroLoader<S: JsonSource> {
    source: S,
    endpoint: String,
    origin: String,
    state: watch::Sender<HeroState>,
}

impl<S: JsonSource> HeroLoader<S> {
    pub fn new<C: ConfigProvider>(source: S, config: &C) -> Self {
        let (state, _) = watch::channel(HeroState::default());
        Self {
            source,
            endpoint: config.hero_endpoint(),
            origin: config.hero_origin().to_string(),
            state,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn subscribe(&self) -> watch::Receiver<HeroState> {
        self.state.subscribe()
    }

    pub fn hero(&self) -> Option<Hero> {
        self.state.borrow().hero.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> String {
        self.state.borrow().error.clone()
    }

    pub async fn load(&self) -> Option<Hero> {
        self.state.send_modify(|s| {
            s.in_flight += 1;
            s.loading = true;
            s.error.clear();
        });
        let guard = InFlight {
            state: &self.state,
            armed: true,
        };

        match self.source.get_json(&self.endpoint).await {
            Ok(payload) => {
                let hero = hero_from_payload(&payload, &self.origin);
                tracing::debug!(endpoint = %self.endpoint, "[hero] loaded");
                guard.complete(|s| {
                    s.hero = Some(hero.clone());
                    s.error.clear();
                });
                Some(hero)
            }
            Err(e) => {
                tracing::error!(transport = e.is_transport(), "[hero] failed to load: {}", e);
                guard.complete(|s| {
                    s.hero = None;
                    s.error = HERO_ERROR_MESSAGE.to_string();
                });
                None
            }
        }
    }
}

/// Releases one in-flight slot, also when the load future is dropped early.
struct InFlight<'a> {
    state: &'a watch::Sender<HeroState>,
    armed: bool,
}

impl InFlight<'_> {
    fn complete(mut self, apply: impl FnOnce(&mut HeroState)) {
        self.armed = false;
        self.state.send_modify(|s| {
            apply(s);
            release(s);
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(release);
        }
    }
}

fn release(state: &mut HeroState) {
    state.in_flight = state.in_flight.saturating_sub(1);
    state.loading = state.in_flight > 0;
}
