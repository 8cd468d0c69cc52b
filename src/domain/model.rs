use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as the API sends it: numeric primary keys or free-form strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(value) => write!(f, "{}", value),
            EntityId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Int(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId::Text(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub background_image: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub id: EntityId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub action_label: String,
    pub action_link: String,
    pub price: f64,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceImage {
    pub id: EntityId,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: EntityId,
    pub slug: String,
    pub path: String,
    pub parent_slug: Option<String>,
    pub parent_id: Option<EntityId>,
    pub title: String,
    pub full_title: String,
    pub description: String,
    pub duration_label: String,
    pub intro: String,
    pub note: String,
    pub image: String,
    pub images: Vec<ServiceImage>,
    pub gallery: Vec<serde_json::Value>,
    pub content_sections: Vec<serde_json::Value>,
    pub order: f64,
    pub is_category: bool,
    pub children: Vec<Service>,
    pub tariffs: Vec<Tariff>,
}

impl Service {
    /// Segment this node contributes to its descendants' paths.
    pub fn path_segment(&self) -> String {
        if self.slug.is_empty() {
            self.id.to_string()
        } else {
            self.slug.clone()
        }
    }
}

/// One row of the price list: a node that has its own tariffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceWithTariffs {
    pub id: String,
    pub path: String,
    pub title: String,
    pub tariffs: Vec<Tariff>,
}
