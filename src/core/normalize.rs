//! Turns `/api/services/` payloads into the canonical service tree.
//!
//! The payload shape is detected once ([`RawCatalog::detect`]) and handed to
//! one of two builders. Both end with siblings sorted by `(order, title)` and
//! paths assigned top-down from the final parent links.

use crate::core::coerce;
use crate::core::collation::compare_titles;
use crate::domain::model::{EntityId, Service, ServiceImage, Tariff};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

const DEFAULT_ACTION_LABEL: &str = "Выбрать";

/// Raw list of service records, tagged by how the hierarchy is encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCatalog {
    Nested(Vec<Value>),
    Flat(Vec<Value>),
}

impl RawCatalog {
    pub fn detect(items: Vec<Value>) -> Self {
        if items.iter().any(has_children) {
            RawCatalog::Nested(items)
        } else {
            RawCatalog::Flat(items)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawCatalog::Nested(items) | RawCatalog::Flat(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_tree(self) -> Vec<Service> {
        match self {
            RawCatalog::Nested(items) => build_nested(&items),
            RawCatalog::Flat(items) => build_flat(&items),
        }
    }
}

fn has_children(item: &Value) -> bool {
    !coerce::list(coerce::fields(item).get("children")).is_empty()
}

/// Unwraps a bare array or a `results` / `data` / `items` wrapper.
pub fn extract_payload(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => ["results", "data", "items"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub fn normalize_services(items: Vec<Value>) -> Vec<Service> {
    let raw = RawCatalog::detect(items);
    if raw.is_empty() {
        return Vec::new();
    }
    tracing::debug!(
        nested = matches!(raw, RawCatalog::Nested(_)),
        count = raw.len(),
        "[services] normalizing"
    );
    raw.into_tree()
}

fn by_order_and_title(a_order: f64, a_title: &str, b_order: f64, b_title: &str) -> Ordering {
    a_order
        .partial_cmp(&b_order)
        .unwrap_or(Ordering::Equal)
        .then_with(|| compare_titles(a_title, b_title))
}

fn sort_services(items: &mut [Service]) {
    items.sort_by(|a, b| by_order_and_title(a.order, &a.title, b.order, &b.title));
}

fn sort_tariffs(items: &mut [Tariff]) {
    items.sort_by(|a, b| by_order_and_title(a.order, &a.title, b.order, &b.title));
}

pub(crate) fn normalize_tariff(raw: &Value, index: usize) -> Tariff {
    let f = coerce::fields(raw);
    let slug = coerce::text(&[f.get("slug")]);
    let id = coerce::entity_id(f.get("id")).unwrap_or_else(|| {
        let prefix = if slug.is_empty() { "tariff" } else { slug.as_str() };
        EntityId::Text(format!("{}-{}", prefix, index))
    });

    let action_label = match coerce::text(&[f.get("action_label")]) {
        label if label.is_empty() => DEFAULT_ACTION_LABEL.to_string(),
        label => label,
    };

    Tariff {
        id,
        title: coerce::text(&[f.get("title")]),
        description: coerce::text(&[f.get("description")]),
        duration: coerce::text(&[f.get("duration"), f.get("duration_label")]),
        action_label,
        action_link: coerce::text(&[f.get("action_link")]),
        price: coerce::number(f.get("price"), 0.0).max(0.0),
        order: coerce::number(f.get("order"), index as f64),
        slug,
    }
}

/// Parent reference as written in a flat record.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ParentRef {
    pub id: Option<String>,
    pub slug: Option<String>,
}

pub(crate) fn parent_ref(raw: &Value) -> ParentRef {
    let f = coerce::fields(raw);
    let value = [f.get("parent"), f.get("parent_id")]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_null());

    match value {
        None => ParentRef::default(),
        Some(Value::Object(parent)) => ParentRef {
            id: coerce::first_id(&[parent.get("id"), parent.get("pk")]).map(|id| id.to_string()),
            slug: Some(coerce::trimmed_text(&[parent.get("slug")])).filter(|s| !s.is_empty()),
        },
        Some(other) => {
            let reference = coerce::scalar_string(other)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            if reference.is_empty() {
                return ParentRef::default();
            }
            let numeric = reference.chars().all(|c| c.is_ascii_digit());
            ParentRef {
                slug: (!numeric).then(|| reference.clone()),
                id: Some(reference),
            }
        }
    }
}

fn normalize_images(raw: Option<&Value>) -> Vec<ServiceImage> {
    coerce::list(raw)
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let f = coerce::fields(item);
            let image_url = coerce::text(&[f.get("image_url")]);
            if image_url.is_empty() {
                return None;
            }
            let id = coerce::entity_id(f.get("id"))
                .unwrap_or_else(|| EntityId::Text(format!("image-{}", index)));
            Some(ServiceImage { id, image_url })
        })
        .collect()
}

/// Service node without hierarchy: no children, no path yet.
pub(crate) fn normalize_service_base(raw: &Value, index: usize) -> Service {
    let f = coerce::fields(raw);
    let slug = coerce::trimmed_text(&[f.get("slug")]);
    let parent = parent_ref(raw);

    let id = coerce::first_id(&[f.get("id"), f.get("pk")]).unwrap_or_else(|| {
        if slug.is_empty() {
            EntityId::Text(format!("service-{}", index))
        } else {
            EntityId::Text(slug.clone())
        }
    });

    let mut tariffs: Vec<Tariff> = coerce::list(f.get("tariffs"))
        .iter()
        .enumerate()
        .map(|(tariff_index, item)| normalize_tariff(item, tariff_index))
        .collect();
    sort_tariffs(&mut tariffs);

    Service {
        id,
        slug,
        path: String::new(),
        parent_slug: parent.slug,
        parent_id: parent.id.map(EntityId::Text),
        title: coerce::text(&[f.get("title")]),
        full_title: coerce::text(&[f.get("full_title"), f.get("fullTitle")]),
        description: coerce::text(&[f.get("description")]),
        duration_label: coerce::text(&[f.get("duration_label"), f.get("durationLabel")]),
        intro: coerce::text(&[f.get("intro")]),
        note: coerce::text(&[f.get("note")]),
        image: coerce::text(&[f.get("image")]),
        images: normalize_images(f.get("images")),
        gallery: coerce::first_list(&[f.get("gallery")]),
        content_sections: coerce::first_list(&[f.get("content_sections"), f.get("contentSections")]),
        order: coerce::number(f.get("order"), 0.0),
        is_category: coerce::is_truthy(f.get("is_category")),
        children: Vec::new(),
        tariffs,
    }
}

pub fn build_nested(items: &[Value]) -> Vec<Service> {
    let mut roots: Vec<Service> = items
        .iter()
        .enumerate()
        .map(|(index, item)| nested_node(item, index))
        .collect();
    sort_services(&mut roots);
    assign_paths(&mut roots, None);
    roots
}

fn nested_node(raw: &Value, index: usize) -> Service {
    let mut node = normalize_service_base(raw, index);
    node.children = coerce::list(coerce::fields(raw).get("children"))
        .iter()
        .enumerate()
        .map(|(child_index, child)| nested_node(child, child_index))
        .collect();
    sort_services(&mut node.children);
    node
}

pub fn build_flat(items: &[Value]) -> Vec<Service> {
    let mut nodes: Vec<Option<Service>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| Some(normalize_service_base(item, index)))
        .collect();

    // Later duplicates win, matching insertion into a map in input order.
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut by_slug: HashMap<String, usize> = HashMap::new();
    for (index, node) in nodes.iter().flatten().enumerate() {
        by_id.insert(node.id.to_string(), index);
        if !node.slug.is_empty() {
            by_slug.insert(node.slug.clone(), index);
        }
    }

    let mut parent_of: Vec<Option<usize>> = vec![None; nodes.len()];
    for (index, node) in nodes.iter().flatten().enumerate() {
        let by_id_match = node.parent_id.as_ref().and_then(|id| by_id.get(&id.to_string()));
        let by_slug_match = node.parent_slug.as_ref().and_then(|slug| by_slug.get(slug));
        let Some(&parent) = by_id_match.or(by_slug_match) else {
            continue;
        };
        if closes_cycle(&parent_of, index, parent) {
            tracing::debug!(node = %node.id, "parent link would create a cycle; keeping node as root");
            continue;
        }
        parent_of[index] = Some(parent);
    }

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut root_indices = Vec::new();
    for (index, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(parent) => children_of[*parent].push(index),
            None => root_indices.push(index),
        }
    }

    let mut roots: Vec<Service> = root_indices
        .into_iter()
        .filter_map(|index| attach_children(index, &mut nodes, &children_of))
        .collect();

    sort_recursively(&mut roots);
    assign_paths(&mut roots, None);
    roots
}

/// True when making `parent` the parent of `child` would loop back to `child`.
fn closes_cycle(parent_of: &[Option<usize>], child: usize, parent: usize) -> bool {
    let mut cursor = Some(parent);
    while let Some(current) = cursor {
        if current == child {
            return true;
        }
        cursor = parent_of[current];
    }
    false
}

fn attach_children(
    index: usize,
    nodes: &mut [Option<Service>],
    children_of: &[Vec<usize>],
) -> Option<Service> {
    let mut node = nodes[index].take()?;
    node.children = children_of[index]
        .iter()
        .filter_map(|child| attach_children(*child, nodes, children_of))
        .collect();
    Some(node)
}

fn sort_recursively(items: &mut [Service]) {
    sort_services(items);
    for item in items.iter_mut() {
        sort_recursively(&mut item.children);
    }
}

fn assign_paths(items: &mut [Service], parent: Option<(&str, &str, &EntityId)>) {
    for item in items.iter_mut() {
        let segment = item.path_segment();
        item.path = match parent {
            Some((parent_path, _, _)) => format!("{}/{}", parent_path, segment),
            None => segment.clone(),
        };
        item.parent_slug = parent.map(|(_, parent_segment, _)| parent_segment.to_string());
        item.parent_id = parent.map(|(_, _, parent_id)| parent_id.clone());

        let path = item.path.clone();
        let id = item.id.clone();
        assign_paths(&mut item.children, Some((&path, &segment, &id)));
    }
}
