use crate::domain::model::{Service, ServiceWithTariffs};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Normalized catalogue plus a path index built on first lookup.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ServiceTree {
    roots: Vec<Service>,
    #[serde(skip)]
    index: OnceLock<HashMap<String, Vec<usize>>>,
}

impl ServiceTree {
    pub fn new(roots: Vec<Service>) -> Self {
        Self {
            roots,
            index: OnceLock::new(),
        }
    }

    pub fn roots(&self) -> &[Service] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        let mut stack: Vec<&Service> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    fn index(&self) -> &HashMap<String, Vec<usize>> {
        self.index.get_or_init(|| {
            let mut map = HashMap::new();
            let mut position = Vec::new();
            index_level(&self.roots, &mut position, &mut map);
            map
        })
    }

    /// Looks a node up by its slash-separated path; outer slashes are ignored.
    pub fn get(&self, path: &str) -> Option<&Service> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return None;
        }
        let position = self.index().get(path)?;
        self.resolve(position)
    }

    pub fn get_segments<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Service> {
        let path = segments
            .iter()
            .map(|segment| segment.as_ref())
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<&str>>()
            .join("/");
        if path.is_empty() {
            return None;
        }
        self.resolve(self.index().get(&path)?)
    }

    fn resolve(&self, position: &[usize]) -> Option<&Service> {
        let (first, rest) = position.split_first()?;
        let mut node = self.roots.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    /// Nodes that carry their own tariffs, in traversal order.
    pub fn services_with_tariffs(&self) -> Vec<ServiceWithTariffs> {
        self.iter()
            .filter(|service| !service.tariffs.is_empty())
            .map(|service| ServiceWithTariffs {
                id: [service.path.as_str(), service.slug.as_str()]
                    .into_iter()
                    .find(|candidate| !candidate.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| service.id.to_string()),
                path: service.path.clone(),
                title: service.title.clone(),
                tariffs: service.tariffs.clone(),
            })
            .collect()
    }
}

impl Clone for ServiceTree {
    fn clone(&self) -> Self {
        Self::new(self.roots.clone())
    }
}

impl PartialEq for ServiceTree {
    fn eq(&self, other: &Self) -> bool {
        self.roots == other.roots
    }
}

fn index_level(items: &[Service], position: &mut Vec<usize>, map: &mut HashMap<String, Vec<usize>>) {
    for (index, item) in items.iter().enumerate() {
        position.push(index);
        if !item.path.is_empty() {
            map.insert(item.path.clone(), position.clone());
        }
        index_level(&item.children, position, map);
        position.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::normalize_services;
    use serde_json::json;

    fn sample() -> ServiceTree {
        ServiceTree::new(normalize_services(vec![
            json!({"id": 1, "slug": "massage", "order": 1}),
            json!({"id": 2, "slug": "face", "parent": 1, "order": 2,
                   "tariffs": [{"title": "30 мин", "price": 1500}]}),
            json!({"id": 3, "slug": "back", "parent": 1, "order": 1}),
            json!({"id": 4, "slug": "deep", "parent": 3,
                   "tariffs": [{"title": "60 мин", "price": 2000}]}),
            json!({"id": 5, "slug": "spa", "order": 2,
                   "tariffs": [{"title": "День", "price": 5000}]}),
        ]))
    }

    #[test]
    fn test_lookup_by_path() {
        let tree = sample();
        assert_eq!(tree.get("massage/back/deep").map(|s| s.slug.as_str()), Some("deep"));
        assert_eq!(tree.get("/massage/face/").map(|s| s.slug.as_str()), Some("face"));
        assert!(tree.get("massage/unknown").is_none());
        assert!(tree.get("").is_none());
        assert!(tree.get("///").is_none());
    }

    #[test]
    fn test_lookup_by_segments() {
        let tree = sample();
        assert_eq!(
            tree.get_segments(&["massage", "", "back"]).map(|s| s.path.as_str()),
            Some("massage/back")
        );
        let empty: [&str; 2] = ["", ""];
        assert!(tree.get_segments(&empty).is_none());
    }

    #[test]
    fn test_depth_first_iteration() {
        let tree = sample();
        let paths: Vec<&str> = tree.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["massage", "massage/back", "massage/back/deep", "massage/face", "spa"]
        );
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_services_with_tariffs_keeps_own_tariffs_only() {
        let tree = sample();
        let rows = tree.services_with_tariffs();

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["massage/back/deep", "massage/face", "spa"]);
        assert!(rows.iter().all(|r| r.tariffs.len() == 1));
    }

    #[test]
    fn test_clone_rebuilds_index() {
        let tree = sample();
        assert!(tree.get("spa").is_some());
        let copy = tree.clone();
        assert_eq!(copy, tree);
        assert!(copy.get("massage/face").is_some());
    }
}
