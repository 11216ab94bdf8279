//! Forward/reverse link graph between pages.
//!
//! Both adjacencies are rebuilt per page on every update (replace, never
//! merge) so stale edges cannot accumulate. Invariant maintained by every
//! mutation: `T ∈ forward[P]` iff `P ∈ reverse[T]`.

use std::collections::HashMap;

/// Directed link graph: page → outgoing targets, and its transpose.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    forward: HashMap<String, Vec<String>>,
    reverse: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a page's outgoing edges with `new_targets`.
    ///
    /// Duplicates in `new_targets` are collapsed to their first
    /// occurrence; order is preserved in the forward adjacency.
    pub fn update_page(&mut self, page_id: &str, new_targets: &[String]) {
        let mut targets: Vec<String> = Vec::new();
        for t in new_targets {
            if !targets.contains(t) {
                targets.push(t.clone());
            }
        }

        let old = self.forward.get(page_id).cloned().unwrap_or_default();

        for removed in old.iter().filter(|t| !targets.contains(*t)) {
            if let Some(sources) = self.reverse.get_mut(removed) {
                sources.retain(|s| s != page_id);
                if sources.is_empty() {
                    self.reverse.remove(removed);
                }
            }
        }

        for added in targets.iter().filter(|t| !old.contains(*t)) {
            let sources = self.reverse.entry(added.clone()).or_default();
            if !sources.iter().any(|s| s == page_id) {
                sources.push(page_id.to_string());
            }
        }

        if targets.is_empty() {
            self.forward.remove(page_id);
        } else {
            self.forward.insert(page_id.to_string(), targets);
        }
    }

    /// Detach a page entirely: drop its outgoing edges and its forward entry.
    pub fn remove_page(&mut self, page_id: &str) {
        self.update_page(page_id, &[]);
    }

    /// Pages linking to `target` (possibly empty).
    pub fn backlinks(&self, target: &str) -> Vec<String> {
        self.reverse.get(target).cloned().unwrap_or_default()
    }

    /// Outgoing targets of a page (possibly empty).
    pub fn outgoing(&self, page_id: &str) -> Vec<String> {
        self.forward.get(page_id).cloned().unwrap_or_default()
    }

    /// All targets any page currently links to.
    pub fn all_targets(&self) -> Vec<String> {
        self.reverse.keys().cloned().collect()
    }

    /// Whether any page links to `target`.
    pub fn is_referenced(&self, target: &str) -> bool {
        self.reverse.contains_key(target)
    }

    pub fn forward_map(&self) -> &HashMap<String, Vec<String>> {
        &self.forward
    }

    pub fn reverse_map(&self) -> &HashMap<String, Vec<String>> {
        &self.reverse
    }

    /// Replace the whole graph (snapshot import).
    pub fn replace_all(
        &mut self,
        forward: HashMap<String, Vec<String>>,
        reverse: HashMap<String, Vec<String>>,
    ) {
        self.forward = forward;
        self.reverse = reverse;
    }

    /// Clone out both adjacencies (snapshot export).
    pub fn to_parts(&self) -> (HashMap<String, Vec<String>>, HashMap<String, Vec<String>>) {
        (self.forward.clone(), self.reverse.clone())
    }
}
