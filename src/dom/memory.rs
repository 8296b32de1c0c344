//! Headless document backed by an arena of nodes.

use super::html;
use super::ids;
use super::node::{Element, Node};
use super::Document;

/// Handle to a node inside a [`MemoryDocument`].
///
/// Handles to removed nodes go stale: their slot may be reused, but the generation no
/// longer matches, so they resolve to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Entry {
    generation: u32,
    slot: Option<Slot>,
}

#[derive(Debug)]
enum Slot {
    Element(ElementSlot),
    Text(String),
}

#[derive(Debug, Default)]
struct ElementSlot {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    value: String,
    placeholder: Option<String>,
    children: Vec<NodeId>,
}

/// In-memory page used for tests and the native runner.
///
/// Replaced subtrees are released and their slots reused, so a long-lived document
/// stays bounded by its live node count.
#[derive(Debug)]
pub struct MemoryDocument {
    entries: Vec<Entry>,
    free: Vec<usize>,
    root: NodeId,
    notifications: Vec<String>,
    mutations: u64,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Empty document with a bare `body` root.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                generation: 0,
                slot: Some(Slot::Element(ElementSlot {
                    tag: "body".to_string(),
                    ..ElementSlot::default()
                })),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            notifications: Vec::new(),
            mutations: 0,
        }
    }

    /// Document with the standard page skeleton: two tab buttons, two tab panels, their
    /// inputs, submit buttons and hidden result panels.
    pub fn host_page() -> Self {
        let mut document = Self::new();
        let tabs = Element::div()
            .class("tabs")
            .child(
                Element::new("button")
                    .class("tab-btn active")
                    .attr(ids::TAB_TARGET_ATTR, "single")
                    .child("Single Text"),
            )
            .child(
                Element::new("button")
                    .class("tab-btn")
                    .attr(ids::TAB_TARGET_ATTR, "batch")
                    .child("Batch Analysis"),
            );
        let single = Element::div()
            .with_id(&ids::tab_content_id("single"))
            .class("tab-content active")
            .child(Element::new("textarea").with_id(ids::SINGLE_TEXT))
            .child(
                Element::new("button")
                    .with_id(ids::SINGLE_SUBMIT)
                    .child("Analyze Sentiment"),
            )
            .child(
                Element::div()
                    .with_id(ids::SINGLE_RESULT)
                    .class("result-section hidden")
                    .child(Element::div().with_id(ids::SINGLE_SENTIMENT_DISPLAY))
                    .child(Element::div().with_id(ids::SINGLE_SCORES)),
            );
        let batch = Element::div()
            .with_id(&ids::tab_content_id("batch"))
            .class("tab-content")
            .child(Element::new("textarea").with_id(ids::BATCH_TEXTS))
            .child(
                Element::new("button")
                    .with_id(ids::BATCH_SUBMIT)
                    .child("Analyze Batch"),
            )
            .child(
                Element::div()
                    .with_id(ids::BATCH_RESULT)
                    .class("result-section hidden")
                    .child(Element::div().with_id(ids::BATCH_SUMMARY))
                    .child(Element::div().with_id(ids::BATCH_DETAILS)),
            );
        let root = document.root;
        document.append(&root, &[tabs.into(), single.into(), batch.into()]);
        document.mutations = 0;
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append `nodes` as the last children of `parent`.
    pub fn append(&mut self, parent: &NodeId, nodes: &[Node]) {
        let new_children: Vec<NodeId> = nodes.iter().map(|node| self.insert(node)).collect();
        if let Some(slot) = self.element_mut(parent) {
            slot.children.extend(new_children);
        }
        self.mutations += 1;
    }

    /// Set the value of the input with `id`. Returns `false` when no such element exists.
    pub fn set_input_value(&mut self, id: &str, value: &str) -> bool {
        let Some(node) = self.element_by_id(id) else {
            return false;
        };
        match self.element_mut(&node) {
            Some(slot) => {
                slot.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn placeholder(&self, element: &NodeId) -> Option<String> {
        self.element(element).and_then(|slot| slot.placeholder.clone())
    }

    pub fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|slot| slot.classes.iter().any(|existing| existing == class))
    }

    pub fn child_count(&self, element: &NodeId) -> usize {
        self.element(element).map_or(0, |slot| slot.children.len())
    }

    /// Snapshot of `element` and its subtree as a detached fragment. Stale or foreign
    /// handles yield an empty text node.
    pub fn snapshot(&self, element: &NodeId) -> Node {
        match self.slot(element) {
            None => Node::Text(String::new()),
            Some(Slot::Text(text)) => Node::Text(text.clone()),
            Some(Slot::Element(slot)) => Node::Element(Element {
                tag: slot.tag.clone(),
                id: slot.id.clone(),
                classes: slot.classes.clone(),
                attrs: slot.attrs.clone(),
                children: slot.children.iter().map(|child| self.snapshot(child)).collect(),
            }),
        }
    }

    pub fn text_content(&self, element: &NodeId) -> String {
        self.snapshot(element).text_content()
    }

    /// Text content of the element with `id`, or an empty string when absent.
    pub fn text_of(&self, id: &str) -> String {
        self.element_by_id(id)
            .map(|node| self.text_content(&node))
            .unwrap_or_default()
    }

    pub fn inner_html(&self, element: &NodeId) -> String {
        html::to_html(&self.child_snapshots(element))
    }

    /// Children of `element` as readable lines of text.
    pub fn inner_text(&self, element: &NodeId) -> String {
        html::to_text(&self.child_snapshots(element))
    }

    /// Attached elements with `class` inside the subtree of `scope`.
    pub fn descendants_with_class(&self, scope: &NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(*scope, &mut |id, slot| {
            if slot.classes.iter().any(|existing| existing == class) {
                found.push(id);
            }
        });
        found
    }

    /// Notifications raised so far, oldest first.
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    /// Count of structural and class mutations since construction.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    fn child_snapshots(&self, element: &NodeId) -> Vec<Node> {
        self.element(element)
            .map(|slot| slot.children.iter().map(|child| self.snapshot(child)).collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, node: &Node) -> NodeId {
        let slot = match node {
            Node::Text(text) => Slot::Text(text.clone()),
            Node::Element(element) => {
                let children: Vec<NodeId> =
                    element.children.iter().map(|child| self.insert(child)).collect();
                Slot::Element(ElementSlot {
                    tag: element.tag.clone(),
                    id: element.id.clone(),
                    classes: element.classes.clone(),
                    attrs: element.attrs.clone(),
                    value: String::new(),
                    placeholder: None,
                    children,
                })
            }
        };
        self.allocate(slot)
    }

    fn allocate(&mut self, slot: Slot) -> NodeId {
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index];
            entry.slot = Some(slot);
            return NodeId {
                index,
                generation: entry.generation,
            };
        }
        self.entries.push(Entry {
            generation: 0,
            slot: Some(slot),
        });
        NodeId {
            index: self.entries.len() - 1,
            generation: 0,
        }
    }

    /// Free `node` and its whole subtree.
    fn release(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            let Some(entry) = self.entries.get_mut(current.index) else {
                continue;
            };
            if entry.generation != current.generation {
                continue;
            }
            let Some(slot) = entry.slot.take() else {
                continue;
            };
            entry.generation = entry.generation.wrapping_add(1);
            self.free.push(current.index);
            if let Slot::Element(element) = slot {
                pending.extend(element.children);
            }
        }
    }

    fn slot(&self, id: &NodeId) -> Option<&Slot> {
        self.entries
            .get(id.index)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.slot.as_ref())
    }

    fn element(&self, id: &NodeId) -> Option<&ElementSlot> {
        match self.slot(id) {
            Some(Slot::Element(slot)) => Some(slot),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: &NodeId) -> Option<&mut ElementSlot> {
        let entry = self
            .entries
            .get_mut(id.index)
            .filter(|entry| entry.generation == id.generation)?;
        match entry.slot.as_mut() {
            Some(Slot::Element(slot)) => Some(slot),
            _ => None,
        }
    }

    fn walk(&self, start: NodeId, visit: &mut impl FnMut(NodeId, &ElementSlot)) {
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if let Some(slot) = self.element(&current) {
                visit(current, slot);
                stack.extend(slot.children.iter().rev().copied());
            }
        }
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(self.root, &mut |node, slot| {
            if found.is_none() && slot.id.as_deref() == Some(id) {
                found = Some(node);
            }
        });
        found
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants_with_class(&self.root, class)
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        if let Some(slot) = self.element_mut(element) {
            if !slot.classes.iter().any(|existing| existing == class) {
                slot.classes.push(class.to_string());
            }
        }
        self.mutations += 1;
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        if let Some(slot) = self.element_mut(element) {
            slot.classes.retain(|existing| existing != class);
        }
        self.mutations += 1;
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let slot = self.element(element)?;
        match name {
            "id" => slot.id.clone(),
            "class" => Some(slot.classes.join(" ")),
            _ => slot
                .attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
        }
    }

    fn input_value(&self, element: &NodeId) -> String {
        match self.element(element) {
            Some(slot) if slot.tag == "input" || slot.tag == "textarea" => slot.value.clone(),
            _ => String::new(),
        }
    }

    fn set_placeholder(&mut self, element: &NodeId, text: &str) {
        if let Some(slot) = self.element_mut(element) {
            slot.placeholder = Some(text.to_string());
        }
    }

    fn replace_children(&mut self, element: &NodeId, nodes: &[Node]) {
        let Some(slot) = self.element_mut(element) else {
            return;
        };
        let previous = std::mem::take(&mut slot.children);
        for child in previous {
            self.release(child);
        }
        let new_children: Vec<NodeId> = nodes.iter().map(|node| self.insert(node)).collect();
        if let Some(slot) = self.element_mut(element) {
            slot.children = new_children;
        }
        self.mutations += 1;
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_page_exposes_page_contract() {
        let document = MemoryDocument::host_page();
        for id in [
            ids::SINGLE_TEXT,
            ids::BATCH_TEXTS,
            ids::SINGLE_RESULT,
            ids::BATCH_RESULT,
            ids::SINGLE_SENTIMENT_DISPLAY,
            ids::SINGLE_SCORES,
            ids::BATCH_SUMMARY,
            ids::BATCH_DETAILS,
            "single-tab",
            "batch-tab",
        ] {
            assert!(document.element_by_id(id).is_some(), "missing #{id}");
        }
        assert_eq!(document.elements_by_class(ids::TAB_BUTTON_CLASS).len(), 2);
        assert_eq!(document.elements_by_class(ids::TAB_CONTENT_CLASS).len(), 2);
        let result = document.element_by_id(ids::SINGLE_RESULT).unwrap();
        assert!(document.has_class(&result, ids::HIDDEN_CLASS));
    }

    #[test]
    fn replaced_subtree_no_longer_resolves() {
        let mut document = MemoryDocument::host_page();
        let panel = document.element_by_id(ids::BATCH_RESULT).unwrap();
        document.replace_children(&panel, &[Element::div().class("loading").into()]);
        assert!(document.element_by_id(ids::BATCH_SUMMARY).is_none());
        assert_eq!(document.child_count(&panel), 1);

        document.replace_children(
            &panel,
            &[Element::div().with_id(ids::BATCH_SUMMARY).into()],
        );
        assert!(document.element_by_id(ids::BATCH_SUMMARY).is_some());
        assert!(document.elements_by_class("loading").is_empty());
    }

    #[test]
    fn input_value_only_reads_form_fields() {
        let mut document = MemoryDocument::host_page();
        assert!(document.set_input_value(ids::SINGLE_TEXT, "hello"));
        let input = document.element_by_id(ids::SINGLE_TEXT).unwrap();
        assert_eq!(document.input_value(&input), "hello");
        let panel = document.element_by_id(ids::SINGLE_RESULT).unwrap();
        assert_eq!(document.input_value(&panel), "");
        assert!(!document.set_input_value("missing", "x"));
    }

    #[test]
    fn classes_toggle_without_duplicates() {
        let mut document = MemoryDocument::host_page();
        let tab = document.element_by_id("batch-tab").unwrap();
        document.add_class(&tab, "active");
        document.add_class(&tab, "active");
        assert_eq!(
            document.attribute(&tab, "class").as_deref(),
            Some("tab-content active")
        );
        document.remove_class(&tab, "active");
        assert!(!document.has_class(&tab, "active"));
    }

    #[test]
    fn inner_html_escapes_text() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        document.append(&root, &[Element::div().child("<b>").into()]);
        assert_eq!(document.inner_html(&root), "<div>&lt;b&gt;</div>");
    }

    #[test]
    fn inner_text_puts_blocks_on_lines() {
        let mut document = MemoryDocument::host_page();
        let display = document.element_by_id(ids::SINGLE_SENTIMENT_DISPLAY).unwrap();
        document.replace_children(
            &display,
            &[Element::div().child("Error: boom").into()],
        );
        let panel = document.element_by_id(ids::SINGLE_RESULT).unwrap();
        assert_eq!(document.inner_text(&panel), "Error: boom");
    }

    #[test]
    fn repeated_replacement_reuses_slots() {
        let mut document = MemoryDocument::host_page();
        let panel = document.element_by_id(ids::BATCH_RESULT).unwrap();
        let rebuild = |document: &mut MemoryDocument| {
            document.replace_children(&panel, &[Element::div().class("loading").into()]);
            document.replace_children(
                &panel,
                &[
                    Element::div().with_id(ids::BATCH_SUMMARY).child("3").into(),
                    Element::div().with_id(ids::BATCH_DETAILS).child("rows").into(),
                ],
            );
        };
        rebuild(&mut document);
        let settled = document.entries.len();
        for _ in 0..50 {
            rebuild(&mut document);
        }
        assert_eq!(document.entries.len(), settled);
        assert_eq!(document.text_of(ids::BATCH_SUMMARY), "3");
    }

    #[test]
    fn stale_and_foreign_handles_resolve_to_nothing() {
        let mut document = MemoryDocument::host_page();
        let summary = document.element_by_id(ids::BATCH_SUMMARY).unwrap();
        let panel = document.element_by_id(ids::BATCH_RESULT).unwrap();
        document.replace_children(&panel, &[Element::div().class("loading").child("x").into()]);

        assert_eq!(document.snapshot(&summary), Node::Text(String::new()));
        assert_eq!(document.text_content(&summary), "");
        assert!(!document.has_class(&summary, "loading"));
        document.add_class(&summary, "ghost");
        assert!(document.elements_by_class("ghost").is_empty());

        let foreign = MemoryDocument::host_page().element_by_id(ids::BATCH_DETAILS).unwrap();
        let small = MemoryDocument::new();
        assert_eq!(small.snapshot(&foreign), Node::Text(String::new()));
        assert_eq!(small.inner_html(&foreign), "");
    }
}
