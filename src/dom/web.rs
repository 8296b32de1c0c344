//! [`Document`] over the live browser page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlInputElement, HtmlTextAreaElement, Window};

use super::node::Node;
use super::Document;

pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(window: Window, document: web_sys::Document) -> Self {
        Self { window, document }
    }

    fn build(&self, node: &Node) -> Result<web_sys::Node, JsValue> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(fragment) => {
                let element = self.document.create_element(&fragment.tag)?;
                if let Some(id) = &fragment.id {
                    element.set_id(id);
                }
                if !fragment.classes.is_empty() {
                    element.set_class_name(&fragment.classes.join(" "));
                }
                for (name, value) in &fragment.attrs {
                    element.set_attribute(name, value)?;
                }
                for child in &fragment.children {
                    element.append_child(&self.build(child)?)?;
                }
                Ok(element.into())
            }
        }
    }
}

impl Document for WebDocument {
    type Element = web_sys::Element;

    fn element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<web_sys::Element> {
        // Snapshot; the live collection shifts as classes change.
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|idx| collection.item(idx))
            .collect()
    }

    fn add_class(&mut self, element: &web_sys::Element, class: &str) {
        if let Err(err) = element.class_list().add_1(class) {
            tracing::warn!("Failed to add class {class}: {err:?}");
        }
    }

    fn remove_class(&mut self, element: &web_sys::Element, class: &str) {
        if let Err(err) = element.class_list().remove_1(class) {
            tracing::warn!("Failed to remove class {class}: {err:?}");
        }
    }

    fn attribute(&self, element: &web_sys::Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn input_value(&self, element: &web_sys::Element) -> String {
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else {
            String::new()
        }
    }

    fn set_placeholder(&mut self, element: &web_sys::Element, text: &str) {
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_placeholder(text);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_placeholder(text);
        }
    }

    fn replace_children(&mut self, element: &web_sys::Element, nodes: &[Node]) {
        element.set_text_content(None);
        for node in nodes {
            let appended = self
                .build(node)
                .and_then(|child| element.append_child(&child));
            if let Err(err) = appended {
                tracing::warn!("Failed to insert rendered node: {err:?}");
            }
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            tracing::warn!("Alert failed: {err:?}");
        }
    }
}
