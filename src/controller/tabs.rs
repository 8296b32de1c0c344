use super::*;

impl<D: Document> SentimentController<D> {
    /// Show the `<tab_name>-tab` panel and mark `trigger` as the active button.
    ///
    /// Result panels are never touched.
    pub fn switch_tab(&mut self, tab_name: &str, trigger: &D::Element) {
        for content in self.document.elements_by_class(ids::TAB_CONTENT_CLASS) {
            self.document.remove_class(&content, ids::ACTIVE_CLASS);
        }
        for button in self.document.elements_by_class(ids::TAB_BUTTON_CLASS) {
            self.document.remove_class(&button, ids::ACTIVE_CLASS);
        }
        match self.document.element_by_id(&ids::tab_content_id(tab_name)) {
            Some(content) => self.document.add_class(&content, ids::ACTIVE_CLASS),
            None => tracing::warn!("No content container for tab {tab_name:?}"),
        }
        self.document.add_class(trigger, ids::ACTIVE_CLASS);
    }

    /// Click on a tab button; the target tab comes from its `data-tab` attribute.
    ///
    /// Returns `false` when the button names no tab.
    pub fn click_tab_button(&mut self, button: &D::Element) -> bool {
        let Some(tab_name) = self.document.attribute(button, ids::TAB_TARGET_ATTR) else {
            return false;
        };
        self.switch_tab(&tab_name, button);
        true
    }
}
