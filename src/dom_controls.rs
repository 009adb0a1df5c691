use super::*;

impl Dom {
    pub(crate) fn checked(&self, node: NodeId) -> bool {
        self.element(node).map(|e| e.checked).unwrap_or(false)
    }

    pub(crate) fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(element) = self.element_mut(node) {
            element.checked = checked;
        }
    }

    pub(crate) fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.value.as_str())
    }

    pub(crate) fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.value = value.to_string();
        }
    }

    pub(crate) fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    pub(crate) fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.element(node)
            .map(|e| e.attrs.contains_key(name))
            .unwrap_or(false)
    }

    pub(crate) fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element.attrs.insert(name.to_string(), value.to_string());
        if name == "id" {
            self.rebuild_id_index();
        }
    }

    pub(crate) fn remove_attr(&mut self, node: NodeId, name: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element.attrs.remove(name);
        if name == "id" {
            self.rebuild_id_index();
        }
    }

    pub(crate) fn custom_validity_message(&self, node: NodeId) -> Option<&str> {
        self.element(node)
            .map(|e| e.custom_validity_message.as_str())
    }

    pub(crate) fn set_custom_validity_message(&mut self, node: NodeId, message: &str) {
        if let Some(element) = self.element_mut(node) {
            element.custom_validity_message = message.to_string();
        }
    }

    pub(crate) fn is_checkbox_input(&self, node: NodeId) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        element.tag_name.eq_ignore_ascii_case("input")
            && element
                .attrs
                .get("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    pub(crate) fn is_submit_control(&self, node: NodeId) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        if element.tag_name.eq_ignore_ascii_case("button") {
            return element
                .attrs
                .get("type")
                .map(|t| t.eq_ignore_ascii_case("submit"))
                .unwrap_or(true);
        }
        element.tag_name.eq_ignore_ascii_case("input")
            && element
                .attrs
                .get("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("submit"))
    }

    pub(crate) fn is_form_control(&self, node: NodeId) -> bool {
        self.tag_name(node).is_some_and(|tag| {
            tag.eq_ignore_ascii_case("input")
                || tag.eq_ignore_ascii_case("textarea")
                || tag.eq_ignore_ascii_case("select")
                || tag.eq_ignore_ascii_case("button")
        })
    }
}
