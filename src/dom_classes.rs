use super::*;

impl Dom {
    pub(crate) fn class_contains(&self, node: NodeId, class_name: &str) -> bool {
        self.element(node)
            .map(|element| has_class(element, class_name))
            .unwrap_or(false)
    }

    pub(crate) fn class_add(&mut self, node: NodeId, class_name: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|c| c == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
    }

    pub(crate) fn class_remove(&mut self, node: NodeId, class_name: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|c| c != class_name);
        set_class_attr(element, &classes);
    }

    pub(crate) fn class_toggle(&mut self, node: NodeId, class_name: &str, force: bool) {
        if force {
            self.class_add(node, class_name);
        } else {
            self.class_remove(node, class_name);
        }
    }

    pub(crate) fn matches_selector(&self, node: NodeId, selector: &str) -> Result<bool> {
        let groups = parse_selector_groups(selector)?;
        Ok(groups
            .iter()
            .any(|chain| self.matches_selector_chain(node, chain)))
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.query_selector_all_from(self.root, selector)
    }

    pub(crate) fn query_selector_from(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        Ok(self
            .query_selector_all_from(scope, selector)?
            .into_iter()
            .next())
    }

    pub(crate) fn query_selector_all_from(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        // Fast path for the common `#id` lookup against the whole document.
        if scope == self.root && groups.len() == 1 {
            if let [part] = groups[0].as_slice() {
                if let Some(id) = part.step.id_only() {
                    return Ok(self.by_id(id).into_iter().collect());
                }
            }
        }

        let mut matched = Vec::new();
        for node in self.collect_elements_descendants_dfs(scope) {
            if groups
                .iter()
                .any(|chain| self.matches_selector_chain(node, chain))
            {
                matched.push(node);
            }
        }
        Ok(matched)
    }

    /// Nearest ancestor-or-self element matching the selector.
    pub(crate) fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut current = Some(node);
        while let Some(id) = current {
            if self.element(id).is_some()
                && groups
                    .iter()
                    .any(|chain| self.matches_selector_chain(id, chain))
            {
                return Ok(Some(id));
            }
            current = self.parent(id);
        }
        Ok(None)
    }
}
