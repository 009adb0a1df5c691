use super::*;

impl Dom {
    pub(crate) fn matches_step(&self, node: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };

        if let Some(tag) = &step.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &step.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        for class_name in &step.classes {
            if !has_class(element, class_name) {
                return false;
            }
        }

        for cond in &step.attrs {
            if !self.matches_attr_condition(element, cond) {
                return false;
            }
        }

        for pseudo in &step.pseudo_classes {
            if !self.matches_pseudo_class(node, element, pseudo) {
                return false;
            }
        }

        true
    }

    fn matches_attr_condition(&self, element: &Element, cond: &SelectorAttrCondition) -> bool {
        match cond {
            SelectorAttrCondition::Exists { key } => element.attrs.contains_key(key),
            SelectorAttrCondition::Eq { key, value } => {
                element.attrs.get(key).is_some_and(|v| v == value)
            }
            SelectorAttrCondition::StartsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|v| !value.is_empty() && v.starts_with(value)),
            SelectorAttrCondition::EndsWith { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|v| !value.is_empty() && v.ends_with(value)),
            SelectorAttrCondition::Contains { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|v| !value.is_empty() && v.contains(value)),
            SelectorAttrCondition::Includes { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|v| v.split_ascii_whitespace().any(|token| token == value)),
        }
    }

    fn matches_pseudo_class(
        &self,
        node: NodeId,
        element: &Element,
        pseudo: &SelectorPseudoClass,
    ) -> bool {
        match pseudo {
            SelectorPseudoClass::Checked => element.checked,
            SelectorPseudoClass::Disabled => element.disabled,
            SelectorPseudoClass::Enabled => !element.disabled,
            SelectorPseudoClass::Not(selectors) => !selectors
                .iter()
                .any(|chain| self.matches_selector_chain(node, chain)),
        }
    }

    /// Whether `node` matches the full chain, evaluated right to left with
    /// `node` as the rightmost subject.
    pub(crate) fn matches_selector_chain(&self, node: NodeId, chain: &[SelectorPart]) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        if !self.matches_step(node, &last.step) {
            return false;
        }
        self.matches_chain_prefix(node, rest, last.combinator)
    }

    fn matches_chain_prefix(
        &self,
        node: NodeId,
        prefix: &[SelectorPart],
        combinator: Option<SelectorCombinator>,
    ) -> bool {
        let Some((last, rest)) = prefix.split_last() else {
            return true;
        };

        match combinator.unwrap_or(SelectorCombinator::Descendant) {
            SelectorCombinator::Descendant => {
                let mut current = self.parent(node);
                while let Some(ancestor) = current {
                    if self.matches_step(ancestor, &last.step)
                        && self.matches_chain_prefix(ancestor, rest, last.combinator)
                    {
                        return true;
                    }
                    current = self.parent(ancestor);
                }
                false
            }
            SelectorCombinator::Child => {
                let Some(parent) = self.parent(node) else {
                    return false;
                };
                self.matches_step(parent, &last.step)
                    && self.matches_chain_prefix(parent, rest, last.combinator)
            }
            SelectorCombinator::AdjacentSibling => {
                let Some(prev) = self.previous_element_sibling(node) else {
                    return false;
                };
                self.matches_step(prev, &last.step)
                    && self.matches_chain_prefix(prev, rest, last.combinator)
            }
            SelectorCombinator::GeneralSibling => {
                let mut current = self.previous_element_sibling(node);
                while let Some(sibling) = current {
                    if self.matches_step(sibling, &last.step)
                        && self.matches_chain_prefix(sibling, rest, last.combinator)
                    {
                        return true;
                    }
                    current = self.previous_element_sibling(sibling);
                }
                false
            }
        }
    }

    pub(crate) fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&id| id == node)?;
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|&id| self.element(id).is_some())
    }
}
