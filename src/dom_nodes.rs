use super::*;

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Dom {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
            active_element: None,
        }
    }

    pub(crate) fn create_node(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            node_type,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let checked = attrs.contains_key("checked");
        let disabled = attrs.contains_key("disabled");
        let readonly = attrs.contains_key("readonly");
        let required = attrs.contains_key("required");
        let element = Element {
            tag_name,
            attrs,
            value,
            checked,
            disabled,
            readonly,
            required,
            custom_validity_message: String::new(),
        };
        let id = self.create_node(parent, NodeType::Element(element));
        self.index_id(id);
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(parent, NodeType::Text(text))
    }

    pub(crate) fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    pub(crate) fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id)?.first().copied()
    }

    pub(crate) fn index_id(&mut self, node: NodeId) {
        if let Some(element) = self.element(node) {
            if let Some(id) = element.attrs.get("id") {
                let id = id.clone();
                self.id_index.entry(id).or_default().push(node);
            }
        }
    }

    pub(crate) fn rebuild_id_index(&mut self) {
        self.id_index.clear();
        let mut stack = vec![self.root];
        let mut in_document_order = Vec::new();
        while let Some(node) = stack.pop() {
            in_document_order.push(node);
            for &child in self.children(node).iter().rev() {
                stack.push(child);
            }
        }
        for node in in_document_order {
            self.index_id(node);
        }
    }

    pub(crate) fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Concatenated text of the node's subtree, in document order.
    pub(crate) fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].node_type {
            NodeType::Text(text) => out.push_str(text),
            NodeType::Document | NodeType::Element(_) => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Replaces the node's children with the parsed fragment. The fragment is
    /// parsed before any mutation, so a parse failure leaves the tree
    /// unchanged.
    pub(crate) fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<()> {
        let fragment = parse_html(html)?;

        if self
            .active_element
            .is_some_and(|active| active == node || self.is_descendant_of(active, node))
        {
            self.active_element = None;
        }

        self.nodes[node.0].children.clear();
        let fragment_children = fragment.nodes[fragment.root.0].children.clone();
        for child in fragment_children {
            self.clone_subtree_from_dom(&fragment, child, node);
        }
        self.rebuild_id_index();
        Ok(())
    }

    fn clone_subtree_from_dom(&mut self, source: &Dom, source_node: NodeId, parent: NodeId) {
        let node_type = source.nodes[source_node.0].node_type.clone();
        let new_node = self.create_node(parent, node_type);
        for &child in &source.nodes[source_node.0].children {
            self.clone_subtree_from_dom(source, child, new_node);
        }
    }

    /// Elements of the whole document, in document order.
    pub(crate) fn collect_elements_dfs(&self) -> Vec<NodeId> {
        self.collect_elements_descendants_dfs(self.root)
    }

    /// Element descendants of `node` (excluding `node` itself), in document
    /// order.
    pub(crate) fn collect_elements_descendants_dfs(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.element(id).is_some() {
                out.push(id);
            }
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub(crate) fn find_ancestor_by_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self
                .tag_name(id)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Serializes the node's subtree back to HTML. Attributes are emitted in
    /// sorted order so snapshots are stable.
    pub(crate) fn dump_node(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.dump_node_into(node, &mut out);
        out
    }

    fn dump_node_into(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].node_type {
            NodeType::Document => {
                for &child in self.children(node) {
                    self.dump_node_into(child, out);
                }
            }
            NodeType::Text(text) => {
                out.push_str(&escape_html_text_for_serialization(text));
            }
            NodeType::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);

                let mut attrs: Vec<(&String, &String)> = element.attrs.iter().collect();
                attrs.sort_by_key(|(key, _)| key.as_str());
                for (key, value) in attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_html_attr_for_serialization(value));
                    out.push('"');
                }
                out.push('>');

                if is_void_tag(&element.tag_name) {
                    return;
                }

                for &child in self.children(node) {
                    self.dump_node_into(child, out);
                }

                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
            }
        }
    }
}
