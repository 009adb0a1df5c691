use super::*;

use crate::events::EventPhase;
use std::collections::VecDeque;

const TRACE_CAPACITY: usize = 256;
const ACTION_STACK_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Default)]
struct TraceState {
    enabled: bool,
    lines: VecDeque<String>,
}

/// A server-rendered page with its behavior layer wired up.
///
/// `Page` owns the document and drives everything a browser would: user
/// actions dispatch synchronous capture/target/bubble events, behaviors
/// recompute derived markers from the tree, and augmentation exchanges are
/// completed explicitly from the test via [`Page::respond_success`] and
/// [`Page::respond_error`].
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) alerts: Vec<String>,
    pub(crate) validity_reports: Vec<String>,
    pending_exchanges: VecDeque<PendingExchange>,
    trace: TraceState,
}

impl Page {
    /// Parses the fragment, wires the behavior layer and runs the one-shot
    /// attention focus pass.
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        let mut page = Page {
            dom,
            listeners: ListenerStore::default(),
            alerts: Vec::new(),
            validity_reports: Vec::new(),
            pending_exchanges: VecDeque::new(),
            trace: TraceState {
                enabled: std::env::var_os("PAGEWIRE_TRACE").is_some(),
                lines: VecDeque::new(),
            },
        };
        page.wire_behaviors()?;
        page.focus_first_attention_element();
        Ok(page)
    }

    // ----- user actions -----

    /// Types into a text control: sets the value, then dispatches `input`.
    /// Disabled and readonly controls swallow the keystrokes.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        if !self.dom.is_form_control(node) {
            return Err(self.type_mismatch(selector, "form control", node));
        }
        if self
            .dom
            .element(node)
            .is_some_and(|element| element.disabled || element.readonly)
        {
            return Ok(());
        }
        stacker::grow(ACTION_STACK_BYTES, || {
            self.dom.set_value(node, text);
            self.dispatch_event(node, "input", None, true, false);
            Ok(())
        })
    }

    /// Sets a checkbox's state directly. Dispatches `input` and `change`
    /// only when the state actually changed.
    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let node = self.select_one(selector)?;
        if !self.dom.is_checkbox_input(node) {
            return Err(self.type_mismatch(selector, "checkbox input", node));
        }
        stacker::grow(ACTION_STACK_BYTES, || {
            if self.dom.checked(node) != checked {
                self.dom.set_checked(node, checked);
                self.dispatch_event(node, "input", None, true, false);
                self.dispatch_event(node, "change", None, true, false);
            }
            Ok(())
        })
    }

    /// Clicks an element. After dispatch, the default action runs unless a
    /// listener prevented it: checkboxes toggle, submit controls submit
    /// their form, and standalone `data-swap-target` triggers start an
    /// exchange.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        stacker::grow(ACTION_STACK_BYTES, || self.click_node(node))
    }

    fn click_node(&mut self, node: NodeId) -> Result<()> {
        let event = self.dispatch_event(node, "click", None, true, true);
        if event.default_prevented {
            return Ok(());
        }

        if self.dom.is_checkbox_input(node) {
            let checked = !self.dom.checked(node);
            self.dom.set_checked(node, checked);
            self.dispatch_event(node, "input", None, true, false);
            self.dispatch_event(node, "change", None, true, false);
            return Ok(());
        }

        if self.dom.is_submit_control(node) {
            if let Some(form) = self.dom.find_ancestor_by_tag(node, "form") {
                return self.submit_form(form);
            }
        }

        if let Some(trigger) = self.dom.closest(node, "[data-swap-target]")? {
            if !self
                .dom
                .tag_name(trigger)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
            {
                self.enqueue_exchange(trigger);
            }
        }
        Ok(())
    }

    /// Submits the form matched by the selector, or the form enclosing the
    /// matched control.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        let Some(form) = self.dom.find_ancestor_by_tag(node, "form") else {
            return Err(self.type_mismatch(selector, "form or form control", node));
        };
        stacker::grow(ACTION_STACK_BYTES, || self.submit_form(form))
    }

    fn submit_form(&mut self, form: NodeId) -> Result<()> {
        if self.form_blocked_by_validation(form) {
            self.trace_line("submit blocked by form validation".to_string());
            return Ok(());
        }
        let event = self.dispatch_event(form, "submit", None, true, true);
        if event.default_prevented {
            return Ok(());
        }
        if self.dom.has_attr(form, "data-swap-target") {
            self.enqueue_exchange(form);
        } else {
            // Full-page navigation is outside this runtime.
            self.trace_line("submit default action: navigation (not modeled)".to_string());
        }
        Ok(())
    }

    // Constraint validation: a form does not submit while an enabled control
    // carries a custom validity message or an empty required value.
    fn form_blocked_by_validation(&self, form: NodeId) -> bool {
        self.dom
            .collect_elements_descendants_dfs(form)
            .into_iter()
            .filter(|&node| self.dom.is_form_control(node))
            .any(|node| {
                self.dom.element(node).is_some_and(|element| {
                    !element.disabled
                        && (!element.custom_validity_message.is_empty()
                            || (element.required && element.value.is_empty()))
                })
            })
    }

    /// Dispatches a plain bubbling event at the matched element.
    pub fn dispatch(&mut self, selector: &str, event_type: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        stacker::grow(ACTION_STACK_BYTES, || {
            self.dispatch_event(node, event_type, None, true, false);
            Ok(())
        })
    }

    // ----- augmentation exchange -----

    fn enqueue_exchange(&mut self, origin: NodeId) {
        let Some(target) = self.dom.attr(origin, "data-swap-target").map(str::to_string) else {
            return;
        };
        self.trace_line(format!("exchange started, target {target}"));
        self.pending_exchanges
            .push_back(PendingExchange { origin, target });
    }

    /// Completes the oldest pending exchange successfully: swaps the
    /// fragment into the target region atomically, re-wires behaviors for
    /// the new markup and fires `fragment:swapped` on the target.
    pub fn respond_success(&mut self, html: &str) -> Result<()> {
        let exchange = self
            .pending_exchanges
            .pop_front()
            .ok_or_else(|| Error::Behavior("no pending exchange to respond to".into()))?;

        let Some(target) = self.dom.query_selector(&exchange.target)? else {
            // The target selector no longer resolves; drop the response and
            // leave the document untouched.
            self.trace_line(format!(
                "swap target {} not found, response dropped",
                exchange.target
            ));
            return Ok(());
        };

        stacker::grow(ACTION_STACK_BYTES, || {
            self.dom.set_inner_html(target, html)?;
            self.wire_behaviors()?;
            self.trace_line(format!("exchange swapped into {}", exchange.target));
            self.dispatch_event(target, "fragment:swapped", None, true, false);
            Ok(())
        })
    }

    /// Completes the oldest pending exchange with a failure: fires
    /// `augment:error` carrying the body text, bubbling from the
    /// originating element. Never swallowed; with no listener overriding it,
    /// the document-level relay records a blocking alert.
    pub fn respond_error(&mut self, status: u16, body: &str) -> Result<()> {
        let exchange = self
            .pending_exchanges
            .pop_front()
            .ok_or_else(|| Error::Behavior("no pending exchange to respond to".into()))?;

        stacker::grow(ACTION_STACK_BYTES, || {
            self.trace_line(format!("exchange failed with status {status}"));
            self.dispatch_event(
                exchange.origin,
                "augment:error",
                Some(body.to_string()),
                true,
                false,
            );
            Ok(())
        })
    }

    /// Number of exchanges started but not yet completed.
    pub fn pending_exchange_count(&self) -> usize {
        self.pending_exchanges.len()
    }

    // ----- event dispatch -----

    pub(crate) fn dispatch_event(
        &mut self,
        target: NodeId,
        event_type: &str,
        detail: Option<String>,
        bubbles: bool,
        cancelable: bool,
    ) -> EventState {
        let mut event = EventState::new(event_type, target, bubbles, cancelable);
        event.detail = detail;

        let mut ancestors = Vec::new();
        let mut current = self.dom.parent(target);
        while let Some(node) = current {
            ancestors.push(node);
            current = self.dom.parent(node);
        }

        // Capture phase, root towards target.
        event.event_phase = EventPhase::Capture;
        for &node in ancestors.iter().rev() {
            if event.propagation_stopped {
                break;
            }
            self.run_listeners_at(node, &mut event, true);
        }

        // Target phase runs both capture and bubble listeners.
        if !event.propagation_stopped {
            event.event_phase = EventPhase::Target;
            self.run_listeners_at(target, &mut event, true);
        }
        if !event.propagation_stopped {
            self.run_listeners_at(target, &mut event, false);
        }

        if event.bubbles {
            event.event_phase = EventPhase::Bubble;
            for &node in &ancestors {
                if event.propagation_stopped {
                    break;
                }
                self.run_listeners_at(node, &mut event, false);
            }
        }

        self.trace_line(format!(
            "event {event_type} target {} default_prevented {}",
            self.node_label(target),
            event.default_prevented,
        ));
        event
    }

    fn run_listeners_at(&mut self, node: NodeId, event: &mut EventState, capture: bool) {
        event.current_target = node;
        for listener in self.listeners.listeners_for(node, &event.event_type) {
            if listener.capture != capture {
                continue;
            }
            self.trace_line(format!(
                "run {:?} for {} in {:?} phase",
                listener.behavior, event.event_type, event.event_phase
            ));
            self.run_behavior(listener.behavior, event);
            if event.propagation_stopped {
                break;
            }
        }
    }

    pub(crate) fn focus_node(&mut self, node: NodeId) {
        if self.dom.active_element() == Some(node) {
            return;
        }
        if let Some(previous) = self.dom.active_element() {
            self.dispatch_event(previous, "blur", None, false, false);
        }
        self.dom.active_element = Some(node);
        self.dispatch_event(node, "focus", None, false, false);
    }

    // ----- assertions -----

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.dom.text_content(node);
        if actual.trim() != expected {
            return Err(self.assertion_failed(selector, expected, actual.trim(), node));
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.dom.value(node).unwrap_or_default().to_string();
        if actual != expected {
            return Err(self.assertion_failed(selector, expected, &actual, node));
        }
        Ok(())
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.dom.checked(node);
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                &expected.to_string(),
                &actual.to_string(),
                node,
            ));
        }
        Ok(())
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.dom.class_contains(node, class_name);
        if actual != expected {
            return Err(self.assertion_failed(
                selector,
                &format!("class {class_name} present: {expected}"),
                &format!("class {class_name} present: {actual}"),
                node,
            ));
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str, expected: bool) -> Result<()> {
        let actual = self.dom.query_selector(selector)?.is_some();
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("exists: {expected}"),
                actual: format!("exists: {actual}"),
                dom_snippet: truncate_chars(&self.dom.dump_node(self.dom.root), 200),
            });
        }
        Ok(())
    }

    pub fn assert_focused(&self, selector: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        if self.dom.active_element() != Some(node) {
            let actual = match self.dom.active_element() {
                Some(active) => self.node_label(active),
                None => "nothing focused".to_string(),
            };
            return Err(self.assertion_failed(selector, "focused", &actual, node));
        }
        Ok(())
    }

    // ----- read-only queries -----

    /// Display names of the list's currently visible items, in document
    /// order.
    pub fn visible_item_names(&self, list_selector: &str) -> Result<Vec<String>> {
        let list = self.select_one(list_selector)?;
        let mut names = Vec::new();
        for item in self.dom.query_selector_all_from(list, ".item")? {
            if self.dom.class_contains(item, "hide") {
                continue;
            }
            names.push(filter::item_display_text(&self.dom, item)?.trim().to_string());
        }
        Ok(names)
    }

    /// Number of the list's items currently marked done. Computed on demand
    /// from the tree; nothing in the behavior layer consumes it.
    pub fn done_count(&self, list_selector: &str) -> Result<usize> {
        let list = self.select_one(list_selector)?;
        Ok(self
            .dom
            .query_selector_all_from(list, ".item")?
            .into_iter()
            .filter(|&item| self.dom.class_contains(item, "done"))
            .count())
    }

    /// The matched control's current custom validity message.
    pub fn custom_validity(&self, selector: &str) -> Result<String> {
        let node = self.select_one(selector)?;
        Ok(self
            .dom
            .custom_validity_message(node)
            .unwrap_or_default()
            .to_string())
    }

    /// Drains the alerts recorded by the document-level error relay.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Drains the validity reports triggered by the adder-scoped error
    /// relay.
    pub fn take_validity_reports(&mut self) -> Vec<String> {
        std::mem::take(&mut self.validity_reports)
    }

    /// Serializes the whole document back to HTML.
    pub fn dump_dom(&self) -> String {
        self.dom.dump_node(self.dom.root)
    }

    // ----- tracing -----

    pub fn enable_trace(&mut self) {
        self.trace.enabled = true;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.lines.drain(..).collect()
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        if !self.trace.enabled {
            return;
        }
        if self.trace.lines.len() == TRACE_CAPACITY {
            self.trace.lines.pop_front();
        }
        self.trace.lines.push_back(line);
    }

    // ----- helpers -----

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_label(&self, node: NodeId) -> String {
        match self.dom.element(node) {
            Some(element) => match element.attrs.get("id") {
                Some(id) => format!("<{} id={id}>", element.tag_name),
                None => format!("<{}>", element.tag_name),
            },
            None => "#node".to_string(),
        }
    }

    fn type_mismatch(&self, selector: &str, expected: &str, node: NodeId) -> Error {
        Error::TypeMismatch {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: self.node_label(node),
        }
    }

    fn assertion_failed(&self, selector: &str, expected: &str, actual: &str, node: NodeId) -> Error {
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            dom_snippet: truncate_chars(&self.dom.dump_node(node), 200),
        }
    }
}
