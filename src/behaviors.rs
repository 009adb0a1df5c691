use super::*;

/// A named behavior handler. Behaviors are wired as event listeners and
/// routed by name rather than held as closures, so wiring stays inspectable
/// and deduplicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behavior {
    FilterList,
    SuppressSearchNavigation,
    ClearAdderValidity,
    ToggleRowDone,
    RelayErrorToAlert,
    RelayErrorToAdderField,
    OpenDialogOnSwap,
    CloseDialogOnCancel,
    CloseDialogOnSubmit,
}

impl Page {
    /// Installs the behavior layer's listeners.
    ///
    /// Document-wide behaviors are delegated from the root, so they keep
    /// working for markup inserted by later fragment swaps. Adder-scoped
    /// error relay listens on each `form[data-item-adder]` directly; its
    /// position below the root lets it stop propagation before the
    /// document-level alert listener runs. Re-wiring after a swap is safe
    /// because listener registration deduplicates.
    pub(crate) fn wire_behaviors(&mut self) -> Result<()> {
        let root = self.dom.root;
        let delegated = [
            ("input", Behavior::FilterList),
            ("input", Behavior::ClearAdderValidity),
            ("change", Behavior::ToggleRowDone),
            ("submit", Behavior::SuppressSearchNavigation),
            ("submit", Behavior::CloseDialogOnSubmit),
            ("click", Behavior::CloseDialogOnCancel),
            ("augment:error", Behavior::RelayErrorToAlert),
            ("fragment:swapped", Behavior::OpenDialogOnSwap),
        ];
        for (event_type, behavior) in delegated {
            self.listeners.add(
                root,
                event_type,
                Listener {
                    behavior,
                    capture: false,
                },
            );
        }

        for form in self.dom.query_selector_all("form[data-item-adder]")? {
            self.listeners.add(
                form,
                "augment:error",
                Listener {
                    behavior: Behavior::RelayErrorToAdderField,
                    capture: false,
                },
            );
        }
        Ok(())
    }

    /// Focuses the first `.autofocus` element in document order. Runs once
    /// per page construction and never after fragment swaps.
    pub(crate) fn focus_first_attention_element(&mut self) {
        let first = self
            .dom
            .collect_elements_dfs()
            .into_iter()
            .find(|&node| self.dom.class_contains(node, "autofocus"));
        if let Some(node) = first {
            self.focus_node(node);
        }
    }

    /// Runs one behavior handler against the current event.
    ///
    /// A handler that cannot make sense of the markup it was handed (bad
    /// selector in a data attribute, say) is skipped with a trace line; one
    /// element's broken wiring never takes down dispatch for the rest of the
    /// document.
    pub(crate) fn run_behavior(&mut self, behavior: Behavior, event: &mut EventState) {
        let outcome = match behavior {
            Behavior::FilterList => filter::apply_filter(&mut self.dom, event.target),
            Behavior::SuppressSearchNavigation => self.suppress_search_navigation(event),
            Behavior::ClearAdderValidity => {
                self.clear_adder_validity(event);
                Ok(())
            }
            Behavior::ToggleRowDone => rows::toggle_row_done(&mut self.dom, event.target),
            Behavior::RelayErrorToAlert => {
                self.relay_error_to_alert(event);
                Ok(())
            }
            Behavior::RelayErrorToAdderField => self.relay_error_to_adder_field(event),
            Behavior::OpenDialogOnSwap => {
                self.open_dialog_on_swap(event);
                Ok(())
            }
            Behavior::CloseDialogOnCancel => self.close_dialog_on_cancel(event),
            Behavior::CloseDialogOnSubmit => {
                self.close_dialog_on_submit(event);
                Ok(())
            }
        };

        if let Err(err) = outcome {
            self.trace_line(format!("behavior {behavior:?} skipped: {err}"));
        }
    }

    // Filtering is a pure view concern; submitting the search form must never
    // navigate away from the page, match or no match.
    fn suppress_search_navigation(&mut self, event: &mut EventState) -> Result<()> {
        let form = event.target;
        if self
            .dom
            .query_selector_from(form, "[data-search-target]")?
            .is_some()
        {
            event.prevent_default();
        }
        Ok(())
    }
}
