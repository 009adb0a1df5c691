use super::*;

// Dialog open state lives entirely in the `open` attribute; there is no
// shadow bookkeeping to drift out of sync with the document.
impl Page {
    /// `closed -> open` when a successful fragment swap targeted the dialog.
    pub(crate) fn open_dialog_on_swap(&mut self, event: &EventState) {
        let target = event.target;
        if self
            .dom
            .tag_name(target)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("dialog"))
        {
            self.dom.set_attr(target, "open", "true");
        }
    }

    /// `open -> closed` on a click that lands on (or inside) a cancel
    /// control within the dialog.
    pub(crate) fn close_dialog_on_cancel(&mut self, event: &EventState) -> Result<()> {
        let Some(cancel) = self.dom.closest(event.target, "[data-action=cancel]")? else {
            return Ok(());
        };
        let Some(dialog) = self.dom.find_ancestor_by_tag(cancel, "dialog") else {
            return Ok(());
        };
        self.close_dialog(dialog);
        Ok(())
    }

    /// `open -> closed` on any submission inside the dialog. The close is
    /// optimistic: it does not wait for the exchange to complete, and a
    /// failed exchange reopens nothing.
    pub(crate) fn close_dialog_on_submit(&mut self, event: &EventState) {
        if let Some(dialog) = self.dom.find_ancestor_by_tag(event.target, "dialog") {
            self.close_dialog(dialog);
        }
    }

    fn close_dialog(&mut self, dialog: NodeId) {
        if self.dom.has_attr(dialog, "open") {
            self.dom.remove_attr(dialog, "open");
            if self
                .dom
                .active_element()
                .is_some_and(|active| active == dialog || self.dom.is_descendant_of(active, dialog))
            {
                self.dom.active_element = None;
            }
        }
    }
}
