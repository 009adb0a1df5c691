use super::*;

impl Page {
    /// Document-level fallback: surface a failed exchange's body as a
    /// blocking alert, verbatim.
    pub(crate) fn relay_error_to_alert(&mut self, event: &EventState) {
        let body = event.detail.clone().unwrap_or_default();
        self.alerts.push(body);
    }

    /// Adder-scoped relay: when the failed exchange originated inside an
    /// item-adder form, attach the body as the name field's custom validity
    /// message and report it, instead of alerting globally. Stopping
    /// propagation here is what keeps the document-level alert listener from
    /// firing. Falls through to the alert when the form has no name field.
    pub(crate) fn relay_error_to_adder_field(&mut self, event: &mut EventState) -> Result<()> {
        let form = event.current_target;
        let Some(field) = self.dom.query_selector_from(form, "input[name=name]")? else {
            return Ok(());
        };

        let body = event.detail.clone().unwrap_or_default();
        self.dom.set_custom_validity_message(field, &body);
        self.validity_reports.push(body);
        event.stop_propagation();
        Ok(())
    }

    /// The first input after a validity failure clears the stale message, so
    /// the field is submittable again once the user starts correcting it.
    pub(crate) fn clear_adder_validity(&mut self, event: &EventState) {
        let target = event.target;
        if self
            .dom
            .custom_validity_message(target)
            .is_some_and(|message| !message.is_empty())
        {
            self.dom.set_custom_validity_message(target, "");
        }
    }
}
