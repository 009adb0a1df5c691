use super::*;

/// Recomputes a row's completion marker from its checkbox.
///
/// The `done` class on the nearest ancestor `li` is set to exactly the
/// control's current checked state; it is never accumulated from previous
/// events. A change event from something that is not a checkbox, or from a
/// checkbox outside any row, is skipped silently.
pub(crate) fn toggle_row_done(dom: &mut Dom, control: NodeId) -> Result<()> {
    if !dom.is_checkbox_input(control) {
        return Ok(());
    }
    let Some(row) = dom.closest(control, "li")? else {
        return Ok(());
    };
    let done = dom.checked(control);
    dom.class_toggle(row, "done", done);
    Ok(())
}
