use super::*;

use unicode_normalization::UnicodeNormalization;

/// Recomputes visibility of every item in the list a search control points at.
///
/// The control declares its list with a `data-search-target` selector. An item
/// is visible iff the query is empty or the item's folded display text
/// contains the folded query as a substring. The whole list is recomputed on
/// every call; nothing is cached between events, so applying the same query
/// twice is a no-op.
pub(crate) fn apply_filter(dom: &mut Dom, control: NodeId) -> Result<()> {
    let Some(target) = dom.attr(control, "data-search-target").map(str::to_string) else {
        return Ok(());
    };
    let Some(list) = dom.query_selector(&target)? else {
        return Ok(());
    };

    let query = fold_for_search(dom.value(control).unwrap_or_default());

    for item in dom.query_selector_all_from(list, ".item")? {
        let text = item_display_text(dom, item)?;
        let visible = query.is_empty() || fold_for_search(&text).contains(&query);
        set_item_visibility(dom, item, visible);
    }
    Ok(())
}

/// Sets an item's visibility marker. The `hide` class is the only state:
/// present means hidden, absent means visible. Completion markers are never
/// touched here.
pub(crate) fn set_item_visibility(dom: &mut Dom, item: NodeId, visible: bool) {
    dom.class_toggle(item, "hide", !visible);
}

/// Display text of an item: its `.name` descendant when present, otherwise
/// the item's whole text content.
pub(crate) fn item_display_text(dom: &Dom, item: NodeId) -> Result<String> {
    let source = dom.query_selector_from(item, ".name")?.unwrap_or(item);
    Ok(dom.text_content(source))
}

/// NFC-normalize then lowercase, so composed and decomposed forms of the same
/// text compare equal.
pub(crate) fn fold_for_search(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}
