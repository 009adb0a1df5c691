use pagewire::Page;

const APP_PAGE: &str = r##"
<main id="app">
  <form id="adder" data-item-adder data-swap-target="#groceries">
    <input name="name" id="new-name">
    <button type="submit">Add</button>
  </form>
  <ul id="groceries">
    <li class="item"><span class="name">Milk</span></li>
  </ul>
  <button id="edit-trigger" type="button" data-swap-target="#editor">Edit</button>
  <dialog id="editor"></dialog>
</main>
"##;

const EDITOR_FRAGMENT: &str = r##"
<form id="edit-form" data-swap-target="#groceries">
  <input name="name" value="Milk">
  <button type="button" data-action="cancel" id="cancel-edit">Cancel</button>
  <button type="submit">Save</button>
</form>
"##;

#[test]
fn adder_error_lands_on_the_name_field() {
    let mut page = Page::from_html(APP_PAGE).unwrap();

    page.type_text("#new-name", "Milk").unwrap();
    page.submit("#adder").unwrap();
    assert_eq!(page.pending_exchange_count(), 1);

    page.respond_error(422, "item already exists").unwrap();

    assert_eq!(page.custom_validity("#new-name").unwrap(), "item already exists");
    assert_eq!(page.take_validity_reports(), vec!["item already exists"]);
    assert!(page.take_alerts().is_empty());
}

#[test]
fn next_input_clears_the_stale_validity_message() {
    let mut page = Page::from_html(APP_PAGE).unwrap();

    page.submit("#adder").unwrap();
    page.respond_error(422, "name is required").unwrap();
    assert_eq!(page.custom_validity("#new-name").unwrap(), "name is required");

    page.type_text("#new-name", "E").unwrap();
    assert_eq!(page.custom_validity("#new-name").unwrap(), "");
}

#[test]
fn pending_validity_message_blocks_resubmission() {
    let mut page = Page::from_html(APP_PAGE).unwrap();

    page.submit("#adder").unwrap();
    page.respond_error(422, "name is required").unwrap();

    // The field is invalid until the user edits it.
    page.submit("#adder").unwrap();
    assert_eq!(page.pending_exchange_count(), 0);

    page.type_text("#new-name", "Eggs").unwrap();
    page.submit("#adder").unwrap();
    assert_eq!(page.pending_exchange_count(), 1);
}

#[test]
fn required_field_without_a_value_blocks_submission() {
    let mut page = Page::from_html(
        r##"
        <form id="f" data-swap-target="#r">
          <input name="name" id="n" required>
        </form>
        <div id="r"></div>
        "##,
    )
    .unwrap();

    page.submit("#f").unwrap();
    assert_eq!(page.pending_exchange_count(), 0);

    page.type_text("#n", "Eggs").unwrap();
    page.submit("#f").unwrap();
    assert_eq!(page.pending_exchange_count(), 1);
}

#[test]
fn error_outside_an_adder_alerts_the_body_verbatim() {
    let mut page = Page::from_html(APP_PAGE).unwrap();

    page.click("#edit-trigger").unwrap();
    page.respond_error(500, "internal server error: editor unavailable")
        .unwrap();

    assert_eq!(
        page.take_alerts(),
        vec!["internal server error: editor unavailable"]
    );
    assert!(page.take_validity_reports().is_empty());
}

#[test]
fn successful_swap_replaces_the_target_region() {
    let mut page = Page::from_html(APP_PAGE).unwrap();

    page.type_text("#new-name", "Eggs").unwrap();
    page.submit("#adder").unwrap();
    page.respond_success(
        r##"
        <li class="item"><span class="name">Milk</span></li>
        <li class="item"><span class="name">Eggs</span></li>
        "##,
    )
    .unwrap();

    assert_eq!(
        page.visible_item_names("#groceries").unwrap(),
        vec!["Milk", "Eggs"]
    );
    assert_eq!(page.pending_exchange_count(), 0);
}

#[test]
fn dialog_opens_on_swap_and_closes_on_cancel() {
    let mut page = Page::from_html(APP_PAGE).unwrap();
    page.assert_exists("dialog[open]", false).unwrap();

    page.click("#edit-trigger").unwrap();
    page.respond_success(EDITOR_FRAGMENT).unwrap();
    page.assert_exists("dialog[open]", true).unwrap();

    page.click("#cancel-edit").unwrap();
    page.assert_exists("dialog[open]", false).unwrap();
    page.assert_exists("#editor", true).unwrap();
}

#[test]
fn dialog_closes_optimistically_on_submit() {
    let mut page = Page::from_html(APP_PAGE).unwrap();

    page.click("#edit-trigger").unwrap();
    page.respond_success(EDITOR_FRAGMENT).unwrap();
    page.assert_exists("dialog[open]", true).unwrap();

    page.submit("#edit-form").unwrap();

    // Closed before the exchange completes.
    page.assert_exists("dialog[open]", false).unwrap();
    assert_eq!(page.pending_exchange_count(), 1);

    // A late failure does not reopen it.
    page.respond_error(409, "conflicting edit").unwrap();
    page.assert_exists("dialog[open]", false).unwrap();
    assert_eq!(page.take_alerts(), vec!["conflicting edit"]);
}

#[test]
fn swap_whose_target_vanished_is_dropped() {
    let mut page = Page::from_html(
        r##"
        <form id="f" data-swap-target="#gone">
          <button type="submit">Go</button>
        </form>
        "##,
    )
    .unwrap();

    page.submit("#f").unwrap();
    let before = page.dump_dom();
    page.respond_success("<p>late</p>").unwrap();
    assert_eq!(page.dump_dom(), before);
}

#[test]
fn responding_without_a_pending_exchange_is_an_error() {
    let mut page = Page::from_html("<p>static</p>").unwrap();
    assert!(page.respond_success("<p>x</p>").is_err());
    assert!(page.respond_error(500, "x").is_err());
}

#[test]
fn adder_forms_inserted_by_a_swap_are_wired() {
    let mut page = Page::from_html(
        r##"
        <button id="load" type="button" data-swap-target="#region">Load</button>
        <div id="region"></div>
        "##,
    )
    .unwrap();

    page.click("#load").unwrap();
    page.respond_success(
        r##"
        <form id="adder2" data-item-adder data-swap-target="#region">
          <input name="name" id="late-name">
        </form>
        "##,
    )
    .unwrap();

    page.submit("#adder2").unwrap();
    page.respond_error(400, "bad name").unwrap();

    assert_eq!(page.custom_validity("#late-name").unwrap(), "bad name");
    assert!(page.take_alerts().is_empty());
}

#[test]
fn exchanges_complete_oldest_first() {
    let mut page = Page::from_html(
        r##"
        <button id="b1" type="button" data-swap-target="#r1">One</button>
        <button id="b2" type="button" data-swap-target="#r2">Two</button>
        <div id="r1"></div>
        <div id="r2"></div>
        "##,
    )
    .unwrap();

    page.click("#b1").unwrap();
    page.click("#b2").unwrap();
    assert_eq!(page.pending_exchange_count(), 2);

    page.respond_success("<p>one</p>").unwrap();
    page.assert_text("#r1", "one").unwrap();
    page.assert_text("#r2", "").unwrap();

    page.respond_error(502, "two failed").unwrap();
    assert_eq!(page.take_alerts(), vec!["two failed"]);
}

#[test]
fn attention_focus_does_not_rerun_after_swaps() {
    let mut page = Page::from_html(
        r##"
        <input id="search" class="autofocus">
        <button id="load" type="button" data-swap-target="#region">Load</button>
        <div id="region"></div>
        "##,
    )
    .unwrap();
    page.assert_focused("#search").unwrap();

    page.click("#load").unwrap();
    page.respond_success(r##"<input id="late" class="autofocus">"##)
        .unwrap();

    page.assert_focused("#search").unwrap();
    assert!(page.assert_focused("#late").is_err());
}

#[test]
fn trace_records_dispatch_and_exchange_lines() {
    let mut page = Page::from_html(APP_PAGE).unwrap();
    page.enable_trace();

    page.type_text("#new-name", "Eggs").unwrap();
    page.submit("#adder").unwrap();
    page.respond_error(422, "nope").unwrap();

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.contains("event input")));
    assert!(logs.iter().any(|line| line.contains("exchange started")));
    assert!(logs.iter().any(|line| line.contains("status 422")));
}
