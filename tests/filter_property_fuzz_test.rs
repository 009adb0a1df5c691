use pagewire::Page;
use proptest::prelude::*;

fn env_proptest_cases(default_cases: u32) -> u32 {
    std::env::var("PAGEWIRE_PROPTEST_CASES")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default_cases)
}

fn page_with_items(names: &[String]) -> Page {
    let mut html =
        String::from(r##"<input id="search" data-search-target="#list"><ul id="list">"##);
    for (index, name) in names.iter().enumerate() {
        html.push_str(&format!(
            r#"<li class="item"><input type="checkbox" id="check-{index}"><span class="name">{name}</span></li>"#
        ));
    }
    html.push_str("</ul>");
    Page::from_html(&html).unwrap()
}

// Names without leading or trailing spaces, so the rendered display text is
// exactly the generated string.
fn item_name() -> impl Strategy<Value = String> {
    "[a-zA-Z]([a-zA-Z ]{0,8}[a-zA-Z])?"
}

const ROW_COUNT: usize = 4;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: env_proptest_cases(64),
        ..ProptestConfig::default()
    })]

    #[test]
    fn visibility_matches_the_substring_rule(
        names in prop::collection::vec(item_name(), 1..8),
        query in "[a-zA-Z ]{0,6}",
    ) {
        let mut page = page_with_items(&names);
        page.type_text("#search", &query).unwrap();

        let folded_query = query.to_lowercase();
        let expected: Vec<String> = names
            .iter()
            .filter(|name| {
                query.is_empty() || name.to_lowercase().contains(&folded_query)
            })
            .cloned()
            .collect();

        prop_assert_eq!(page.visible_item_names("#list").unwrap(), expected);
    }

    #[test]
    fn reapplying_the_same_query_is_idempotent(
        names in prop::collection::vec(item_name(), 1..8),
        query in "[a-zA-Z]{0,6}",
    ) {
        let mut page = page_with_items(&names);

        page.type_text("#search", &query).unwrap();
        let once = page.dump_dom();
        page.type_text("#search", &query).unwrap();

        prop_assert_eq!(page.dump_dom(), once);
    }

    #[test]
    fn clearing_the_query_restores_the_initial_markup(
        names in prop::collection::vec(item_name(), 1..8),
        query in "[a-zA-Z]{0,6}",
    ) {
        let mut page = page_with_items(&names);
        let initial = page.dump_dom();

        page.type_text("#search", &query).unwrap();
        page.type_text("#search", "").unwrap();

        prop_assert_eq!(page.dump_dom(), initial);
    }

    #[test]
    fn row_markers_track_only_their_own_checkbox(
        ops in prop::collection::vec((0..ROW_COUNT, any::<bool>()), 0..16),
    ) {
        let names: Vec<String> = (0..ROW_COUNT).map(|i| format!("item {i}")).collect();
        let mut page = page_with_items(&names);

        let mut expected = [false; ROW_COUNT];
        for &(index, checked) in &ops {
            page.set_checked(&format!("#check-{index}"), checked).unwrap();
            expected[index] = checked;
        }

        for (index, &done) in expected.iter().enumerate() {
            page.assert_checked(&format!("#check-{index}"), done).unwrap();
        }
        prop_assert_eq!(
            page.done_count("#list").unwrap(),
            expected.iter().filter(|&&done| done).count()
        );
    }

    #[test]
    fn unchecking_everything_restores_the_initial_markup(
        ops in prop::collection::vec((0..ROW_COUNT, any::<bool>()), 0..16),
    ) {
        let names: Vec<String> = (0..ROW_COUNT).map(|i| format!("item {i}")).collect();
        let mut page = page_with_items(&names);
        let initial = page.dump_dom();

        for &(index, checked) in &ops {
            page.set_checked(&format!("#check-{index}"), checked).unwrap();
        }
        for index in 0..ROW_COUNT {
            page.set_checked(&format!("#check-{index}"), false).unwrap();
        }

        prop_assert_eq!(page.dump_dom(), initial);
    }
}
