use super::*;

mod selector_parsing {
    use super::*;

    #[test]
    fn parses_compound_step() {
        let groups = parse_selector_groups("input.autofocus[data-search-target]").unwrap();
        assert_eq!(groups.len(), 1);
        let step = &groups[0][0].step;
        assert_eq!(step.tag.as_deref(), Some("input"));
        assert_eq!(step.classes, vec!["autofocus".to_string()]);
        assert_eq!(
            step.attrs,
            vec![SelectorAttrCondition::Exists {
                key: "data-search-target".into()
            }]
        );
    }

    #[test]
    fn parses_groups_and_combinators() {
        let groups = parse_selector_groups("ul > li.item, #adder input[name=name]").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0][1].combinator,
            Some(SelectorCombinator::Child)
        );
        assert_eq!(
            groups[1][1].combinator,
            Some(SelectorCombinator::Descendant)
        );
    }

    #[test]
    fn parses_not_pseudo_class() {
        let groups = parse_selector_groups("li:not(.hide)").unwrap();
        let step = &groups[0][0].step;
        assert!(matches!(
            step.pseudo_classes.as_slice(),
            [SelectorPseudoClass::Not(_)]
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_selector_groups(""),
            Err(Error::UnsupportedSelector(_))
        ));
        assert!(matches!(
            parse_selector_groups("li >"),
            Err(Error::UnsupportedSelector(_))
        ));
        assert!(matches!(
            parse_selector_groups("[unclosed"),
            Err(Error::UnsupportedSelector(_))
        ));
    }
}

mod html_parsing {
    use super::*;

    #[test]
    fn implicit_li_close() {
        let dom = parse_html("<ul><li>one<li>two</ul>").unwrap();
        let list = dom.query_selector("ul").unwrap().unwrap();
        let items = dom.query_selector_all_from(list, "li").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(dom.text_content(items[0]), "one");
        assert_eq!(dom.text_content(items[1]), "two");
    }

    #[test]
    fn bare_attribute_defaults_to_true() {
        let dom = parse_html("<dialog open></dialog>").unwrap();
        let dialog = dom.query_selector("dialog").unwrap().unwrap();
        assert_eq!(dom.attr(dialog, "open"), Some("true"));
    }

    #[test]
    fn character_references_decode_in_text() {
        let dom = parse_html("<span>Fish &amp; Chips</span>").unwrap();
        let span = dom.query_selector("span").unwrap().unwrap();
        assert_eq!(dom.text_content(span), "Fish & Chips");
    }

    #[test]
    fn script_body_is_raw_text() {
        let dom = parse_html("<script>if (a < b) { go(); }</script><p>after</p>").unwrap();
        let script = dom.query_selector("script").unwrap().unwrap();
        assert_eq!(dom.text_content(script), "if (a < b) { go(); }");
        assert!(dom.query_selector("p").unwrap().is_some());
    }

    #[test]
    fn unclosed_comment_is_an_error() {
        assert!(matches!(
            parse_html("<!-- nope"),
            Err(Error::HtmlParse(_))
        ));
    }
}

mod class_operations {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut dom = parse_html(r#"<li class="item"></li>"#).unwrap();
        let li = dom.query_selector("li").unwrap().unwrap();
        dom.class_add(li, "done");
        dom.class_add(li, "done");
        assert_eq!(dom.attr(li, "class"), Some("item done"));
    }

    #[test]
    fn remove_drops_empty_class_attr() {
        let mut dom = parse_html(r#"<li class="item"></li>"#).unwrap();
        let li = dom.query_selector("li").unwrap().unwrap();
        dom.class_remove(li, "item");
        assert_eq!(dom.attr(li, "class"), None);
    }

    #[test]
    fn closest_matches_self_first() {
        let dom = parse_html(r#"<li class="item"><input type="checkbox"></li>"#).unwrap();
        let li = dom.query_selector("li").unwrap().unwrap();
        let input = dom.query_selector("input").unwrap().unwrap();
        assert_eq!(dom.closest(input, "li").unwrap(), Some(li));
        assert_eq!(dom.closest(li, "li").unwrap(), Some(li));
    }
}

mod matching {
    use super::*;

    #[test]
    fn checked_pseudo_tracks_live_state() {
        let mut dom = parse_html(r#"<input type="checkbox">"#).unwrap();
        let input = dom.query_selector("input").unwrap().unwrap();
        assert!(!dom.matches_selector(input, "input:checked").unwrap());
        dom.set_checked(input, true);
        assert!(dom.matches_selector(input, "input:checked").unwrap());
    }

    #[test]
    fn sibling_combinators() {
        let dom = parse_html("<ul><li id=a></li><li id=b></li><li id=c></li></ul>").unwrap();
        let c = dom.by_id("c").unwrap();
        assert!(dom.matches_selector(c, "#b + li").unwrap());
        assert!(dom.matches_selector(c, "#a ~ li").unwrap());
        assert!(!dom.matches_selector(c, "#a + li").unwrap());
    }
}

mod filter_engine {
    use super::*;

    fn grocery_dom() -> Dom {
        parse_html(
            r##"
            <input id="search" data-search-target="#list">
            <ul id="list">
              <li class="item"><span class="name">Milk</span><small>dairy</small></li>
              <li class="item"><span class="name">Bread</span></li>
            </ul>
            "##,
        )
        .unwrap()
    }

    #[test]
    fn display_text_prefers_name_descendant() {
        let dom = grocery_dom();
        let item = dom.query_selector(".item").unwrap().unwrap();
        assert_eq!(filter::item_display_text(&dom, item).unwrap(), "Milk");
    }

    #[test]
    fn filter_hides_non_matching_items_only() {
        let mut dom = grocery_dom();
        let control = dom.by_id("search").unwrap();
        dom.set_value(control, "bre");
        filter::apply_filter(&mut dom, control).unwrap();

        let items = dom.query_selector_all(".item").unwrap();
        assert!(dom.class_contains(items[0], "hide"));
        assert!(!dom.class_contains(items[1], "hide"));
    }

    #[test]
    fn fold_equates_composed_and_decomposed_forms() {
        assert_eq!(
            filter::fold_for_search("caf\u{00e9}"),
            filter::fold_for_search("cafe\u{0301}")
        );
    }

    #[test]
    fn control_without_target_is_skipped() {
        let mut dom = parse_html(r#"<input id="lone"><li class="item">x</li>"#).unwrap();
        let control = dom.by_id("lone").unwrap();
        dom.set_value(control, "zzz");
        filter::apply_filter(&mut dom, control).unwrap();
        let item = dom.query_selector(".item").unwrap().unwrap();
        assert!(!dom.class_contains(item, "hide"));
    }
}

mod row_toggle {
    use super::*;

    #[test]
    fn marker_equals_checked_state() {
        let mut dom =
            parse_html(r#"<ul><li class="item"><input type="checkbox"></li></ul>"#).unwrap();
        let input = dom.query_selector("input").unwrap().unwrap();
        let li = dom.query_selector("li").unwrap().unwrap();

        dom.set_checked(input, true);
        rows::toggle_row_done(&mut dom, input).unwrap();
        assert!(dom.class_contains(li, "done"));

        dom.set_checked(input, false);
        rows::toggle_row_done(&mut dom, input).unwrap();
        assert!(!dom.class_contains(li, "done"));
    }

    #[test]
    fn checkbox_outside_row_is_skipped() {
        let mut dom = parse_html(r#"<input type="checkbox" checked>"#).unwrap();
        let input = dom.query_selector("input").unwrap().unwrap();
        rows::toggle_row_done(&mut dom, input).unwrap();
        assert!(!dom.class_contains(input, "done"));
    }
}

mod dom_mutation {
    use super::*;

    #[test]
    fn set_inner_html_replaces_children_and_reindexes() {
        let mut dom = parse_html(r#"<div id="region"><p id="old">old</p></div>"#).unwrap();
        let region = dom.by_id("region").unwrap();
        dom.set_inner_html(region, r#"<p id="new">new</p>"#).unwrap();
        assert!(dom.by_id("old").is_none());
        assert!(dom.by_id("new").is_some());
        assert_eq!(dom.text_content(region), "new");
    }

    #[test]
    fn set_inner_html_parse_failure_leaves_tree_unchanged() {
        let mut dom = parse_html(r#"<div id="region"><p>old</p></div>"#).unwrap();
        let region = dom.by_id("region").unwrap();
        assert!(dom.set_inner_html(region, "<!-- broken").is_err());
        assert_eq!(dom.text_content(region), "old");
    }

    #[test]
    fn dump_node_emits_sorted_attrs() {
        let dom = parse_html(r#"<li id="x" class="item done">Milk</li>"#).unwrap();
        let li = dom.query_selector("li").unwrap().unwrap();
        assert_eq!(
            dom.dump_node(li),
            r#"<li class="item done" id="x">Milk</li>"#
        );
    }
}
