use super::*;

const FORM: &str = r#"<!DOCTYPE html>
<html><head><title>Form</title></head>
<body>
  <p id="intro">Name: <b>____</b></p>
  <table><tr><td>Age</td><td></td></tr></table>
</body></html>"#;

#[test]
fn test_parse_builds_html_skeleton() {
    let doc = Document::parse(FORM);
    assert!(doc.head().is_some());
    assert!(doc.body().is_some());
    assert_eq!(doc.elements_by_tag("td").len(), 2);
}

#[test]
fn test_parse_fragment_gets_body() {
    let doc = Document::parse("<p>hello</p>");
    let body = doc.body().unwrap();
    let p = doc.first_by_tag("p").unwrap();
    assert_eq!(doc.parent(p), Some(body));
}

#[test]
fn test_text_content_concatenates_descendants() {
    let doc = Document::parse(FORM);
    let p = doc.first_by_tag("p").unwrap();
    assert_eq!(doc.text_content(p), "Name: ____");
}

#[test]
fn test_descendants_document_order() {
    let doc = Document::parse("<div><p>a</p><span>b</span></div><p>c</p>");
    let tags: Vec<&str> = doc
        .descendants(doc.body().unwrap())
        .filter_map(|id| doc.tag_name(id))
        .collect();
    assert_eq!(tags, vec!["div", "p", "span", "p"]);
}

#[test]
fn test_ancestors_nearest_first() {
    let doc = Document::parse(FORM);
    let td = doc.first_by_tag("td").unwrap();
    let tags: Vec<&str> = doc.ancestors(td).filter_map(|id| doc.tag_name(id)).collect();
    assert_eq!(tags, vec!["tr", "tbody", "table", "body", "html"]);
}

#[test]
fn test_attribute_roundtrip() {
    let mut doc = Document::parse(FORM);
    let p = doc.first_by_tag("p").unwrap();
    assert_eq!(doc.attr(p, "id"), Some("intro"));

    doc.set_attr(p, "data-x", "1");
    doc.set_attr(p, "data-x", "2");
    assert_eq!(doc.attr(p, "data-x"), Some("2"));
    assert_eq!(doc.remove_attr(p, "data-x"), Some("2".to_string()));
    assert!(!doc.has_attr(p, "data-x"));
}

#[test]
fn test_class_editing() {
    let mut doc = Document::parse(r#"<p class="a  b">x</p>"#);
    let p = doc.first_by_tag("p").unwrap();
    doc.add_class(p, "editable");
    doc.add_class(p, "editable");
    assert_eq!(doc.attr(p, "class"), Some("a  b editable"));

    doc.remove_class(p, "a");
    assert_eq!(doc.attr(p, "class"), Some("b editable"));
    doc.remove_class(p, "b");
    doc.remove_class(p, "editable");
    assert!(!doc.has_attr(p, "class"));
}

#[test]
fn test_style_defaults_do_not_override() {
    let mut doc = Document::parse(r#"<span style="cursor: move">x</span>"#);
    let span = doc.first_by_tag("span").unwrap();
    doc.set_style_default(span, "cursor", "text");
    doc.set_style_default(span, "min-width", "50px");
    assert_eq!(doc.style_property(span, "cursor").as_deref(), Some("move"));
    assert_eq!(doc.style_property(span, "min-width").as_deref(), Some("50px"));

    doc.update_style(span, |style| {
        style.remove("cursor");
        style.remove("min-width");
    });
    assert!(!doc.has_attr(span, "style"));
}

#[test]
fn test_set_text_content_replaces_markup() {
    let mut doc = Document::parse(FORM);
    let p = doc.first_by_tag("p").unwrap();
    doc.set_text_content(p, "Name:");
    assert_eq!(doc.children(p).len(), 1);
    assert_eq!(doc.text_content(p), "Name:");
    assert!(doc.elements_by_tag("b").is_empty());

    doc.set_text_content(p, "");
    assert!(doc.children(p).is_empty());
}

#[test]
fn test_append_child_moves_node() {
    let mut doc = Document::parse("<div id=a></div><div id=b></div>");
    let divs = doc.elements_by_tag("div");
    let img = doc.create_element("img", &[("src", "x.png")]);
    doc.append_child(divs[0], img);
    doc.append_child(divs[1], img);
    assert!(doc.children(divs[0]).is_empty());
    assert_eq!(doc.children(divs[1]), &[img]);
}

#[test]
fn test_serialize_void_and_escaping() {
    let mut doc = Document::parse("<p></p>");
    let p = doc.first_by_tag("p").unwrap();
    let img = doc.create_element("img", &[("alt", "a \"quoted\" name")]);
    doc.append_child(p, img);
    let text = doc.create_text("1 < 2 & 3");
    doc.append_child(p, text);

    let html = doc.outer_html(p).unwrap();
    assert_eq!(html, r#"<p><img alt="a &quot;quoted&quot; name">1 &lt; 2 &amp; 3</p>"#);
}

#[test]
fn test_to_html_reparses_to_same_text() {
    let doc = Document::parse(FORM);
    let html = doc.to_html().unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));

    let reparsed = Document::parse(&html);
    let body = reparsed.body().unwrap();
    assert_eq!(
        reparsed.text_content(body),
        doc.text_content(doc.body().unwrap())
    );
}

#[test]
fn test_clone_is_deep() {
    let doc = Document::parse(FORM);
    let mut copy = doc.clone();
    let p = copy.first_by_tag("p").unwrap();
    copy.set_text_content(p, "changed");
    let original_p = doc.first_by_tag("p").unwrap();
    assert_eq!(doc.text_content(original_p), "Name: ____");
}

#[test]
fn test_import_copies_subtree() {
    let source = Document::parse(FORM);
    let table = source.first_by_tag("table").unwrap();

    let mut target = Document::parse("<div id=host></div>");
    let host = target.first_by_tag("div").unwrap();
    let copy = target.import(&source, table);
    assert!(!target.is_attached(copy));
    target.append_child(host, copy);

    assert!(target.is_attached(copy));
    assert_eq!(
        target.outer_html(copy).unwrap(),
        source.outer_html(table).unwrap()
    );
}
