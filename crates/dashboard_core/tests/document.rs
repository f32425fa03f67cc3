use dashboard_core::{
    append_command, build_card, progress_command, DomCommand, HtmlDocument, LogKind,
    RenderError, RenderSurface,
};
use pretty_assertions::assert_eq;

fn doc_with_card(job_id: &str) -> HtmlDocument {
    let mut doc = HtmlDocument::new();
    doc.apply(build_card(job_id, "fw")).expect("insert card");
    doc
}

#[test]
fn new_card_starts_empty_at_zero() {
    let doc = doc_with_card("j1");
    assert_eq!(doc.list_len("log_phase_j1"), Ok(0));
    assert_eq!(doc.list_len("log_module_j1"), Ok(0));
    assert_eq!(doc.progress("pBar_j1").map(|p| p.label()), Some("0%".to_string()));
    assert_eq!(doc.is_finished("Container_j1"), Some(false));
}

#[test]
fn second_insert_for_same_job_is_rejected() {
    let mut doc = doc_with_card("j1");
    assert_eq!(
        doc.apply(build_card("j1", "fw")),
        Err(RenderError::DuplicateElement {
            element_id: "Container_j1".to_string()
        })
    );
    assert_eq!(doc.card_count(), 1);
}

#[test]
fn same_progress_twice_renders_identical_markup() {
    let mut doc = doc_with_card("j1");
    doc.apply(progress_command("j1", 42.4)).unwrap();
    let first = doc.to_html();
    doc.apply(progress_command("j1", 42.4)).unwrap();
    assert_eq!(doc.to_html(), first);
    assert!(first.contains(r#"aria-valuenow="42""#));
    assert!(first.contains(r#"style="width: 42%">42%</div>"#));
}

#[test]
fn log_text_is_escaped_in_markup() {
    let mut doc = doc_with_card("j1");
    doc.apply(append_command("j1", LogKind::Module, "<img src=x onerror=alert(1)>"))
        .unwrap();

    assert_eq!(
        doc.list_entries("log_module_j1"),
        Some(&["<img src=x onerror=alert(1)>".to_string()][..])
    );
    let html = doc.to_html();
    assert!(html.contains("<li>&lt;img src=x onerror=alert(1)&gt;</li>"));
    assert!(!html.contains("<img"));
}

#[test]
fn cards_render_in_insertion_order_inside_main() {
    let mut doc = HtmlDocument::new();
    doc.apply(build_card("b", "second")).unwrap();
    doc.apply(build_card("a", "first")).unwrap();
    doc.set_footer("Status: Open");

    let html = doc.to_html();
    let main = html.find(r#"<div class="main" id="main">"#).expect("container");
    let b = html.find(r#"id="Container_b""#).expect("card b");
    let a = html.find(r#"id="Container_a""#).expect("card a");
    assert!(main < b && b < a);
    assert!(html.contains(r#"href="/log/a""#));
    assert!(html.contains("<footer>Status: Open</footer>"));
}

#[test]
fn updates_to_unknown_elements_fail() {
    let mut doc = HtmlDocument::new();
    assert_eq!(
        doc.apply(append_command("ghost", LogKind::Phase, "x")),
        Err(RenderError::MissingElement {
            element_id: "log_phase_ghost".to_string()
        })
    );
    assert_eq!(
        doc.list_len("log_module_ghost"),
        Err(RenderError::MissingElement {
            element_id: "log_module_ghost".to_string()
        })
    );
}

#[test]
fn region_kinds_are_checked() {
    let mut doc = doc_with_card("j1");
    assert!(matches!(
        doc.apply(DomCommand::AppendListItem {
            list_id: "pBar_j1".to_string(),
            text: "x".to_string(),
        }),
        Err(RenderError::WrongKind { .. })
    ));
    assert!(matches!(
        doc.apply(DomCommand::RemoveElement {
            element_id: "log_phase_j1".to_string(),
        }),
        Err(RenderError::WrongKind { .. })
    ));
}

#[test]
fn removing_a_card_detaches_all_regions() {
    let mut doc = doc_with_card("j1");
    doc.apply(DomCommand::RemoveElement {
        element_id: "Container_j1".to_string(),
    })
    .unwrap();

    for id in ["Container_j1", "pBar_j1", "log_phase_j1", "log_module_j1"] {
        assert!(!doc.contains(id), "{id} still attached");
    }
}
