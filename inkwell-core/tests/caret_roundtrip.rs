//! End-to-end caret tests against a real `yrs` document.
//!
//! These drive the editor through the in-memory selection host the same way
//! a UI bridge would: selection-change events in, typed text in, `flush`
//! after every step.

use std::sync::Arc;

use inkwell_core::{
    anchor_for, resolve_position, Editor, EditorConfig, HostNode, InputEvent, LeafId,
    OffsetTable, Position, RootId, Run, RunAttributes, RunLayout, Selection, SelectionHost,
    TextEngine, VirtualSelection, YrsTextEngine,
};

fn hello_world() -> Arc<YrsTextEngine> {
    let engine = YrsTextEngine::default();
    engine.insert(0, "Hello ", None).unwrap();
    engine.insert(6, "World!", Some(&RunAttributes::BOLD)).unwrap();
    Arc::new(engine)
}

fn layout_of(runs: &[Run]) -> RunLayout {
    RunLayout::build(RootId::new(), runs, &OffsetTable::build(runs))
}

/// Reconcile `index` into a host caret, then read the caret back.
fn round_trip(layout: &RunLayout, index: usize) -> Option<Position> {
    let mut host = VirtualSelection::new();
    inkwell_core::reconcile(
        Some(Position::new(index)),
        layout,
        &mut host,
        &EditorConfig::default(),
    );
    resolve_position(host.selection().as_ref(), layout)
}

#[test]
fn test_every_index_round_trips() {
    let layouts = [
        layout_of(&[
            Run::plain("Hello "),
            Run::styled("World!", RunAttributes::BOLD),
        ]),
        layout_of(&[
            Run::styled("a", RunAttributes::ITALIC),
            Run::plain("bc"),
            Run::styled("def", RunAttributes::BOLD),
            Run::plain("😀g"),
        ]),
        layout_of(&[Run::plain("single")]),
    ];

    for layout in &layouts {
        for index in 0..=layout.total_len() {
            assert_eq!(
                round_trip(layout, index),
                Some(Position::new(index)),
                "index {index} did not survive the round trip"
            );
        }
    }
}

#[test]
fn test_boundary_resolves_into_the_next_run() {
    let layout = layout_of(&[
        Run::plain("Hello "),
        Run::styled("World!", RunAttributes::BOLD),
    ]);

    let anchor = anchor_for(Position::new(6), &layout).unwrap();
    assert_eq!(anchor.leaf.run, 1);
    assert_eq!(anchor.offset, 0);

    // A caret the host reports at the end of the first run resolves to the
    // same absolute index.
    let end_of_first = Selection::caret(
        HostNode::Text(LeafId {
            root: layout.root(),
            run: 0,
        }),
        6,
    );
    assert_eq!(
        resolve_position(Some(&end_of_first), &layout),
        Some(Position::new(6))
    );
}

#[test]
fn test_hello_world_scenario() {
    let engine = hello_world();
    let mut editor = Editor::new(engine, EditorConfig::default());
    let mut host = VirtualSelection::new();

    assert_eq!(editor.offsets().as_slice(), &[6, 12]);

    host.place_caret(
        LeafId {
            root: editor.root(),
            run: 1,
        },
        2,
    );
    editor.handle_selection_change(host.selection().as_ref());
    assert_eq!(editor.position(), Some(Position::new(8)));

    editor.set_position(Some(Position::new(0)));
    editor.flush(&mut host);
    let caret = host.caret().unwrap();
    assert_eq!(caret.leaf.run, 0);
    assert_eq!(caret.offset, 0);
}

#[test]
fn test_foreign_and_range_selections_clear_the_caret() {
    let mut editor = Editor::new(hello_world(), EditorConfig::default());
    let mut host = VirtualSelection::new();

    editor.set_position(Some(Position::new(3)));

    host.place_foreign(1);
    assert!(editor.handle_selection_change(host.selection().as_ref()));
    assert_eq!(editor.position(), None);

    editor.set_position(Some(Position::new(3)));
    host.place_range(
        HostNode::Text(LeafId {
            root: editor.root(),
            run: 0,
        }),
        1,
    );
    editor.handle_selection_change(host.selection().as_ref());
    assert_eq!(editor.position(), None);

    // A cleared caret clears the host on the next flush.
    editor.flush(&mut host);
    assert!(host.selection().is_none());
}

#[test]
fn test_typing_a_word() {
    let engine = hello_world();
    let mut editor = Editor::new(engine.clone(), EditorConfig::default());
    let mut host = VirtualSelection::new();

    host.place_caret(
        LeafId {
            root: editor.root(),
            run: 0,
        },
        6,
    );
    editor.handle_selection_change(host.selection().as_ref());

    for ch in ["n", "e", "w", " "] {
        assert!(editor.handle_before_input(&InputEvent::InsertText(ch.to_string())));
        editor.flush(&mut host);
        // The host reports the caret back after every render.
        editor.handle_selection_change(host.selection().as_ref());
    }

    assert_eq!(engine.text(), "Hello new World!");
    assert_eq!(editor.position(), Some(Position::new(10)));
}

#[test]
fn test_caret_survives_concurrent_edit_elsewhere() {
    let engine = hello_world();
    let peer = YrsTextEngine::default();
    peer.apply_update(&engine.encode_state_as_update()).unwrap();

    let mut editor = Editor::new(engine.clone(), EditorConfig::default());
    let mut host = VirtualSelection::new();
    editor.set_position(Some(Position::new(3)));
    editor.flush(&mut host);

    // Peer appends an italic tail; runs after the caret change shape.
    let before = engine.state_vector();
    peer.insert(12, " Bye", Some(&RunAttributes::ITALIC)).unwrap();
    engine.apply_update(&peer.encode_diff(&before)).unwrap();

    assert!(editor.refresh());
    assert_eq!(editor.runs().len(), 3);
    assert_eq!(editor.offsets().total_len(), 16);

    editor.flush(&mut host);
    let caret = host.caret().unwrap();
    assert_eq!(caret.leaf.run, 0);
    assert_eq!(caret.offset, 3);
    assert_eq!(
        resolve_position(host.selection().as_ref(), editor.layout()),
        Some(Position::new(3))
    );
}

#[test]
fn test_empty_document() {
    let engine = Arc::new(YrsTextEngine::default());
    let mut editor = Editor::new(engine, EditorConfig::default());
    let mut host = VirtualSelection::new();

    editor.set_position(Some(Position::new(0)));
    editor.flush(&mut host);
    assert!(host.selection().is_none());

    // The stored caret still accepts input and anchors once a run exists.
    assert!(editor.handle_before_input(&InputEvent::InsertText("a".into())));
    editor.flush(&mut host);
    assert_eq!(editor.runs(), &[Run::plain("a")]);
    assert_eq!(host.caret().unwrap().offset, 1);
}

#[test]
fn test_repeated_refresh_is_stable() {
    let mut editor = Editor::new(hello_world(), EditorConfig::default());
    let first = editor.offsets().clone();

    assert!(!editor.refresh());
    assert_eq!(editor.offsets(), &first);
    assert!(editor.is_unchanged(&editor.engine().to_delta()));
}

#[test]
fn test_selection_change_sees_remote_update_before_flush() {
    let engine = hello_world();
    let peer = YrsTextEngine::default();
    peer.apply_update(&engine.encode_state_as_update()).unwrap();

    let mut editor = Editor::new(engine.clone(), EditorConfig::default());
    let mut host = VirtualSelection::new();
    editor.set_position(Some(Position::new(8)));
    editor.flush(&mut host);

    // Peer prepends a bold word: "World!" moves from run 1 at 6 to run 2 at 10.
    let before = engine.state_vector();
    peer.insert(0, "Hey ", Some(&RunAttributes::BOLD)).unwrap();
    engine.apply_update(&peer.encode_diff(&before)).unwrap();

    // The host already renders the new runs; no flush in between.
    let selection = Selection::caret(
        HostNode::Text(LeafId {
            root: editor.root(),
            run: 2,
        }),
        2,
    );
    assert!(editor.handle_selection_change(Some(&selection)));
    assert_eq!(editor.offsets().start_of(2), Some(10));
    assert_eq!(editor.position(), Some(Position::new(12)));
}
