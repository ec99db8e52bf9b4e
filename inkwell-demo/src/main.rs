//! inkwell demo: scripted caret session over a `yrs` rich text.
//!
//! Seeds `"Hello "` + bold `"World!"`, then walks through a caret click,
//! a few keystrokes, a filtered named key and an edit arriving from a
//! second replica, printing the editor's internal state after each step.
//!
//! Usage: `inkwell-demo [config.json]` (`RUST_LOG=debug` for caret traces).

use std::error::Error;
use std::sync::Arc;

use inkwell_core::{
    is_suppressed_key, Editor, EditorConfig, InputEvent, LeafId, RunAttributes, SelectionHost,
    TextEngine, VirtualSelection, YrsTextEngine,
};
use log::info;

fn seed(engine: &YrsTextEngine) -> Result<(), Box<dyn Error>> {
    engine.insert(0, "Hello ", None)?;
    engine.insert(6, "World!", Some(&RunAttributes::BOLD))?;
    Ok(())
}

fn print_state(step: &str, editor: &Editor<YrsTextEngine>) -> Result<(), Box<dyn Error>> {
    println!("── {step}");
    println!("{}", editor.state_json()?);
    for run in editor.layout().runs() {
        println!(
            "   [{:>2}..{:>2}] {:?}{}{}",
            run.start,
            run.end(),
            run.text,
            if run.attributes.bold { " bold" } else { "" },
            if run.attributes.italic { " italic" } else { "" },
        );
    }
    Ok(())
}

/// Feed a key through the keydown filter and, if it survives, into the editor.
fn press(editor: &mut Editor<YrsTextEngine>, key: &str) -> bool {
    if is_suppressed_key(key) {
        info!("key {key:?} suppressed");
        return false;
    }
    editor.handle_before_input(&InputEvent::InsertText(key.to_string()))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => EditorConfig::load(&path)?,
        None => EditorConfig::default(),
    };
    info!("config: {config:?}");

    let engine = Arc::new(YrsTextEngine::new(&config));
    seed(&engine)?;

    // A second replica standing in for a remote collaborator.
    let peer = YrsTextEngine::new(&config);
    peer.apply_update(&engine.encode_state_as_update())?;

    let mut editor = Editor::new(engine.clone(), config);
    let mut host = VirtualSelection::new();
    print_state("initial", &editor)?;

    // Click between "Wo" and "rld!".
    host.place_caret(
        LeafId {
            root: editor.root(),
            run: 1,
        },
        2,
    );
    editor.handle_selection_change(host.selection().as_ref());
    editor.flush(&mut host);
    print_state("caret placed", &editor)?;

    for key in ["X", "Y", "ArrowLeft", "Z"] {
        press(&mut editor, key);
        editor.flush(&mut host);
        editor.handle_selection_change(host.selection().as_ref());
    }
    print_state("typed", &editor)?;

    let before = engine.state_vector();
    peer.insert(0, ">> ", Some(&RunAttributes::ITALIC))?;
    engine.apply_update(&peer.encode_diff(&before))?;
    editor.flush(&mut host);
    print_state("remote edit", &editor)?;

    if let Some(caret) = host.caret() {
        info!("host caret: run {} offset {}", caret.leaf.run, caret.offset);
    }

    host.place_foreign(0);
    editor.handle_selection_change(host.selection().as_ref());
    editor.flush(&mut host);
    print_state("focus left the editor", &editor)?;

    Ok(())
}
