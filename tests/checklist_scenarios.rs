mod support;

use pretty_assertions::assert_eq;
use support::{frame_loop, run_script};
use tape_todo::{App, Mode, Pane};

fn texts(app: &App, pane: Pane) -> Vec<String> {
    app.list(pane)
        .iter()
        .map(|entry| entry.to_string_lossy())
        .collect()
}

fn seeded(todo: &[&str]) -> App {
    let mut app = App::default();
    for entry in todo {
        app.list_mut(Pane::Todo).add_entry(entry.as_bytes());
    }
    app
}

#[test]
fn enter_moves_selected_entry_to_done() {
    let (mut frames, state, _) = frame_loop(40, 10, seeded(&["buy milk"]));
    run_script(&mut frames, &state, b"\n");
    assert!(frames.app().list(Pane::Todo).is_empty());
    assert_eq!(texts(frames.app(), Pane::Done), ["buy milk"]);
}

#[test]
fn delete_clamps_cursor_to_next_entry() {
    let (mut frames, state, _) = frame_loop(40, 10, seeded(&["a", "b", "c"]));
    run_script(&mut frames, &state, b"\x1b[A");
    assert_eq!(frames.app().list(Pane::Todo).cursor(), 1);
    run_script(&mut frames, &state, b"d");
    let todo = frames.app().list(Pane::Todo);
    assert_eq!(texts(frames.app(), Pane::Todo), ["a", "c"]);
    assert_eq!(todo.cursor(), 1);
    assert_eq!(
        todo.selected().map(|entry| entry.to_string_lossy()),
        Some("c".to_string())
    );
}

#[test]
fn add_with_backspace_commits_edited_text() {
    let (mut frames, state, _) = frame_loop(40, 10, App::default());
    run_script(&mut frames, &state, b"axyz\x7f\n");
    assert_eq!(frames.app().mode(), Mode::Idle);
    assert_eq!(texts(frames.app(), Pane::Todo), ["xy"]);
}

#[test]
fn typed_text_round_trips_exactly() {
    let text = "Call the plumber @ 9:30 (ask re: sink & tub)!";
    let (mut frames, state, _) = frame_loop(30, 10, App::default());
    let mut script = b"a".to_vec();
    script.extend_from_slice(text.as_bytes());
    script.push(b'\n');
    run_script(&mut frames, &state, &script);
    assert_eq!(texts(frames.app(), Pane::Todo), [text]);
}

#[test]
fn whitespace_only_add_is_cancelled() {
    let (mut frames, state, _) = frame_loop(40, 10, App::default());
    run_script(&mut frames, &state, b"a   \n");
    assert_eq!(frames.app().mode(), Mode::Idle);
    assert!(frames.app().list(Pane::Todo).is_empty());
}

#[test]
fn empty_add_is_cancelled() {
    let (mut frames, state, _) = frame_loop(40, 10, App::default());
    run_script(&mut frames, &state, b"a\n");
    assert!(frames.app().list(Pane::Todo).is_empty());
}

#[test]
fn escape_cancels_edit() {
    let (mut frames, state, _) = frame_loop(40, 10, seeded(&["original"]));
    run_script(&mut frames, &state, b"e\x1b[3~\x1b[3~");
    assert_eq!(frames.app().mode(), Mode::Edit);
    run_script(&mut frames, &state, b"\x1b");
    assert_eq!(frames.app().mode(), Mode::Idle);
    assert_eq!(texts(frames.app(), Pane::Todo), ["original"]);
}

#[test]
fn edit_in_the_middle_of_an_entry() {
    let (mut frames, state, _) = frame_loop(40, 10, seeded(&["by milk"]));
    run_script(&mut frames, &state, b"e\x1b[Cu\n");
    assert_eq!(texts(frames.app(), Pane::Todo), ["buy milk"]);
}

#[test]
fn move_back_from_done_pane() {
    let (mut frames, state, _) = frame_loop(40, 10, seeded(&["one", "two"]));
    run_script(&mut frames, &state, b"\n\n");
    assert!(frames.app().list(Pane::Todo).is_empty());
    assert_eq!(texts(frames.app(), Pane::Done), ["two", "one"]);

    run_script(&mut frames, &state, b"\x1b[C\x1b[A\n");
    assert_eq!(frames.app().active_pane(), Pane::Done);
    assert_eq!(texts(frames.app(), Pane::Todo), ["two"]);
    assert_eq!(texts(frames.app(), Pane::Done), ["one"]);
}

#[test]
fn counts_track_adds_and_deletes() {
    let (mut frames, state, _) = frame_loop(40, 12, App::default());
    run_script(&mut frames, &state, b"afirst\nasecond\nathird\n");
    run_script(&mut frames, &state, b"\x1b[Ad");
    assert_eq!(texts(frames.app(), Pane::Todo), ["first", "third"]);
    run_script(&mut frames, &state, b"afourth\n");
    assert_eq!(
        texts(frames.app(), Pane::Todo),
        ["first", "third", "fourth"]
    );
}

#[test]
fn arrow_split_across_frames_moves_the_cursor() {
    let (mut frames, state, _) = frame_loop(40, 10, App::default());
    run_script(&mut frames, &state, b"axy\x1b[");
    assert_eq!(frames.app().editor().text().as_bytes(), b"xy");
    run_script(&mut frames, &state, b"D");
    assert_eq!(frames.app().editor().cursor(), 1);
    run_script(&mut frames, &state, b"\n");
    assert_eq!(texts(frames.app(), Pane::Todo), ["xy"]);
}

#[test]
fn vertical_tab_only_add_is_cancelled() {
    let (mut frames, state, _) = frame_loop(40, 10, App::default());
    run_script(&mut frames, &state, b"a\x0b\n");
    assert_eq!(frames.app().mode(), Mode::Idle);
    assert!(frames.app().list(Pane::Todo).is_empty());
}

#[test]
fn up_and_down_are_ignored_while_editing() {
    let (mut frames, state, _) = frame_loop(40, 10, seeded(&["one", "two"]));
    run_script(&mut frames, &state, b"e\x1b[C\x1b[A\x1b[B");
    assert_eq!(frames.app().mode(), Mode::Edit);
    assert_eq!(frames.app().editor().text().as_bytes(), b"two");
    assert_eq!(frames.app().editor().cursor(), 1);
    assert_eq!(frames.app().list(Pane::Todo).cursor(), 1);
}
