use std::path::PathBuf;
use std::sync::Once;

use pretty_assertions::assert_eq;
use viewer_core::{
    update, window_title, AppState, Effect, ImageHandle, LoadId, LoadStatus, Message, MessageId,
    Msg, VisibilityTransition,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(viewer_logging::initialize_for_tests);
}

fn message(n: u64, status: u8) -> Message {
    Message {
        msg_num: MessageId(n),
        msg: format!("body {n}"),
        status,
        user: viewer_core::User {
            user_id: format!("user-{}", n % 2),
            level: "10".into(),
        },
        ..Message::default()
    }
}

fn submit(state: AppState, dir: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::DirectoryInputChanged(dir.into()));
    update(state, Msg::DirectorySubmitted)
}

fn load_id_of(effects: &[Effect]) -> LoadId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LoadSnapshot { load_id, .. } => Some(*load_id),
            _ => None,
        })
        .expect("load effect")
}

fn finish_load(state: AppState, load_id: LoadId, messages: Vec<Message>) -> (AppState, Vec<Effect>) {
    let (state, _) = update(
        state,
        Msg::TitleLoaded {
            load_id,
            title: "Burger King".into(),
        },
    );
    update(
        state,
        Msg::MessagesLoaded {
            load_id,
            messages,
            images: vec![ImageHandle {
                source: "https://img.example/a.png".into(),
                handle: "file:///snap/images/a.png".into(),
                path: PathBuf::from("/snap/images/a.png"),
            }],
        },
    )
}

#[test]
fn submitting_a_directory_resets_and_starts_loading() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "  /snapshots/thread_1  ");

    assert_eq!(
        effects,
        vec![
            Effect::DisconnectObserver,
            Effect::ClearAnchor,
            Effect::SetWindowTitle {
                title: "Snapshot Viewer".into()
            },
            Effect::LoadSnapshot {
                load_id: 1,
                dir: PathBuf::from("/snapshots/thread_1"),
            },
        ]
    );
    assert_eq!(
        state.view().load,
        LoadStatus::Loading {
            dir: PathBuf::from("/snapshots/thread_1")
        }
    );
}

#[test]
fn blank_directory_input_is_ignored() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "   ");
    assert!(effects.is_empty());
    assert_eq!(state.view().load, LoadStatus::Idle);
}

#[test]
fn title_arrives_first_and_hides_the_input() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "/snap");
    let load_id = load_id_of(&effects);
    let (state, effects) = update(
        state,
        Msg::TitleLoaded {
            load_id,
            title: "Burger King".into(),
        },
    );
    let view = state.view();

    assert_eq!(view.title, "Burger King");
    assert!(!view.show_directory_input);
    assert!(view.change_input_enabled);
    assert_eq!(
        effects,
        vec![Effect::SetWindowTitle {
            title: window_title("Burger King")
        }]
    );
    assert_eq!(window_title("Burger King"), "Burger King | Snapshot Viewer");
}

#[test]
fn loaded_messages_are_observed_except_suppressed_ones() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "/snap");
    let load_id = load_id_of(&effects);
    let messages = vec![message(1, 1), message(2, 3), message(3, 0)];
    let (state, effects) = finish_load(state, load_id, messages);
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::ObserveMessages {
            ids: vec![MessageId(1), MessageId(3)]
        }]
    );
    assert_eq!(view.messages.len(), 3);
    assert_eq!(view.original_poster.as_deref(), Some("user-1"));
    assert_eq!(view.image_count, 1);
    assert_eq!(state.images()[0].handle, "file:///snap/images/a.png");
    assert_eq!(view.load, LoadStatus::Ready);
    assert_eq!(state.viewport().observed_count(), 2);
}

#[test]
fn loading_a_new_snapshot_clears_everything() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "/first");
    let load_id = load_id_of(&effects);
    let (state, _) = finish_load(state, load_id, (1..=80).map(|n| message(n, 1)).collect());
    let (state, _) = update(
        state,
        Msg::VisibilityChanged(vec![VisibilityTransition::entered(MessageId(40))]),
    );
    let (state, _) = update(
        state,
        Msg::QuoteClicked {
            from: MessageId(70),
            to: MessageId(52),
        },
    );
    assert!(state.view().return_visible);
    assert_eq!(state.anchor(), Some(MessageId(52)));

    let (state, effects) = submit(state, "/second");
    let view = state.view();

    assert!(effects.contains(&Effect::DisconnectObserver));
    assert!(effects.contains(&Effect::ClearAnchor));
    assert!(view.jump_stack.is_empty());
    assert!(!view.return_visible);
    assert_eq!(view.anchor, None);
    assert!(view.messages.is_empty());
    assert!(view.title.is_empty());
    assert_eq!(view.image_count, 0);
    assert!(state.images().is_empty());
    assert!(state.viewport().members().is_empty());
    assert!(!state.viewport().is_subscribed());
    assert_eq!(load_id_of(&effects), load_id + 1);
}

#[test]
fn events_from_a_superseded_load_are_ignored() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "/first");
    let stale = load_id_of(&effects);
    let (state, effects) = submit(state, "/second");
    let current = load_id_of(&effects);

    let (state, effects) = finish_load(state, stale, vec![message(1, 1)]);
    assert!(effects.is_empty());
    assert!(state.view().messages.is_empty());
    assert!(state.view().title.is_empty());

    let (state, _) = update(
        state,
        Msg::LoadFailed {
            load_id: stale,
            reason: "late failure".into(),
        },
    );
    assert!(matches!(state.view().load, LoadStatus::Loading { .. }));

    let (state, _) = finish_load(state, current, vec![message(1, 1)]);
    assert_eq!(state.view().messages.len(), 1);
}

#[test]
fn failed_load_reports_reason_and_shows_input_again() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "/snap");
    let load_id = load_id_of(&effects);
    let (state, _) = update(
        state,
        Msg::TitleLoaded {
            load_id,
            title: "T".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::LoadFailed {
            load_id,
            reason: "messages.json not found".into(),
        },
    );
    let view = state.view();

    assert!(view.show_directory_input);
    assert_eq!(
        view.load,
        LoadStatus::Failed {
            reason: "messages.json not found".into()
        }
    );
}

#[test]
fn toggle_requires_a_title() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::ToggleDirectoryInput);
    assert!(state.view().show_directory_input);
    assert!(!state.consume_dirty());

    let (state, effects) = submit(state, "/snap");
    let load_id = load_id_of(&effects);
    let (state, _) = finish_load(state, load_id, vec![message(1, 1)]);
    assert!(!state.view().show_directory_input);

    let (state, _) = update(state, Msg::ToggleDirectoryInput);
    assert!(state.view().show_directory_input);
    let (state, _) = update(state, Msg::ToggleDirectoryInput);
    assert!(!state.view().show_directory_input);
}
