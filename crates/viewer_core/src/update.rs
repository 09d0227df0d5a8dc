use std::path::PathBuf;

use crate::{window_title, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DirectoryInputChanged(text) => {
            state.set_directory_input(text);
            Vec::new()
        }
        Msg::DirectorySubmitted => {
            let input = state.directory_input().trim();
            if input.is_empty() {
                return (state, Vec::new());
            }
            let dir = PathBuf::from(input);
            // Old observation and anchor go away before the new load can land.
            let load_id = state.begin_load(dir.clone());
            vec![
                Effect::DisconnectObserver,
                Effect::ClearAnchor,
                Effect::SetWindowTitle {
                    title: window_title(""),
                },
                Effect::LoadSnapshot { load_id, dir },
            ]
        }
        Msg::ToggleDirectoryInput => {
            state.toggle_directory_input();
            Vec::new()
        }
        Msg::TitleLoaded { load_id, title } => {
            if !state.is_current_load(load_id) {
                return (state, Vec::new());
            }
            state.apply_title(title);
            vec![Effect::SetWindowTitle {
                title: window_title(state.title()),
            }]
        }
        Msg::MessagesLoaded {
            load_id,
            messages,
            images,
        } => {
            if !state.is_current_load(load_id) {
                return (state, Vec::new());
            }
            let ids = state.install_messages(messages, images);
            vec![Effect::ObserveMessages { ids }]
        }
        Msg::LoadFailed { load_id, reason } => {
            if state.is_current_load(load_id) {
                state.fail_load(reason);
            }
            Vec::new()
        }
        Msg::QuoteClicked { from, to } => {
            state.record_jump(from, to);
            vec![Effect::NavigateTo { anchor: to }]
        }
        Msg::ReturnClicked(probe) => state
            .return_to_last_jump(probe)
            .into_iter()
            .flat_map(|anchor| [Effect::ClearAnchor, Effect::NavigateTo { anchor }])
            .collect(),
        Msg::VisibilityChanged(transitions) => {
            for transition in transitions {
                state.apply_visibility(transition);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
