use book_layout::{AutosaveCoordinator, BookEditor, Persistence, SaveOutcome};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{EditorCommand, EditorState, EditorUpdate};

/// Channels to a running session task
pub struct SessionHandle {
    pub commands: mpsc::UnboundedSender<EditorCommand>,
    pub updates: mpsc::UnboundedReceiver<EditorUpdate>,
    /// Resolves to the editor once the session shuts down
    pub task: JoinHandle<BookEditor>,
}

/// Spawn `session_task` on the current runtime
pub fn spawn_session<P>(editor: BookEditor, autosave: AutosaveCoordinator<P>) -> SessionHandle
where
    P: Persistence + Send + Sync + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(session_task(editor, autosave, command_rx, update_tx));
    SessionHandle {
        commands: command_tx,
        updates: update_rx,
        task,
    }
}

/// Owns the editor and applies commands in order.
///
/// Autosave runs from the same loop, so a save never overlaps an edit and at
/// most one save is in flight. The task ends on `Shutdown` or when every
/// command sender is dropped, saving a dirty document first.
pub async fn session_task<P: Persistence>(
    editor: BookEditor,
    autosave: AutosaveCoordinator<P>,
    mut command_rx: mpsc::UnboundedReceiver<EditorCommand>,
    update_tx: mpsc::UnboundedSender<EditorUpdate>,
) -> BookEditor {
    let mut session = Session {
        last_state: EditorState::of(&editor),
        editor,
        autosave,
        update_tx,
        lookahead: None,
    };

    loop {
        let cmd = match session.lookahead.take() {
            Some(cmd) => cmd,
            None => {
                let deadline = session.autosave.deadline();
                let next = tokio::select! {
                    cmd = command_rx.recv() => Some(cmd.unwrap_or(EditorCommand::Shutdown)),
                    () = wait_until(deadline) => None,
                };
                match next {
                    Some(cmd) => cmd,
                    None => {
                        session.autosave_tick().await;
                        continue;
                    }
                }
            }
        };

        if !session.process(cmd, &mut command_rx).await {
            break;
        }
    }

    log::info!("Editor session stopped at revision {}", session.editor.revision());
    session.editor
}

struct Session<P> {
    editor: BookEditor,
    autosave: AutosaveCoordinator<P>,
    update_tx: mpsc::UnboundedSender<EditorUpdate>,
    last_state: EditorState,
    /// A command pulled off the queue while coalescing, handled next
    lookahead: Option<EditorCommand>,
}

impl<P: Persistence> Session<P> {
    /// Returns false once the session should stop
    async fn process(
        &mut self,
        cmd: EditorCommand,
        command_rx: &mut mpsc::UnboundedReceiver<EditorCommand>,
    ) -> bool {
        match cmd {
            EditorCommand::Edit(edit) => match edit.apply(&mut self.editor) {
                Ok(Some(update)) => self.send(update),
                Ok(None) => {}
                Err(e) => self.send(EditorUpdate::Error {
                    message: e.to_string(),
                }),
            },
            EditorCommand::BeginDrag {
                page_index,
                id,
                pointer,
                container,
            } => {
                if let Err(e) = self.editor.begin_drag(page_index, id, pointer, container) {
                    self.send(EditorUpdate::Error {
                        message: e.to_string(),
                    });
                }
            }
            EditorCommand::BeginResize {
                page_index,
                id,
                pointer,
                container,
            } => {
                if let Err(e) = self.editor.begin_resize(page_index, id, pointer, container) {
                    self.send(EditorUpdate::Error {
                        message: e.to_string(),
                    });
                }
            }
            EditorCommand::PointerMoved(mut pointer) => {
                // Only the newest queued position matters
                while let Ok(next_cmd) = command_rx.try_recv() {
                    if let EditorCommand::PointerMoved(newer) = next_cmd {
                        log::debug!("Discarding queued pointer move, using newer position");
                        pointer = newer;
                    } else {
                        self.lookahead = Some(next_cmd);
                        break;
                    }
                }
                if let Some(geometry) = self.editor.pointer_moved(pointer) {
                    self.send(EditorUpdate::Manipulated { geometry });
                }
            }
            EditorCommand::PointerReleased(pointer) => {
                if let Some(geometry) = self.editor.pointer_released(pointer) {
                    self.send(EditorUpdate::Manipulated { geometry });
                }
            }
            EditorCommand::Undo => {
                if !self.editor.undo() {
                    log::debug!("Nothing to undo");
                }
            }
            EditorCommand::Redo => {
                if !self.editor.redo() {
                    log::debug!("Nothing to redo");
                }
            }
            EditorCommand::Save => {
                while let Ok(next_cmd) = command_rx.try_recv() {
                    if let EditorCommand::Save = next_cmd {
                        log::debug!("Discarding queued save request");
                    } else {
                        self.lookahead = Some(next_cmd);
                        break;
                    }
                }
                let result = self.autosave.save_now(&mut self.editor, now()).await;
                self.report_save(result);
            }
            EditorCommand::Shutdown => {
                self.editor.end_gesture();
                let result = self.autosave.save_now(&mut self.editor, now()).await;
                self.report_save(result);
                self.publish_state();
                return false;
            }
        }

        self.autosave.observe(&self.editor, now());
        self.publish_state();
        true
    }

    async fn autosave_tick(&mut self) {
        if let Some(result) = self.autosave.tick(&mut self.editor, now()).await {
            self.report_save(result);
        }
        self.publish_state();
    }

    fn report_save(&self, result: book_layout::Result<SaveOutcome>) {
        match result {
            Ok(SaveOutcome::Saved) => self.send(EditorUpdate::Saved {
                revision: self.editor.revision(),
            }),
            Ok(SaveOutcome::AlreadyClean) => log::debug!("Document already saved"),
            Err(e) => self.send(EditorUpdate::SaveFailed {
                message: e.to_string(),
            }),
        }
    }

    /// Send the editor flags if they changed since the last update
    fn publish_state(&mut self) {
        let state = EditorState::of(&self.editor);
        if state != self.last_state {
            self.last_state = state;
            self.send(EditorUpdate::StateChanged(state));
        }
    }

    fn send(&self, update: EditorUpdate) {
        let _ = self.update_tx.send(update);
    }
}

fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

async fn wait_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
