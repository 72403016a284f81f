//! Centralized modal stack.
//!
//! List pages push editor/view components onto the stack and receive a
//! [`ModalHandle`] the content can use to close itself. Closing is deferred
//! to the next tick so a modal removed during its own DOM event dispatch
//! does not tear down a closure that is still running.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>,
    modal_style: Option<String>,
}

/// Handle returned by `push`; clone it into event handlers to close the
/// modal from inside its content.
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: RwSignal<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.stack.get().is_empty()
    }

    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_with_frame(None, builder)
    }

    /// Push a modal with an optional inline style for the surface (width
    /// overrides for the wide transaction editors).
    pub fn push_with_frame<F>(&self, modal_style: Option<String>, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        let handle = ModalHandle { id, svc: *self };
        self.stack.update(|stack| {
            stack.push(ModalEntry {
                id,
                builder: Arc::new(builder),
                modal_style,
            });
        });
        handle
    }

    fn close_deferred(&self, id: u64) {
        let svc = *self;
        spawn_local(async move {
            // next tick: survive being called from inside the closing modal
            TimeoutFuture::new(0).await;
            svc.stack.update(|stack| stack.retain(|e| e.id != id));
        });
    }

    pub fn clear(&self) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.stack.update(|stack| stack.clear());
        });
    }
}

pub fn use_modal_stack() -> ModalStackService {
    use_context::<ModalStackService>().expect("ModalStackService not found in context")
}

/// Renders the stack. Mounted once, inside the main layout.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_modal_stack();
    let stack = svc.stack;

    view! {
        {move || {
            stack
                .get()
                .into_iter()
                .map(|entry| {
                    let handle = ModalHandle { id: entry.id, svc };
                    let style = entry.modal_style.clone().unwrap_or_default();
                    view! {
                        <div class="modal-overlay">
                            <div class="modal-surface" style=style>
                                {(entry.builder)(handle)}
                            </div>
                        </div>
                    }
                })
                .collect_view()
        }}
    }
}
