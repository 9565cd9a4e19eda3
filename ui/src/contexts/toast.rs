//! Transient notifications for mutation outcomes and other one-shot
//! messages.

use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use uuid::Uuid;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    /// Milliseconds until auto-dismiss; None keeps the toast until
    /// dismissed by hand.
    pub duration: Option<u32>,
}

impl Toast {
    pub fn new(message: String, kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            kind,
            duration: Some(5000),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastKind::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: HashMap<Uuid, Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Add(toast) => {
                toasts.insert(toast.id, toast);
            }
            ToastAction::Remove(id) => {
                toasts.remove(&id);
            }
        }
        Rc::new(ToastState { toasts })
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

/// Cloneable handle for pushing toasts from callbacks and async blocks.
#[derive(Clone, PartialEq)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    pub fn add(&self, toast: Toast) {
        let toast_id = toast.id;
        let duration = toast.duration;
        let context = self.context.clone();

        self.context.dispatch(ToastAction::Add(toast));

        if let Some(duration) = duration {
            Timeout::new(duration, move || {
                context.dispatch(ToastAction::Remove(toast_id));
            })
            .forget();
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(Toast::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(Toast::error(message));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Remove(id));
    }
}

/// Access the toast queue. Panics if used outside a [`ToastProvider`].
#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}
