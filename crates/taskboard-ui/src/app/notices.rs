use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use taskboard_core::notify::NoticeQueue;
use taskboard_core::{
  Notice,
  NoticeId,
  NoticeKind,
  Notifier
};
use yew::{
  Reducible,
  UseReducerDispatcher
};

use super::ui_debug;

pub enum ToastAction {
  Push(Notice),
  Dismiss(NoticeId)
}

/// Toasts on screen plus the most
/// recently dismissed one, which the
/// creation form watches for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastStack {
  pub queue:          NoticeQueue,
  pub last_dismissed: Option<NoticeId>
}

impl Reducible for ToastStack {
  type Action = ToastAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    match action {
      | ToastAction::Push(notice) => {
        let mut next = (*self).clone();
        next.queue.push(notice);
        Rc::new(next)
      }
      | ToastAction::Dismiss(id) => {
        let mut next = (*self).clone();
        if !next.queue.dismiss(id) {
          return self;
        }
        next.last_dismissed = Some(id);
        Rc::new(next)
      }
    }
  }
}

/// Pushes notices onto the toast stack
/// and schedules their auto-dismiss.
pub struct ToastNotifier {
  dispatcher: UseReducerDispatcher<ToastStack>,
  next_id:    Cell<u64>,
  dismiss_ms: u32
}

impl ToastNotifier {
  pub fn new(
    dispatcher: UseReducerDispatcher<
      ToastStack
    >,
    dismiss_ms: u32
  ) -> Self {
    Self {
      dispatcher,
      next_id: Cell::new(0),
      dismiss_ms
    }
  }
}

impl Notifier for ToastNotifier {
  fn notify(
    &self,
    kind: NoticeKind,
    message: &str
  ) -> NoticeId {
    let id = NoticeId(
      self.next_id.get().wrapping_add(1)
    );
    self.next_id.set(id.0);
    ui_debug(
      "notice.push",
      &format!(
        "{id} kind={} message={message}",
        kind.as_key()
      )
    );

    self.dispatcher.dispatch(
      ToastAction::Push(Notice {
        id,
        kind,
        message: message.to_string()
      })
    );

    let dispatcher =
      self.dispatcher.clone();
    let dismiss_ms = self.dismiss_ms;
    wasm_bindgen_futures::spawn_local(
      async move {
        TimeoutFuture::new(dismiss_ms)
          .await;
        dispatcher.dispatch(
          ToastAction::Dismiss(id)
        );
      }
    );

    id
  }
}
