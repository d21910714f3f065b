mod notices;
mod settings;

use std::rc::Rc;

use gloo::console::log;
use taskboard_core::modal::{
  ModalController,
  ModalRequest
};
use taskboard_core::{
  NoticeId,
  TaskSync
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_force_update,
  use_reducer,
  use_state
};

use self::notices::{
  ToastAction,
  ToastNotifier,
  ToastStack
};
use self::settings::load_client_config;
use crate::api::HttpGateway;
use crate::components::{
  TaskForm,
  TaskList,
  TaskModal,
  Toasts
};

pub type AppSync =
  TaskSync<HttpGateway, ToastNotifier>;

#[derive(
  Debug, Clone, Copy, Default, PartialEq,
)]
struct ModalSlot(ModalController);

impl Reducible for ModalSlot {
  type Action = ModalRequest;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut controller = self.0;
    if controller.apply(action) {
      Rc::new(ModalSlot(controller))
    } else {
      self
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_state(load_client_config);
  let toasts =
    use_reducer(ToastStack::default);
  let modal =
    use_reducer(ModalSlot::default);
  let redraw = use_force_update();

  let sync = {
    let config = (*config).clone();
    let dispatcher = toasts.dispatcher();
    let redraw = redraw.clone();
    use_state(move || {
      let notifier = ToastNotifier::new(
        dispatcher,
        config.notice_dismiss_ms
      );
      TaskSync::new(
        HttpGateway::new(&config.api_base),
        notifier,
        &config
      )
      .with_on_change(move || {
        redraw.force_update()
      })
    })
  };

  let on_new_task = {
    let modal = modal.clone();
    Callback::from(move |_| {
      ui_debug(
        "action.modal.open",
        "new task clicked"
      );
      modal.dispatch(ModalRequest::Open);
    })
  };

  let on_modal_dismiss = {
    let modal = modal.clone();
    Callback::from(move |()| {
      ui_debug(
        "action.modal.dismiss",
        "close clicked"
      );
      modal.dispatch(ModalRequest::Dismiss);
    })
  };

  let on_form_close = {
    let modal = modal.clone();
    Callback::from(move |()| {
      ui_debug(
        "action.modal.close",
        "create acknowledged, closing \
         modal"
      );
      modal.dispatch(ModalRequest::Close);
    })
  };

  let on_created = {
    let sync = (*sync).clone();
    Callback::from(move |()| {
      let sync = sync.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          sync.refresh().await;
        }
      );
    })
  };

  let on_toast_dismiss = {
    let toasts = toasts.clone();
    Callback::from(move |id: NoticeId| {
      toasts.dispatch(
        ToastAction::Dismiss(id)
      );
    })
  };

  html! {
      <div class="page">
          <h1>{ "📝 Task Manager" }</h1>
          <button type="button" class="btn btn-new" onclick={on_new_task}>
              { "+ New Task" }
          </button>
          <TaskList
              sync={(*sync).clone()}
              revision={sync.revision()}
          />
          <TaskModal
              open={modal.0.is_open()}
              on_close={on_modal_dismiss}
          >
              <TaskForm
                  key={modal.0.session()}
                  sync={(*sync).clone()}
                  dismissed_notice={toasts.last_dismissed}
                  on_success={on_created}
                  on_close={on_form_close}
              />
          </TaskModal>
          <Toasts
              notices={toasts.queue.iter().cloned().collect::<Vec<_>>()}
              on_dismiss={on_toast_dismiss}
          />
      </div>
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
