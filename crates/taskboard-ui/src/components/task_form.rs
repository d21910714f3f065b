use taskboard_core::NoticeId;
use taskboard_core::form::{
  CreationForm,
  SubmitRejected,
  SubmitResolution
};
use taskboard_core::validation::TITLE_FIELD;
use web_sys::{
  HtmlInputElement,
  HtmlTextAreaElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use crate::app::{
  AppSync,
  ui_debug
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub sync:             AppSync,
  pub dismissed_notice: Option<NoticeId>,
  /// Fired once per successful create;
  /// the parent refreshes the list.
  pub on_success:       Callback<()>,
  /// Fired when the create notice has
  /// been dismissed.
  pub on_close:         Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let form =
    use_mut_ref(CreationForm::default);
  let redraw = use_force_update();

  {
    let form = form.clone();
    let on_close = props.on_close.clone();
    use_effect_with(
      props.dismissed_notice,
      move |dismissed| {
        if let Some(id) = *dismissed {
          if form.borrow_mut().acknowledge(id)
          {
            ui_debug(
              "form.acknowledged",
              &id.to_string()
            );
            on_close.emit(());
          }
        }
        || ()
      }
    );
  }

  let on_title_input = {
    let form = form.clone();
    let redraw = redraw.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      form
        .borrow_mut()
        .set_title(input.value());
      redraw.force_update();
    })
  };

  let on_description_input = {
    let form = form.clone();
    let redraw = redraw.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlTextAreaElement =
        e.target_unchecked_into();
      form
        .borrow_mut()
        .set_description(input.value());
      redraw.force_update();
    })
  };

  let on_submit = {
    let form = form.clone();
    let redraw = redraw.clone();
    let sync = props.sync.clone();
    let on_success =
      props.on_success.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      let form = form.clone();
      let redraw = redraw.clone();
      let sync = sync.clone();
      let on_success = on_success.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let lock_redraw = redraw.clone();
          let result = sync
            .submit_form(
              &form,
              move || {
                lock_redraw.force_update()
              },
              move || on_success.emit(())
            )
            .await;
          redraw.force_update();

          match result {
            | Ok(
              SubmitResolution::Created(
                notice
              )
            ) => {
              ui_debug(
                "form.submit.ok",
                &format!(
                  "awaiting {notice}"
                )
              );
            }
            | Ok(SubmitResolution::Failed) => {
              ui_debug(
                "form.submit.error",
                "create failed, form \
                 unlocked"
              );
            }
            | Err(
              SubmitRejected::Invalid(err)
            ) => {
              ui_debug(
                "form.submit.invalid",
                &err.to_string()
              );
            }
            | Err(SubmitRejected::Busy) => {
              ui_debug(
                "form.submit.skip",
                "ignored duplicate while \
                 busy"
              );
            }
          }
        }
      );
    })
  };

  let state = form.borrow();
  let disabled = state.inputs_disabled();

  html! {
      <form onsubmit={on_submit}>
          <div class="field">
              <label>{ "Title *" }</label>
              <input
                  value={state.title().to_string()}
                  placeholder="Required task title"
                  disabled={disabled}
                  oninput={on_title_input}
              />
              {
                  if let Some(message) = state.error_for(TITLE_FIELD) {
                      html! { <p class="form-error">{ message }</p> }
                  } else {
                      html! {}
                  }
              }
          </div>
          <div class="field">
              <label>{ "Description" }</label>
              <textarea
                  value={state.description().to_string()}
                  placeholder="Optional details"
                  disabled={disabled}
                  oninput={on_description_input}
              />
          </div>
          <button type="submit" class="btn btn-submit" disabled={disabled}>
              { if disabled { "Creating…" } else { "Create" } }
          </button>
      </form>
  }
}
