use taskboard_core::{
  Notice,
  NoticeId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ToastsProps {
  pub notices:    Vec<Notice>,
  pub on_dismiss: Callback<NoticeId>
}

#[function_component(Toasts)]
pub fn toasts(
  props: &ToastsProps
) -> Html {
  html! {
      <div class="toasts">
          {
              for props.notices.iter().map(|notice| {
                  let id = notice.id;
                  let on_dismiss = props.on_dismiss.clone();
                  let class = format!("toast {}", notice.kind.as_key());
                  html! {
                      <div key={id.0} class={class} role="status">
                          <span>{ &notice.message }</span>
                          <button
                              type="button"
                              aria-label="Dismiss"
                              onclick={move |_| on_dismiss.emit(id)}
                          >
                              { "×" }
                          </button>
                      </div>
                  }
              })
          }
      </div>
  }
}
