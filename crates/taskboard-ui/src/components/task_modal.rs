use gloo::timers::future::TimeoutFuture;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

/// Length of the exit fade in
/// `styles.css`.
const LEAVE_MS: u32 = 180;

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub open:     bool,
  pub on_close: Callback<()>,
  #[prop_or_default]
  pub children: Html
}

/// Show/hide container. The parent owns
/// `open`; this component only keeps its
/// content mounted long enough for the
/// exit animation to play.
#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let initially_open = props.open;
  let mounted =
    use_state(move || initially_open);
  let leaving = use_state(|| false);
  let transition_seq =
    use_mut_ref(|| 0_u64);

  {
    let mounted = mounted.clone();
    let leaving = leaving.clone();
    let seq = transition_seq.clone();
    use_effect_with(
      props.open,
      move |open| {
        let current = {
          let mut seq = seq.borrow_mut();
          *seq = seq.wrapping_add(1);
          *seq
        };

        if *open {
          mounted.set(true);
          leaving.set(false);
        } else if *mounted {
          leaving.set(true);
          wasm_bindgen_futures::spawn_local(
            async move {
              TimeoutFuture::new(LEAVE_MS)
                .await;
              if *seq.borrow() == current {
                mounted.set(false);
                leaving.set(false);
              }
            }
          );
        }
        || ()
      }
    );
  }

  if !*mounted {
    return html! {};
  }

  let on_backdrop_click = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };
  let on_close_click = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };
  let keep_open =
    Callback::from(|e: MouseEvent| {
      e.stop_propagation()
    });

  html! {
      <div
          class={classes!("modal-backdrop", (*leaving).then_some("leaving"))}
          onclick={on_backdrop_click}
      >
          <div class="modal" onclick={keep_open}>
              <button type="button" class="btn btn-close" onclick={on_close_click}>
                  { "Close" }
              </button>
              { props.children.clone() }
          </div>
      </div>
  }
}
