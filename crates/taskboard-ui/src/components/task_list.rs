use taskboard_core::TaskId;
use taskboard_core::store::ListState;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with
};

use super::TaskListRow;
use crate::app::{
  AppSync,
  ui_debug
};

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub sync:     AppSync,
  /// Store revision; changes whenever
  /// the list needs redrawing.
  pub revision: u64
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  {
    let sync = props.sync.clone();
    use_effect_with(sync, move |sync| {
      ui_debug(
        "list.mounted",
        "initial refresh"
      );
      let sync = sync.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          sync.refresh().await;
        }
      );
      || ()
    });
  }

  let on_toggle = {
    let sync = props.sync.clone();
    Callback::from(
      move |(id, current): (TaskId, bool)| {
        ui_debug(
          "action.task.toggle",
          &format!(
            "id={id} current={current}"
          )
        );
        let sync = sync.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            if let Err(err) = sync
              .toggle_status(id, current)
              .await
            {
              ui_debug(
                "action.task.error",
                &err.to_string()
              );
            }
          }
        );
      }
    )
  };

  let on_delete = {
    let sync = props.sync.clone();
    Callback::from(move |id: TaskId| {
      ui_debug(
        "action.task.delete",
        &format!("id={id}")
      );
      let sync = sync.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          if let Err(err) =
            sync.delete_task(id).await
          {
            ui_debug(
              "action.task.error",
              &err.to_string()
            );
          }
        }
      );
    })
  };

  props.sync.with_store(|store| {
    match store.view() {
      | ListState::Loading => html! {
          <div class="list-state loading">{ "Loading tasks…" }</div>
      },
      | ListState::Empty => html! {
          <div class="list-state empty">
              { "No tasks yet. Create one to get started." }
          </div>
      },
      | ListState::Populated(tasks) => html! {
          <div class="list">
              {
                  for tasks.iter().map(|task| html! {
                      <TaskListRow
                          key={task.id}
                          task={task.clone()}
                          on_toggle={on_toggle.clone()}
                          on_delete={on_delete.clone()}
                      />
                  })
              }
          </div>
      }
    }
  })
}
