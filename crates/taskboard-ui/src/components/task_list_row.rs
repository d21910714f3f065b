use taskboard_core::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      Task,
  pub on_toggle: Callback<(TaskId, bool)>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.task.id;
  let status = props.task.status;
  let on_toggle = props.on_toggle.clone();
  let on_delete = props.on_delete.clone();
  let class = if props.task.is_done() {
    "row done"
  } else {
    "row"
  };

  html! {
      <div class={class}>
          <div>
              <h3>{ &props.task.title }</h3>
              <p>{ props.task.description_text() }</p>
              <p>{ format!("Status: {}", props.task.status_marker()) }</p>
          </div>
          <div class="actions">
              <button
                  type="button"
                  class="btn btn-toggle"
                  onclick={move |_| on_toggle.emit((id, status))}
              >
                  { "Toggle" }
              </button>
              <button
                  type="button"
                  class="btn btn-delete"
                  onclick={move |_| on_delete.emit(id)}
              >
                  { "Delete" }
              </button>
          </div>
      </div>
  }
}
