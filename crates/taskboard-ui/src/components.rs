mod task_form;
mod task_list;
mod task_list_row;
mod task_modal;
mod toasts;

pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use task_modal::TaskModal;
pub use toasts::Toasts;
