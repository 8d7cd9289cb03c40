pub mod class;
pub mod task;
pub mod task_type;

pub use class::{Class, NewClassRequest, Syllabus};
pub use task::{NewTaskRequest, Task};
pub use task_type::{NewTaskTypeRequest, TaskType};
