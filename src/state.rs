use crate::todos::TodoService;

#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
}
