mod handler;
mod model;

pub use handler::{add_history, clear_history, delete_history_item, get_history};
pub use model::{AddHistoryRequest, ClearHistoryResponse, DeleteHistoryResponse, HistoryResponse};
