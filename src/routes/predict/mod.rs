mod handler;
mod model;

pub use handler::{predict, predict_public};
pub use model::PredictRequest;
