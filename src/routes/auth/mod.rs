mod handler;
mod model;

pub use handler::{login, logout, register, verify};
pub use model::{AuthResponse, LoginRequest, RegisterRequest, UserProfile, VerifyResponse};
