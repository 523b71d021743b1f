mod password;
mod token;
pub mod validation;

pub use password::{
    dummy_verify, hash_password, hash_password_blocking, init_dummy_hash, verify_password,
    verify_password_blocking,
};
pub use token::{Claims, TokenError, encode_claims, generate_token, verify_token};
