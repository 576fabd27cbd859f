pub mod assets;
pub mod config;
pub mod db;
pub mod error;
pub mod response;
pub mod routes;
pub mod session_store;
pub mod state;
pub mod views;

pub mod crypto {
    pub mod token;
}

pub mod models {
    pub mod user;
    pub mod session;
    pub mod sentence;
}

pub mod repositories {
    pub mod user;
    pub mod sentence;
}

pub mod services {
    pub mod auth;
    pub mod sentences;
}

pub mod handlers {
    pub mod auth;
    pub mod users;
    pub mod sentences;
    pub mod pages;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod auth;
    pub mod sentence;
}

pub use config::Config;
pub use error::{AppError, Result};
pub use routes::build_router;
pub use state::AppState;
