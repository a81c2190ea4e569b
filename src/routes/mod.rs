mod admin;
mod auth;
mod chirps;
mod health_check;
mod users;
mod webhooks;

pub use admin::metrics;
pub use admin::reset;
pub use auth::login;
pub use auth::refresh;
pub use auth::revoke;
pub use chirps::create_chirp;
pub use chirps::delete_chirp;
pub use chirps::get_chirp;
pub use chirps::list_chirps;
pub use health_check::health_check;
pub use users::create_user;
pub use users::update_user;
pub use webhooks::polka_webhook;
