pub mod handler;

pub use handler::{DEMO_USER_EMAIL, demo_user, get_user, uid};
