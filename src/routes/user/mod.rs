pub mod handler;
pub mod model;

pub use handler::{delete_user, find_all, find_by_name, save_user, update_user};
