use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FindByNameQuery {
    pub user_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub modified: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub deleted: u64,
}
