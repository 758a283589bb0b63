use serde::{Deserialize, Serialize};

/// 用户文档，集合 `user`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_name: String,
    pub pass_word: String,
}

impl User {
    pub fn new(id: i64, user_name: impl Into<String>, pass_word: impl Into<String>) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            pass_word: pass_word.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn document_uses_mongo_field_names() {
        let user = User::new(2, "neo", "123456");
        let doc = bson::to_document(&user).unwrap();

        assert_eq!(doc.get_i64("_id").unwrap(), 2);
        assert_eq!(doc.get_str("userName").unwrap(), "neo");
        assert_eq!(doc.get_str("passWord").unwrap(), "123456");
    }
}
