use serde::{Deserialize, Serialize};

/// 演示用户缓存数据模型
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CachedUser {
    pub email: String,
    pub nick_name: String,
    pub pass_word: String,
    pub user_name: String,
    pub reg_time: String,
}

impl CachedUser {
    pub fn new(
        email: impl Into<String>,
        nick_name: impl Into<String>,
        pass_word: impl Into<String>,
        user_name: impl Into<String>,
        reg_time: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            nick_name: nick_name.into(),
            pass_word: pass_word.into(),
            user_name: user_name.into(),
            reg_time: reg_time.into(),
        }
    }
}
