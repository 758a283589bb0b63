use axum::Json;
use serde::Serialize;

use crate::result::ApiResponse;

/// 当前时间的毫秒时间戳
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: error_codes::SUCCESS,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const NOT_FOUND: i32 = 1004;
    pub const RATE_LIMIT: i32 = 1005;
    pub const INTERNAL_ERROR: i32 = 5000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_carries_data() {
        let Json(resp) = success_to_api_response(42);
        assert_eq!(resp.code, error_codes::SUCCESS);
        assert_eq!(resp.resp_data, Some(42));
    }

    #[test]
    fn error_response_omits_data_field() {
        let Json(resp) = error_to_api_response::<()>(error_codes::NOT_FOUND, "missing".into());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 1004);
        assert_eq!(json["msg"], "missing");
        assert!(json.get("resp_data").is_none());
    }

    #[test]
    fn now_millis_is_millisecond_precision() {
        let secs = chrono::Utc::now().timestamp();
        let millis = now_millis();
        assert!(millis / 1000 >= secs);
        assert!(millis / 1000 - secs <= 1);
    }
}
