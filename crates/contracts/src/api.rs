use serde::{Deserialize, Serialize};

/// Response envelope used by every backend endpoint: `{code, message, result}`.
///
/// `message` carries the human-readable text the UI shows verbatim on
/// mutation success or rejection; `result` is the payload (absent on errors
/// and on plain-acknowledgement responses).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap `result`, falling back to the server message as the error.
    pub fn into_result(self) -> Result<T, String> {
        match self.result {
            Some(value) => Ok(value),
            None => Err(self
                .message
                .unwrap_or_else(|| "Phản hồi từ server không có dữ liệu".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_result() {
        let raw = r#"{"code":1000,"message":"OK","result":[1,2,3]}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn envelope_without_result_yields_message() {
        let raw = r#"{"message":"Mã phiếu đã tồn tại"}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.into_result().unwrap_err(), "Mã phiếu đã tồn tại");
    }
}
