use serde::{Deserialize, Serialize};

// 翻译请求 (表单和 JSON 接口共用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    // 缺失字段按空串处理, 由校验给出明确提示
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub model: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }

    /// Returns the reason the request cannot be dispatched, if any.
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.text.is_empty() {
            Some("text field is required")
        } else if self.model.is_empty() {
            Some("model field is required")
        } else {
            None
        }
    }
}

// 翻译结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original: String,
    pub translated: String,
    pub model: String,
}

impl TranslationResponse {
    pub fn new(request: &TranslationRequest, translated: impl Into<String>) -> Self {
        Self {
            original: request.text.clone(),
            translated: translated.into(),
            model: request.model.clone(),
        }
    }
}
