use serde::Serialize;
use utoipa::ToSchema;

use crate::i18n::Language;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub items: Option<usize>,
    pub language: Option<Language>,
}

impl Meta {
    pub fn new(items: usize, language: Language) -> Self {
        Self {
            items: Some(items),
            language: Some(language),
        }
    }

    pub fn count(items: usize) -> Self {
        Self {
            items: Some(items),
            language: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: None,
            language: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
