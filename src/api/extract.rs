use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// `Json` whose rejections render as the 400 failure envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejections render as the 400 failure envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Collects missing required fields so one response can name all of them.
pub struct Required {
    what: &'static str,
    missing: Vec<&'static str>,
}

impl Required {
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            missing: Vec::new(),
        }
    }

    /// Blank strings count as missing.
    pub fn text(&mut self, field: &'static str, value: Option<String>) -> String {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => v,
            None => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    pub fn value<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(self.into_error())
    }

    pub fn into_error(self) -> ApiError {
        ApiError::Validation(format!(
            "Missing required fields for {}: {}",
            self.what,
            self.missing.join(", ")
        ))
    }
}
