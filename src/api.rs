use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// The `{"error": {"message": ...}}` envelope every failure is reported in.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

impl ErrorBody {
    pub fn new(msg: &str) -> Self {
        ErrorBody {
            error: ErrorMessage {
                message: msg.to_owned(),
            },
        }
    }
}
