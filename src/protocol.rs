use serde::Serialize;

pub const HELLO_MESSAGE: &str = "Hello, World!";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: ToString>(message: S) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn hello() -> Self {
        Self::new(HELLO_MESSAGE)
    }
}
