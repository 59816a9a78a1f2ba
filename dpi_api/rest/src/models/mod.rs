use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiError<'a> {
    pub error: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ApiContactSuccess {
    pub success: bool,
    pub message: &'static str,
}

impl ApiContactSuccess {
    pub const MESSAGE: &'static str =
        "Your message has been sent successfully. We will get back to you soon.";
}

impl Default for ApiContactSuccess {
    fn default() -> Self {
        Self {
            success: true,
            message: Self::MESSAGE,
        }
    }
}
