//! Application error carrying the process exit code.
//!
//! Exit codes:
//! - `2`: input problems (missing files/columns, bad options)
//! - `3`: data shape problems (empty inputs, strict grid mismatches)
//! - `4`: rendering or terminal failures

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub const INPUT: u8 = 2;
    pub const SHAPE: u8 = 3;
    pub const RENDER: u8 = 4;

    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(Self::INPUT, message)
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(Self::SHAPE, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(Self::RENDER, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
