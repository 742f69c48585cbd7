use thiserror::Error;

/// A value rejected by one of the playground's bounded controls
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),

    #[error("unknown breakpoint `{0}`")]
    UnknownBreakpoint(String),

    #[error("unknown font `{0}`")]
    UnknownFont(String),

    #[error("font weight {0} is not one of 100, 200, ..., 900")]
    InvalidWeight(u16),

    #[error("base font size {0}px is not one of 8, 10, 12, 14, 16")]
    InvalidBaseSize(f32),

    #[error("{control} must be a finite number")]
    NonFinite { control: &'static str },
}
