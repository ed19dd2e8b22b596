use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid rectangle `{input}`: expected `x0..x1,y0..y1`")]
    InvalidRect { input: String },

    #[error("unknown pattern `{name}` (known: {known})")]
    UnknownPattern { name: String, known: String },

    #[error("invalid value `{value}` for {name}")]
    InvalidValue { name: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
