//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error("{0}")]
    Structure(String),
}

pub type Result<T> = std::result::Result<T, AchError>;

/// Ошибка одного поля записи: имя поля, значение и причина.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field_name} {value} {kind}")]
pub struct FieldError {
    pub field_name: &'static str,
    pub value: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field_name: &'static str, value: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field_name,
            value: value.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("is a mandatory field and has no value")]
    Inclusion,

    #[error("contains a character outside the NACHA alphanumeric set")]
    Alphanumeric,

    #[error("contains a non-digit character")]
    Numeric,

    #[error("is outside its allowed set: {0}")]
    Range(&'static str),

    #[error("does not match the expected format: {0}")]
    Format(&'static str),

    #[error("does not match the computed check digit")]
    CheckDigit,

    #[error("does not match the value derived from the record tree: expected {expected}")]
    Mismatch { expected: String },
}

/// Ошибка уровня пакета. Формат Display закреплён тестами.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("BatchNumber {batch_number} {field_name} {msg}")]
pub struct BatchError {
    pub batch_number: u64,
    pub field_name: &'static str,
    pub msg: String,
}

impl BatchError {
    pub fn new(batch_number: u64, field_name: &'static str, msg: impl Into<String>) -> Self {
        Self {
            batch_number,
            field_name,
            msg: msg.into(),
        }
    }
}

/// Ошибка чтения файла: номер строки (с единицы), тип записи и причина.
#[derive(Debug, Error)]
#[error("line {line} record type {record_type}: {cause}")]
pub struct FileError {
    pub line: usize,
    pub record_type: char,
    #[source]
    pub cause: Box<AchError>,
}

impl FileError {
    pub fn new(line: usize, record_type: char, cause: AchError) -> Self {
        Self {
            line,
            record_type,
            cause: Box::new(cause),
        }
    }
}
