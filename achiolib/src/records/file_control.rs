//! Запись File Control (тип `9`) — итоги по файлу; все поля вычисляемые.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldErrorKind};
use crate::fields;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileControl {
    pub record_type: char,
    pub batch_count: u64,
    /// Количество блоков по десять строк с учётом добивки.
    pub block_count: u64,
    pub entry_addenda_count: u64,
    pub entry_hash: u64,
    pub total_debit_entry_dollar_amount: u64,
    pub total_credit_entry_dollar_amount: u64,
}

impl FileControl {
    pub fn new() -> Self {
        Self {
            record_type: '9',
            batch_count: 0,
            block_count: 0,
            entry_addenda_count: 0,
            entry_hash: 0,
            total_debit_entry_dollar_amount: 0,
            total_credit_entry_dollar_amount: 0,
        }
    }

    pub fn entry_hash_field(&self) -> String {
        fields::numeric_field(self.entry_hash, 10)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.record_type != '9' {
            return Err(FieldError::new(
                "RecordType",
                self.record_type,
                FieldErrorKind::Range("9"),
            ));
        }
        Ok(())
    }
}

impl Default for FileControl {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for FileControl {
    type Err = FieldError;

    fn from_str(line: &str) -> Result<Self, FieldError> {
        fields::frame(line)?;
        Ok(Self {
            record_type: line.as_bytes()[0] as char,
            batch_count: fields::parse_digits("BatchCount", &line[1..7])?,
            block_count: fields::parse_digits("BlockCount", &line[7..13])?,
            entry_addenda_count: fields::parse_digits("EntryAddendaCount", &line[13..21])?,
            entry_hash: fields::parse_digits("EntryHash", &line[21..31])?,
            total_debit_entry_dollar_amount: fields::parse_digits(
                "TotalDebitEntryDollarAmount",
                &line[31..43],
            )?,
            total_credit_entry_dollar_amount: fields::parse_digits(
                "TotalCreditEntryDollarAmount",
                &line[43..55],
            )?,
        })
    }
}

impl fmt::Display for FileControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::numeric_field(self.batch_count, 6),
            fields::numeric_field(self.block_count, 6),
            fields::numeric_field(self.entry_addenda_count, 8),
            self.entry_hash_field(),
            fields::numeric_field(self.total_debit_entry_dollar_amount, 12),
            fields::numeric_field(self.total_credit_entry_dollar_amount, 12),
            " ".repeat(39),
        )
    }
}
