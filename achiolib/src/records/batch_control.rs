//! Запись Batch Control (тип `8`) — зеркальные и вычисляемые поля пакета.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldErrorKind};
use crate::fields;
use crate::records::batch_header::SERVICE_CLASS_CODES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchControl {
    pub record_type: char,
    pub service_class_code: u16,
    pub entry_addenda_count: u64,
    /// Сумма восьмизначных префиксов RDFI, младшие десять разрядов.
    pub entry_hash: u64,
    pub total_debit_entry_dollar_amount: u64,
    pub total_credit_entry_dollar_amount: u64,
    pub company_identification: String,
    pub message_authentication_code: String,
    pub odfi_identification: String,
    pub batch_number: u64,
}

impl BatchControl {
    pub fn new() -> Self {
        Self {
            record_type: '8',
            service_class_code: 0,
            entry_addenda_count: 0,
            entry_hash: 0,
            total_debit_entry_dollar_amount: 0,
            total_credit_entry_dollar_amount: 0,
            company_identification: String::new(),
            message_authentication_code: String::new(),
            odfi_identification: String::new(),
            batch_number: 0,
        }
    }

    pub fn entry_hash_field(&self) -> String {
        fields::numeric_field(self.entry_hash, 10)
    }

    pub fn company_identification_field(&self) -> String {
        fields::alpha_field(&self.company_identification, 10)
    }

    pub fn odfi_identification_field(&self) -> String {
        fields::digits_field(&self.odfi_identification, 8)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.record_type != '8' {
            return Err(FieldError::new(
                "RecordType",
                self.record_type,
                FieldErrorKind::Range("8"),
            ));
        }
        if self.service_class_code == 0 {
            return Err(FieldError::new(
                "ServiceClassCode",
                "0",
                FieldErrorKind::Inclusion,
            ));
        }
        if !SERVICE_CLASS_CODES.contains(&self.service_class_code) {
            return Err(FieldError::new(
                "ServiceClassCode",
                self.service_class_code.to_string(),
                FieldErrorKind::Range("200, 220, 225, 280"),
            ));
        }
        fields::check_alphanumeric("CompanyIdentification", &self.company_identification)?;
        fields::check_alphanumeric(
            "MessageAuthenticationCode",
            &self.message_authentication_code,
        )?;
        if self.odfi_identification.is_empty() {
            return Err(FieldError::new(
                "ODFIIdentification",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_digits("ODFIIdentification", &self.odfi_identification)?;
        if self.odfi_identification.len() != 8 {
            return Err(FieldError::new(
                "ODFIIdentification",
                &self.odfi_identification,
                FieldErrorKind::Format("8-digit routing prefix"),
            ));
        }
        if self.batch_number == 0 {
            return Err(FieldError::new("BatchNumber", "0", FieldErrorKind::Inclusion));
        }
        Ok(())
    }
}

impl Default for BatchControl {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BatchControl {
    type Err = FieldError;

    fn from_str(line: &str) -> Result<Self, FieldError> {
        fields::frame(line)?;
        Ok(Self {
            record_type: line.as_bytes()[0] as char,
            service_class_code: fields::parse_digits("ServiceClassCode", &line[1..4])? as u16,
            entry_addenda_count: fields::parse_digits("EntryAddendaCount", &line[4..10])?,
            entry_hash: fields::parse_digits("EntryHash", &line[10..20])?,
            total_debit_entry_dollar_amount: fields::parse_digits(
                "TotalDebitEntryDollarAmount",
                &line[20..32],
            )?,
            total_credit_entry_dollar_amount: fields::parse_digits(
                "TotalCreditEntryDollarAmount",
                &line[32..44],
            )?,
            company_identification: line[44..54].trim_end().to_string(),
            message_authentication_code: line[54..73].trim_end().to_string(),
            odfi_identification: line[79..87].to_string(),
            batch_number: fields::parse_digits("BatchNumber", &line[87..94])?,
        })
    }
}

impl fmt::Display for BatchControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::numeric_field(u64::from(self.service_class_code), 3),
            fields::numeric_field(self.entry_addenda_count, 6),
            self.entry_hash_field(),
            fields::numeric_field(self.total_debit_entry_dollar_amount, 12),
            fields::numeric_field(self.total_credit_entry_dollar_amount, 12),
            self.company_identification_field(),
            fields::alpha_field(&self.message_authentication_code, 19),
            "      ",
            self.odfi_identification_field(),
            fields::numeric_field(self.batch_number, 7),
        )
    }
}
