//! Запись Entry Detail (тип `6`) и коды транзакций.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldErrorKind};
use crate::fields;
use crate::records::addenda::Addenda;

/// Первая цифра — тип счёта (2 чековый, 3 сберегательный, 4 GL, 5 ссудный),
/// вторая — направление и назначение (живой, пренотификация, возврат/NOC).
pub const fn is_transaction_code(code: u8) -> bool {
    matches!(
        code,
        21..=24 | 26..=29 | 31..=34 | 36..=39 | 41..=44 | 46..=49 | 51..=56
    )
}

pub const fn is_credit_transaction_code(code: u8) -> bool {
    matches!(code, 21..=24 | 31..=34 | 41..=44 | 51..=54)
}

pub const fn is_debit_transaction_code(code: u8) -> bool {
    matches!(code, 26..=29 | 36..=39 | 46..=49 | 55 | 56)
}

pub const fn is_prenote_transaction_code(code: u8) -> bool {
    matches!(code, 23 | 28 | 33 | 38 | 43 | 48 | 53)
}

/// Коды возвратов и уведомлений об изменении (x1/x6).
pub const fn is_correction_transaction_code(code: u8) -> bool {
    matches!(code, 21 | 26 | 31 | 36 | 41 | 46 | 51 | 56)
}

/// Классификация проводки в памяти; на провод не попадает.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Forward,
    Return,
    Noc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub record_type: char,
    pub transaction_code: u8,
    /// Восемь цифр маршрутного номера RDFI без контрольной.
    pub rdfi_identification: String,
    pub check_digit: u8,
    pub dfi_account_number: String,
    /// Сумма в центах, до десяти разрядов.
    pub amount: u64,
    pub identification_number: String,
    pub individual_name: String,
    pub discretionary_data: String,
    pub addenda_record_indicator: u8,
    /// Пятнадцать разрядов: восемь ODFI плюс семь порядковых.
    pub trace_number: u64,
    pub addenda: Vec<Addenda>,
    pub category: Category,
}

impl EntryDetail {
    pub fn new() -> Self {
        Self {
            record_type: '6',
            transaction_code: 0,
            rdfi_identification: String::new(),
            check_digit: 0,
            dfi_account_number: String::new(),
            amount: 0,
            identification_number: String::new(),
            individual_name: String::new(),
            discretionary_data: String::new(),
            addenda_record_indicator: 0,
            trace_number: 0,
            addenda: Vec::new(),
            category: Category::Forward,
        }
    }

    /// Принимает девятизначный маршрутный номер, сверяет контрольную цифру
    /// и раскладывает его на префикс и контрольный разряд.
    pub fn set_rdfi(&mut self, routing: &str) -> Result<(), FieldError> {
        fields::check_digits("RDFIIdentification", routing)?;
        if routing.len() != 9 {
            return Err(FieldError::new(
                "RDFIIdentification",
                routing,
                FieldErrorKind::Format("9-digit routing number"),
            ));
        }
        let prefix = &routing[..8];
        let supplied = routing.as_bytes()[8] - b'0';
        let computed = fields::routing_check_digit("RDFIIdentification", prefix)?;
        if supplied != computed {
            return Err(FieldError::new(
                "RDFIIdentification",
                routing,
                FieldErrorKind::CheckDigit,
            ));
        }
        self.rdfi_identification = prefix.to_string();
        self.check_digit = supplied;
        Ok(())
    }

    /// Трейс = восемь цифр ODFI плюс порядковый номер внутри пакета.
    pub fn set_trace_number(&mut self, odfi_prefix: &str, sequence: u64) -> Result<(), FieldError> {
        let odfi = fields::parse_digits("TraceNumber", odfi_prefix)?;
        self.trace_number = odfi * 10_000_000 + sequence % 10_000_000;
        Ok(())
    }

    /// Добавляет адденду и классифицирует проводку по её виду.
    pub fn add_addenda(&mut self, addenda: Addenda) {
        match addenda {
            Addenda::Return(_) => self.category = Category::Return,
            Addenda::Change(_) => self.category = Category::Noc,
            _ => {}
        }
        self.addenda.push(addenda);
    }

    pub fn rdfi_identification_field(&self) -> String {
        fields::digits_field(&self.rdfi_identification, 8)
    }

    pub fn dfi_account_number_field(&self) -> String {
        fields::alpha_field(&self.dfi_account_number, 17)
    }

    pub fn amount_field(&self) -> String {
        fields::numeric_field(self.amount, 10)
    }

    pub fn identification_number_field(&self) -> String {
        fields::alpha_field(&self.identification_number, 15)
    }

    pub fn individual_name_field(&self) -> String {
        fields::alpha_field(&self.individual_name, 22)
    }

    pub fn discretionary_data_field(&self) -> String {
        fields::alpha_field(&self.discretionary_data, 2)
    }

    pub fn trace_number_field(&self) -> String {
        fields::numeric_field(self.trace_number, 15)
    }

    /// Последние семь цифр трейса — порядковый номер внутри пакета.
    pub fn trace_sequence(&self) -> u64 {
        self.trace_number % 10_000_000
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.record_type != '6' {
            return Err(FieldError::new(
                "RecordType",
                self.record_type,
                FieldErrorKind::Range("6"),
            ));
        }
        if self.transaction_code == 0 {
            return Err(FieldError::new(
                "TransactionCode",
                "0",
                FieldErrorKind::Inclusion,
            ));
        }
        if !is_transaction_code(self.transaction_code) {
            return Err(FieldError::new(
                "TransactionCode",
                self.transaction_code.to_string(),
                FieldErrorKind::Range("NACHA transaction codes"),
            ));
        }
        if self.rdfi_identification.is_empty() {
            return Err(FieldError::new(
                "RDFIIdentification",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_digits("RDFIIdentification", &self.rdfi_identification)?;
        if self.rdfi_identification.len() != 8 {
            return Err(FieldError::new(
                "RDFIIdentification",
                &self.rdfi_identification,
                FieldErrorKind::Format("8-digit routing prefix"),
            ));
        }
        let computed =
            fields::routing_check_digit("RDFIIdentification", &self.rdfi_identification)?;
        if computed != self.check_digit {
            return Err(FieldError::new(
                "CheckDigit",
                self.check_digit.to_string(),
                FieldErrorKind::CheckDigit,
            ));
        }
        fields::check_alphanumeric("DFIAccountNumber", &self.dfi_account_number)?;
        if self.amount > 9_999_999_999 {
            return Err(FieldError::new(
                "Amount",
                self.amount.to_string(),
                FieldErrorKind::Format("amount of at most 10 digits"),
            ));
        }
        fields::check_alphanumeric("IdentificationNumber", &self.identification_number)?;
        if self.individual_name.is_empty() {
            return Err(FieldError::new(
                "IndividualName",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_alphanumeric("IndividualName", &self.individual_name)?;
        fields::check_alphanumeric("DiscretionaryData", &self.discretionary_data)?;
        if self.addenda_record_indicator > 1 {
            return Err(FieldError::new(
                "AddendaRecordIndicator",
                self.addenda_record_indicator.to_string(),
                FieldErrorKind::Range("0 or 1"),
            ));
        }
        if self.trace_number == 0 {
            return Err(FieldError::new("TraceNumber", "0", FieldErrorKind::Inclusion));
        }
        if self.trace_number > 999_999_999_999_999 {
            return Err(FieldError::new(
                "TraceNumber",
                self.trace_number.to_string(),
                FieldErrorKind::Format("15-digit trace number"),
            ));
        }
        Ok(())
    }
}

impl Default for EntryDetail {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for EntryDetail {
    type Err = FieldError;

    fn from_str(line: &str) -> Result<Self, FieldError> {
        fields::frame(line)?;
        Ok(Self {
            record_type: line.as_bytes()[0] as char,
            transaction_code: fields::parse_digits("TransactionCode", &line[1..3])? as u8,
            rdfi_identification: line[3..11].to_string(),
            check_digit: fields::parse_digits("CheckDigit", &line[11..12])? as u8,
            dfi_account_number: line[12..29].trim_end().to_string(),
            amount: fields::parse_digits("Amount", &line[29..39])?,
            identification_number: line[39..54].trim_end().to_string(),
            individual_name: line[54..76].trim_end().to_string(),
            discretionary_data: line[76..78].trim_end().to_string(),
            addenda_record_indicator: fields::parse_digits(
                "AddendaRecordIndicator",
                &line[78..79],
            )? as u8,
            trace_number: fields::parse_digits("TraceNumber", &line[79..94])?,
            addenda: Vec::new(),
            category: Category::Forward,
        })
    }
}

impl fmt::Display for EntryDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::numeric_field(u64::from(self.transaction_code), 2),
            self.rdfi_identification_field(),
            fields::numeric_field(u64::from(self.check_digit), 1),
            self.dfi_account_number_field(),
            self.amount_field(),
            self.identification_number_field(),
            self.individual_name_field(),
            self.discretionary_data_field(),
            self.addenda_record_indicator,
            self.trace_number_field(),
        )
    }
}
