//! Адденды (тип `7`) — размеченное объединение четырёх раскладок: 02, 05, 98, 99.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes;
use crate::error::{FieldError, FieldErrorKind};
use crate::fields;

/// Терминальная адденда (02) для карточных SEC-кодов.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addenda02 {
    pub record_type: char,
    pub type_code: String,
    pub reference_information_one: String,
    pub reference_information_two: String,
    pub terminal_identification_code: String,
    pub transaction_serial_number: String,
    /// MMDD.
    pub transaction_date: String,
    pub authorization_code_or_expire_date: String,
    pub terminal_location: String,
    pub terminal_city: String,
    pub terminal_state: String,
    pub trace_number: u64,
}

impl Addenda02 {
    pub fn new() -> Self {
        Self {
            record_type: '7',
            type_code: "02".to_string(),
            reference_information_one: String::new(),
            reference_information_two: String::new(),
            terminal_identification_code: String::new(),
            transaction_serial_number: String::new(),
            transaction_date: String::new(),
            authorization_code_or_expire_date: String::new(),
            terminal_location: String::new(),
            terminal_city: String::new(),
            terminal_state: String::new(),
            trace_number: 0,
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        validate_record_type(self.record_type)?;
        validate_type_code(&self.type_code, "02")?;
        fields::check_alphanumeric("ReferenceInformationOne", &self.reference_information_one)?;
        fields::check_alphanumeric("ReferenceInformationTwo", &self.reference_information_two)?;
        if self.terminal_identification_code.is_empty() {
            return Err(FieldError::new(
                "TerminalIdentificationCode",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_alphanumeric(
            "TerminalIdentificationCode",
            &self.terminal_identification_code,
        )?;
        if self.transaction_serial_number.is_empty() {
            return Err(FieldError::new(
                "TransactionSerialNumber",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_alphanumeric("TransactionSerialNumber", &self.transaction_serial_number)?;
        if self.transaction_date.len() != 4
            || !self.transaction_date.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(FieldError::new(
                "TransactionDate",
                &self.transaction_date,
                FieldErrorKind::Format("MMDD"),
            ));
        }
        fields::check_alphanumeric(
            "AuthorizationCodeOrExpireDate",
            &self.authorization_code_or_expire_date,
        )?;
        if self.terminal_location.is_empty() {
            return Err(FieldError::new(
                "TerminalLocation",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_alphanumeric("TerminalLocation", &self.terminal_location)?;
        if self.terminal_city.is_empty() {
            return Err(FieldError::new("TerminalCity", "", FieldErrorKind::Inclusion));
        }
        fields::check_alphanumeric("TerminalCity", &self.terminal_city)?;
        if self.terminal_state.is_empty() {
            return Err(FieldError::new("TerminalState", "", FieldErrorKind::Inclusion));
        }
        fields::check_alphanumeric("TerminalState", &self.terminal_state)?;
        Ok(())
    }
}

impl Default for Addenda02 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Addenda02 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::alpha_field(&self.type_code, 2),
            fields::alpha_field(&self.reference_information_one, 7),
            fields::alpha_field(&self.reference_information_two, 3),
            fields::alpha_field(&self.terminal_identification_code, 6),
            fields::alpha_field(&self.transaction_serial_number, 6),
            fields::alpha_field(&self.transaction_date, 4),
            fields::alpha_field(&self.authorization_code_or_expire_date, 6),
            fields::alpha_field(&self.terminal_location, 27),
            fields::alpha_field(&self.terminal_city, 15),
            fields::alpha_field(&self.terminal_state, 2),
            fields::numeric_field(self.trace_number, 15),
        )
    }
}

/// Платёжная адденда (05) со свободной строкой реквизитов.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addenda05 {
    pub record_type: char,
    pub type_code: String,
    pub payment_related_information: String,
    /// Счётчик с единицы внутри одной проводки; проставляет Create.
    pub addenda_sequence_number: u16,
    /// Последние семь цифр трейса родительской проводки; проставляет Create.
    pub entry_detail_sequence_number: u32,
}

impl Addenda05 {
    pub fn new() -> Self {
        Self {
            record_type: '7',
            type_code: "05".to_string(),
            payment_related_information: String::new(),
            addenda_sequence_number: 0,
            entry_detail_sequence_number: 0,
        }
    }

    pub fn payment_related_information_field(&self) -> String {
        fields::alpha_field(&self.payment_related_information, 80)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        validate_record_type(self.record_type)?;
        validate_type_code(&self.type_code, "05")?;
        fields::check_alphanumeric(
            "PaymentRelatedInformation",
            &self.payment_related_information,
        )?;
        if self.addenda_sequence_number == 0 {
            return Err(FieldError::new(
                "AddendaSequenceNumber",
                "0",
                FieldErrorKind::Inclusion,
            ));
        }
        Ok(())
    }
}

impl Default for Addenda05 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Addenda05 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.record_type,
            fields::alpha_field(&self.type_code, 2),
            self.payment_related_information_field(),
            fields::numeric_field(u64::from(self.addenda_sequence_number), 4),
            fields::numeric_field(u64::from(self.entry_detail_sequence_number), 7),
        )
    }
}

/// Адденда уведомления об изменении (98).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addenda98 {
    pub record_type: char,
    pub type_code: String,
    /// C + две цифры.
    pub change_code: String,
    pub original_trace: u64,
    pub original_dfi: String,
    pub corrected_data: String,
    pub trace_number: u64,
}

impl Addenda98 {
    pub fn new() -> Self {
        Self {
            record_type: '7',
            type_code: "98".to_string(),
            change_code: String::new(),
            original_trace: 0,
            original_dfi: String::new(),
            corrected_data: String::new(),
            trace_number: 0,
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        validate_record_type(self.record_type)?;
        validate_type_code(&self.type_code, "98")?;
        if codes::change_code(&self.change_code).is_none() {
            return Err(FieldError::new(
                "ChangeCode",
                &self.change_code,
                FieldErrorKind::Range("NACHA change codes"),
            ));
        }
        if self.original_trace == 0 {
            return Err(FieldError::new(
                "OriginalTrace",
                "0",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_digits("OriginalDFI", &self.original_dfi)?;
        if self.original_dfi.len() != 8 {
            return Err(FieldError::new(
                "OriginalDFI",
                &self.original_dfi,
                FieldErrorKind::Format("8-digit routing prefix"),
            ));
        }
        if self.corrected_data.is_empty() {
            return Err(FieldError::new(
                "CorrectedData",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_alphanumeric("CorrectedData", &self.corrected_data)?;
        Ok(())
    }
}

impl Default for Addenda98 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Addenda98 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::alpha_field(&self.type_code, 2),
            fields::alpha_field(&self.change_code, 3),
            fields::numeric_field(self.original_trace, 15),
            "      ",
            fields::digits_field(&self.original_dfi, 8),
            fields::alpha_field(&self.corrected_data, 29),
            fields::numeric_field(self.trace_number, 15),
            "               ",
        )
    }
}

/// Адденда возврата (99).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addenda99 {
    pub record_type: char,
    pub type_code: String,
    /// R + две цифры.
    pub return_code: String,
    pub original_trace: u64,
    pub date_of_death: Option<NaiveDate>,
    pub original_dfi: String,
    pub addenda_information: String,
    pub trace_number: u64,
}

impl Addenda99 {
    pub fn new() -> Self {
        Self {
            record_type: '7',
            type_code: "99".to_string(),
            return_code: String::new(),
            original_trace: 0,
            date_of_death: None,
            original_dfi: String::new(),
            addenda_information: String::new(),
            trace_number: 0,
        }
    }

    pub fn date_of_death_field(&self) -> String {
        match self.date_of_death {
            Some(d) => d.format("%y%m%d").to_string(),
            None => "      ".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        validate_record_type(self.record_type)?;
        validate_type_code(&self.type_code, "99")?;
        if codes::return_code(&self.return_code).is_none() {
            return Err(FieldError::new(
                "ReturnCode",
                &self.return_code,
                FieldErrorKind::Range("NACHA return reason codes"),
            ));
        }
        if self.original_trace == 0 {
            return Err(FieldError::new(
                "OriginalTrace",
                "0",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_digits("OriginalDFI", &self.original_dfi)?;
        if self.original_dfi.len() != 8 {
            return Err(FieldError::new(
                "OriginalDFI",
                &self.original_dfi,
                FieldErrorKind::Format("8-digit routing prefix"),
            ));
        }
        fields::check_alphanumeric("AddendaInformation", &self.addenda_information)?;
        Ok(())
    }
}

impl Default for Addenda99 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Addenda99 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::alpha_field(&self.type_code, 2),
            fields::alpha_field(&self.return_code, 3),
            fields::numeric_field(self.original_trace, 15),
            self.date_of_death_field(),
            fields::digits_field(&self.original_dfi, 8),
            fields::alpha_field(&self.addenda_information, 44),
            fields::numeric_field(self.trace_number, 15),
        )
    }
}

/// Общая обёртка: диспетчеризация по коду типа в позициях 1–2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Addenda {
    Terminal(Addenda02),
    Payment(Addenda05),
    Change(Addenda98),
    Return(Addenda99),
}

impl Addenda {
    /// Код типа, как он хранится в записи (может быть искажён вручную).
    pub fn type_code(&self) -> &str {
        match self {
            Addenda::Terminal(a) => &a.type_code,
            Addenda::Payment(a) => &a.type_code,
            Addenda::Change(a) => &a.type_code,
            Addenda::Return(a) => &a.type_code,
        }
    }

    /// Канонический код раскладки данного варианта.
    pub fn canonical_type_code(&self) -> &'static str {
        match self {
            Addenda::Terminal(_) => "02",
            Addenda::Payment(_) => "05",
            Addenda::Change(_) => "98",
            Addenda::Return(_) => "99",
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        match self {
            Addenda::Terminal(a) => a.validate(),
            Addenda::Payment(a) => a.validate(),
            Addenda::Change(a) => a.validate(),
            Addenda::Return(a) => a.validate(),
        }
    }

    pub(crate) fn set_trace_number(&mut self, trace: u64) {
        match self {
            Addenda::Terminal(a) => a.trace_number = trace,
            Addenda::Payment(_) => {}
            Addenda::Change(a) => a.trace_number = trace,
            Addenda::Return(a) => a.trace_number = trace,
        }
    }
}

impl FromStr for Addenda {
    type Err = FieldError;

    fn from_str(line: &str) -> Result<Self, FieldError> {
        fields::frame(line)?;
        let record_type = line.as_bytes()[0] as char;
        match &line[1..3] {
            "02" => Ok(Addenda::Terminal(Addenda02 {
                record_type,
                type_code: line[1..3].to_string(),
                reference_information_one: line[3..10].trim_end().to_string(),
                reference_information_two: line[10..13].trim_end().to_string(),
                terminal_identification_code: line[13..19].trim_end().to_string(),
                transaction_serial_number: line[19..25].trim_end().to_string(),
                transaction_date: line[25..29].to_string(),
                authorization_code_or_expire_date: line[29..35].trim_end().to_string(),
                terminal_location: line[35..62].trim_end().to_string(),
                terminal_city: line[62..77].trim_end().to_string(),
                terminal_state: line[77..79].trim_end().to_string(),
                trace_number: fields::parse_digits("TraceNumber", &line[79..94])?,
            })),
            "05" => Ok(Addenda::Payment(Addenda05 {
                record_type,
                type_code: line[1..3].to_string(),
                payment_related_information: line[3..83].trim_end().to_string(),
                addenda_sequence_number: fields::parse_digits(
                    "AddendaSequenceNumber",
                    &line[83..87],
                )? as u16,
                entry_detail_sequence_number: fields::parse_digits(
                    "EntryDetailSequenceNumber",
                    &line[87..94],
                )? as u32,
            })),
            "98" => Ok(Addenda::Change(Addenda98 {
                record_type,
                type_code: line[1..3].to_string(),
                change_code: line[3..6].trim_end().to_string(),
                original_trace: fields::parse_digits("OriginalTrace", &line[6..21])?,
                original_dfi: line[27..35].to_string(),
                corrected_data: line[35..64].trim_end().to_string(),
                // трейс стоит до хвостового резерва, в позициях 65–79
                trace_number: fields::parse_digits("TraceNumber", &line[64..79])?,
            })),
            "99" => Ok(Addenda::Return(Addenda99 {
                record_type,
                type_code: line[1..3].to_string(),
                return_code: line[3..6].trim_end().to_string(),
                original_trace: fields::parse_digits("OriginalTrace", &line[6..21])?,
                date_of_death: if line[21..27].trim().is_empty() {
                    None
                } else {
                    Some(
                        NaiveDate::parse_from_str(&line[21..27], "%y%m%d").map_err(|_| {
                            FieldError::new(
                                "DateOfDeath",
                                &line[21..27],
                                FieldErrorKind::Format("YYMMDD"),
                            )
                        })?,
                    )
                },
                original_dfi: line[27..35].to_string(),
                addenda_information: line[35..79].trim_end().to_string(),
                trace_number: fields::parse_digits("TraceNumber", &line[79..94])?,
            })),
            other => Err(FieldError::new(
                "TypeCode",
                other,
                FieldErrorKind::Range("02, 05, 98, 99"),
            )),
        }
    }
}

impl fmt::Display for Addenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Addenda::Terminal(a) => a.fmt(f),
            Addenda::Payment(a) => a.fmt(f),
            Addenda::Change(a) => a.fmt(f),
            Addenda::Return(a) => a.fmt(f),
        }
    }
}

fn validate_record_type(rt: char) -> Result<(), FieldError> {
    if rt != '7' {
        return Err(FieldError::new("RecordType", rt, FieldErrorKind::Range("7")));
    }
    Ok(())
}

fn validate_type_code(code: &str, expected: &'static str) -> Result<(), FieldError> {
    if code != expected {
        return Err(FieldError::new("TypeCode", code, FieldErrorKind::Range(expected)));
    }
    Ok(())
}
