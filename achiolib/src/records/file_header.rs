//! Запись File Header (тип `1`) — первая строка файла.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldErrorKind};
use crate::fields;

pub const RECORD_SIZE: &str = "094";
pub const BLOCKING_FACTOR: &str = "10";
pub const FORMAT_CODE: char = '1';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    pub record_type: char,
    pub priority_code: String,
    /// Маршрутный номер получателя файла, 9 цифр; на проводе с ведущим пробелом.
    pub immediate_destination: String,
    /// Идентификатор отправителя, 9 или 10 цифр.
    pub immediate_origin: String,
    pub file_creation_date: NaiveDate,
    pub file_creation_time: NaiveTime,
    pub file_id_modifier: char,
    pub record_size: String,
    pub blocking_factor: String,
    pub format_code: char,
    pub immediate_destination_name: String,
    pub immediate_origin_name: String,
    pub reference_code: String,
}

impl FileHeader {
    pub fn new() -> Self {
        let now = chrono::Local::now();
        // секунды в формат HHMM не попадают, обнуляем сразу
        let time = NaiveTime::from_hms_opt(now.time().hour(), now.time().minute(), 0)
            .unwrap_or(NaiveTime::MIN);
        Self {
            record_type: '1',
            priority_code: "01".to_string(),
            immediate_destination: String::new(),
            immediate_origin: String::new(),
            file_creation_date: now.date_naive(),
            file_creation_time: time,
            file_id_modifier: 'A',
            record_size: RECORD_SIZE.to_string(),
            blocking_factor: BLOCKING_FACTOR.to_string(),
            format_code: FORMAT_CODE,
            immediate_destination_name: String::new(),
            immediate_origin_name: String::new(),
            reference_code: String::new(),
        }
    }

    pub fn immediate_destination_field(&self) -> String {
        format!(" {}", fields::digits_field(&self.immediate_destination, 9))
    }

    pub fn immediate_origin_field(&self) -> String {
        if self.immediate_origin.len() >= 10 {
            fields::alpha_field(&self.immediate_origin, 10)
        } else {
            format!(" {}", fields::digits_field(&self.immediate_origin, 9))
        }
    }

    pub fn file_creation_date_field(&self) -> String {
        self.file_creation_date.format("%y%m%d").to_string()
    }

    pub fn file_creation_time_field(&self) -> String {
        self.file_creation_time.format("%H%M").to_string()
    }

    pub fn immediate_destination_name_field(&self) -> String {
        fields::alpha_field(&self.immediate_destination_name, 23)
    }

    pub fn immediate_origin_name_field(&self) -> String {
        fields::alpha_field(&self.immediate_origin_name, 23)
    }

    pub fn reference_code_field(&self) -> String {
        fields::alpha_field(&self.reference_code, 8)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.record_type != '1' {
            return Err(FieldError::new(
                "RecordType",
                self.record_type,
                FieldErrorKind::Range("1"),
            ));
        }
        fields::check_digits("PriorityCode", &self.priority_code)?;
        if self.immediate_destination.is_empty() {
            return Err(FieldError::new(
                "ImmediateDestination",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_digits("ImmediateDestination", &self.immediate_destination)?;
        if self.immediate_destination.len() != 9 {
            return Err(FieldError::new(
                "ImmediateDestination",
                &self.immediate_destination,
                FieldErrorKind::Format("9-digit routing number"),
            ));
        }
        let computed = fields::routing_check_digit(
            "ImmediateDestination",
            &self.immediate_destination[..8],
        )?;
        if u32::from(computed) != u32::from(self.immediate_destination.as_bytes()[8] - b'0') {
            return Err(FieldError::new(
                "ImmediateDestination",
                &self.immediate_destination,
                FieldErrorKind::CheckDigit,
            ));
        }
        if self.immediate_origin.is_empty() {
            return Err(FieldError::new(
                "ImmediateOrigin",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_digits("ImmediateOrigin", &self.immediate_origin)?;
        if self.immediate_origin.len() < 9 || self.immediate_origin.len() > 10 {
            return Err(FieldError::new(
                "ImmediateOrigin",
                &self.immediate_origin,
                FieldErrorKind::Format("9 or 10 digit identifier"),
            ));
        }
        if !self.file_id_modifier.is_ascii_uppercase() && !self.file_id_modifier.is_ascii_digit() {
            return Err(FieldError::new(
                "FileIDModifier",
                self.file_id_modifier,
                FieldErrorKind::Range("A-Z or 0-9"),
            ));
        }
        if self.record_size != RECORD_SIZE {
            return Err(FieldError::new(
                "RecordSize",
                &self.record_size,
                FieldErrorKind::Range("094"),
            ));
        }
        if self.blocking_factor != BLOCKING_FACTOR {
            return Err(FieldError::new(
                "BlockingFactor",
                &self.blocking_factor,
                FieldErrorKind::Range("10"),
            ));
        }
        if self.format_code != FORMAT_CODE {
            return Err(FieldError::new(
                "FormatCode",
                self.format_code,
                FieldErrorKind::Range("1"),
            ));
        }
        fields::check_alphanumeric(
            "ImmediateDestinationName",
            &self.immediate_destination_name,
        )?;
        fields::check_alphanumeric("ImmediateOriginName", &self.immediate_origin_name)?;
        fields::check_alphanumeric("ReferenceCode", &self.reference_code)?;
        Ok(())
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for FileHeader {
    type Err = FieldError;

    fn from_str(line: &str) -> Result<Self, FieldError> {
        fields::frame(line)?;
        let file_creation_date = NaiveDate::parse_from_str(&line[23..29], "%y%m%d")
            .map_err(|_| {
                FieldError::new("FileCreationDate", &line[23..29], FieldErrorKind::Format("YYMMDD"))
            })?;
        let file_creation_time = NaiveTime::parse_from_str(&line[29..33], "%H%M").map_err(|_| {
            FieldError::new("FileCreationTime", &line[29..33], FieldErrorKind::Format("HHMM"))
        })?;
        Ok(Self {
            record_type: line.as_bytes()[0] as char,
            priority_code: line[1..3].to_string(),
            immediate_destination: line[3..13].trim().to_string(),
            immediate_origin: line[13..23].trim().to_string(),
            file_creation_date,
            file_creation_time,
            file_id_modifier: line.as_bytes()[33] as char,
            record_size: line[34..37].to_string(),
            blocking_factor: line[37..39].to_string(),
            format_code: line.as_bytes()[39] as char,
            immediate_destination_name: line[40..63].trim_end().to_string(),
            immediate_origin_name: line[63..86].trim_end().to_string(),
            reference_code: line[86..94].trim_end().to_string(),
        })
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::digits_field(&self.priority_code, 2),
            self.immediate_destination_field(),
            self.immediate_origin_field(),
            self.file_creation_date_field(),
            self.file_creation_time_field(),
            self.file_id_modifier,
            fields::alpha_field(&self.record_size, 3),
            fields::alpha_field(&self.blocking_factor, 2),
            self.format_code,
            self.immediate_destination_name_field(),
            self.immediate_origin_name_field(),
            self.reference_code_field(),
        )
    }
}
