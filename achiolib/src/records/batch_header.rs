//! Запись Batch Header (тип `5`).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldErrorKind};
use crate::fields;
use crate::sec::SecCode;

pub const SERVICE_CLASS_CODES: [u16; 4] = [200, 220, 225, 280];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    pub record_type: char,
    /// 200 — смешанный, 220 — только кредиты, 225 — только дебеты, 280 — учётный.
    pub service_class_code: u16,
    pub company_name: String,
    pub company_discretionary_data: String,
    pub company_identification: String,
    /// Хранится как есть; закрытое множество проверяет validate.
    pub standard_entry_class_code: String,
    pub company_entry_description: String,
    /// Свободные 6 символов, датой не обязаны быть.
    pub company_descriptive_date: String,
    pub effective_entry_date: Option<NaiveDate>,
    /// Назначается оператором ACH, на входе пробелы; хранится дословно.
    pub settlement_date: String,
    pub originator_status_code: u8,
    pub odfi_identification: String,
    pub batch_number: u64,
}

impl BatchHeader {
    pub fn new() -> Self {
        Self {
            record_type: '5',
            service_class_code: 0,
            company_name: String::new(),
            company_discretionary_data: String::new(),
            company_identification: String::new(),
            standard_entry_class_code: String::new(),
            company_entry_description: String::new(),
            company_descriptive_date: String::new(),
            effective_entry_date: None,
            settlement_date: "   ".to_string(),
            originator_status_code: 1,
            odfi_identification: String::new(),
            batch_number: 1,
        }
    }

    /// Заголовок под конкретный SEC-код.
    pub fn with_sec(sec: SecCode) -> Self {
        let mut bh = Self::new();
        bh.standard_entry_class_code = sec.as_str().to_string();
        bh
    }

    /// Разбор SEC-кода заголовка; неизвестный код — ошибка поля.
    pub fn sec_code(&self) -> Result<SecCode, FieldError> {
        SecCode::from_code(&self.standard_entry_class_code).ok_or_else(|| {
            FieldError::new(
                "StandardEntryClassCode",
                &self.standard_entry_class_code,
                FieldErrorKind::Range("known SEC codes"),
            )
        })
    }

    pub fn company_name_field(&self) -> String {
        fields::alpha_field(&self.company_name, 16)
    }

    pub fn company_discretionary_data_field(&self) -> String {
        fields::alpha_field(&self.company_discretionary_data, 20)
    }

    pub fn company_identification_field(&self) -> String {
        fields::alpha_field(&self.company_identification, 10)
    }

    pub fn company_entry_description_field(&self) -> String {
        fields::alpha_field(&self.company_entry_description, 10)
    }

    pub fn company_descriptive_date_field(&self) -> String {
        fields::alpha_field(&self.company_descriptive_date, 6)
    }

    pub fn effective_entry_date_field(&self) -> String {
        match self.effective_entry_date {
            Some(d) => d.format("%y%m%d").to_string(),
            None => "      ".to_string(),
        }
    }

    pub fn settlement_date_field(&self) -> String {
        fields::alpha_field(&self.settlement_date, 3)
    }

    pub fn odfi_identification_field(&self) -> String {
        fields::digits_field(&self.odfi_identification, 8)
    }

    pub fn batch_number_field(&self) -> String {
        fields::numeric_field(self.batch_number, 7)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.record_type != '5' {
            return Err(FieldError::new(
                "RecordType",
                self.record_type,
                FieldErrorKind::Range("5"),
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
        if self.company_name.is_empty() {
            return Err(FieldError::new("CompanyName", "", FieldErrorKind::Inclusion));
        }
        fields::check_alphanumeric("CompanyName", &self.company_name)?;
        fields::check_alphanumeric(
            "CompanyDiscretionaryData",
            &self.company_discretionary_data,
        )?;
        if self.company_identification.is_empty() {
            return Err(FieldError::new(
                "CompanyIdentification",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_alphanumeric("CompanyIdentification", &self.company_identification)?;
        if self.standard_entry_class_code.is_empty() {
            return Err(FieldError::new(
                "StandardEntryClassCode",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        self.sec_code()?;
        if self.company_entry_description.is_empty() {
            return Err(FieldError::new(
                "CompanyEntryDescription",
                "",
                FieldErrorKind::Inclusion,
            ));
        }
        fields::check_alphanumeric("CompanyEntryDescription", &self.company_entry_description)?;
        fields::check_alphanumeric("CompanyDescriptiveDate", &self.company_descriptive_date)?;
        let sd = &self.settlement_date;
        if !(sd == "   " || (sd.len() == 3 && sd.bytes().all(|b| b.is_ascii_digit()))) {
            return Err(FieldError::new(
                "SettlementDate",
                sd,
                FieldErrorKind::Format("3 digits or 3 spaces"),
            ));
        }
        if self.originator_status_code == 0 {
            return Err(FieldError::new(
                "OriginatorStatusCode",
                "0",
                FieldErrorKind::Inclusion,
            ));
        }
        if !(1..=3).contains(&self.originator_status_code) {
            return Err(FieldError::new(
                "OriginatorStatusCode",
                self.originator_status_code.to_string(),
                FieldErrorKind::Range("1, 2, 3"),
            ));
        }
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

impl Default for BatchHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BatchHeader {
    type Err = FieldError;

    fn from_str(line: &str) -> Result<Self, FieldError> {
        fields::frame(line)?;
        let effective_entry_date = if line[69..75].trim().is_empty() {
            None
        } else {
            Some(NaiveDate::parse_from_str(&line[69..75], "%y%m%d").map_err(|_| {
                FieldError::new(
                    "EffectiveEntryDate",
                    &line[69..75],
                    FieldErrorKind::Format("YYMMDD"),
                )
            })?)
        };
        let osc = line.as_bytes()[78];
        Ok(Self {
            record_type: line.as_bytes()[0] as char,
            service_class_code: fields::parse_digits("ServiceClassCode", &line[1..4])? as u16,
            company_name: line[4..20].trim_end().to_string(),
            company_discretionary_data: line[20..40].trim_end().to_string(),
            company_identification: line[40..50].trim_end().to_string(),
            standard_entry_class_code: line[50..53].trim_end().to_string(),
            company_entry_description: line[53..63].trim_end().to_string(),
            company_descriptive_date: line[63..69].trim_end().to_string(),
            effective_entry_date,
            settlement_date: line[75..78].to_string(),
            originator_status_code: if osc.is_ascii_digit() { osc - b'0' } else { 0 },
            odfi_identification: line[79..87].to_string(),
            batch_number: fields::parse_digits("BatchNumber", &line[87..94])?,
        })
    }
}

impl fmt::Display for BatchHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}{}{}{}{}{}",
            self.record_type,
            fields::numeric_field(u64::from(self.service_class_code), 3),
            self.company_name_field(),
            self.company_discretionary_data_field(),
            self.company_identification_field(),
            fields::alpha_field(&self.standard_entry_class_code, 3),
            self.company_entry_description_field(),
            self.company_descriptive_date_field(),
            self.effective_entry_date_field(),
            self.settlement_date_field(),
            fields::numeric_field(u64::from(self.originator_status_code), 1),
            self.odfi_identification_field(),
            self.batch_number_field(),
        )
    }
}
