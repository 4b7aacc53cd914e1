//! Пакет проводок: общие правила плюс диспетчеризация по SEC-коду.

use serde::{Deserialize, Serialize};

use crate::error::{AchError, BatchError, FieldError, Result};
use crate::records::addenda::Addenda;
use crate::records::batch_control::BatchControl;
use crate::records::batch_header::BatchHeader;
use crate::records::entry_detail::{
    is_correction_transaction_code, is_credit_transaction_code, is_debit_transaction_code,
    is_prenote_transaction_code, Category, EntryDetail,
};
use crate::sec::SecCode;

/// Хэш проводок хранится в десяти младших разрядах.
pub const ENTRY_HASH_MODULO: u64 = 10_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub header: BatchHeader,
    pub entries: Vec<EntryDetail>,
    pub control: BatchControl,
}

impl Batch {
    pub fn new(sec: SecCode) -> Self {
        Self::from_header(BatchHeader::with_sec(sec))
    }

    pub fn from_header(header: BatchHeader) -> Self {
        Self {
            header,
            entries: Vec::new(),
            control: BatchControl::new(),
        }
    }

    /// Порядок вставки сохраняется и определяет порядок сериализации.
    pub fn add_entry(&mut self, entry: EntryDetail) {
        self.entries.push(entry);
    }

    pub fn entry_addenda_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| 1 + e.addenda.len() as u64)
            .sum()
    }

    pub fn entry_hash(&self) -> u64 {
        let mut hash = 0u64;
        for entry in &self.entries {
            let prefix = entry.rdfi_identification.parse::<u64>().unwrap_or(0);
            hash = (hash + prefix) % ENTRY_HASH_MODULO;
        }
        hash
    }

    pub fn total_debits(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| is_debit_transaction_code(e.transaction_code))
            .map(|e| e.amount)
            .sum()
    }

    pub fn total_credits(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| is_credit_transaction_code(e.transaction_code))
            .map(|e| e.amount)
            .sum()
    }

    /// Проставляет производные поля: трейсы, нумерацию адденд, индикатор,
    /// итоги контрольной записи. Идемпотентен; завершается проверкой.
    pub fn create(&mut self) -> Result<()> {
        let odfi = self.header.odfi_identification.clone();
        let batch_number = self.header.batch_number;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if entry.trace_number == 0 {
                entry
                    .set_trace_number(&odfi, (i + 1) as u64)
                    .map_err(|e| wrap_field(batch_number, &e))?;
            }
            let sequence = entry.trace_sequence();
            let trace = entry.trace_number;
            let mut payment_seq = 0u16;
            for addenda in entry.addenda.iter_mut() {
                if let Addenda::Payment(payment) = addenda {
                    payment_seq += 1;
                    payment.addenda_sequence_number = payment_seq;
                    payment.entry_detail_sequence_number = sequence as u32;
                } else {
                    addenda.set_trace_number(trace);
                }
            }
            entry.addenda_record_indicator =
                if entry.addenda.is_empty() && entry.category == Category::Forward {
                    0
                } else {
                    1
                };
        }
        self.control.service_class_code = self.header.service_class_code;
        self.control.entry_addenda_count = self.entry_addenda_count();
        self.control.entry_hash = self.entry_hash();
        self.control.total_debit_entry_dollar_amount = self.total_debits();
        self.control.total_credit_entry_dollar_amount = self.total_credits();
        self.control.company_identification = self.header.company_identification.clone();
        self.control.odfi_identification = self.header.odfi_identification.clone();
        self.control.batch_number = self.header.batch_number;
        self.validate()
    }

    /// Чистая проверка без мутаций; первая ошибка прерывает обход.
    pub fn validate(&self) -> Result<()> {
        let bn = self.header.batch_number;
        self.header.validate().map_err(|e| wrap_field(bn, &e))?;
        self.control.validate().map_err(|e| wrap_field(bn, &e))?;
        self.validate_mirrors()?;
        self.validate_aggregates()?;

        let sec = self.header.sec_code().map_err(|e| wrap_field(bn, &e))?;
        let rules = sec.rules().ok_or_else(|| {
            batch_err(
                bn,
                "StandardEntryClassCode",
                "IAT batches are not supported".to_string(),
            )
        })?;

        for entry in &self.entries {
            entry.validate().map_err(|e| wrap_field(bn, &e))?;

            // первые восемь цифр трейса — ODFI пакета
            if entry.trace_number_field()[..8] != self.header.odfi_identification_field() {
                return Err(batch_err(
                    bn,
                    "TraceNumber",
                    format!(
                        "{} does not begin with ODFI {}",
                        entry.trace_number_field(),
                        self.header.odfi_identification
                    ),
                ));
            }

            match entry.category {
                Category::Forward => {
                    if !rules.allows_transaction_code(entry.transaction_code) {
                        return Err(batch_err(
                            bn,
                            "TransactionCode",
                            format!("{} is not permitted for {}", entry.transaction_code, sec),
                        ));
                    }
                }
                Category::Return | Category::Noc => {
                    if !is_correction_transaction_code(entry.transaction_code) {
                        return Err(batch_err(
                            bn,
                            "TransactionCode",
                            format!(
                                "{} is not a return or correction code",
                                entry.transaction_code
                            ),
                        ));
                    }
                }
            }

            match self.header.service_class_code {
                220 if is_debit_transaction_code(entry.transaction_code) => {
                    return Err(batch_err(
                        bn,
                        "ServiceClassCode",
                        format!("debit entry {} in a credits-only batch", entry.transaction_code),
                    ));
                }
                225 if is_credit_transaction_code(entry.transaction_code) => {
                    return Err(batch_err(
                        bn,
                        "ServiceClassCode",
                        format!("credit entry {} in a debits-only batch", entry.transaction_code),
                    ));
                }
                _ => {}
            }

            if is_prenote_transaction_code(entry.transaction_code) && entry.amount != 0 {
                return Err(batch_err(
                    bn,
                    "Amount",
                    format!("{} is not zero for a prenotification", entry.amount),
                ));
            }
            if rules.zero_amount && entry.amount != 0 {
                return Err(batch_err(
                    bn,
                    "Amount",
                    format!("{} is not zero for a {} entry", entry.amount, sec),
                ));
            }
            if let Some(max) = rules.max_amount {
                if entry.amount > max {
                    return Err(batch_err(
                        bn,
                        "Amount",
                        format!("{} exceeds the {} ceiling of {}", entry.amount, sec, max),
                    ));
                }
            }
            if rules.identification_required && entry.identification_number.is_empty() {
                return Err(batch_err(
                    bn,
                    "IdentificationNumber",
                    format!("is mandatory for {}", sec),
                ));
            }
            if rules.discretionary_required && entry.discretionary_data.is_empty() {
                return Err(batch_err(
                    bn,
                    "DiscretionaryData",
                    format!("is mandatory for {}", sec),
                ));
            }

            self.validate_addenda(entry, sec, rules)?;
        }
        Ok(())
    }

    fn validate_addenda(
        &self,
        entry: &EntryDetail,
        sec: SecCode,
        rules: &crate::sec::SecRules,
    ) -> Result<()> {
        let bn = self.header.batch_number;
        let mut forward_addenda = 0u16;
        let mut change_addenda = 0u16;
        for addenda in &entry.addenda {
            if addenda.type_code() != addenda.canonical_type_code() {
                return Err(batch_err(
                    bn,
                    "TypeCode",
                    format!("{} is not a valid addenda type code", addenda.type_code()),
                ));
            }
            let allowed = match addenda {
                Addenda::Payment(_) => rules.addenda_code == Some("05"),
                Addenda::Terminal(_) => rules.addenda_code == Some("02"),
                Addenda::Change(_) => entry.category == Category::Noc,
                Addenda::Return(_) => entry.category == Category::Return,
            };
            if !allowed {
                return Err(batch_err(
                    bn,
                    "TypeCode",
                    format!("addenda {} is not permitted for {}", addenda.canonical_type_code(), sec),
                ));
            }
            addenda.validate().map_err(|e| wrap_field(bn, &e))?;
            match addenda {
                Addenda::Payment(_) | Addenda::Terminal(_) => forward_addenda += 1,
                Addenda::Change(_) => change_addenda += 1,
                Addenda::Return(_) => {}
            }
        }
        if forward_addenda > rules.max_addenda {
            return Err(batch_err(
                bn,
                "AddendaCount",
                format!("{} exceeds the {} limit of {}", forward_addenda, sec, rules.max_addenda),
            ));
        }
        if rules.noc {
            if change_addenda != 1 {
                return Err(batch_err(
                    bn,
                    "AddendaCount",
                    format!("{} entries require exactly one addenda 98", sec),
                ));
            }
        } else if rules.addenda_required && forward_addenda == 0 {
            return Err(batch_err(
                bn,
                "AddendaCount",
                format!("{} entries require an addenda {}", sec, rules.addenda_code.unwrap_or("")),
            ));
        }

        let expected = if forward_addenda > 0 || entry.category != Category::Forward {
            1
        } else {
            0
        };
        if entry.addenda_record_indicator != expected {
            return Err(batch_err(
                bn,
                "AddendaRecordIndicator",
                format!("{} does not match the owned addenda", entry.addenda_record_indicator),
            ));
        }
        Ok(())
    }

    fn validate_mirrors(&self) -> Result<()> {
        let bn = self.header.batch_number;
        if self.control.service_class_code != self.header.service_class_code {
            return Err(mirror_err(
                bn,
                "ServiceClassCode",
                self.control.service_class_code,
                self.header.service_class_code,
            ));
        }
        if self.control.company_identification != self.header.company_identification {
            return Err(batch_err(
                bn,
                "CompanyIdentification",
                format!(
                    "{} does not match the batch header value {}",
                    self.control.company_identification, self.header.company_identification
                ),
            ));
        }
        if self.control.odfi_identification != self.header.odfi_identification {
            return Err(batch_err(
                bn,
                "ODFIIdentification",
                format!(
                    "{} does not match the batch header value {}",
                    self.control.odfi_identification, self.header.odfi_identification
                ),
            ));
        }
        if self.control.batch_number != self.header.batch_number {
            return Err(mirror_err(
                bn,
                "BatchNumber",
                self.control.batch_number,
                self.header.batch_number,
            ));
        }
        Ok(())
    }

    fn validate_aggregates(&self) -> Result<()> {
        let bn = self.header.batch_number;
        if self.control.entry_addenda_count != self.entry_addenda_count() {
            return Err(mirror_err(
                bn,
                "EntryAddendaCount",
                self.control.entry_addenda_count,
                self.entry_addenda_count(),
            ));
        }
        if self.control.entry_hash != self.entry_hash() {
            return Err(mirror_err(bn, "EntryHash", self.control.entry_hash, self.entry_hash()));
        }
        if self.control.total_debit_entry_dollar_amount != self.total_debits() {
            return Err(mirror_err(
                bn,
                "TotalDebitEntryDollarAmount",
                self.control.total_debit_entry_dollar_amount,
                self.total_debits(),
            ));
        }
        if self.control.total_credit_entry_dollar_amount != self.total_credits() {
            return Err(mirror_err(
                bn,
                "TotalCreditEntryDollarAmount",
                self.control.total_credit_entry_dollar_amount,
                self.total_credits(),
            ));
        }
        Ok(())
    }
}

fn batch_err(batch_number: u64, field_name: &'static str, msg: String) -> AchError {
    AchError::Batch(BatchError::new(batch_number, field_name, msg))
}

fn mirror_err<T: std::fmt::Display>(
    batch_number: u64,
    field_name: &'static str,
    stated: T,
    computed: T,
) -> AchError {
    batch_err(
        batch_number,
        field_name,
        format!("{stated} does not match the computed value {computed}"),
    )
}

fn wrap_field(batch_number: u64, e: &FieldError) -> AchError {
    AchError::Batch(BatchError::new(
        batch_number,
        e.field_name,
        format!("{} {}", e.value, e.kind),
    ))
}
