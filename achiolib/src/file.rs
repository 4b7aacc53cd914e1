//! Файл ACH: заголовок, пакеты, контрольная запись.

use serde::{Deserialize, Serialize};

use crate::batch::{Batch, ENTRY_HASH_MODULO};
use crate::error::{AchError, BatchError, FieldError, FieldErrorKind, Result};
use crate::records::file_control::FileControl;
use crate::records::file_header::FileHeader;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub header: FileHeader,
    pub batches: Vec<Batch>,
    pub control: FileControl,
}

impl File {
    pub fn new() -> Self {
        Self {
            header: FileHeader::new(),
            batches: Vec::new(),
            control: FileControl::new(),
        }
    }

    pub fn add_batch(&mut self, batch: Batch) {
        self.batches.push(batch);
    }

    /// Число строк сериализации без добивки: заголовок и контроль файла
    /// плюс по два служебных на пакет и по строке на проводку и адденду.
    pub fn line_count(&self) -> u64 {
        2 + self
            .batches
            .iter()
            .map(|b| 2 + b.entry_addenda_count())
            .sum::<u64>()
    }

    pub fn block_count(&self) -> u64 {
        (self.line_count() + 9) / 10
    }

    /// Достраивает дерево до соответствия стандарту: нумерует пакеты,
    /// собирает каждый пакет, заполняет контрольную запись файла.
    /// Идемпотентен; завершается проверкой.
    pub fn create(&mut self) -> Result<()> {
        let mut previous = 0u64;
        for batch in self.batches.iter_mut() {
            // номера монотонны с единицы; заданные вручную возрастающие сохраняются
            if batch.header.batch_number <= previous {
                batch.header.batch_number = previous + 1;
            }
            previous = batch.header.batch_number;
            batch.create()?;
        }

        let mut entry_addenda = 0u64;
        let mut hash = 0u64;
        let mut debits = 0u64;
        let mut credits = 0u64;
        for batch in &self.batches {
            entry_addenda += batch.control.entry_addenda_count;
            hash = (hash + batch.control.entry_hash) % ENTRY_HASH_MODULO;
            debits += batch.control.total_debit_entry_dollar_amount;
            credits += batch.control.total_credit_entry_dollar_amount;
        }
        self.control.batch_count = self.batches.len() as u64;
        self.control.entry_addenda_count = entry_addenda;
        self.control.entry_hash = hash;
        self.control.total_debit_entry_dollar_amount = debits;
        self.control.total_credit_entry_dollar_amount = credits;
        self.control.block_count = self.block_count();
        self.validate()
    }

    /// Чистая проверка: записи файла, сходимость итогов с контрольной
    /// записью, монотонность номеров и каждый пакет по отдельности.
    pub fn validate(&self) -> Result<()> {
        self.header.validate()?;
        self.control.validate()?;

        if self.control.batch_count != self.batches.len() as u64 {
            return Err(mismatch(
                "BatchCount",
                self.control.batch_count,
                self.batches.len() as u64,
            ));
        }
        if self.control.block_count != self.block_count() {
            return Err(mismatch("BlockCount", self.control.block_count, self.block_count()));
        }

        let mut entry_addenda = 0u64;
        let mut hash = 0u64;
        let mut debits = 0u64;
        let mut credits = 0u64;
        for batch in &self.batches {
            entry_addenda += batch.control.entry_addenda_count;
            hash = (hash + batch.control.entry_hash) % ENTRY_HASH_MODULO;
            debits += batch.control.total_debit_entry_dollar_amount;
            credits += batch.control.total_credit_entry_dollar_amount;
        }
        if self.control.entry_addenda_count != entry_addenda {
            return Err(mismatch(
                "EntryAddendaCount",
                self.control.entry_addenda_count,
                entry_addenda,
            ));
        }
        if self.control.entry_hash != hash {
            return Err(mismatch("EntryHash", self.control.entry_hash, hash));
        }
        if self.control.total_debit_entry_dollar_amount != debits {
            return Err(mismatch(
                "TotalDebitEntryDollarAmount",
                self.control.total_debit_entry_dollar_amount,
                debits,
            ));
        }
        if self.control.total_credit_entry_dollar_amount != credits {
            return Err(mismatch(
                "TotalCreditEntryDollarAmount",
                self.control.total_credit_entry_dollar_amount,
                credits,
            ));
        }

        let mut previous = 0u64;
        for batch in &self.batches {
            if batch.header.batch_number <= previous {
                return Err(AchError::Batch(BatchError::new(
                    batch.header.batch_number,
                    "BatchNumber",
                    format!("{} does not ascend past {}", batch.header.batch_number, previous),
                )));
            }
            previous = batch.header.batch_number;
            batch.validate()?;
        }
        Ok(())
    }
}

impl Default for File {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch(field_name: &'static str, stated: u64, computed: u64) -> AchError {
    AchError::Field(FieldError::new(
        field_name,
        stated.to_string(),
        FieldErrorKind::Mismatch {
            expected: computed.to_string(),
        },
    ))
}
