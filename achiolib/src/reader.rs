//! Потоковый разбор: конечный автомат по типу записи в первой позиции.

use std::io::BufRead;

use crate::batch::Batch;
use crate::error::{AchError, FieldError, FileError, Result};
use crate::file::File;
use crate::records::addenda::Addenda;
use crate::records::batch_header::BatchHeader;
use crate::records::entry_detail::EntryDetail;
use crate::records::file_control::FileControl;
use crate::records::file_header::FileHeader;

pub struct Reader<R> {
    input: R,
}

impl<R: BufRead> Reader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Читает весь поток и собирает дерево файла. Первая ошибка —
    /// структурная, полевая или расхождение итогов — прерывает чтение.
    pub fn read(self) -> Result<File> {
        let mut header: Option<FileHeader> = None;
        let mut control: Option<FileControl> = None;
        let mut control_line = 0usize;
        let mut batches: Vec<Batch> = Vec::new();
        let mut current: Option<Batch> = None;
        let mut line_no = 0usize;

        for raw in self.input.lines() {
            let raw = raw?;
            line_no += 1;
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            if control.is_some() {
                // после контрольной записи допустима только добивка девятками
                if line.len() == 94 && line.bytes().all(|b| b == b'9') {
                    continue;
                }
                return Err(structural(line_no, record_type_of(line), "record after file control"));
            }
            if line.len() != 94 || !line.is_ascii() {
                return Err(structural(
                    line_no,
                    record_type_of(line),
                    "record must be 94 ASCII bytes",
                ));
            }
            match line.as_bytes()[0] {
                b'1' => {
                    if header.is_some() {
                        return Err(structural(line_no, '1', "duplicate file header"));
                    }
                    let parsed: FileHeader = parse_record(line_no, '1', line)?;
                    parsed
                        .validate()
                        .map_err(|e| wrap(line_no, '1', e.into()))?;
                    header = Some(parsed);
                }
                b'5' => {
                    if header.is_none() {
                        return Err(structural(line_no, '5', "batch header before file header"));
                    }
                    if current.is_some() {
                        return Err(structural(line_no, '5', "batch header inside an open batch"));
                    }
                    let parsed: BatchHeader = parse_record(line_no, '5', line)?;
                    // подтип пакета выбирается здесь, по SEC-коду заголовка
                    parsed
                        .sec_code()
                        .map_err(|e| wrap(line_no, '5', e.into()))?;
                    current = Some(Batch::from_header(parsed));
                }
                b'6' => {
                    let Some(batch) = current.as_mut() else {
                        return Err(structural(line_no, '6', "entry detail outside of a batch"));
                    };
                    let parsed: EntryDetail = parse_record(line_no, '6', line)?;
                    batch.add_entry(parsed);
                }
                b'7' => {
                    let Some(batch) = current.as_mut() else {
                        return Err(structural(line_no, '7', "addenda outside of a batch"));
                    };
                    let Some(entry) = batch.entries.last_mut() else {
                        return Err(structural(line_no, '7', "addenda without an entry detail"));
                    };
                    let parsed: Addenda = parse_record(line_no, '7', line)?;
                    entry.add_addenda(parsed);
                }
                b'8' => {
                    let Some(mut batch) = current.take() else {
                        return Err(structural(line_no, '8', "batch control without a batch header"));
                    };
                    batch.control = parse_record(line_no, '8', line)?;
                    // заявленные итоги против накопленных; политика строгая
                    batch.validate().map_err(|e| wrap(line_no, '8', e))?;
                    batches.push(batch);
                }
                b'9' => {
                    if header.is_none() {
                        return Err(structural(line_no, '9', "file control before file header"));
                    }
                    if current.is_some() {
                        return Err(structural(line_no, '9', "file control inside an open batch"));
                    }
                    control = Some(parse_record(line_no, '9', line)?);
                    control_line = line_no;
                }
                other => {
                    return Err(structural(line_no, other as char, "unknown record type"));
                }
            }
        }

        let Some(header) = header else {
            return Err(structural(line_no.max(1), '1', "file header not found"));
        };
        if current.is_some() {
            return Err(structural(line_no, '8', "batch control not found"));
        }
        let Some(control) = control else {
            return Err(structural(line_no, '9', "file control not found"));
        };

        let file = File {
            header,
            batches,
            control,
        };
        file.validate().map_err(|e| match e {
            // расхождение итогов файла привязываем к строке контрольной записи
            AchError::Field(fe) => wrap(control_line, '9', fe.into()),
            other => other,
        })?;
        Ok(file)
    }
}

fn parse_record<T: std::str::FromStr<Err = FieldError>>(
    line_no: usize,
    record_type: char,
    line: &str,
) -> Result<T> {
    line.parse::<T>()
        .map_err(|e| wrap(line_no, record_type, e.into()))
}

fn record_type_of(line: &str) -> char {
    line.chars().next().unwrap_or('?')
}

fn structural(line: usize, record_type: char, msg: &str) -> AchError {
    wrap(line, record_type, AchError::Structure(msg.to_string()))
}

fn wrap(line: usize, record_type: char, cause: AchError) -> AchError {
    AchError::File(FileError::new(line, record_type, cause))
}
