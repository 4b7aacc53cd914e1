//! Кодек полей фиксированной ширины: выравнивание, усечение, набор символов.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{FieldError, FieldErrorKind};

/// Разрешённый набор NACHA — печатный ASCII, включая пробел.
/// Регулярка ловит первый символ вне диапазона 0x20..=0x7E.
fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^ -~]").expect("static character-set pattern"))
}

/// Алфавитно-цифровое поле: влево, добивка пробелами, усечение справа.
pub fn alpha_field(value: &str, width: usize) -> String {
    let mut out: String = value.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}

/// Строка из цифр в числовом поле: вправо, добивка нулями слева,
/// при переполнении остаются младшие разряды.
pub fn digits_field(value: &str, width: usize) -> String {
    let n = value.chars().count();
    if n > width {
        return value.chars().skip(n - width).collect();
    }
    let mut out = String::with_capacity(width);
    for _ in n..width {
        out.push('0');
    }
    out.push_str(value);
    out
}

/// Числовое поле: вправо, нули слева, переполнение усекается по младшим разрядам.
pub fn numeric_field(value: u64, width: usize) -> String {
    let truncated = if width >= 20 {
        value
    } else {
        value % 10u64.pow(width as u32)
    };
    format!("{truncated:0width$}")
}

pub fn check_alphanumeric(field_name: &'static str, value: &str) -> Result<(), FieldError> {
    if non_alphanumeric().is_match(value) {
        return Err(FieldError::new(
            field_name,
            value,
            FieldErrorKind::Alphanumeric,
        ));
    }
    Ok(())
}

pub fn check_digits(field_name: &'static str, value: &str) -> Result<(), FieldError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::new(field_name, value, FieldErrorKind::Numeric));
    }
    Ok(())
}

/// Разбор числового поля; ведущие нули игнорируются самим parse.
pub fn parse_digits(field_name: &'static str, value: &str) -> Result<u64, FieldError> {
    check_digits(field_name, value)?;
    value
        .parse::<u64>()
        .map_err(|_| FieldError::new(field_name, value, FieldErrorKind::Numeric))
}

/// Контрольная цифра ABA: веса 3-7-1 по восьми цифрам префикса.
pub fn routing_check_digit(field_name: &'static str, prefix: &str) -> Result<u8, FieldError> {
    if prefix.len() != 8 {
        return Err(FieldError::new(
            field_name,
            prefix,
            FieldErrorKind::Format("8-digit routing prefix"),
        ));
    }
    check_digits(field_name, prefix)?;
    let weights = [3u32, 7, 1, 3, 7, 1, 3, 7];
    let sum: u32 = prefix
        .bytes()
        .zip(weights)
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Кадр записи: ровно 94 байта ASCII. Срезы по смещениям после этой
/// проверки не могут попасть внутрь многобайтового символа.
pub(crate) fn frame(line: &str) -> Result<(), FieldError> {
    if line.len() != 94 || !line.is_ascii() {
        return Err(FieldError::new(
            "Record",
            line.len().to_string(),
            FieldErrorKind::Format("94 ASCII bytes"),
        ));
    }
    Ok(())
}
