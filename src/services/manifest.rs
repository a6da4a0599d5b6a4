//! manifest.rs
//!
//! Разбор и валидация манифеста посадки.
//!
//! Манифест - текст построчно: первая непустая строка это заголовок с колонками
//! `Booking_ID` и `Seats`, дальше по одной брони на строку. Поля разделяются
//! пробелами и/или запятыми. Валидация идет строго по порядку и останавливается
//! на первой ошибке.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::{ManifestError, ValidationError};
use crate::models::{BookingRecord, SeatCode, SeatError};

pub const BOOKING_ID_HEADER: &str = "Booking_ID";
pub const SEATS_HEADER: &str = "Seats";

/// Результат успешной валидации.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedManifest {
    pub records: Vec<BookingRecord>,
}

impl CleanedManifest {
    /// Очищенный текст: `"<id> <seat> ..."` по строке на бронь.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for CleanedManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&record.cleaned_line())?;
        }
        Ok(())
    }
}

/// Позиции обязательных колонок в заголовке.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderLayout {
    booking_id: usize,
    seats: usize,
}

impl HeaderLayout {
    fn parse(line: &str) -> Option<Self> {
        let headers = split_fields(line);
        let booking_id = headers.iter().position(|h| *h == BOOKING_ID_HEADER)?;
        let seats = headers.iter().position(|h| *h == SEATS_HEADER)?;
        Some(Self { booking_id, seats })
    }

    // Сколько полей нужно строке, чтобы покрыть обе колонки
    fn width(&self) -> usize {
        self.booking_id.max(self.seats) + 1
    }
}

/// Делит строку по группам пробелов и запятых.
///
/// Разделитель в начале или в конце строки дает пустое поле, пустая строка дает
/// одно пустое поле.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_delimiter = false;

    for (idx, ch) in line.char_indices() {
        if is_delimiter(ch) {
            if !in_delimiter {
                fields.push(&line[start..idx]);
                in_delimiter = true;
            }
        } else if in_delimiter {
            start = idx;
            in_delimiter = false;
        }
    }

    fields.push(if in_delimiter { "" } else { &line[start..] });
    fields
}

fn is_delimiter(ch: char) -> bool {
    ch == ',' || ch.is_whitespace()
}

/// Целое число в начале токена: необязательный знак и хотя бы одна цифра.
/// Остаток токена игнорируется, `"12b"` дает 12.
pub fn parse_integer_prefix(token: &str) -> Option<i64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let sign_len = token.len() - unsigned.len();
    token[..sign_len + digits].parse().ok()
}

/// Непустые строки манифеста без пробелов по краям.
pub fn manifest_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Проверяет манифест и возвращает очищенные брони.
///
/// Короткие строки (полей меньше, чем нужно для обеих колонок) пропускаются
/// без ошибки. Номера строк в ошибках считаются по непустым строкам с 1.
pub fn validate(raw: &str) -> Result<CleanedManifest, ValidationError> {
    let reject = |reason: ManifestError| ValidationError::new(reason, raw);

    let lines: Vec<&str> = manifest_lines(raw).collect();
    if lines.len() < 2 {
        return Err(reject(ManifestError::EmptyManifest));
    }

    let layout =
        HeaderLayout::parse(lines[0]).ok_or_else(|| reject(ManifestError::MissingHeaders))?;

    let mut assigned: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(lines.len() - 1);

    for (i, line) in lines.iter().enumerate().skip(1) {
        let line_no = i + 1;
        match validate_row(line, line_no, layout, &mut assigned).map_err(reject)? {
            Some(record) => records.push(record),
            None => debug!("Skipping short line {}", line_no),
        }
    }

    Ok(CleanedManifest { records })
}

fn validate_row(
    line: &str,
    line_no: usize,
    layout: HeaderLayout,
    assigned: &mut HashSet<String>,
) -> Result<Option<BookingRecord>, ManifestError> {
    let fields = split_fields(line);
    if fields.len() < layout.width() {
        return Ok(None);
    }

    let id_token = fields[layout.booking_id];
    let seat_tokens: Vec<&str> = split_fields(fields[layout.seats])
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    let id = match parse_integer_prefix(id_token) {
        Some(id) if !seat_tokens.is_empty() => id,
        _ => return Err(ManifestError::InvalidBookingRow { line: line_no }),
    };

    let mut seats = Vec::with_capacity(seat_tokens.len());
    for token in seat_tokens {
        let seat = SeatCode::parse(token).map_err(|err| match err {
            SeatError::Format => ManifestError::InvalidSeatFormat {
                line: line_no,
                token: token.to_string(),
            },
            SeatError::Number => ManifestError::InvalidSeatNumber {
                line: line_no,
                token: token.to_string(),
            },
        })?;

        if !assigned.insert(seat.normalized()) {
            return Err(ManifestError::DuplicateSeat {
                line: line_no,
                token: token.to_string(),
            });
        }
        seats.push(seat);
    }

    Ok(Some(BookingRecord {
        id,
        id_token: id_token.to_string(),
        seats,
    }))
}
