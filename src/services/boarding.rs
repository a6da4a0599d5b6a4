//! boarding.rs
//!
//! Порядок посадки: сначала дальние ряды, в одном ряду сначала окна,
//! при полном совпадении меньший номер брони.

use std::cmp::Ordering;

use tracing::info;

use super::manifest::{
    self, manifest_lines, parse_integer_prefix, split_fields, CleanedManifest,
};
use crate::error::ValidationError;
use crate::models::{BookingRecord, SeatCode, SequenceEntry, SortKey};

/// Итог обработки одного манифеста.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardingPlan {
    pub sequence: Vec<SequenceEntry>,
    pub cleaned: CleanedManifest,
}

// Сравнение двух броней для сортировки
fn boarding_order(a: &(i64, SortKey), b: &(i64, SortKey)) -> Ordering {
    let (a_id, a_key) = a;
    let (b_id, b_key) = b;
    b_key
        .row
        .cmp(&a_key.row)
        .then(a_key.priority.cmp(&b_key.priority))
        .then(a_id.cmp(b_id))
}

/// Строит очередь посадки по проверенным броням.
///
/// Брони без мест в очередь не попадают.
pub fn sequence(records: &[BookingRecord]) -> Vec<SequenceEntry> {
    let mut keyed: Vec<(i64, SortKey)> = records
        .iter()
        .filter_map(|record| record.sort_key().map(|key| (record.id, key)))
        .collect();

    keyed.sort_by(boarding_order);

    keyed
        .into_iter()
        .enumerate()
        .map(|(idx, (booking_id, _))| SequenceEntry {
            seq: idx + 1,
            booking_id,
        })
        .collect()
}

/// То же по очищенному тексту `"<id> <seat> ..."`.
///
/// Строки разбираются тем же токенизатором, что и при валидации. Из каждого токена
/// после номера брони берутся все вхождения "буква + ряд", токены без них
/// пропускаются. Строки без номера брони или без мест выпадают из очереди.
pub fn sequence_text(cleaned: &str) -> Vec<SequenceEntry> {
    let records: Vec<BookingRecord> = manifest_lines(cleaned)
        .filter_map(parse_cleaned_line)
        .collect();
    sequence(&records)
}

fn parse_cleaned_line(line: &str) -> Option<BookingRecord> {
    let fields = split_fields(line);
    let (id_token, rest) = fields.split_first()?;
    let id = parse_integer_prefix(id_token)?;

    let seats: Vec<SeatCode> = rest
        .iter()
        .map(|token| SeatCode::scan(token))
        .filter(|seat| !seat.placements.is_empty())
        .collect();
    if seats.is_empty() {
        return None;
    }

    Some(BookingRecord {
        id,
        id_token: id_token.to_string(),
        seats,
    })
}

/// Валидация и построение очереди за один проход.
pub fn plan_boarding(raw: &str) -> Result<BoardingPlan, ValidationError> {
    let cleaned = manifest::validate(raw)?;
    let sequence = sequence(&cleaned.records);
    info!(
        "Boarding sequence built: {} bookings, {} in sequence",
        cleaned.len(),
        sequence.len()
    );
    Ok(BoardingPlan { sequence, cleaned })
}
