use serde::Serialize;

use super::seat::{Placement, SeatCode};

/// Строка манифеста после валидации: номер брони и ее места.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub id: i64,
    /// Номер брони в том виде, в каком он пришел в файле.
    pub id_token: String,
    pub seats: Vec<SeatCode>,
}

/// Ключ сортировки брони: самый дальний ряд и лучший класс места в этом ряду.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub row: u64,
    pub priority: u8,
}

impl SortKey {
    /// Дальний ряд сбрасывает приоритет, тот же ряд может его только улучшить,
    /// ближние ряды не влияют. `None` для пустого списка.
    pub fn from_placements<I>(placements: I) -> Option<Self>
    where
        I: IntoIterator<Item = Placement>,
    {
        let mut placements = placements.into_iter();
        let first = placements.next()?;
        let mut key = SortKey {
            row: first.row,
            priority: first.priority(),
        };

        for placement in placements {
            let priority = placement.priority();
            if placement.row > key.row {
                key = SortKey { row: placement.row, priority };
            } else if placement.row == key.row && priority < key.priority {
                key.priority = priority;
            }
        }

        Some(key)
    }
}

/// Позиция в очереди посадки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceEntry {
    pub seq: usize,
    pub booking_id: i64,
}

impl BookingRecord {
    /// `"<id> <seat> <seat> ..."` - формат очищенного манифеста.
    pub fn cleaned_line(&self) -> String {
        let mut line = self.id_token.clone();
        for seat in &self.seats {
            line.push(' ');
            line.push_str(&seat.raw);
        }
        line
    }

    /// Ключ по всем вхождениям во всех местах брони. `None`, если мест нет.
    pub fn sort_key(&self) -> Option<SortKey> {
        SortKey::from_placements(
            self.seats
                .iter()
                .flat_map(|seat| seat.placements.iter().copied()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: i64, seats: &[&str]) -> BookingRecord {
        BookingRecord {
            id,
            id_token: id.to_string(),
            seats: seats.iter().map(|s| SeatCode::parse(s).unwrap()).collect(),
        }
    }

    #[test]
    fn key_uses_furthest_row() {
        let key = booking(1, &["A3", "B12", "D5"]).sort_key().unwrap();
        assert_eq!(key, SortKey { row: 12, priority: 2 });
    }

    #[test]
    fn key_takes_best_class_in_furthest_row() {
        let key = booking(1, &["B9", "C9", "D9", "A2"]).sort_key().unwrap();
        assert_eq!(key, SortKey { row: 9, priority: 1 });
    }

    #[test]
    fn further_row_resets_priority() {
        // окно в 4-м ряду не помогает месту у прохода в 10-м
        let key = booking(1, &["A4", "C10"]).sort_key().unwrap();
        assert_eq!(key, SortKey { row: 10, priority: 2 });
    }

    #[test]
    fn every_match_in_a_token_counts() {
        // B2 внутри C1B2 уводит бронь во 2-й ряд
        let key = booking(1, &["C1B2"]).sort_key().unwrap();
        assert_eq!(key, SortKey { row: 2, priority: 2 });
    }

    #[test]
    fn row_comes_from_digits_after_letter() {
        let key = booking(1, &["7C4"]).sort_key().unwrap();
        assert_eq!(key, SortKey { row: 4, priority: 2 });
    }

    #[test]
    fn no_seats_no_key() {
        assert_eq!(booking(1, &[]).sort_key(), None);
    }

    #[test]
    fn cleaned_line_keeps_original_text() {
        let record = BookingRecord {
            id: 7,
            id_token: "007".to_string(),
            seats: vec![SeatCode::parse("a1").unwrap(), SeatCode::parse("B2").unwrap()],
        };
        assert_eq!(record.cleaned_line(), "007 a1 B2");
    }

    #[test]
    fn sequence_entry_json_shape() {
        let json = serde_json::to_value(SequenceEntry { seq: 1, booking_id: 42 }).unwrap();
        assert_eq!(json, serde_json::json!({ "seq": 1, "bookingId": 42 }));
    }
}
