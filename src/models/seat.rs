use thiserror::Error;

/// Первый и последний допустимый ряд автобуса.
pub const FIRST_ROW: u32 = 1;
pub const LAST_ROW: u32 = 20;

/// Приоритет посадки для места у окна (A, D).
pub const WINDOW_PRIORITY: u8 = 1;
/// Приоритет для прохода/середины (B, C).
pub const AISLE_PRIORITY: u8 = 2;
/// Буква вне схемы A-D. После валидации не встречается.
pub const UNKNOWN_PRIORITY: u8 = 99;

/// Почему токен не является местом.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeatError {
    /// Нет фрагмента "буква A-D + цифры".
    #[error("seat token does not match the letter+digits grammar")]
    Format,
    /// Номер ряда вне диапазона 1..=20 (или не помещается в u32).
    #[error("seat row is outside 1..=20")]
    Number,
}

/// Одно вхождение "буква + ряд" внутри токена, например `C4` в `7C4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Буква колонки в верхнем регистре.
    pub letter: char,
    /// Число сразу после буквы. Не помещается в u64 - насыщается до u64::MAX.
    pub row: u64,
}

impl Placement {
    pub fn priority(&self) -> u8 {
        seat_priority(self.letter)
    }
}

/// Токен места из манифеста, например `a12`.
///
/// `raw` хранит токен в исходном регистре, `placements` - все вхождения
/// "буква A-D + цифры" слева направо. Для сортировки используются они.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCode {
    pub raw: String,
    pub placements: Vec<Placement>,
}

impl SeatCode {
    /// Разбирает и проверяет токен места.
    ///
    /// Токен принимается, если где-либо в нем есть буква A-D (без учета регистра),
    /// сразу за которой идет цифра. В диапазоне 1..=20 должна быть первая группа
    /// цифр в токене.
    pub fn parse(token: &str) -> Result<Self, SeatError> {
        let seat = Self::scan(token);
        if seat.placements.is_empty() {
            return Err(SeatError::Format);
        }

        let digits = first_digit_run(token).ok_or(SeatError::Format)?;
        // Слишком длинное число тоже считаем недопустимым номером
        let row: u32 = digits.parse().map_err(|_| SeatError::Number)?;
        if !(FIRST_ROW..=LAST_ROW).contains(&row) {
            return Err(SeatError::Number);
        }

        Ok(seat)
    }

    /// Без проверок: просто собирает все вхождения. Может вернуть пустой список.
    pub fn scan(token: &str) -> Self {
        SeatCode {
            raw: token.to_string(),
            placements: scan_placements(token).collect(),
        }
    }

    /// Ключ для проверки дубликатов: весь токен в верхнем регистре.
    pub fn normalized(&self) -> String {
        self.raw.to_uppercase()
    }
}

pub fn seat_priority(letter: char) -> u8 {
    match letter.to_ascii_uppercase() {
        'A' | 'D' => WINDOW_PRIORITY,
        'B' | 'C' => AISLE_PRIORITY,
        _ => UNKNOWN_PRIORITY,
    }
}

/// Все непересекающиеся вхождения `[A-D]\d+` (без учета регистра) слева направо.
pub fn scan_placements(token: &str) -> impl Iterator<Item = Placement> + '_ {
    let bytes = token.as_bytes();
    let mut pos = 0;

    std::iter::from_fn(move || {
        while pos + 1 < bytes.len() {
            let letter = bytes[pos].to_ascii_uppercase();
            if matches!(letter, b'A'..=b'D') && bytes[pos + 1].is_ascii_digit() {
                let start = pos + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|b| !b.is_ascii_digit())
                    .map_or(bytes.len(), |len| start + len);
                pos = end;

                let row = token[start..end].parse().unwrap_or(u64::MAX);
                return Some(Placement {
                    letter: letter as char,
                    row,
                });
            }
            pos += 1;
        }
        None
    })
}

fn first_digit_run(token: &str) -> Option<&str> {
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let rest = &token[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placements(token: &str) -> Vec<(char, u64)> {
        scan_placements(token).map(|p| (p.letter, p.row)).collect()
    }

    #[test]
    fn parses_plain_seat() {
        let seat = SeatCode::parse("A20").unwrap();
        assert_eq!(seat.raw, "A20");
        assert_eq!(seat.placements, vec![Placement { letter: 'A', row: 20 }]);
    }

    #[test]
    fn lowercase_keeps_raw_and_normalizes() {
        let seat = SeatCode::parse("d7").unwrap();
        assert_eq!(seat.raw, "d7");
        assert_eq!(seat.normalized(), "D7");
        assert_eq!(seat.placements[0].letter, 'D');
        assert_eq!(seat.placements[0].priority(), WINDOW_PRIORITY);
    }

    #[test]
    fn rejects_unknown_column() {
        assert_eq!(SeatCode::parse("E5"), Err(SeatError::Format));
        assert_eq!(SeatCode::parse("5"), Err(SeatError::Format));
        assert_eq!(SeatCode::parse("A"), Err(SeatError::Format));
        assert_eq!(SeatCode::parse(""), Err(SeatError::Format));
    }

    #[test]
    fn row_bounds() {
        assert_eq!(SeatCode::parse("A0"), Err(SeatError::Number));
        assert_eq!(SeatCode::parse("A21"), Err(SeatError::Number));
        assert!(SeatCode::parse("A1").is_ok());
        assert!(SeatCode::parse("C20").is_ok());
        assert_eq!(
            SeatCode::parse("B99999999999999999999"),
            Err(SeatError::Number)
        );
    }

    #[test]
    fn range_check_uses_first_digit_run() {
        // проверяется 7, а место для посадки - C4
        let seat = SeatCode::parse("7C4").unwrap();
        assert_eq!(seat.placements, vec![Placement { letter: 'C', row: 4 }]);

        assert_eq!(SeatCode::parse("30C4"), Err(SeatError::Number));
    }

    #[test]
    fn scan_finds_every_match() {
        assert_eq!(placements("C1B2"), vec![('C', 1), ('B', 2)]);
        assert_eq!(placements("xb3"), vec![('B', 3)]);
        assert_eq!(placements("A007"), vec![('A', 7)]);
        assert_eq!(placements("AB12"), vec![('B', 12)]);
        assert!(placements("E5").is_empty());
        assert!(placements("").is_empty());
    }

    #[test]
    fn scan_saturates_huge_rows() {
        assert_eq!(placements("A99999999999999999999999"), vec![('A', u64::MAX)]);
    }

    #[test]
    fn priorities() {
        assert_eq!(seat_priority('a'), WINDOW_PRIORITY);
        assert_eq!(seat_priority('D'), WINDOW_PRIORITY);
        assert_eq!(seat_priority('b'), AISLE_PRIORITY);
        assert_eq!(seat_priority('C'), AISLE_PRIORITY);
        assert_eq!(seat_priority('Z'), UNKNOWN_PRIORITY);
    }
}
