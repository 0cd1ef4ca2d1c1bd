//! Note date extraction.

use chrono::NaiveDate;

use super::patterns::{DATE_TOKEN, NOTE_DATE_LABELED};

/// Extract the note date: a labeled "Date:" token first, then the first
/// bare date-like token anywhere in the text. `None` when nothing parses;
/// the parser substitutes the processing date.
pub fn extract_note_date(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = NOTE_DATE_LABELED.captures(text) {
        if let Some(date) = parse_date_token(&caps[1]) {
            return Some(date);
        }
    }

    DATE_TOKEN
        .captures_iter(text)
        .find_map(|caps| parse_date_token(&caps[1]))
}

/// Parse a single date token. Slash and dash dates read month/day/year;
/// four-digit-first tokens read year-month-day.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }

    if parts[0].len() == 4 {
        let year: i32 = parts[0].parse().ok()?;
        let month: u32 = parts[1].parse().ok()?;
        let day: u32 = parts[2].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    } else {
        let month: u32 = parts[0].parse().ok()?;
        let day: u32 = parts[1].parse().ok()?;
        let year = expand_year(parts[2].parse().ok()?);
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

fn expand_year(year: i32) -> i32 {
    if year < 100 {
        // Two-digit year: 00-50 reads as 2000s, 51-99 as 1900s
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_date_wins() {
        let text = "DOB: 03/04/1958\nDate: 06/15/2024";
        assert_eq!(
            extract_note_date(text),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }

    #[test]
    fn bare_token_fallback() {
        let text = "Seen in clinic on 06/15/2024 for follow-up";
        assert_eq!(
            extract_note_date(text),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }

    #[test]
    fn iso_token() {
        assert_eq!(
            extract_note_date("Date: 2024-06-15"),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }

    #[test]
    fn two_digit_year_pivots() {
        assert_eq!(
            parse_date_token("6/15/24"),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
        assert_eq!(
            parse_date_token("6/15/58"),
            NaiveDate::from_ymd_opt(1958, 6, 15)
        );
    }

    #[test]
    fn invalid_calendar_date_skipped() {
        assert_eq!(parse_date_token("13/45/2024"), None);

        // An invalid token does not block a later valid one.
        let text = "misprint 13/45/2024, corrected 06/15/2024";
        assert_eq!(
            extract_note_date(text),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }

    #[test]
    fn no_date_token() {
        assert_eq!(extract_note_date("no dates here"), None);
    }
}
