//! Structural checks on author and book payloads.
//!
//! Dates are `DD/MM/YYYY` and only their shape is checked: day in 1..=31 and
//! month in 1..=12 regardless of month length, so `31/02/2000` passes.

use std::ops::RangeInclusive;

use authorbook_db::{Author, Book};

use crate::error::ServiceError;

/// Publishers a book may be released under, compared case-insensitively.
pub const PUBLICATIONS: [&str; 3] = ["penguin", "scholastic", "arihant"];

/// Years a book may have been published in.
pub const PUBLISHED_YEARS: RangeInclusive<i64> = 1870..=2022;

/// Any positive year is a valid birth year.
pub const BIRTH_YEARS: RangeInclusive<i64> = 1..=i64::MAX;

const DAYS: RangeInclusive<i64> = 1..=31;
const MONTHS: RangeInclusive<i64> = 1..=12;

/// Split `DD/MM/YYYY` into numeric parts. Anything but three integers is `None`.
fn date_parts(s: &str) -> Option<(i64, i64, i64)> {
    let mut parts = s.split('/').map(|part| part.parse::<i64>().ok());
    let day = parts.next()??;
    let month = parts.next()??;
    let year = parts.next()??;
    if parts.next().is_some() {
        return None;
    }
    Some((day, month, year))
}

pub fn valid_date(s: &str, years: RangeInclusive<i64>) -> bool {
    match date_parts(s) {
        Some((day, month, year)) => {
            DAYS.contains(&day) && MONTHS.contains(&month) && years.contains(&year)
        }
        None => false,
    }
}

pub fn valid_birth_date(s: &str) -> bool {
    valid_date(s, BIRTH_YEARS)
}

pub fn valid_published_date(s: &str) -> bool {
    valid_date(s, PUBLISHED_YEARS)
}

pub fn valid_publication(s: &str) -> bool {
    PUBLICATIONS
        .iter()
        .any(|publication| publication.eq_ignore_ascii_case(s))
}

/// Field rules an author must satisfy before it is written.
pub fn check_author(author: &Author) -> Result<(), ServiceError> {
    if author.first_name.is_empty() {
        return Err(ServiceError::invalid_input("firstName must not be empty"));
    }
    if !valid_birth_date(&author.dob) {
        return Err(ServiceError::invalid_input(format!(
            "DOB '{}' is not a valid DD/MM/YYYY date",
            author.dob
        )));
    }
    Ok(())
}

/// Field rules a book must satisfy before it is written.
pub fn check_book(book: &Book) -> Result<(), ServiceError> {
    if book.title.is_empty() {
        return Err(ServiceError::invalid_input("title must not be empty"));
    }
    if book.author_id <= 0 {
        return Err(ServiceError::invalid_input(format!(
            "authorID must be positive, got {}",
            book.author_id
        )));
    }
    if !valid_publication(&book.publication) {
        return Err(ServiceError::invalid_input(format!(
            "publication '{}' is not one of {}",
            book.publication,
            PUBLICATIONS.join(", ")
        )));
    }
    if !valid_published_date(&book.published_date) {
        return Err(ServiceError::invalid_input(format!(
            "publishedDate '{}' must be DD/MM/YYYY with a year between {} and {}",
            book.published_date,
            PUBLISHED_YEARS.start(),
            PUBLISHED_YEARS.end()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_dates() {
        assert!(valid_birth_date("20/01/1990"));
        assert!(valid_birth_date("01/12/0001"));
        assert!(!valid_birth_date("20/01/0"));
        assert!(!valid_birth_date("20/01/-5"));
        assert!(!valid_birth_date("0/01/1990"));
        assert!(!valid_birth_date("32/01/1990"));
        assert!(!valid_birth_date("20/0/1990"));
        assert!(!valid_birth_date("20/13/1990"));
    }

    #[test]
    fn month_length_is_not_checked() {
        assert!(valid_birth_date("31/02/2001"));
        assert!(valid_published_date("30/02/2000"));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for date in ["", "20-01-1990", "20/01", "20/01/1990/1", "aa/01/1990", "20/01/19x0", " 1/01/1990"] {
            assert!(!valid_birth_date(date), "{date:?} should be rejected");
        }
    }

    #[test]
    fn published_year_bounds() {
        assert!(valid_published_date("01/01/1870"));
        assert!(valid_published_date("31/12/2022"));
        assert!(!valid_published_date("31/12/1869"));
        assert!(!valid_published_date("01/01/2023"));
    }

    #[test]
    fn publication_is_case_insensitive() {
        assert!(valid_publication("Penguin"));
        assert!(valid_publication("SCHOLASTIC"));
        assert!(valid_publication("arihant"));
        assert!(!valid_publication("Penguin Books"));
        assert!(!valid_publication(""));
    }

    #[test]
    fn author_rules() {
        let mut author = Author {
            first_name: "Ada".to_string(),
            dob: "20/01/1990".to_string(),
            ..Author::default()
        };
        assert!(check_author(&author).is_ok());

        author.first_name.clear();
        assert!(matches!(
            check_author(&author),
            Err(ServiceError::InvalidInput(msg)) if msg.contains("firstName")
        ));
    }

    #[test]
    fn book_rules() {
        let book = Book {
            author_id: 1,
            title: "T".to_string(),
            publication: "Penguin".to_string(),
            published_date: "01/01/2000".to_string(),
            ..Book::default()
        };
        assert!(check_book(&book).is_ok());

        let cases = [
            Book { title: String::new(), ..book.clone() },
            Book { author_id: 0, ..book.clone() },
            Book { author_id: -3, ..book.clone() },
            Book { publication: "Orbit".to_string(), ..book.clone() },
            Book { published_date: "01/01/1600".to_string(), ..book.clone() },
        ];
        for case in cases {
            assert!(
                matches!(check_book(&case), Err(ServiceError::InvalidInput(_))),
                "{case:?} should be rejected"
            );
        }
    }
}
