//! Product field constraints and the per-field violation report.
//!
//! Every rule is checked on every pass; violations accumulate per field
//! rather than short-circuiting, so a fully blank draft reports against all
//! four fields at once. Validation never fails - it always produces a
//! (possibly empty) report.
//!
//! The one constraint that needs a storage read - title uniqueness - is
//! answered by the caller and passed in as a plain `bool`, keeping this
//! module pure and synchronous.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::product::ProductDraft;

/// Violation messages, mirroring the wording users of the original shop see.
pub mod messages {
    pub const BLANK: &str = "can't be blank";
    pub const TITLE_TOO_SHORT: &str = "is too short (minimum is 10 characters)";
    pub const TITLE_TAKEN: &str = "has already been taken";
    pub const PRICE_TOO_LOW: &str = "must be greater than or equal to 0.01";
    pub const IMAGE_URL_FORMAT: &str = "must be a URL for GIF, JPG or PNG image";
}

/// Field names as they appear in reports and API responses.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const PRICE: &str = "price";
    pub const IMAGE_URL: &str = "image_url";
}

/// Minimum title length, in characters.
pub const TITLE_MIN_CHARS: usize = 10;

const IMAGE_SUFFIXES: [&str; 3] = [".gif", ".jpg", ".png"];

/// Accumulated validation violations, keyed by field name.
///
/// A field appears in the report only if it has at least one message;
/// per-field messages keep the order the rules were evaluated in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationReport {
    /// Record a violation against a field.
    pub fn add(&mut self, field: &'static str, message: &str) {
        self.violations
            .entry(field)
            .or_default()
            .push(message.to_owned());
    }

    /// True when no field has any violation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Messages recorded against a field, in evaluation order.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.violations.get(field).map_or(&[], Vec::as_slice)
    }

    /// Iterate over fields with violations.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.violations.iter().map(|(f, msgs)| (*f, msgs.as_slice()))
    }
}

/// Validate a candidate product.
///
/// `title_taken` is the pre-fetched answer to "does another persisted
/// product carry this exact title" (case-sensitive exact match); callers
/// with no persistence in play pass `false`.
#[must_use]
pub fn validate_product(draft: &ProductDraft, title_taken: bool) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_title(&draft.title, title_taken, &mut report);
    check_description(&draft.description, &mut report);
    check_price(draft.price, &mut report);
    check_image_url(&draft.image_url, &mut report);

    report
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn check_title(title: &str, taken: bool, report: &mut ValidationReport) {
    if is_blank(title) {
        report.add(fields::TITLE, messages::BLANK);
    }
    if title.chars().count() < TITLE_MIN_CHARS {
        report.add(fields::TITLE, messages::TITLE_TOO_SHORT);
    }
    if taken {
        report.add(fields::TITLE, messages::TITLE_TAKEN);
    }
}

fn check_description(description: &str, report: &mut ValidationReport) {
    if is_blank(description) {
        report.add(fields::DESCRIPTION, messages::BLANK);
    }
}

fn check_price(price: Option<Decimal>, report: &mut ValidationReport) {
    match price {
        None => report.add(fields::PRICE, messages::BLANK),
        // 0.01 is the smallest chargeable amount
        Some(p) if p < Decimal::new(1, 2) => {
            report.add(fields::PRICE, messages::PRICE_TOO_LOW);
        }
        Some(_) => {}
    }
}

/// A well-formed image URL ends in `.gif`, `.jpg` or `.png`
/// (case-insensitive) with nothing after the extension; any leading
/// http(s) URL path is allowed.
fn check_image_url(image_url: &str, report: &mut ValidationReport) {
    if is_blank(image_url) {
        report.add(fields::IMAGE_URL, messages::BLANK);
        return;
    }
    let lower = image_url.to_ascii_lowercase();
    if !IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        report.add(fields::IMAGE_URL, messages::IMAGE_URL_FORMAT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft(image_url: &str) -> ProductDraft {
        ProductDraft::new("My Book Title", "yyyy", Decimal::ONE, image_url)
    }

    #[test]
    fn blank_draft_reports_every_field() {
        let report = validate_product(&ProductDraft::default(), false);

        assert!(!report.is_valid());
        for field in [
            fields::TITLE,
            fields::DESCRIPTION,
            fields::PRICE,
            fields::IMAGE_URL,
        ] {
            assert!(
                !report.messages(field).is_empty(),
                "{field} should have at least one message"
            );
        }
    }

    #[test]
    fn price_must_be_at_least_one_cent() {
        let mut draft = valid_draft("zzz.jpg");

        draft.price = Some(Decimal::NEGATIVE_ONE);
        let report = validate_product(&draft, false);
        assert_eq!(report.messages(fields::PRICE), [messages::PRICE_TOO_LOW]);

        draft.price = Some(Decimal::ZERO);
        let report = validate_product(&draft, false);
        assert_eq!(report.messages(fields::PRICE), [messages::PRICE_TOO_LOW]);

        draft.price = Some(Decimal::ONE);
        assert!(validate_product(&draft, false).is_valid());
    }

    #[test]
    fn missing_price_is_blank_not_too_low() {
        let mut draft = valid_draft("zzz.jpg");
        draft.price = None;

        let report = validate_product(&draft, false);
        assert_eq!(report.messages(fields::PRICE), [messages::BLANK]);
    }

    #[test]
    fn image_url_accepts_known_suffixes() {
        let ok = [
            "fred.gif",
            "fred.jpg",
            "fred.png",
            "FRED.JPG",
            "FRED.Jpg",
            "http://a.b.c/x/y/z/fred.gif",
        ];
        for name in ok {
            let report = validate_product(&valid_draft(name), false);
            assert!(report.is_valid(), "{name} should be valid");
        }
    }

    #[test]
    fn image_url_rejects_other_suffixes_and_trailers() {
        let bad = ["fred.doc", "fred.gif/more", "fred.gif.more"];
        for name in bad {
            let report = validate_product(&valid_draft(name), false);
            assert_eq!(
                report.messages(fields::IMAGE_URL),
                [messages::IMAGE_URL_FORMAT],
                "{name} shouldn't be valid"
            );
        }
    }

    #[test]
    fn duplicate_title_is_taken() {
        let report = validate_product(&valid_draft("fred.gif"), true);

        assert!(!report.is_valid());
        assert_eq!(report.messages(fields::TITLE), [messages::TITLE_TAKEN]);
    }

    #[test]
    fn title_shorter_than_ten_characters_is_too_short() {
        let mut draft = valid_draft("fred.gif");
        draft.title = "small txt".to_owned();

        let report = validate_product(&draft, false);
        assert!(!report.is_valid());
        assert_eq!(report.messages(fields::TITLE), [messages::TITLE_TOO_SHORT]);
    }

    #[test]
    fn title_of_ten_or_more_characters_is_valid() {
        let mut draft = valid_draft("fred.gif");
        draft.title = "bigger title text".to_owned();

        assert!(validate_product(&draft, false).is_valid());
    }

    #[test]
    fn blank_title_also_counts_as_too_short() {
        let mut draft = valid_draft("fred.gif");
        draft.title = String::new();

        let report = validate_product(&draft, false);
        assert_eq!(
            report.messages(fields::TITLE),
            [messages::BLANK, messages::TITLE_TOO_SHORT]
        );
    }

    #[test]
    fn iter_walks_every_field_with_violations() {
        let report = validate_product(&ProductDraft::default(), false);

        let seen: Vec<&str> = report
            .iter()
            .map(|(field, messages)| {
                assert!(!messages.is_empty(), "{field} yielded without messages");
                field
            })
            .collect();

        assert_eq!(
            seen,
            [
                fields::DESCRIPTION,
                fields::IMAGE_URL,
                fields::PRICE,
                fields::TITLE,
            ]
        );
    }

    #[test]
    fn report_serializes_as_field_to_messages_map() {
        let report = validate_product(&ProductDraft::default(), false);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json["price"],
            serde_json::json!([messages::BLANK]),
            "report should serialize as a plain map"
        );
    }
}
