use std::fmt;
use std::str::FromStr;

use garde::Validate;
use serde::{Deserialize, Serialize};
use time::Date;

use super::Model;
use crate::modules::catalog::validation::{
    escape, one_of, optional_date, required, unescape, CatalogForm,
};
use crate::utils;

/// Circulation status of a physical copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Available,
        Status::Maintenance,
        Status::Loaned,
        Status::Reserved,
    ];

    /// Names accepted from forms
    pub const NAMES: &'static [&'static str] = &["Available", "Maintenance", "Loaned", "Reserved"];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Available => "Available",
            Status::Maintenance => "Maintenance",
            Status::Loaned => "Loaned",
            Status::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

/// A physical copy of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    /// Book identifier
    pub book: String,
    pub imprint: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub due_back: Option<Date>,
}

impl Model for BookInstance {
    const COLLECTION: &'static str = "bookinstances";
    const ROUTE: &'static str = "bookinstance";
}

impl BookInstance {
    pub fn due_back_formatted(&self) -> String {
        utils::short_date(self.due_back)
    }

    /// Build from a validated form; the due date is parsed as typed
    pub fn from_form(form: &BookInstanceForm) -> Self {
        Self {
            book: escape(&form.book),
            imprint: escape(&form.imprint),
            status: form.status.parse().unwrap_or_default(),
            due_back: utils::parse_date(&form.due_back),
        }
    }
}

/// Book copy create/update form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct BookInstanceForm {
    #[garde(custom(required("Book must be specified")))]
    pub book: String,
    #[garde(custom(required("Imprint must be specified")))]
    pub imprint: String,
    #[garde(custom(one_of(
        Status::NAMES,
        "Status must be one of Available, Maintenance, Loaned, Reserved"
    )))]
    pub status: String,
    #[garde(custom(optional_date("Invalid date")))]
    pub due_back: String,
}

impl CatalogForm for BookInstanceForm {
    fn trimmed(self) -> Self {
        Self {
            book: self.book.trim().to_string(),
            imprint: self.imprint.trim().to_string(),
            status: self.status.trim().to_string(),
            due_back: self.due_back.trim().to_string(),
        }
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(copy: &BookInstance) -> Self {
        Self {
            book: unescape(&copy.book),
            imprint: unescape(&copy.imprint),
            status: copy.status.as_str().to_string(),
            due_back: utils::iso_date(copy.due_back),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn status_names_match_variants() {
        let names: Vec<_> = Status::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, Status::NAMES);
        assert_eq!("Loaned".parse::<Status>(), Ok(Status::Loaned));
        assert!("Lost".parse::<Status>().is_err());
    }

    #[test]
    fn status_defaults_to_maintenance_when_absent() {
        let copy: BookInstance =
            serde_json::from_value(serde_json::json!({"book": "b1", "imprint": "Gollancz"}))
                .unwrap();
        assert_eq!(copy.status, Status::Maintenance);
        assert_eq!(copy.due_back_formatted(), "");
    }

    #[test]
    fn form_round_trip_preserves_fields() {
        let copy = BookInstance {
            book: "b1".into(),
            imprint: escape("Penguin & Sons, 1999"),
            status: Status::Loaned,
            due_back: Some(date!(2026 - 11 - 01)),
        };
        let form = BookInstanceForm::from(&copy);
        assert_eq!(form.imprint, "Penguin & Sons, 1999");
        assert_eq!(form.status, "Loaned");
        assert_eq!(form.due_back, "2026-11-01");
        assert_eq!(BookInstance::from_form(&form), copy);
        assert_eq!(copy.due_back_formatted(), "Nov 1, 2026");
    }

    #[test]
    fn day_first_due_date_is_kept() {
        let form = BookInstanceForm {
            book: "b1".into(),
            imprint: "Gollancz".into(),
            status: "Loaned".into(),
            due_back: "01/11/2026".into(),
        };
        assert_eq!(
            BookInstance::from_form(&form).due_back,
            Some(date!(2026 - 11 - 01))
        );
    }
}
