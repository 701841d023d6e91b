use garde::Validate;
use serde::{Deserialize, Serialize};
use time::Date;

use super::Model;
use crate::modules::catalog::validation::{
    escape, name_part, optional_date, unescape, CatalogForm,
};
use crate::utils;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<Date>,
    #[serde(default)]
    pub date_of_death: Option<Date>,
}

impl Model for Author {
    const COLLECTION: &'static str = "authors";
    const ROUTE: &'static str = "author";
}

impl Author {
    /// "First Family", or empty unless both parts are present
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            String::new()
        } else {
            format!("{} {}", self.first_name, self.family_name)
        }
    }

    pub fn date_of_birth_formatted(&self) -> String {
        utils::short_date(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        utils::short_date(self.date_of_death)
    }

    /// "Jan 2, 1920 - Apr 6, 1992"; either side may be blank
    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }

    /// Build from a validated form; names are escaped, dates parsed as typed
    pub fn from_form(form: &AuthorForm) -> Self {
        Self {
            first_name: escape(&form.first_name),
            family_name: escape(&form.family_name),
            date_of_birth: utils::parse_date(&form.date_of_birth),
            date_of_death: utils::parse_date(&form.date_of_death),
        }
    }
}

/// Author create/update form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct AuthorForm {
    #[garde(custom(name_part(
        "First name must be specified.",
        "First name must be at most 100 characters."
    )))]
    pub first_name: String,
    #[garde(custom(name_part(
        "Family name must be specified.",
        "Family name must be at most 100 characters."
    )))]
    pub family_name: String,
    #[garde(custom(optional_date("Invalid date of birth")))]
    pub date_of_birth: String,
    #[garde(custom(optional_date("Invalid date of death")))]
    pub date_of_death: String,
}

impl CatalogForm for AuthorForm {
    fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }
}

/// Pre-fill the update form from a stored author
impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: unescape(&author.first_name),
            family_name: unescape(&author.family_name),
            date_of_birth: utils::iso_date(author.date_of_birth),
            date_of_death: utils::iso_date(author.date_of_death),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn tolkien() -> Author {
        Author {
            first_name: "John".into(),
            family_name: "Tolkien".into(),
            date_of_birth: Some(date!(1892 - 01 - 03)),
            date_of_death: Some(date!(1973 - 09 - 02)),
        }
    }

    #[test]
    fn name_needs_both_parts() {
        assert_eq!(tolkien().name(), "John Tolkien");
        let anonymous = Author {
            family_name: String::new(),
            ..tolkien()
        };
        assert_eq!(anonymous.name(), "");
    }

    #[test]
    fn lifespan_formats_each_date() {
        assert_eq!(tolkien().lifespan(), "Jan 3, 1892 - Sep 2, 1973");
        let living = Author {
            date_of_death: None,
            ..tolkien()
        };
        assert_eq!(living.lifespan(), "Jan 3, 1892 - ");
    }

    #[test]
    fn form_round_trip_preserves_fields() {
        let author = Author {
            first_name: escape("Jean & <Paul>"),
            ..tolkien()
        };
        let form = AuthorForm::from(&author);
        assert_eq!(form.first_name, "Jean & <Paul>");
        assert_eq!(form.date_of_birth, "1892-01-03");
        assert_eq!(Author::from_form(&form), author);
    }

    #[test]
    fn day_first_dates_are_parsed_before_escaping() {
        let form = AuthorForm {
            first_name: "Ada".into(),
            family_name: "Lovelace".into(),
            date_of_birth: "10/12/1815".into(),
            date_of_death: String::new(),
        };
        let author = Author::from_form(&form);
        assert_eq!(author.date_of_birth, Some(date!(1815 - 12 - 10)));
        assert_eq!(author.date_of_death, None);
    }
}
