use garde::Validate;
use serde::{Deserialize, Serialize};

use super::Model;
use crate::modules::catalog::validation::{escape, min_chars, unescape, CatalogForm};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
}

impl Model for Genre {
    const COLLECTION: &'static str = "genres";
    const ROUTE: &'static str = "genre";
}

impl Genre {
    pub fn from_form(form: &GenreForm) -> Self {
        Self {
            name: escape(&form.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct GenreForm {
    #[garde(custom(min_chars(3, "Genre name must contain at least 3 characters")))]
    pub name: String,
}

impl CatalogForm for GenreForm {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: unescape(&genre.name),
        }
    }
}
