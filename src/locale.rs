//! User-facing message text.
//!
//! Every string shown to the user goes through [`Messages`], so the phonebook
//! logic never hard-codes display text.

use std::fmt;
use std::str::FromStr;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Finnish,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "fi" | "finnish" | "suomi" => Ok(Locale::Finnish),
            other => Err(format!("Unsupported locale '{}', expected 'en' or 'fi'", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::Finnish => write!(f, "fi"),
        }
    }
}

/// Display strings for one locale.
#[derive(Debug, Clone)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn invalid_number(&self) -> String {
        match self.locale {
            Locale::English => "Invalid phone number format".to_string(),
            Locale::Finnish => "Virheellinen puhelinnumero".to_string(),
        }
    }

    pub fn empty_name(&self) -> String {
        match self.locale {
            Locale::English => "Name is required".to_string(),
            Locale::Finnish => "Nimi on pakollinen".to_string(),
        }
    }

    pub fn confirm_replace(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!(
                "{} is already added to the phonebook. Replace the old number with a new one?",
                name
            ),
            Locale::Finnish => format!(
                "{} on jo puhelinluettelossa. Korvataanko vanha numero uudella?",
                name
            ),
        }
    }

    pub fn confirm_delete(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("Delete {}?", name),
            Locale::Finnish => format!("Poistetaanko {}?", name),
        }
    }

    pub fn added(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("Added {}", name),
            Locale::Finnish => format!("Lisättiin {}", name),
        }
    }

    pub fn number_updated(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("{}'s number was updated", name),
            Locale::Finnish => format!("Henkilön {} numero päivitettiin", name),
        }
    }

    pub fn deleted(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("Deleted {}", name),
            Locale::Finnish => format!("Poistettiin {}", name),
        }
    }

    pub fn already_deleted(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("{} was already deleted from server", name),
            Locale::Finnish => format!("{} oli jo poistettu palvelimelta", name),
        }
    }

    pub fn add_failed(&self) -> String {
        match self.locale {
            Locale::English => "Failed to add person".to_string(),
            Locale::Finnish => "Henkilön lisääminen epäonnistui".to_string(),
        }
    }

    pub fn update_failed(&self) -> String {
        match self.locale {
            Locale::English => "Failed to update number".to_string(),
            Locale::Finnish => "Numeron päivittäminen epäonnistui".to_string(),
        }
    }

    pub fn load_failed(&self) -> String {
        match self.locale {
            Locale::English => "Failed to load phonebook".to_string(),
            Locale::Finnish => "Puhelinluettelon lataaminen epäonnistui".to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!(" FI ".parse::<Locale>().unwrap(), Locale::Finnish);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_english_messages() {
        let messages = Messages::default();
        assert_eq!(messages.added("Arto Hellas"), "Added Arto Hellas");
        assert_eq!(
            messages.confirm_replace("Arto Hellas"),
            "Arto Hellas is already added to the phonebook. Replace the old number with a new one?"
        );
        assert_eq!(
            messages.already_deleted("Arto Hellas"),
            "Arto Hellas was already deleted from server"
        );
    }

    #[test]
    fn test_finnish_messages_differ() {
        let en = Messages::for_locale(Locale::English);
        let fi = Messages::for_locale(Locale::Finnish);
        assert_ne!(en.deleted("Ada"), fi.deleted("Ada"));
        assert!(fi.deleted("Ada").contains("Ada"));
    }
}
