use crate::shared::error::StatusError;
use crate::shared::Result;
use crate::status_collection::domain::ArtefactId;
use regex::Regex;

/// Maximum length of the filter expression to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 1024;

/// Filter matching every artefact
pub const MATCH_ALL: &str = ".*";

/// ArtefactFilter - selects the artefacts a host reports on
///
/// The pattern is a regular expression matched at the start of the
/// artefact identifier (it need not match the whole identifier), so
/// `yadt-` selects every artefact whose name begins with `yadt-`.
#[derive(Debug, Clone)]
pub struct ArtefactFilter {
    pattern: String,
    /// `None` matches everything
    regex: Option<Regex>,
}

impl ArtefactFilter {
    /// Compiles a new filter
    ///
    /// # Errors
    /// Returns `StatusError::InvalidArtefactFilter` if the pattern is too
    /// long or is not a valid regular expression
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(StatusError::InvalidArtefactFilter {
                pattern: pattern.to_string(),
                details: format!(
                    "pattern is {} chars long, maximum is {}",
                    pattern.len(),
                    MAX_PATTERN_LENGTH
                ),
            }
            .into());
        }

        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            StatusError::InvalidArtefactFilter {
                pattern: pattern.to_string(),
                details: e.to_string(),
            }
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
        })
    }

    pub fn match_all() -> Self {
        Self {
            pattern: MATCH_ALL.to_string(),
            regex: None,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, artefact: &str) -> bool {
        self.regex
            .as_ref()
            .map_or(true, |regex| regex.is_match(artefact))
    }

    /// Keeps the artefacts matching this filter, preserving order
    pub fn filter_artefacts<'a, I>(&self, artefacts: I) -> Vec<ArtefactId>
    where
        I: IntoIterator<Item = &'a ArtefactId>,
    {
        artefacts
            .into_iter()
            .filter(|a| self.matches(a.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for ArtefactFilter {
    fn default() -> Self {
        Self::match_all()
    }
}
