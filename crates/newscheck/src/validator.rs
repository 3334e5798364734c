use std::fmt;

/// A trimmed, non-empty candidate claim. Only `validate` builds one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Statement(String);

impl Statement {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a news headline or statement.")]
    EmptyInput,
}

/// Trim surrounding whitespace and reject empty input. Interior whitespace
/// is kept as typed.
pub fn validate(raw: &str) -> Result<Statement, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(Statement(trimmed.to_string()))
}
