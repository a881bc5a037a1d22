//! Login identifier classification.

/// How a login identifier should be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginIdentifier<'a> {
    Email(&'a str),
    Username(&'a str),
}

impl<'a> LoginIdentifier<'a> {
    /// An identifier containing `@` is an email address, anything else a username.
    pub fn parse(raw: &'a str) -> Self {
        if raw.contains('@') {
            Self::Email(raw)
        } else {
            Self::Username(raw)
        }
    }
}
