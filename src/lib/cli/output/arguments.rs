//! Types and procedures that represents a command line argument,
//! or collections of command line arguments

use std::borrow::Cow;
use std::ops::Deref;
use std::path::Path;

/// Type for represent a command line argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument<'a> {
    pub value: Cow<'a, str>,
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(value: &'a str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }
}

impl<'a> From<String> for Argument<'a> {
    fn from(value: String) -> Argument<'a> {
        Self {
            value: Cow::Owned(value),
        }
    }
}

impl<'a> From<Cow<'a, str>> for Argument<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self { value }
    }
}

impl<'a> From<&'a Cow<'a, str>> for Argument<'a> {
    fn from(value: &'a Cow<'a, str>) -> Self {
        Self::from(value.as_ref())
    }
}

impl<'a> From<&Path> for Argument<'a> {
    fn from(value: &Path) -> Self {
        Self::from(format!("{}", value.display()))
    }
}

impl<'a> Deref for Argument<'a> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<'a> core::fmt::Display for Argument<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Strong type for represent a linear collection of [`Argument`].
///
/// Its [`Display`](core::fmt::Display) implementation joins every argument with a
/// single whitespace, which is the shell command line handed to the external tools
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Arguments<'a>(Vec<Argument<'a>>);

impl<'a> Arguments<'a> {
    /// Wraps an existing [`std::vec::Vec`] of [`Argument`]
    pub fn from_vec(vec: Vec<Argument<'a>>) -> Self {
        Self(vec)
    }

    /// Returns a new collection of [`Argument`] with the specified capacity
    pub fn with_capacity(cap: usize) -> Self {
        Self(Vec::with_capacity(cap))
    }

    /// Creates and stores a new [`Argument`] to the end of this collection
    pub fn create_and_push<T>(&mut self, val: T)
    where
        T: Into<Argument<'a>>,
    {
        self.0.push(val.into())
    }

    /// Extends the underlying collection from a Iterator of [`Argument`]
    pub fn extend(&mut self, iter: impl IntoIterator<Item = Argument<'a>>) {
        self.0.extend(iter);
    }

    /// Returns true if any of the held arguments is exactly `value`
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|arg| arg.value == value)
    }
}

impl<'a> Deref for Arguments<'a> {
    type Target = [Argument<'a>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for Arguments<'a> {
    type Item = Argument<'a>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> FromIterator<Argument<'a>> for Arguments<'a> {
    fn from_iter<T: IntoIterator<Item = Argument<'a>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> core::fmt::Display for Arguments<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.0.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
            for arg in iter {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_with_whitespace() {
        let mut args = Arguments::with_capacity(3);
        args.create_and_push("xcodebuild");
        args.create_and_push(String::from("build"));
        args.create_and_push(Path::new("OIDC.xcworkspace"));

        assert_eq!(args.to_string(), "xcodebuild build OIDC.xcworkspace");
        assert!(args.contains("build"));
        assert!(!args.contains("test"));
    }

    #[test]
    fn test_empty_arguments_display_nothing() {
        assert_eq!(Arguments::default().to_string(), "");
    }
}
