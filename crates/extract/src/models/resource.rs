use std::fmt::{Display, Formatter, Result as FmtResult};

/// One chapter of a novel, as listed on its table of contents.
///
/// Resources are immutable once discovered: the list a table of contents
/// produced on the first run is the list every later run works from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    /// Absolute URL of the chapter page.
    pub locator: String,
    /// Display title of the chapter, taken from the link text.
    pub label: String,
}
impl Resource {
    pub fn new(locator: impl Into<String>, label: impl Into<String>) -> Self {
        Self { locator: locator.into(), label: label.into() }
    }
}
impl<L: Into<String>, T: Into<String>> From<(L, T)> for Resource {
    fn from((locator, label): (L, T)) -> Self {
        Self::new(locator, label)
    }
}
impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.label, self.locator)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_serde_shape() {
        let resource = Resource::new("https://example.com/c1", "C1");
        let json = serde_json::to_string(&resource).unwrap();
        assert_eq!(json, r#"{"locator":"https://example.com/c1","label":"C1"}"#);
        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resource);
    }
}
