// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub trait IdentifierMarkerName {
    const NAME: &'static str;
}

#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> &I {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<U> Identifier<String, U> {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<U> From<&str> for Identifier<String, U> {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

// Identifiers travel over the wire as their bare value.
impl<I: Serialize, U> Serialize for Identifier<I, U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, I: Deserialize<'de>, U> Deserialize<'de> for Identifier<I, U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        I::deserialize(deserializer).map(Self::new)
    }
}

/// Container equipment type.
///
/// The enumeration is open: types outside the well-known ISO codes are kept
/// verbatim as [`ContainerType::Other`] and satisfy no requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerType {
    Gp20,
    Gp40,
    Hc40,
    Other(String),
}

impl ContainerType {
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            ContainerType::Gp20 => "20GP",
            ContainerType::Gp40 => "40GP",
            ContainerType::Hc40 => "40HC",
            ContainerType::Other(s) => s.as_str(),
        }
    }

    /// Whether a container of this type can serve a booking that requires
    /// `required`. 40GP and 40HC are interchangeable; 20GP only serves 20GP.
    #[inline]
    pub fn satisfies(&self, required: &ContainerType) -> bool {
        matches!(
            (self, required),
            (ContainerType::Gp20, ContainerType::Gp20)
                | (ContainerType::Gp40, ContainerType::Gp40 | ContainerType::Hc40)
                | (ContainerType::Hc40, ContainerType::Hc40 | ContainerType::Gp40)
        )
    }
}

impl From<String> for ContainerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "20GP" => ContainerType::Gp20,
            "40GP" => ContainerType::Gp40,
            "40HC" => ContainerType::Hc40,
            _ => ContainerType::Other(s),
        }
    }
}

impl From<&str> for ContainerType {
    #[inline]
    fn from(s: &str) -> Self {
        ContainerType::from(s.to_string())
    }
}

impl From<ContainerType> for String {
    fn from(t: ContainerType) -> Self {
        match t {
            ContainerType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct TestMarker;

    impl IdentifierMarkerName for TestMarker {
        const NAME: &'static str = "TestId";
    }

    type TestId = Identifier<String, TestMarker>;

    #[test]
    fn test_identifier_display_and_wire_format() {
        let id = TestId::from("HAM");
        assert_eq!(id.to_string(), "TestId(HAM)");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"HAM\"");

        let back: TestId = serde_json::from_str("\"RTM\"").unwrap();
        assert_eq!(back.as_str(), "RTM");
    }

    #[test]
    fn test_container_type_parses_known_and_keeps_unknown() {
        assert_eq!(ContainerType::from("20GP"), ContainerType::Gp20);
        assert_eq!(ContainerType::from("40HC"), ContainerType::Hc40);
        assert_eq!(
            ContainerType::from("45RF"),
            ContainerType::Other("45RF".to_string())
        );
        assert_eq!(String::from(ContainerType::from("45RF")), "45RF");
        assert_eq!(String::from(ContainerType::Gp40), "40GP");
    }

    #[test]
    fn test_compatibility_table() {
        use ContainerType::*;
        assert!(Gp20.satisfies(&Gp20));
        assert!(!Gp20.satisfies(&Gp40));
        assert!(!Gp20.satisfies(&Hc40));

        assert!(Gp40.satisfies(&Gp40));
        assert!(Gp40.satisfies(&Hc40));
        assert!(!Gp40.satisfies(&Gp20));

        assert!(Hc40.satisfies(&Hc40));
        assert!(Hc40.satisfies(&Gp40));
        assert!(!Hc40.satisfies(&Gp20));

        let reefer = ContainerType::from("45RF");
        assert!(!reefer.satisfies(&reefer.clone()));
        assert!(!Gp40.satisfies(&reefer));
    }
}
