use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::{Node, Shape};

/// Declares a list of strings that renders as one joined string.
///
/// Elements stay addressable by index; in the text log the whole list is a
/// single value.
macro_rules! string_list {
    ($(#[$meta:meta])* $name:ident, $separator:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<String>);

        impl $name {
            pub const SEPARATOR: &str = $separator;

            pub fn iter(&self) -> std::slice::Iter<'_, String> {
                self.0.iter()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl<S: Into<String>> FromIterator<S> for $name {
            fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
                Self(iter.into_iter().map(Into::into).collect())
            }
        }

        impl From<Vec<String>> for $name {
            fn from(items: Vec<String>) -> Self {
                Self(items)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0.join(Self::SEPARATOR))
            }
        }

        impl Node for $name {
            fn shape(&self) -> Shape<'_> {
                Shape::Seq(self.0.iter().map(|item| item as &dyn Node).collect())
            }

            fn display(&self) -> String {
                self.to_string()
            }
        }
    };
}

string_list!(
    /// Strings rendered as `a, b, c`.
    StringList,
    ", "
);

string_list!(
    /// Chain of strings rendered as `a>b>c`, such as a process ancestry.
    ArrowStringList,
    ">"
);
