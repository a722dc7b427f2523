//! Signature match data and its human-readable rendering.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::node::{Node, Shape};
use crate::reference::{FieldCitation, Reference};

/// Matches listed before the rest is cut off.
pub const MAX_MATCH_STRINGS: usize = 30;

/// Printable ASCII plus `\t`, `\n` and `\r`.
fn is_printable(b: u8) -> bool {
    matches!(b, 0x20..=0x7e | b'\t' | b'\n' | b'\r')
}

/// Anything besides visible ASCII other than `"` forces quoting.
fn needs_quoting(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| !matches!(b, 0x21 | 0x23..=0x7e))
}

/// Decode little-endian UTF-16, dropping a trailing odd byte.
fn decode_utf16_le(bytes: &[u8]) -> String {
    let units = bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Raw matched bytes.
///
/// Renders as text when printable, as UTF-16 text when the bytes decode to
/// printable UTF-16 (with or without byte order mark, possibly shifted by
/// one byte), and otherwise as the raw bytes. `full_hex` forces lowercase hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MatchData {
    pub data: Vec<u8>,
    pub full_hex: bool,
}

impl MatchData {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            full_hex: false,
        }
    }

    pub fn hex(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            full_hex: true,
        }
    }

    fn rendered_bytes(&self) -> Cow<'_, [u8]> {
        if self.full_hex {
            let hex: String = self.data.iter().map(|b| format!("{b:02x}")).collect();
            return Cow::Owned(hex.into_bytes());
        }
        if self.data.iter().copied().all(is_printable) {
            return Cow::Borrowed(&self.data);
        }

        let mut utf16 = self.data.as_slice();
        if let [0xff, 0xfe, rest @ ..] = utf16 {
            utf16 = rest;
        }
        if let [0, rest @ ..] = utf16 {
            utf16 = rest;
        }
        let decoded = decode_utf16_le(utf16);
        if decoded.is_empty() || !decoded.bytes().all(is_printable) {
            return Cow::Borrowed(&self.data);
        }
        Cow::Owned(decoded.into_bytes())
    }

    /// Double-quoted rendering with `\\`, `\"` and `\xNN` escapes.
    pub fn quoted(&self) -> String {
        let mut out = String::from("\"");
        for &b in self.rendered_bytes().iter() {
            match b {
                b'\\' => out.push_str("\\\\"),
                b'"' => out.push_str("\\\""),
                0x20..=0x7e => out.push(char::from(b)),
                _ => out.push_str(&format!("\\x{b:02x}")),
            }
        }
        out.push('"');
        out
    }

    /// Rendering used inside match descriptions: quoted when it contains
    /// anything but visible ASCII, unless it is hex.
    pub fn describe(&self) -> String {
        if !self.full_hex && needs_quoting(&self.rendered_bytes()) {
            self.quoted()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for MatchData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.rendered_bytes()))
    }
}

impl Node for MatchData {
    fn shape(&self) -> Shape<'_> {
        Shape::Leaf
    }

    fn display(&self) -> String {
        self.to_string()
    }

    fn is_empty_value(&self) -> bool {
        self.data.is_empty()
    }
}

impl Serialize for MatchData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(String::deserialize(deserializer)?))
    }
}

/// One match of a signature, optionally located in a field of its object.
///
/// Renders as `data [in "context"] [at 0xOFFSET] [in LABEL]`. The offset is
/// left out when hidden, or when it is zero and the match covers the whole
/// cited field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchString {
    pub data: MatchData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<MatchData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldCitation>,
    #[serde(skip)]
    pub hide_offset: bool,
}

impl MatchString {
    pub fn new(data: MatchData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: MatchData) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Cite the field the match was found in.
    ///
    /// Hides a zero offset when the field is a string equal to the match.
    pub fn in_field(mut self, field: &Reference<'_>) -> Self {
        let covers_field = field
            .value()
            .as_any()
            .downcast_ref::<String>()
            .is_some_and(|value| value.as_bytes() == self.data.data.as_slice());
        if covers_field && self.offset.is_none_or(|offset| offset == 0) {
            self.hide_offset = true;
        }
        self.field = Some(field.cite());
        self
    }

    pub fn hide_offset(mut self) -> Self {
        self.hide_offset = true;
        self
    }
}

impl fmt::Display for MatchString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.describe())?;
        if let Some(context) = &self.context {
            write!(f, " in {}", context.describe())?;
        }
        if let Some(offset) = self.offset
            && !self.hide_offset
        {
            write!(f, " at {offset:#x}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " in {}", field.label())?;
        }
        Ok(())
    }
}

crate::impl_record!(@fields MatchString {
    data: ("data", ""),
    context: ("context", ""),
    offset: ("offset", ""),
    field: ("field", ""),
});

impl Node for MatchString {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(crate::Record::fields(self))
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

/// All matches of one signature.
///
/// Renders `(none)`, a single match as is, or `Str1: ... Str2: ...` with at
/// most [`MAX_MATCH_STRINGS`] entries. The cap is exact: entry
/// `Str{MAX_MATCH_STRINGS}` is the last one listed, and any further entry
/// turns into a trailing `... (strings truncated)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchStrings(pub Vec<MatchString>);

impl fmt::Display for MatchStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("(none)"),
            [single] => write!(f, "{single}"),
            all => {
                for (i, item) in all.iter().take(MAX_MATCH_STRINGS).enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "Str{}: {item}", i + 1)?;
                }
                if all.len() > MAX_MATCH_STRINGS {
                    f.write_str(" ... (strings truncated)")?;
                }
                Ok(())
            }
        }
    }
}

impl FromIterator<MatchString> for MatchStrings {
    fn from_iter<I: IntoIterator<Item = MatchString>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Node for MatchStrings {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.0.iter().map(|item| item as &dyn Node).collect())
    }

    fn display(&self) -> String {
        self.to_string()
    }
}
