use std::io::Write;

use anyhow::Context;
use serde_json::Value;

use crate::{Decode, Encode};

/// Formatted chat text, represented as Minecraft's JSON text object.
///
/// A bare string is the common case and is wrapped as `{"text": s}` on the
/// wire; any other already-built JSON object passes through unmodified.
#[derive(Clone, PartialEq, Debug)]
pub struct Text(pub Value);

impl Text {
    pub fn plain(s: impl Into<String>) -> Self {
        Text(serde_json::json!({ "text": s.into() }))
    }

    pub fn raw(value: Value) -> Self {
        Text(value)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::plain(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::plain(s)
    }
}

impl Encode for Text {
    fn encode(&self, w: impl Write) -> anyhow::Result<()> {
        serde_json::to_string(&self.0)
            .context("serializing chat text to JSON")?
            .encode(w)
    }
}

impl Decode<'_> for Text {
    fn decode(r: &mut &[u8]) -> anyhow::Result<Self> {
        let s = <&str>::decode(r)?;
        let value = serde_json::from_str(s).context("parsing chat text JSON")?;
        Ok(Text(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_round_trip() {
        let txt = Text::plain("hello");
        let mut buf = vec![];
        txt.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Text::decode(&mut r).unwrap(), txt);
    }

    #[test]
    fn raw_object_round_trip() {
        let txt = Text::raw(serde_json::json!({ "text": "hi", "bold": true }));
        let mut buf = vec![];
        txt.encode(&mut buf).unwrap();
        let mut r = buf.as_slice();
        assert_eq!(Text::decode(&mut r).unwrap(), txt);
    }
}
