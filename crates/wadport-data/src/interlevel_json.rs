//! id24 interlevel JSON output.
//!
//! The document is pretty printed with a two space indent, except that
//! every frame object and every condition list is written on one line.
//! Fragments shared in the IR are rendered once and reused.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io;
use std::rc::Rc;

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::value::RawValue;

use wadport_types::{Condition, Frame, InterlevelData};

pub const DOCUMENT_TYPE: &str = "interlevel";
pub const DOCUMENT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub author: String,
    pub application: String,
    pub timestamp: String,
    pub comment: String,
}

impl Metadata {
    pub fn new(author: &str, application: &str, timestamp: &str, title: &str, mod_author: &str) -> Self {
        Self {
            author: author.to_string(),
            application: application.to_string(),
            timestamp: timestamp.to_string(),
            comment: format!(
                "Intermission screen for {title}. Ported from GZDoom mod made by {mod_author}."
            ),
        }
    }
}

/// `{"a": 1, "b": [2, 3]}` on a single line.
struct InlineFormatter;

impl Formatter for InlineFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn inline<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Box<RawValue>> {
    let mut out = Vec::new();
    value.serialize(&mut serde_json::Serializer::with_formatter(&mut out, InlineFormatter))?;
    let text = String::from_utf8(out).map_err(serde_json::Error::custom)?;
    RawValue::from_string(text)
}

/// Single-line renderings of the fragments of one document, keyed by node.
#[derive(Default)]
struct Fragments {
    frames: HashMap<*const Frame, Box<RawValue>>,
    conditions: HashMap<*const [Condition], Box<RawValue>>,
}

impl Fragments {
    fn collect(data: &InterlevelData) -> serde_json::Result<Self> {
        let mut fragments = Self::default();
        for layer in data.layers.iter().flatten() {
            fragments.add_conditions(&layer.conditions)?;
            for anim in &layer.anims {
                fragments.add_conditions(&anim.conditions)?;
                for frame in &anim.frames {
                    if let Entry::Vacant(slot) =
                        fragments.frames.entry(Rc::as_ptr(frame))
                    {
                        slot.insert(inline(&**frame)?);
                    }
                }
            }
        }
        Ok(fragments)
    }

    fn add_conditions(&mut self, conditions: &Option<Rc<[Condition]>>) -> serde_json::Result<()> {
        if let Some(conditions) = conditions {
            if let Entry::Vacant(slot) =
                self.conditions.entry(Rc::as_ptr(conditions))
            {
                slot.insert(inline(&**conditions)?);
            }
        }
        Ok(())
    }

    fn frame(&self, frame: &Rc<Frame>) -> &RawValue {
        &self.frames[&Rc::as_ptr(frame)]
    }

    fn conditions(&self, conditions: &Option<Rc<[Condition]>>) -> Option<&RawValue> {
        conditions
            .as_ref()
            .map(|c| &*self.conditions[&Rc::as_ptr(c)])
    }
}

#[derive(Serialize)]
struct Document<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    version: &'static str,
    metadata: &'a Metadata,
    data: DataOut<'a>,
}

#[derive(Serialize)]
struct DataOut<'a> {
    music: Option<&'a str>,
    backgroundimage: Option<&'a str>,
    layers: Option<Vec<LayerOut<'a>>>,
}

#[derive(Serialize)]
struct LayerOut<'a> {
    anims: Vec<AnimOut<'a>>,
    conditions: Option<&'a RawValue>,
}

#[derive(Serialize)]
struct AnimOut<'a> {
    x: i32,
    y: i32,
    frames: Vec<&'a RawValue>,
    conditions: Option<&'a RawValue>,
}

/// Render an interlevel document.
pub fn to_json(data: &InterlevelData, metadata: &Metadata) -> serde_json::Result<String> {
    let fragments = Fragments::collect(data)?;
    let layers = data.layers.as_ref().map(|layers| {
        layers
            .iter()
            .map(|layer| LayerOut {
                anims: layer
                    .anims
                    .iter()
                    .map(|anim| AnimOut {
                        x: anim.x,
                        y: anim.y,
                        frames: anim.frames.iter().map(|f| fragments.frame(f)).collect(),
                        conditions: fragments.conditions(&anim.conditions),
                    })
                    .collect(),
                conditions: fragments.conditions(&layer.conditions),
            })
            .collect()
    });

    let document = Document {
        kind: DOCUMENT_TYPE,
        version: DOCUMENT_VERSION,
        metadata,
        data: DataOut {
            music: data.music.as_deref(),
            backgroundimage: data.background.as_deref(),
            layers,
        },
    };

    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    document.serialize(&mut serde_json::Serializer::with_formatter(&mut out, formatter))?;
    String::from_utf8(out).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wadport_types::{Anim, Layer};

    fn metadata() -> Metadata {
        Metadata::new("porter", "wadport", "2024-01-02T03:04:05+00:00", "Test WAD", "Someone")
    }

    #[test]
    fn null_layers() {
        let data = InterlevelData {
            music: Some("D_INTER".into()),
            background: Some("INTERPIC".into()),
            layers: None,
        };
        let json = to_json(&data, &metadata()).unwrap();
        let expected = r#"{
  "type": "interlevel",
  "version": "0.1.0",
  "metadata": {
    "author": "porter",
    "application": "wadport",
    "timestamp": "2024-01-02T03:04:05+00:00",
    "comment": "Intermission screen for Test WAD. Ported from GZDoom mod made by Someone."
  },
  "data": {
    "music": "D_INTER",
    "backgroundimage": "INTERPIC",
    "layers": null
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn fragments_on_one_line() {
        let frame = Rc::new(Frame::fixed("PATCHA", 0.34));
        let infinite = Rc::new(Frame::infinite("PATCHB"));
        let conditions: Rc<[Condition]> = Rc::from(vec![Condition::current(1), Condition::entering()]);
        let data = InterlevelData {
            music: None,
            background: Some("WIMAP0".into()),
            layers: Some(vec![Layer {
                anims: vec![
                    Anim {
                        x: 10,
                        y: 20,
                        frames: vec![Rc::clone(&frame), infinite],
                        conditions: Some(Rc::clone(&conditions)),
                    },
                    Anim {
                        x: 1,
                        y: 2,
                        frames: vec![frame],
                        conditions: None,
                    },
                ],
                conditions: Some(conditions),
            }]),
        };
        let json = to_json(&data, &metadata()).unwrap();
        let expected = r#"  "data": {
    "music": null,
    "backgroundimage": "WIMAP0",
    "layers": [
      {
        "anims": [
          {
            "x": 10,
            "y": 20,
            "frames": [
              {"image": "PATCHA", "type": 2, "duration": 0.34, "maxduration": 0},
              {"image": "PATCHB", "type": 1, "duration": 0.0, "maxduration": 0}
            ],
            "conditions": [{"condition": 2, "param": 1}, {"condition": 7, "param": 0}]
          },
          {
            "x": 1,
            "y": 2,
            "frames": [
              {"image": "PATCHA", "type": 2, "duration": 0.34, "maxduration": 0}
            ],
            "conditions": null
          }
        ],
        "conditions": [{"condition": 2, "param": 1}, {"condition": 7, "param": 0}]
      }
    ]
  }
}"#;
        assert!(json.ends_with(expected), "{json}");

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["data"]["layers"][0]["anims"][0]["frames"][0]["duration"], 0.34);
    }
}
