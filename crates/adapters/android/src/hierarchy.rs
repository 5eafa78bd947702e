//! uiautomator dump parsing.
//!
//! `uiautomator dump` prints the window hierarchy as flat XML:
//!
//! ```text
//! <hierarchy rotation="0">
//!   <node index="0" text="" class="android.widget.FrameLayout" bounds="[0,0][1080,1920]">
//!     <node index="0" text="Login" class="android.widget.Button" bounds="[40,100][1040,220]" />
//!   </node>
//! </hierarchy>
//! ```
//!
//! Every `<node>` becomes an [`Element`] whose id is its dotted index path
//! from the root (`0`, `0.0`, `0.1.3`) and whose properties are the node's
//! attributes. Only `<node>` tags are interpreted, so a regex tokenizer is
//! enough and no XML dependency is needed.

use appdriver_domain::element::Element;
use appdriver_domain::geometry::Rect;
use regex::Regex;

use crate::error::AndroidError;

const NODE_PATTERN: &str = r"<(/?)node\b((?:[^>/]|/[^>])*)(/?)>";
const ATTRIBUTE_PATTERN: &str = r#"([A-Za-z_][\w:.-]*)="([^"]*)""#;
const BOUNDS_PATTERN: &str = r"^\[(-?\d+),(-?\d+)\]\[(-?\d+),(-?\d+)\]$";

/// Compiled tokenizers for uiautomator output.
#[derive(Debug, Clone)]
pub struct DumpParser {
    node: Regex,
    attribute: Regex,
    bounds: Regex,
}

impl DumpParser {
    /// # Errors
    ///
    /// Returns [`AndroidError::InvalidPattern`] if a tokenizer fails to
    /// compile.
    pub fn new() -> Result<Self, AndroidError> {
        let compile = |pattern| Regex::new(pattern).map_err(AndroidError::InvalidPattern);
        Ok(Self {
            node: compile(NODE_PATTERN)?,
            attribute: compile(ATTRIBUTE_PATTERN)?,
            bounds: compile(BOUNDS_PATTERN)?,
        })
    }

    /// Parse a dump into elements in document order.
    ///
    /// # Errors
    ///
    /// Returns [`AndroidError::MalformedDump`] when there is no hierarchy
    /// or the `<node>` tags are unbalanced.
    pub fn parse(&self, dump: &str) -> Result<Vec<Element>, AndroidError> {
        if !dump.contains("<hierarchy") {
            return Err(AndroidError::MalformedDump("no hierarchy in output"));
        }

        let mut elements = Vec::new();
        // (path, number of children seen so far) for every open node
        let mut open: Vec<(String, usize)> = Vec::new();
        let mut roots = 0usize;

        for captures in self.node.captures_iter(dump) {
            let closing = !captures[1].is_empty();
            if closing {
                if open.pop().is_none() {
                    return Err(AndroidError::MalformedDump("unbalanced </node>"));
                }
                continue;
            }

            let (id, parent_id) = match open.last_mut() {
                Some((parent, children)) => {
                    let id = format!("{parent}.{children}");
                    *children += 1;
                    (id, Some(parent.clone()))
                }
                None => {
                    let id = roots.to_string();
                    roots += 1;
                    (id, None)
                }
            };

            let mut builder = Element::builder().id(id.clone());
            if let Some(parent_id) = parent_id {
                builder = builder.parent_id(parent_id);
            }
            for attribute in self.attribute.captures_iter(&captures[2]) {
                builder = builder.property(&attribute[1], unescape(&attribute[2]));
            }
            elements.push(builder.build().map_err(AndroidError::Domain)?);

            let self_closing = !captures[3].is_empty();
            if !self_closing {
                open.push((id, 0));
            }
        }

        if !open.is_empty() {
            return Err(AndroidError::MalformedDump("unclosed node"));
        }
        Ok(elements)
    }

    /// Parse a `bounds` attribute (`[left,top][right,bottom]`).
    #[must_use]
    pub fn bounds(&self, value: &str) -> Option<Rect> {
        let captures = self.bounds.captures(value.trim())?;
        let coordinate = |index: usize| captures[index].parse::<i32>().ok();
        Some(Rect {
            left: coordinate(1)?,
            top: coordinate(2)?,
            right: coordinate(3)?,
            bottom: coordinate(4)?,
        })
    }
}

/// Decode XML character references in one pass.
///
/// Named entities and `&#NN;` / `&#xHH;` references are decoded; anything
/// unrecognised is kept verbatim.
fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    let mut decoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find(';').and_then(|end| Some((entity(&tail[1..end])?, end))) {
            Some((c, end)) => {
                decoded.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &tail[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "amp" => Some('&'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
