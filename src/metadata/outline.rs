//! Plain-text cube outline.
//!
//! The outline lists every dimension with its levels and sample members,
//! followed by the measures. It is what the extraction step is prompted
//! with, so field names must match the index exactly.

use std::fmt::Write;

use super::MetadataIndex;

impl MetadataIndex {
    /// Render the cube outline.
    ///
    /// Levels are grouped under their parent object; a top-level dimension is
    /// its own group. Groups keep the order in which they first appear.
    pub fn outline(&self) -> String {
        let mut groups: Vec<(&str, Vec<String>)> = Vec::new();

        for dim in self.dimensions() {
            let object = if dim.is_level {
                dim.object_name.as_str()
            } else {
                dim.name.as_str()
            };

            let mut line = format!("    - {}", dim.name);
            if !dim.members.is_empty() {
                let _ = write!(line, ", members: {}, ...", dim.members.join(","));
            }

            match groups.iter_mut().find(|(name, _)| *name == object) {
                Some((_, levels)) => levels.push(line),
                None => groups.push((object, vec![line])),
            }
        }

        let mut out = String::from("Cube dimensions:\n");
        for (object, levels) in &groups {
            let _ = writeln!(out, "  - {}, levels:", object);
            for level in levels {
                let _ = writeln!(out, "{}", level);
            }
        }

        out.push_str("Measures:\n");
        for measure in self.measures() {
            let _ = writeln!(out, "  - {}", measure.name);
        }

        out
    }
}
