//! Fiducial tag families and their rendering into bitmaps.
//!
//! Families are read from JSON files named after the family, with the
//! PascalCase keys written by the C header converter (`Codes`, `NBits`,
//! `LocationX`, ...).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitmap::Bitmap;
use crate::polygon::Color;
use crate::{TagTraceError, TagTraceResult};

/// Largest accepted tag edge, in pixels.
pub const MAX_TAG_WIDTH: u32 = 4096;

/// A family of square fiducial tags sharing one bit layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Family {
    /// Canonical name, such as `36h11`.
    pub name: String,
    /// Payload of every tag in the family.
    pub codes: Vec<u64>,
    /// Number of coding bits per tag.
    #[serde(rename = "NBits")]
    pub n_bits: usize,
    /// X location of coding bit `i`, relative to the border square.
    pub location_x: Vec<i32>,
    /// Y location of coding bit `i`, relative to the border square.
    pub location_y: Vec<i32>,
    /// Whether coding bit `i` lies inside the border square.
    #[serde(default)]
    pub inside: Vec<bool>,
    /// Minimal Hamming distance between two codes of the family.
    pub hamming: u32,
    /// Edge length of the whole tag in pixels.
    pub total_width: u32,
    /// Edge length of the square at the black/white border.
    pub width_at_border: u32,
    /// When set, the outer border is black and the inner one white.
    pub reversed_border: bool,
}

impl Family {
    /// Parse and validate a family from its JSON encoding.
    pub fn from_json(json: &str) -> TagTraceResult<Self> {
        let mut family: Family = serde_json::from_str(json)?;
        if family.inside.is_empty() {
            family.inside = family.compute_inside();
        }
        family.validate()?;
        Ok(family)
    }

    /// Number of codes in the family.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    fn compute_inside(&self) -> Vec<bool> {
        let border = 0..i64::from(self.width_at_border);
        self.location_x
            .iter()
            .zip(&self.location_y)
            .map(|(&x, &y)| border.contains(&i64::from(x)) && border.contains(&i64::from(y)))
            .collect()
    }

    fn border_offset(&self) -> i64 {
        (i64::from(self.total_width) - i64::from(self.width_at_border)) / 2
    }

    /// Canvas position of coding bit `i`.
    fn bit_position(&self, i: usize) -> (i64, i64) {
        let offset = self.border_offset();
        (
            offset + i64::from(self.location_x[i]),
            offset + i64::from(self.location_y[i]),
        )
    }

    /// Check that the bit layout is consistent with the tag geometry.
    pub fn validate(&self) -> TagTraceResult<()> {
        let invalid = |reason: String| TagTraceError::InvalidFamily(format!("{}: {reason}", self.name));

        if self.n_bits > 64 {
            return Err(invalid(format!("{} bits do not fit in a 64-bit code", self.n_bits)));
        }
        for (field, len) in [
            ("LocationX", self.location_x.len()),
            ("LocationY", self.location_y.len()),
            ("Inside", self.inside.len()),
        ] {
            if len != self.n_bits {
                return Err(invalid(format!("{field} has {len} entries, expected {}", self.n_bits)));
            }
        }
        if self.total_width > MAX_TAG_WIDTH {
            return Err(invalid(format!(
                "total width {} exceeds {MAX_TAG_WIDTH}",
                self.total_width
            )));
        }
        if self.width_at_border > self.total_width {
            return Err(invalid(format!(
                "border width {} exceeds total width {}",
                self.width_at_border, self.total_width
            )));
        }

        let canvas = 0..i64::from(self.total_width);
        for i in 0..self.n_bits {
            let (x, y) = self.bit_position(i);
            if !canvas.contains(&x) || !canvas.contains(&y) {
                return Err(invalid(format!(
                    "bit {i} at ({}, {}) lies outside the tag",
                    self.location_x[i], self.location_y[i]
                )));
            }
        }
        Ok(())
    }

    /// Render the tag for code `index` as a `total_width` square bitmap.
    ///
    /// Set bits are drawn as background (white) and clear bits as
    /// foreground (black), whichever side of the border they fall on.
    pub fn render_tag(&self, index: usize) -> TagTraceResult<Bitmap> {
        self.validate()?;
        let code = *self.codes.get(index).ok_or(TagTraceError::CodeOutOfRange {
            index,
            count: self.codes.len(),
        })?;

        let (outer, inner) = if self.reversed_border {
            (Color::Foreground, Color::Background)
        } else {
            (Color::Background, Color::Foreground)
        };
        // Validated above: every coordinate below lies in 0..total_width.
        let width = self.total_width;
        let start = self.border_offset() as u32;
        let end = start + self.width_at_border;
        let mut bitmap = Bitmap::new(width, width, outer);
        bitmap.fill_rect(start, start, end, end, inner);

        for i in 0..self.n_bits {
            let mask = 1u64 << (self.n_bits - 1 - i);
            let color = if code & mask != 0 {
                Color::Background
            } else {
                Color::Foreground
            };
            let (x, y) = self.bit_position(i);
            bitmap.set(x as u32, y as u32, color);
        }

        Ok(bitmap)
    }
}

/// Loads families from a directory of `<name>.json` files, once per name.
#[derive(Debug)]
pub struct FamilyRegistry {
    dir: PathBuf,
    loaded: Mutex<HashMap<String, Arc<Family>>>,
}

impl FamilyRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Directory the registry reads family files from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding family `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Return family `name`, loading it on first use.
    pub fn get(&self, name: &str) -> TagTraceResult<Arc<Family>> {
        let mut loaded = self.loaded.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(family) = loaded.get(name) {
            return Ok(Arc::clone(family));
        }

        let path = self.path_for(name);
        if !path.is_file() {
            return Err(TagTraceError::UnknownFamily {
                name: name.to_string(),
                path,
            });
        }
        let family = Family::from_json(&fs::read_to_string(&path)?)?;
        if family.name != name {
            return Err(TagTraceError::InvalidFamily(format!(
                "{} declares name '{}'",
                path.display(),
                family.name
            )));
        }
        debug!(name, codes = family.len(), path = %path.display(), "loaded family");

        let family = Arc::new(family);
        loaded.insert(name.to_string(), Arc::clone(&family));
        Ok(family)
    }
}
