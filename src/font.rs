//! Built-in font metrics for text placement.
//!
//! The anchored-text compositor must know how wide a string renders before
//! deciding where to put it. Rather than a process-wide font singleton, a
//! [`BuiltinFont`] value is constructed by the caller and passed into each
//! operation; it carries the standard-14 Helvetica advance widths (per 1000
//! units of font size), which is exactly the metric set a PDF viewer uses
//! for the non-embedded base font the engine draws with.

use serde::{Deserialize, Serialize};

/// Advance widths for Helvetica, ASCII 32..=126, in 1/1000 of the font size.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, // space ! " # $ % & '
    333, 333, 389, 584, 278, 333, 278, 278, // ( ) * + , - . /
    556, 556, 556, 556, 556, 556, 556, 556, // 0 1 2 3 4 5 6 7
    556, 556, 278, 278, 584, 584, 584, 556, // 8 9 : ; < = > ?
    1015, 667, 667, 722, 722, 667, 611, 778, // @ A B C D E F G
    722, 278, 500, 667, 556, 833, 722, 778, // H I J K L M N O
    667, 778, 722, 667, 611, 722, 667, 944, // P Q R S T U V W
    667, 667, 611, 278, 278, 278, 469, 556, // X Y Z [ \ ] ^ _
    333, 556, 556, 500, 556, 556, 278, 556, // ` a b c d e f g
    556, 222, 222, 500, 222, 833, 556, 556, // h i j k l m n o
    556, 556, 333, 500, 278, 556, 500, 722, // p q r s t u v w
    500, 500, 500, 334, 260, 334, 584, // x y z { | } ~
];

/// Helvetica cap height, in 1/1000 of the font size (from the AFM).
const HELVETICA_CAP_HEIGHT: u16 = 718;

/// Fallback advance for code points outside the table.
const DEFAULT_WIDTH: u16 = 556;

/// One of the standard base fonts the engine can draw with.
///
/// Only Helvetica is needed today; the enum leaves room for the other
/// standard faces without changing call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinFont {
    /// Helvetica regular.
    #[default]
    Helvetica,
}

impl BuiltinFont {
    /// PDF BaseFont name.
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
        }
    }

    /// Advance width of `text` rendered at `size` points.
    pub fn width_of_text_at_size(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        f64::from(units) / 1000.0 * size
    }

    /// Height of the text bounding box at `size` points (cap height).
    pub fn height_at_size(&self, size: f64) -> f64 {
        f64::from(HELVETICA_CAP_HEIGHT) / 1000.0 * size
    }

    fn char_width(&self, c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            HELVETICA_WIDTHS[(code - 32) as usize]
        } else {
            DEFAULT_WIDTH
        }
    }
}
