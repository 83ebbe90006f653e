//! Extruded text built from a segment-display glyph set, the style used on
//! arena scoreboards. Glyphs are strokes between points of a unit cell; each
//! stroke becomes a thin box.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::geometry::{primitives::box_geometry, Geometry, Topology};

/// Glyph cell width relative to the text size.
const GLYPH_WIDTH: f32 = 0.6;
const NARROW_GLYPH_WIDTH: f32 = 0.2;
const LETTER_SPACING: f32 = 0.2;
const STROKE_THICKNESS: f32 = 0.12;

type Stroke = ([f32; 2], [f32; 2]);

// Cell anchors, x and y in [0, 1]
const TL: [f32; 2] = [0.0, 1.0];
const TC: [f32; 2] = [0.5, 1.0];
const TR: [f32; 2] = [1.0, 1.0];
const ML: [f32; 2] = [0.0, 0.5];
const MC: [f32; 2] = [0.5, 0.5];
const MR: [f32; 2] = [1.0, 0.5];
const BL: [f32; 2] = [0.0, 0.0];
const BC: [f32; 2] = [0.5, 0.0];
const BR: [f32; 2] = [1.0, 0.0];

// Seven-segment names
const A: Stroke = (TL, TR);
const B: Stroke = (TR, MR);
const C: Stroke = (MR, BR);
const D: Stroke = (BL, BR);
const E: Stroke = (ML, BL);
const F: Stroke = (TL, ML);
const G: Stroke = (ML, MR);
const CENTER_FULL: Stroke = (TC, BC);

fn glyph_strokes(ch: char) -> Option<&'static [Stroke]> {
    let strokes: &'static [Stroke] = match ch.to_ascii_uppercase() {
        '0' | 'O' => &[A, B, C, D, E, F],
        '1' => &[B, C],
        '2' => &[A, B, G, E, D],
        '3' => &[A, B, G, C, D],
        '4' => &[F, G, B, C],
        '5' | 'S' => &[A, F, G, C, D],
        '6' => &[A, F, G, E, C, D],
        '7' => &[A, B, C],
        '8' | 'B' => &[A, B, C, D, E, F, G],
        '9' => &[A, B, C, D, F, G],
        'A' => &[A, B, C, E, F, G],
        'C' => &[A, F, E, D],
        'D' => &[A, B, C, D, CENTER_FULL],
        'E' => &[A, F, G, E, D],
        'F' => &[A, F, G, E],
        'G' => &[A, F, E, D, C, (MC, MR)],
        'H' => &[F, E, B, C, G],
        'I' => &[A, D, CENTER_FULL],
        'J' => &[B, C, D, E],
        'K' => &[F, E, (ML, TR), (ML, BR)],
        'L' => &[F, E, D],
        'M' => &[F, E, B, C, (TL, MC), (TR, MC)],
        'N' => &[F, E, B, C, (TL, BR)],
        'P' => &[A, B, F, G, E],
        'Q' => &[A, B, C, D, E, F, (MC, BR)],
        'R' => &[A, B, F, G, E, (MC, BR)],
        'T' => &[A, CENTER_FULL],
        'U' => &[F, E, D, C, B],
        'V' => &[(TL, BC), (TR, BC)],
        'W' => &[F, E, B, C, (MC, BC)],
        'X' => &[(TL, BR), (TR, BL)],
        'Y' => &[(TL, MC), (TR, MC), (MC, BC)],
        'Z' => &[A, (TR, BL), D],
        // Dots are zero-length strokes
        ':' => &[([0.5, 0.25], [0.5, 0.25]), ([0.5, 0.75], [0.5, 0.75])],
        '-' => &[G],
        _ => return None,
    };

    Some(strokes)
}

fn glyph_width(ch: char) -> f32 {
    match ch {
        ':' | ' ' | '.' => NARROW_GLYPH_WIDTH,
        _ => GLYPH_WIDTH,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Glyph height in world units.
    pub size: f32,
    /// Extrusion along +Z, starting at z = 0.
    pub depth: f32,
}

/// Horizontal extent of `text` without trailing letter spacing.
#[cfg(test)]
pub fn measure(text: &str, size: f32) -> f32 {
    let advance: f32 = text
        .chars()
        .map(|ch| glyph_width(ch) + LETTER_SPACING)
        .sum();

    if text.is_empty() {
        0.0
    } else {
        (advance - LETTER_SPACING) * size
    }
}

/// Builds text with its baseline on y = 0 and the first glyph starting at x = 0.
/// Characters without a glyph advance the cursor but draw nothing.
pub fn text_geometry(text: &str, options: &TextOptions) -> Geometry {
    let size = options.size;
    let thickness = STROKE_THICKNESS * size;
    let mut geometry = Geometry::empty(Topology::Triangles);
    let mut cursor = 0.0;

    for ch in text.chars() {
        let width = glyph_width(ch) * size;

        if let Some(strokes) = glyph_strokes(ch) {
            // Inset so that stroke caps stay inside the cell
            let cell_origin = Vec2::new(cursor + thickness * 0.5, thickness * 0.5);
            let cell_size = Vec2::new(width - thickness, size - thickness);

            for (from, to) in strokes {
                let from = cell_origin + Vec2::from(*from) * cell_size;
                let to = cell_origin + Vec2::from(*to) * cell_size;
                geometry.merge(&stroke_geometry(from, to, thickness, options.depth));
            }
        }

        cursor += width + LETTER_SPACING * size;
    }

    geometry
}

fn stroke_geometry(from: Vec2, to: Vec2, thickness: f32, depth: f32) -> Geometry {
    let delta = to - from;
    let length = delta.length();
    let angle = if length > f32::EPSILON {
        delta.y.atan2(delta.x)
    } else {
        0.0
    };

    let mut stroke = box_geometry(length + thickness, thickness, depth);
    let center = (from + to) * 0.5;
    stroke.transform(&Mat4::from_rotation_translation(
        Quat::from_rotation_z(angle),
        Vec3::new(center.x, center.y, depth * 0.5),
    ));

    stroke
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: TextOptions = TextOptions {
        size: 0.8,
        depth: 0.02,
    };

    #[test]
    fn bounding_box_matches_measured_width() {
        for text in ["85", "HOME", "GUEST", "00:00", "4TH"] {
            let geometry = text_geometry(text, &OPTIONS);
            let bounds = geometry.bounding_box().unwrap();

            assert!(
                (bounds.width() - measure(text, OPTIONS.size)).abs() < 1e-4,
                "{text}: {} vs {}",
                bounds.width(),
                measure(text, OPTIONS.size)
            );
            assert!(bounds.min.x.abs() < 1e-4);
        }
    }

    #[test]
    fn glyphs_span_size_and_depth() {
        let bounds = text_geometry("8", &OPTIONS).bounding_box().unwrap();

        assert!(bounds.min.y.abs() < 1e-4);
        assert!((bounds.max.y - 0.8).abs() < 1e-4);
        assert!(bounds.min.z.abs() < 1e-6);
        assert!((bounds.max.z - 0.02).abs() < 1e-6);
    }

    #[test]
    fn two_digit_width() {
        assert!((measure("85", 1.0) - 1.4).abs() < 1e-6);
        assert_eq!(measure("", 1.0), 0.0);
    }

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        let upper = text_geometry("HOME", &OPTIONS);
        let lower = text_geometry("home", &OPTIONS);

        assert_eq!(upper.vertices, lower.vertices);
    }

    #[test]
    fn unknown_characters_advance_without_geometry() {
        let geometry = text_geometry("1?1", &OPTIONS);
        let single = text_geometry("1", &OPTIONS);

        assert_eq!(geometry.vertices.len(), single.vertices.len() * 2);
        let bounds = geometry.bounding_box().unwrap();
        assert!((bounds.max.x - measure("1?1", OPTIONS.size)).abs() < 1e-4);
    }

    #[test]
    fn eight_uses_all_seven_segments() {
        let geometry = text_geometry("8", &OPTIONS);
        assert_eq!(geometry.primitive_count(), 7 * 12);
    }
}
