//! Seven-segment glyph geometry.
//!
//! Digits are built from up to seven axis-aligned rectangles inside a box
//! `size` wide and `size * 1.6` tall, with strokes `size * 0.18` thick. Each
//! rectangle is two triangles (six vertices). There is no font asset; the
//! output is a flat triangle list ready for `glDrawArrays(GL_TRIANGLES)`.
//!
//! ```text
//!   ─a─
//!  f   b
//!   ─g─
//!  e   c
//!   ─d─
//! ```

use crate::types::LabelVertex;

/// Box height relative to `size`.
pub const HEIGHT_RATIO: f32 = 1.6;
/// Stroke thickness relative to `size`.
pub const STROKE_RATIO: f32 = 0.18;
/// Horizontal advance between digit origins, relative to `size`.
pub const ADVANCE_RATIO: f32 = 1.12;
/// Vertices emitted per lit segment.
pub const VERTICES_PER_SEGMENT: usize = 6;

/// One stroke of a seven-segment digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// a
    Top,
    /// b
    UpperRight,
    /// c
    LowerRight,
    /// d
    Bottom,
    /// e
    LowerLeft,
    /// f
    UpperLeft,
    /// g
    Middle,
}

impl Segment {
    /// All segments in a..g order.
    pub const ALL: [Segment; 7] = [
        Segment::Top,
        Segment::UpperRight,
        Segment::LowerRight,
        Segment::Bottom,
        Segment::LowerLeft,
        Segment::UpperLeft,
        Segment::Middle,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Rectangle `(x, y, w, h)` of this segment relative to the box origin.
    fn rect(self, size: f32) -> [f32; 4] {
        let w = size;
        let h = size * HEIGHT_RATIO;
        let t = size * STROKE_RATIO;
        let half = h / 2.0;
        match self {
            Segment::Top => [t, h - t, w - 2.0 * t, t],
            Segment::UpperRight => [w - t, half + t / 2.0, t, half - t],
            Segment::LowerRight => [w - t, t, t, half - t],
            Segment::Bottom => [t, 0.0, w - 2.0 * t, t],
            Segment::LowerLeft => [0.0, t, t, half - t],
            Segment::UpperLeft => [0.0, half + t / 2.0, t, half - t],
            Segment::Middle => [t, half - t / 2.0, w - 2.0 * t, t],
        }
    }
}

/// The set of lit segments for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentSet(u8);

impl SegmentSet {
    /// Lit segments for `digit`; anything but `'0'..='9'` is blank.
    #[must_use]
    pub fn for_char(digit: char) -> Self {
        use Segment::{Bottom, LowerLeft, LowerRight, Middle, Top, UpperLeft, UpperRight};
        let lit: &[Segment] = match digit {
            '0' => &[Top, UpperRight, LowerRight, Bottom, LowerLeft, UpperLeft],
            '1' => &[UpperRight, LowerRight],
            '2' => &[Top, UpperRight, Middle, LowerLeft, Bottom],
            '3' => &[Top, UpperRight, Middle, LowerRight, Bottom],
            '4' => &[UpperLeft, Middle, UpperRight, LowerRight],
            '5' => &[Top, UpperLeft, Middle, LowerRight, Bottom],
            '6' => &[Top, UpperLeft, Middle, LowerRight, Bottom, LowerLeft],
            '7' => &[Top, UpperRight, LowerRight],
            '8' => &Segment::ALL,
            '9' => &[Top, UpperRight, LowerRight, Bottom, UpperLeft, Middle],
            _ => &[],
        };
        Self(lit.iter().fold(0, |bits, s| bits | s.bit()))
    }

    /// Whether `segment` is lit.
    #[must_use]
    pub fn contains(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    /// Number of lit segments.
    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no segment is lit.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lit segments in a..g order.
    pub fn iter(self) -> impl Iterator<Item = Segment> {
        Segment::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

/// Triangles for a single digit whose box has its bottom-left at `origin`.
#[must_use]
pub fn render_digit(origin: [f32; 2], size: f32, digit: char) -> Vec<LabelVertex> {
    let mut out = Vec::new();
    push_digit(&mut out, origin, size, digit);
    out
}

/// Triangles for `text`, one digit box per character, left to right.
///
/// Each character advances the origin by `size * ADVANCE_RATIO` whether or
/// not it renders anything.
#[must_use]
pub fn render_number(origin: [f32; 2], size: f32, text: &str) -> Vec<LabelVertex> {
    let mut out = Vec::with_capacity(text.len() * 7 * VERTICES_PER_SEGMENT);
    let advance = size * ADVANCE_RATIO;
    let [mut x, y] = origin;
    for ch in text.chars() {
        push_digit(&mut out, [x, y], size, ch);
        x += advance;
    }
    out
}

/// Rendered width of `text` at `size`: character count times the advance.
#[must_use]
#[expect(clippy::cast_precision_loss)] // label lengths are a handful of chars
pub fn label_width(size: f32, text: &str) -> f32 {
    size * text.chars().count() as f32 * ADVANCE_RATIO
}

fn push_digit(out: &mut Vec<LabelVertex>, [bx, by]: [f32; 2], size: f32, digit: char) {
    for segment in SegmentSet::for_char(digit).iter() {
        let [x, y, w, h] = segment.rect(size);
        push_rect(out, bx + x, by + y, w, h);
    }
}

fn push_rect(out: &mut Vec<LabelVertex>, x: f32, y: f32, w: f32, h: f32) {
    let (x1, y1) = (x + w, y + h);
    out.extend(
        [
            [x, y],
            [x1, y],
            [x1, y1],
            [x, y],
            [x1, y1],
            [x, y1],
        ]
        .map(|position| LabelVertex { position }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use Segment::{Bottom, LowerLeft, LowerRight, Middle, Top, UpperLeft, UpperRight};

    fn floats(vertices: &[LabelVertex]) -> usize {
        bytemuck::cast_slice::<LabelVertex, f32>(vertices).len()
    }

    fn min_x(vertices: &[LabelVertex]) -> f32 {
        vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::INFINITY, f32::min)
    }

    #[test]
    fn truth_table_matches_seven_segment_convention() {
        let table: [(char, &[Segment]); 10] = [
            ('0', &[Top, UpperRight, LowerRight, Bottom, LowerLeft, UpperLeft]),
            ('1', &[UpperRight, LowerRight]),
            ('2', &[Top, UpperRight, Bottom, LowerLeft, Middle]),
            ('3', &[Top, UpperRight, LowerRight, Bottom, Middle]),
            ('4', &[UpperRight, LowerRight, UpperLeft, Middle]),
            ('5', &[Top, LowerRight, Bottom, UpperLeft, Middle]),
            ('6', &[Top, LowerRight, Bottom, LowerLeft, UpperLeft, Middle]),
            ('7', &[Top, UpperRight, LowerRight]),
            ('8', &Segment::ALL),
            ('9', &[Top, UpperRight, LowerRight, Bottom, UpperLeft, Middle]),
        ];
        for (digit, expected) in table {
            let lit: Vec<_> = SegmentSet::for_char(digit).iter().collect();
            assert_eq!(lit, expected, "digit {digit}");
        }
    }

    #[test]
    fn one_is_two_rectangles() {
        let v = render_digit([0.0, 0.0], 10.0, '1');
        assert_eq!(v.len(), 12);
        assert_eq!(floats(&v), 24);
    }

    #[test]
    fn number_vertex_count_is_sum_of_digits() {
        assert_eq!(floats(&render_number([0.0, 0.0], 30.0, "64")), (6 + 4) * 12);
        assert_eq!(floats(&render_number([5.0, 5.0], 26.0, "256")), (5 + 5 + 6) * 12);
        assert_eq!(floats(&render_number([5.0, 5.0], 26.0, "8")), 7 * 12);
    }

    #[test]
    fn non_digits_render_blank_but_still_advance() {
        assert!(SegmentSet::for_char('x').is_empty());
        assert!(render_digit([0.0, 0.0], 10.0, '.').is_empty());
        let v = render_number([0.0, 0.0], 10.0, "-8");
        assert_eq!(v.len(), 7 * VERTICES_PER_SEGMENT);
        assert!((min_x(&v) - 10.0 * ADVANCE_RATIO).abs() < 1e-4);
    }

    #[test]
    fn advance_is_uniform_regardless_of_digit() {
        let size = 20.0;
        let advance = size * ADVANCE_RATIO;
        // '8' lights the left edge, so the leftmost vertex is the box origin.
        for prefix in ["1", "7", "0", "4"] {
            let head = render_number([3.0, 0.0], size, prefix);
            let both = render_number([3.0, 0.0], size, &format!("{prefix}8"));
            let tail = &both[head.len()..];
            assert!((min_x(tail) - (3.0 + advance)).abs() < 1e-4, "after {prefix}");
        }
    }

    #[test]
    fn segments_stay_inside_the_box() {
        let size = 30.0;
        let v = render_digit([100.0, 50.0], size, '8');
        let eps = 1e-3;
        for LabelVertex { position: [x, y] } in v {
            assert!(x >= 100.0 - eps && x <= 100.0 + size + eps, "x = {x}");
            assert!(y >= 50.0 - eps && y <= 50.0 + size * HEIGHT_RATIO + eps, "y = {y}");
        }
    }

    #[test]
    fn middle_bar_is_vertically_centered() {
        let size = 10.0;
        let [_, y, _, h] = Middle.rect(size);
        assert!(((y + h / 2.0) - size * HEIGHT_RATIO / 2.0).abs() < 1e-5);
    }

    #[test]
    fn rendering_is_pure() {
        let a = render_number([12.5, 7.0], 26.0, "128");
        let b = render_number([12.5, 7.0], 26.0, "128");
        assert_eq!(a, b);
    }

    #[test]
    fn label_width_counts_characters() {
        assert!((label_width(30.0, "2") - 33.6).abs() < 1e-4);
        assert!((label_width(26.0, "256") - 26.0 * 3.0 * 1.12).abs() < 1e-4);
    }
}
