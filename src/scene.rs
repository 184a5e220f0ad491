//! Scene layout: the 2×4 cube grid, camera, light and label placement.
//!
//! Nothing here touches GL. Every per-cube quantity derives from the cube's
//! index, so the renderer never stores per-cube state.

use glam::{Mat3, Mat4, Vec3};

use crate::glyph;

/// Number of cubes drawn.
pub const CUBE_COUNT: usize = 8;
/// Cubes per row.
pub const COLUMNS: usize = 4;

/// World-space x of each column.
pub const COLUMN_X: [f32; COLUMNS] = [-4.7, -1.75, 1.75, 4.7];
/// World-space y of each row (row 0 on top).
pub const ROW_Y: [f32; 2] = [2.12, -2.35];
/// Specular exponent per cube, in index order.
pub const SHININESS: [f32; CUBE_COUNT] = [2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0, 256.0];
/// Label text per cube, matching [`SHININESS`].
pub const LABELS: [&str; CUBE_COUNT] = ["2", "4", "8", "16", "32", "64", "128", "256"];

/// Uniform cube scale.
pub const CUBE_SCALE: f32 = 1.62;

/// Base orientation in degrees, applied as X then Y then Z.
const PITCH: f32 = 0.0;
const YAW: f32 = 27.5;
const ROLL: f32 = -1.5;

/// The light reference offset was tuned against a cube pitched by this much.
const REFERENCE_PITCH: f32 = -16.0;
const REFERENCE_LIGHT_OFFSET: Vec3 = Vec3::new(4.75, 4.05, 3.9);

/// Label column centers in window pixels.
pub const LABEL_CENTER_X: [f32; COLUMNS] = [160.0, 480.0, 800.0, 1120.0];
/// Label baseline per row in window pixels (origin bottom-left).
pub const LABEL_Y: [f32; 2] = [300.0, 20.0];
/// Digit size per row; the top row is drawn smaller.
pub const LABEL_SIZE: [f32; 2] = [26.0, 30.0];

/// Surface reflectance shared by all cubes (shininess excluded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// Point light colors. The position is per cube, see
/// [`CubeInstance::light_position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// The copper-ish material every cube uses.
pub const CUBE_MATERIAL: Material = Material {
    ambient: Vec3::new(0.20, 0.10, 0.06),
    diffuse: Vec3::new(1.00, 0.50, 0.31),
    specular: Vec3::new(0.55, 0.55, 0.55),
};

/// White-ish point light.
pub const LIGHT: LightColors = LightColors {
    ambient: Vec3::splat(0.16),
    diffuse: Vec3::splat(0.95),
    specular: Vec3::ONE,
};

/// Clear color, RGB.
pub const BACKGROUND: [f32; 3] = [0.19, 0.21, 0.23];
/// Label fill color, RGB.
pub const LABEL_COLOR: [f32; 3] = [0.93, 0.93, 0.93];

fn orientation(pitch: f32, yaw: f32, roll: f32) -> Mat4 {
    Mat4::from_rotation_x(pitch.to_radians())
        * Mat4::from_rotation_y(yaw.to_radians())
        * Mat4::from_rotation_z(roll.to_radians())
}

/// Rotation shared by every cube.
#[must_use]
pub fn base_orientation() -> Mat4 {
    orientation(PITCH, YAW, ROLL)
}

/// Cube-relative light offset, identical for every cube.
///
/// The reference offset is expressed in the frame of the pitched reference
/// orientation and carried into [`base_orientation`].
#[must_use]
pub fn light_offset() -> Vec3 {
    let reference = orientation(REFERENCE_PITCH, YAW, ROLL);
    (base_orientation() * reference.inverse()).transform_vector3(REFERENCE_LIGHT_OFFSET)
}

/// Fixed camera: orthographic, looking down -Z from `z = 10`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Camera {
    /// The camera the grid is laid out for.
    #[must_use]
    pub fn new() -> Self {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        Self {
            eye,
            view: Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y),
            projection: Mat4::orthographic_rh_gl(-7.1, 7.1, -4.0, 4.0, -100.0, 100.0),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel-space projection for the label overlay, origin bottom-left.
#[must_use]
pub fn overlay_projection([width, height]: [u32; 2]) -> Mat4 {
    #[expect(clippy::cast_precision_loss)] // window sizes are far below 2^24
    let (w, h) = (width as f32, height as f32);
    Mat4::orthographic_rh_gl(0.0, w, 0.0, h, -1.0, 1.0)
}

/// Where and how large to draw a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// Bottom-left of the first digit box, in pixels.
    pub origin: [f32; 2],
    /// Digit box width.
    pub size: f32,
}

/// One cube of the grid, derived from its index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeInstance {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    /// Grid position in world space.
    pub position: Vec3,
    pub shininess: f32,
    pub label: &'static str,
}

impl CubeInstance {
    /// The cube at `index`, or `None` past [`CUBE_COUNT`].
    #[must_use]
    pub fn get(index: usize) -> Option<Self> {
        if index >= CUBE_COUNT {
            return None;
        }
        let (row, column) = (index / COLUMNS, index % COLUMNS);
        Some(Self {
            index,
            row,
            column,
            position: Vec3::new(COLUMN_X[column], ROW_Y[row], 0.0),
            shininess: SHININESS[index],
            label: LABELS[index],
        })
    }

    /// All cubes in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CUBE_COUNT).filter_map(Self::get)
    }

    /// `translate(position) * base * scale`.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * base_orientation()
            * Mat4::from_scale(Vec3::splat(CUBE_SCALE))
    }

    /// Inverse-transpose of the model matrix's linear part.
    #[must_use]
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.model_matrix().inverse().transpose())
    }

    /// World-space light position for this cube: its grid position plus the
    /// shared `offset`.
    #[must_use]
    pub fn light_position(&self, offset: Vec3) -> Vec3 {
        self.position + offset
    }

    /// Label placement, centered under this cube's column.
    #[must_use]
    pub fn label_layout(&self) -> LabelLayout {
        let size = LABEL_SIZE[self.row];
        let width = glyph::label_width(size, self.label);
        LabelLayout {
            origin: [LABEL_CENTER_X[self.column] - width * 0.5, LABEL_Y[self.row]],
            size,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected:?}, got {actual:?}",
        );
    }

    #[test]
    fn index_maps_to_row_column_shininess_label() {
        let cube = CubeInstance::get(5).unwrap();
        assert_eq!((cube.row, cube.column), (1, 1));
        assert!((cube.shininess - 64.0).abs() < f32::EPSILON);
        assert_eq!(cube.label, "64");
        assert_vec3_eq(cube.position, Vec3::new(-1.75, -2.35, 0.0));
        assert!(CubeInstance::get(CUBE_COUNT).is_none());
    }

    #[test]
    fn labels_spell_their_shininess() {
        for cube in CubeInstance::all() {
            let parsed: f32 = cube.label.parse().unwrap();
            assert!((parsed - cube.shininess).abs() < f32::EPSILON);
        }
        assert_eq!(CubeInstance::all().count(), CUBE_COUNT);
    }

    #[test]
    fn light_differs_only_by_grid_translation() {
        let offset = light_offset();
        let first = CubeInstance::get(0).unwrap();
        let reference = first.light_position(offset) - first.position;
        for cube in CubeInstance::all() {
            assert_vec3_eq(cube.light_position(offset) - cube.position, reference);
        }
    }

    #[test]
    fn light_offset_is_reference_pitched_back() {
        // base * reference⁻¹ collapses to a pure X rotation by -REFERENCE_PITCH.
        let expected = Mat4::from_rotation_x((-REFERENCE_PITCH).to_radians())
            .transform_vector3(REFERENCE_LIGHT_OFFSET);
        assert_vec3_eq(light_offset(), expected);
        assert!((light_offset().length() - REFERENCE_LIGHT_OFFSET.length()).abs() < 1e-5);
    }

    #[test]
    fn model_matrix_places_and_scales() {
        let cube = CubeInstance::get(2).unwrap();
        let m = cube.model_matrix();
        assert_vec3_eq(m.transform_point3(Vec3::ZERO), cube.position);
        let corner = m.transform_vector3(Vec3::new(0.5, 0.0, 0.0));
        assert!((corner.length() - 0.5 * CUBE_SCALE).abs() < 1e-5);
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular() {
        let cube = CubeInstance::get(6).unwrap();
        let model = cube.model_matrix();
        let normal_matrix = cube.normal_matrix();
        let n = normal_matrix * Vec3::Y;
        // Any tangent of the +Y face stays perpendicular to the transformed normal.
        for tangent in [Vec3::X, Vec3::Z] {
            let t = model.transform_vector3(tangent);
            assert!(n.dot(t).abs() < 1e-5);
        }
        // Uniform scale: the normal matrix is the rotation divided by the scale.
        let rotated = base_orientation().transform_vector3(Vec3::Y) / CUBE_SCALE;
        assert_vec3_eq(n, rotated);
    }

    #[test]
    fn labels_are_centered_under_their_column() {
        for cube in CubeInstance::all() {
            let layout = cube.label_layout();
            let width = glyph::label_width(layout.size, cube.label);
            let center = layout.origin[0] + width / 2.0;
            assert!((center - LABEL_CENTER_X[cube.column]).abs() < 1e-3);
            assert!((layout.origin[1] - LABEL_Y[cube.row]).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn top_row_labels_are_smaller() {
        let top = CubeInstance::get(0).unwrap().label_layout();
        let bottom = CubeInstance::get(4).unwrap().label_layout();
        assert!(top.size < bottom.size);
    }

    #[test]
    fn overlay_projection_maps_window_corners() {
        let p = overlay_projection([1280, 720]);
        assert_vec3_eq(p.project_point3(Vec3::ZERO), Vec3::new(-1.0, -1.0, 0.0));
        assert_vec3_eq(
            p.project_point3(Vec3::new(1280.0, 720.0, 0.0)),
            Vec3::new(1.0, 1.0, 0.0),
        );
    }

    #[test]
    fn camera_sees_the_whole_grid() {
        let camera = Camera::new();
        let clip = camera.projection * camera.view;
        for cube in CubeInstance::all() {
            let ndc = clip.project_point3(cube.position);
            assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0, "{ndc:?}");
        }
    }
}
