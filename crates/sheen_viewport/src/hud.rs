//! Heads-up display.
//!
//! A small egui side panel over the traced image: frame rate, camera pose,
//! scene stats and the control cheat sheet. Toggled with `H`.

use sheen_math::{CameraState, Vec3};

/// Snapshot of everything the HUD shows for one frame.
#[derive(Clone, Debug)]
pub struct HudStats {
    pub fps: f32,
    pub camera: CameraState,
    pub sphere_count: usize,
    /// "checker" or "texture"
    pub sky_label: &'static str,
    pub resolution: (u32, u32),
}

impl HudStats {
    /// Camera yaw and pitch in degrees, wrapped to (-180, 180].
    pub fn camera_angles_degrees(&self) -> (f32, f32) {
        (wrap_degrees(self.camera.yaw.to_degrees()), self.camera.pitch.to_degrees())
    }
}

/// Wrap an angle in degrees to (-180, 180].
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

fn format_vec3(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

const CONTROLS: &[(&str, &str)] = &[
    ("Left drag", "Look"),
    ("Wheel / pinch", "Zoom"),
    ("W / S", "Forward / back"),
    ("A / D", "Strafe"),
    ("Space / Shift", "Up / down"),
    ("R", "Reset camera"),
    ("H", "Toggle HUD"),
    ("Esc", "Quit"),
];

/// Draw the HUD panel.
pub fn render_hud(ctx: &egui::Context, stats: &HudStats) {
    egui::SidePanel::left("hud_panel")
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Sheen");
            ui.separator();

            ui.label(format!("FPS: {:.1}", stats.fps));
            ui.separator();

            ui.collapsing("Camera", |ui| {
                let (yaw, pitch) = stats.camera_angles_degrees();
                ui.label(format!("Position: {}", format_vec3(stats.camera.position)));
                ui.label(format!("Yaw: {:.1}°", yaw));
                ui.label(format!("Pitch: {:.1}°", pitch));
                ui.label(format!("FOV: {:.1}°", stats.camera.fov_degrees));
            });

            ui.separator();

            ui.collapsing("Scene", |ui| {
                ui.label(format!("Spheres: {}", stats.sphere_count));
                ui.label(format!("Sky: {}", stats.sky_label));
                ui.label(format!("Resolution: {}x{}", stats.resolution.0, stats.resolution.1));
            });

            ui.separator();

            ui.collapsing("Controls", |ui| {
                egui::Grid::new("controls_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (input, action) in CONTROLS {
                            ui.label(egui::RichText::new(*input).monospace());
                            ui.label(*action);
                            ui.end_row();
                        }
                    });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn stats(yaw: f32, pitch: f32) -> HudStats {
        HudStats {
            fps: 60.0,
            camera: CameraState::new(yaw, pitch, 60.0, Vec3::ZERO),
            sphere_count: 3,
            sky_label: "checker",
            resolution: (800, 600),
        }
    }

    #[test]
    fn test_camera_angles_degrees() {
        let (yaw, pitch) = stats(PI / 2.0, -PI / 4.0).camera_angles_degrees();
        assert!((yaw - 90.0).abs() < 1e-3);
        assert!((pitch + 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_yaw_wraps() {
        let (yaw, _) = stats(2.0 * PI + PI / 2.0, 0.0).camera_angles_degrees();
        assert!((yaw - 90.0).abs() < 1e-2);

        let (yaw, _) = stats(-PI / 2.0 - 4.0 * PI, 0.0).camera_angles_degrees();
        assert!((yaw + 90.0).abs() < 1e-2);
    }

    #[test]
    fn test_format_vec3() {
        assert_eq!(format_vec3(Vec3::new(1.0, -0.5, 2.25)), "(1.00, -0.50, 2.25)");
    }
}
