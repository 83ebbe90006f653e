use imgui::{Condition, StyleColor, StyleVar, WindowFlags};

const MARGIN: f32 = 20.0;
const PADDING: f32 = 15.0;
const ROUNDING: f32 = 8.0;
const BACKGROUND_ALPHA: f32 = 0.7;
/// Scales the 14 px base font to roughly 24 px.
const SCORE_FONT_SCALE: f32 = 1.7;
const HEADING_COLOR: [f32; 4] = [1.0, 170.0 / 255.0, 0.0, 1.0];

pub const INSTRUCTION_HEADING: &str = "Controls:";
/// Shown as bullet points.
pub const INSTRUCTION_LINES: [&str; 5] = [
    "O - Toggle orbit camera",
    "Arrow Keys - Move ball",
    "W/S - Adjust shot power",
    "SPACE - Shoot ball",
    "R - Reset ball",
];

pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

fn panel_flags() -> WindowFlags {
    WindowFlags::NO_DECORATION
        | WindowFlags::NO_MOVE
        | WindowFlags::ALWAYS_AUTO_RESIZE
        | WindowFlags::NO_SAVED_SETTINGS
        | WindowFlags::NO_FOCUS_ON_APPEARING
        | WindowFlags::NO_NAV
        | WindowFlags::NO_INPUTS
}

/// Draws the score and instruction panels. Both are fixed to the window corners
/// and never take mouse input, so they don't block the orbit controls.
pub fn draw(ui: &imgui::Ui, score: u32) {
    let display_size = ui.io().display_size;

    let _padding = ui.push_style_var(StyleVar::WindowPadding([PADDING, PADDING]));
    let _rounding = ui.push_style_var(StyleVar::WindowRounding(ROUNDING));
    let _border = ui.push_style_var(StyleVar::WindowBorderSize(0.0));
    let _background = ui.push_style_color(StyleColor::WindowBg, [0.0, 0.0, 0.0, 1.0]);
    let _text = ui.push_style_color(StyleColor::Text, [1.0, 1.0, 1.0, 1.0]);

    ui.window("Score")
        .position([MARGIN, MARGIN], Condition::Always)
        .bg_alpha(BACKGROUND_ALPHA)
        .flags(panel_flags())
        .build(|| {
            ui.set_window_font_scale(SCORE_FONT_SCALE);
            ui.text(score_text(score));
        });

    ui.window("Controls")
        .position([MARGIN, display_size[1] - MARGIN], Condition::Always)
        .position_pivot([0.0, 1.0])
        .bg_alpha(BACKGROUND_ALPHA)
        .flags(panel_flags())
        .build(|| {
            ui.text_colored(HEADING_COLOR, INSTRUCTION_HEADING);
            for line in INSTRUCTION_LINES {
                ui.bullet_text(line);
            }
        });
}
