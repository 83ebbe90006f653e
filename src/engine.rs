use crate::{overlay, state::ViewerState};

/// Score shown in the overlay. Nothing in the viewer scores points.
const SCORE: u32 = 0;

pub fn update(state: &mut ViewerState, ui: &mut imgui::Ui) -> anyhow::Result<()> {
    state.update();
    state.scene.late_update();

    overlay::draw(ui, SCORE);

    Ok(())
}
