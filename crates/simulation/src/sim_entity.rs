use crate::error::FloodError;

/// Update half of the shared grid/entity contract.
///
/// `step_update` runs once per discrete round with a strictly increasing round
/// number. `continuous_update` runs every frame with elapsed seconds and is
/// free to do nothing. Drawing lives next to the renderer.
pub trait SimEntity {
    fn step_update(&mut self, round: u64) -> Result<(), FloodError>;

    fn continuous_update(&mut self, t: f32);
}
