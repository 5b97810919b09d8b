use serde::{Serialize, Deserialize};
use num::rational::Rational64;
use crate::mesh::Mesh;
use crate::patch::Patch;
use crate::physics::euler::NCONS;
use crate::traits::InitialModel;




/**
 * The complete solution state: everything a checkpoint needs to resume a
 * run bit-for-bit (together with the configuration that produced it)
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct State {

    /// Simulation time
    pub time: f64,

    /// Number of completed time steps
    pub iteration: Rational64,

    /// Primitive fields, interior plus two guard layers
    pub primitive: Patch,
}




// ============================================================================
impl State {

    /**
     * Sample an initial model at every zone center, guard zones included,
     * so the first sub-stage starts from fully populated arrays no matter
     * the boundary condition.
     */
    pub fn from_model<M: InitialModel>(model: &M, mesh: &Mesh) -> Self {
        let mut data = Vec::with_capacity(((mesh.ni + 4) * (mesh.nj + 4)) as usize * NCONS);
        for i in -2..mesh.ni + 2 {
            for j in -2..mesh.nj + 2 {
                let (x, y) = mesh.cell_coordinates(i, j);
                data.extend_from_slice(&model.primitive_at((x, y)).as_array());
            }
        }
        Self {
            time: 0.0,
            iteration: Rational64::from_integer(0),
            primitive: Patch::from_vec([-2, -2], [mesh.ni() + 4, mesh.nj() + 4], NCONS, data),
        }
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Uniform;

    #[test]
    fn sampling_covers_guards_and_interior() {
        let model = Uniform {
            density: 2.0,
            pressure: 0.5,
            velocity: [0.1, -0.1],
        };
        let mesh = Mesh::centered_square(1.0, 8);
        let state = State::from_model(&model, &mesh);
        assert_eq!(state.primitive.get(-2, -2), &[2.0, 0.1, -0.1, 0.5]);
        assert_eq!(state.primitive.get(7, 9), &[2.0, 0.1, -0.1, 0.5]);
        assert_eq!(state.iteration, Rational64::from_integer(0));
    }
}
