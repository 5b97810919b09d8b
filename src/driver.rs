use serde::{Serialize, Deserialize};
use num::rational::Rational64;
use crate::mesh::Mesh;
use crate::patch::Patch;
use crate::physics::Physics;
use crate::physics::euler::NCONS;
use crate::solver::{self, ExecutionMode};
use crate::state::State;




/**
 * Enum for how the two guard layers of the primitive array are populated
 * between sub-stages. This is the driver's half of the solver contract:
 * the core never looks past its interior plus two guard layers, and never
 * fills them itself.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryCondition {

    /// Guard zones copy the nearest interior zone
    Outflow,

    /// Guard zones wrap around the domain
    Periodic,
}




/**
 * Owns the double-buffered primitive arrays and the Runge-Kutta anchor
 * state, and advances the solution through whole time steps by invoking
 * the solver core once per sub-stage.
 */
pub struct Solver {
    mesh: Mesh,
    physics: Physics,
    boundary: BoundaryCondition,
    mode: ExecutionMode,
    time: f64,
    iteration: Rational64,
    primitive1: Patch,
    primitive2: Patch,
    conserved0: Patch,
    wavespeed: Patch,
}




// ============================================================================
impl BoundaryCondition {

    /**
     * Populate every guard zone of a primitive patch from the interior.
     */
    pub fn apply(&self, mesh: &Mesh, patch: &mut Patch) {
        let (ni, nj) = (mesh.ni, mesh.nj);
        for i in -2..ni + 2 {
            for j in -2..nj + 2 {
                if i >= 0 && i < ni && j >= 0 && j < nj {
                    continue;
                }
                let (si, sj) = match self {
                    BoundaryCondition::Outflow => (i.max(0).min(ni - 1), j.max(0).min(nj - 1)),
                    BoundaryCondition::Periodic => (i.rem_euclid(ni), j.rem_euclid(nj)),
                };
                patch.copy_zone((si, sj), (i, j));
            }
        }
    }
}




// ============================================================================
impl Solver {

    pub fn new(
        mesh: Mesh,
        physics: Physics,
        boundary: BoundaryCondition,
        mode: ExecutionMode,
        state: State,
    ) -> Self {
        let primitive2 = Patch::zeros([-2, -2], [mesh.ni() + 4, mesh.nj() + 4], NCONS);
        let conserved0 = Patch::zeros([0, 0], mesh.shape(), NCONS);
        let wavespeed = Patch::zeros([0, 0], mesh.shape(), 1);
        Self {
            mesh,
            physics,
            boundary,
            mode,
            time: state.time,
            iteration: state.iteration,
            primitive1: state.primitive,
            primitive2,
            conserved0,
            wavespeed,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn iteration(&self) -> Rational64 {
        self.iteration
    }

    pub fn mesh(&self) -> Mesh {
        self.mesh
    }

    /// A snapshot of the persisted solution state.
    pub fn state(&self) -> State {
        State {
            time: self.time,
            iteration: self.iteration,
            primitive: self.primitive1.clone(),
        }
    }

    /// Borrow the current primitive patch (interior plus guards).
    pub fn primitive(&self) -> &Patch {
        &self.primitive1
    }

    /**
     * The largest signal speed anywhere in the interior, reduced from the
     * per-zone wavespeed array.
     */
    pub fn max_signal_speed(&mut self) -> f64 {
        solver::wavespeed(
            &self.mesh,
            &self.primitive1,
            &mut self.wavespeed,
            self.physics.eos,
            &self.physics.point_masses,
            self.mode,
        );
        self.wavespeed.data().iter().cloned().fold(0.0, f64::max)
    }

    /// The CFL-limited time step at the current solution state.
    pub fn time_step(&mut self) -> f64 {
        self.physics.cfl_number * self.mesh.smallest_spacing() / self.max_signal_speed()
    }

    /**
     * Advance the solution through one full time step: save the anchor
     * state, then run the sub-stage sequence of the configured Runge-Kutta
     * order, refreshing guard zones before each sub-stage and swapping the
     * primitive buffers after it.
     */
    pub fn advance(&mut self, dt: f64) {
        solver::primitive_to_conserved(&self.mesh, &self.primitive1, &mut self.conserved0, self.mode);

        for &rk_weight in self.physics.runge_kutta_order.weights() {
            self.boundary.apply(&self.mesh, &mut self.primitive1);
            solver::advance_rk(
                &self.mesh,
                &self.conserved0,
                &self.primitive1,
                &mut self.primitive2,
                self.physics.eos,
                self.physics.buffer,
                &self.physics.point_masses,
                self.physics.alpha,
                rk_weight,
                dt,
                self.physics.velocity_ceiling,
                self.physics.cooling_coefficient,
                self.physics.density_floor,
                self.physics.pressure_floor,
                self.mode,
            );
            std::mem::swap(&mut self.primitive1, &mut self.primitive2);
        }
        self.time += dt;
        self.iteration += Rational64::from_integer(1);
    }
}
