/*!
 * The data-parallel core of the solver: three public operations, each
 * evaluated independently at every interior zone and dispatched over one
 * of the execution backends. The per-zone mathematics lives in `kernel`;
 * this module owns iteration order and memory layout, and nothing else.
 *
 * The primitive arrays carry two guard layers which must be populated by
 * the caller before any operation here is invoked; the conserved and
 * wavespeed arrays cover the interior only. Within one sub-stage the
 * primitive input and output must be distinct buffers.
 */

mod kernel;

#[cfg(feature = "gpu")]
pub mod device;

use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use crate::mesh::Mesh;
use crate::patch::Patch;
use crate::physics::{BufferZone, EquationOfState, PointMass};
use crate::physics::euler::Primitive;
use self::kernel::ZoneUpdate;




/**
 * Enum for the available execution backends. All backends produce the
 * same result; a backend not compiled into the build makes the dispatch
 * a no-op.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Serial,
    ThreadParallel,
    DeviceParallel,
}




/**
 * Run a zone task over the interior index space, writing one zone's
 * fields into the target patch per task. The task sees only a zone index
 * and an output slice; everything about iteration, partitioning, and
 * strides stays here.
 */
fn for_each_zone<F>(mesh: &Mesh, target: &mut Patch, mode: ExecutionMode, task: F)
where
    F: Fn(i32, i32, &mut [f64]) + Send + Sync,
{
    let start = target.start();
    let count = target.count();
    let num_fields = target.num_fields();
    let row_len = count[1] as usize * num_fields;
    let (ni, nj) = (mesh.ni, mesh.nj);

    let visit_row = |i: i32, row: &mut [f64]| {
        if i < 0 || i >= ni {
            return;
        }
        for j in 0..nj {
            let m = ((j - start[1]) as usize) * num_fields;
            task(i, j, &mut row[m..m + num_fields]);
        }
    };

    match mode {
        ExecutionMode::Serial => {
            for (r, row) in target.data_mut().chunks_mut(row_len).enumerate() {
                visit_row(start[0] + r as i32, row);
            }
        }
        ExecutionMode::ThreadParallel => {
            target
                .data_mut()
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(r, row)| visit_row(start[0] + r as i32, row));
        }
        ExecutionMode::DeviceParallel => {
            #[cfg(feature = "gpu")]
            device::launch([ni, nj], |i, j| {
                task(i, j, target.get_mut(i, j));
            });
        }
    }
}




/**
 * Convert the interior of a guarded primitive array to conserved
 * densities.
 */
pub fn primitive_to_conserved(
    mesh: &Mesh,
    primitive: &Patch,
    conserved: &mut Patch,
    mode: ExecutionMode,
) {
    for_each_zone(mesh, conserved, mode, |i, j, out| {
        Primitive::from(primitive.get(i, j)).to_conserved().write_to_slice(out)
    })
}




/**
 * Advance every interior zone through one Runge-Kutta sub-stage: PLM
 * reconstruction, HLLE fluxes, shear stresses (skipped on the fast path
 * when alpha is zero), buffer, point-mass, and cooling sources, the flux
 * divergence, and the convex combination with the anchor state, writing
 * floored primitives into `primitive_wr`.
 */
#[allow(clippy::too_many_arguments)]
pub fn advance_rk(
    mesh: &Mesh,
    conserved_rk: &Patch,
    primitive_rd: &Patch,
    primitive_wr: &mut Patch,
    eos: EquationOfState,
    buffer: BufferZone,
    masses: &[PointMass],
    alpha: f64,
    rk_weight: f64,
    dt: f64,
    velocity_ceiling: f64,
    cooling_coefficient: f64,
    density_floor: f64,
    pressure_floor: f64,
    mode: ExecutionMode,
) {
    let update = ZoneUpdate {
        mesh: *mesh,
        conserved_rk,
        primitive_rd,
        eos,
        buffer,
        masses,
        alpha,
        rk_weight,
        dt,
        velocity_ceiling,
        cooling_coefficient,
        density_floor,
        pressure_floor,
    };
    for_each_zone(mesh, primitive_wr, mode, |i, j, out| {
        update.zone(i, j).write_to_slice(out)
    })
}




/**
 * Write the largest absolute signal speed of each interior zone, over
 * both axes, into a one-field array. The caller reduces this to a
 * patch-wide maximum for its time step choice.
 */
pub fn wavespeed(
    mesh: &Mesh,
    primitive: &Patch,
    wavespeed: &mut Patch,
    eos: EquationOfState,
    masses: &[PointMass],
    mode: ExecutionMode,
) {
    for_each_zone(mesh, wavespeed, mode, |i, j, out| {
        let p = Primitive::from(primitive.get(i, j));
        let (x, y) = mesh.cell_coordinates(i, j);
        let cs2 = eos.sound_speed_squared(&p, x, y, masses);
        out[0] = p.max_signal_speed(cs2);
    })
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::physics::euler::GAMMA_LAW_INDEX;

    const GUARD: i32 = 2;

    fn uniform_primitive(mesh: &Mesh, state: [f64; 4]) -> Patch {
        let mut data = Vec::new();
        for _ in 0..(mesh.ni + 2 * GUARD) * (mesh.nj + 2 * GUARD) {
            data.extend_from_slice(&state);
        }
        Patch::from_vec(
            [-GUARD, -GUARD],
            [mesh.ni() + 2 * GUARD as u32, mesh.nj() + 2 * GUARD as u32],
            4,
            data,
        )
    }

    fn advance_once(mesh: &Mesh, primitive: &Patch, alpha: f64, mode: ExecutionMode) -> Patch {
        let mut conserved = Patch::zeros([0, 0], mesh.shape(), 4);
        let mut output = Patch::zeros(primitive.start(), [mesh.ni() + 4, mesh.nj() + 4], 4);
        primitive_to_conserved(mesh, primitive, &mut conserved, mode);
        advance_rk(
            mesh,
            &conserved,
            primitive,
            &mut output,
            EquationOfState::GammaLaw,
            BufferZone::None,
            &[],
            alpha,
            0.0,
            1e-3,
            1e16,
            0.0,
            1e-10,
            1e-10,
            mode,
        );
        output
    }

    #[test]
    fn uniform_state_is_a_fixed_point() {
        let mesh = Mesh::centered_square(1.0, 16);
        let primitive = uniform_primitive(&mesh, [1.0, 0.3, -0.4, 1.0]);
        let output = advance_once(&mesh, &primitive, 0.0, ExecutionMode::Serial);
        for i in 0..mesh.ni {
            for j in 0..mesh.nj {
                for (a, b) in primitive.get(i, j).iter().zip(output.get(i, j)) {
                    assert_relative_eq!(*a, *b, max_relative = 1e-14);
                }
            }
        }
    }

    #[test]
    fn uniform_state_is_a_fixed_point_with_viscosity_on() {
        let mesh = Mesh::centered_square(1.0, 16);
        let primitive = uniform_primitive(&mesh, [1.0, 0.3, -0.4, 1.0]);
        let output = advance_once(&mesh, &primitive, 0.1, ExecutionMode::Serial);
        for i in 0..mesh.ni {
            for j in 0..mesh.nj {
                for (a, b) in primitive.get(i, j).iter().zip(output.get(i, j)) {
                    assert_relative_eq!(*a, *b, max_relative = 1e-14);
                }
            }
        }
    }

    #[test]
    fn serial_and_thread_parallel_agree_bitwise() {
        let mesh = Mesh::centered_square(1.0, 32);
        let mut primitive = uniform_primitive(&mesh, [1.0, 0.0, 0.0, 1.0]);
        for i in -GUARD..mesh.ni + GUARD {
            for j in -GUARD..mesh.nj + GUARD {
                let (x, y) = mesh.cell_coordinates(i, j);
                let p = primitive.get_mut(i, j);
                p[0] = 1.0 + 0.2 * (-(x * x + y * y)).exp();
                p[1] = 0.1 * y;
                p[2] = -0.1 * x;
            }
        }
        let serial = advance_once(&mesh, &primitive, 0.0, ExecutionMode::Serial);
        let threaded = advance_once(&mesh, &primitive, 0.0, ExecutionMode::ThreadParallel);
        assert_eq!(serial.data(), threaded.data());
    }

    #[test]
    fn rk_weight_one_returns_the_anchor_state() {
        let mesh = Mesh::centered_square(1.0, 8);
        let primitive = uniform_primitive(&mesh, [2.0, 0.5, 0.0, 1.0]);
        let mut conserved = Patch::zeros([0, 0], mesh.shape(), 4);
        let mut output = Patch::zeros([-2, -2], [mesh.ni() + 4, mesh.nj() + 4], 4);
        primitive_to_conserved(&mesh, &primitive, &mut conserved, ExecutionMode::Serial);
        advance_rk(
            &mesh,
            &conserved,
            &primitive,
            &mut output,
            EquationOfState::GammaLaw,
            BufferZone::None,
            &[],
            0.0,
            1.0,
            1e-3,
            1e16,
            0.0,
            1e-10,
            1e-10,
            ExecutionMode::Serial,
        );
        for i in 0..mesh.ni {
            for j in 0..mesh.nj {
                for (a, b) in primitive.get(i, j).iter().zip(output.get(i, j)) {
                    assert_relative_eq!(*a, *b, max_relative = 1e-14);
                }
            }
        }
    }

    #[test]
    fn wavespeed_of_a_uniform_state_is_uniform_and_correct() {
        let mesh = Mesh::centered_square(1.0, 16);
        let primitive = uniform_primitive(&mesh, [1.0, 0.3, -0.4, 1.0]);
        let mut speeds = Patch::zeros([0, 0], mesh.shape(), 1);
        wavespeed(
            &mesh,
            &primitive,
            &mut speeds,
            EquationOfState::GammaLaw,
            &[],
            ExecutionMode::Serial,
        );
        let expected = 0.4 + GAMMA_LAW_INDEX.sqrt();
        for a in speeds.data() {
            assert_relative_eq!(*a, expected, max_relative = 1e-15);
        }
    }

    #[test]
    fn point_mass_update_stays_finite_near_the_singularity() {
        use crate::physics::{PointMass, SinkModel};

        let mesh = Mesh::centered_square(1.0, 16);
        let primitive = uniform_primitive(&mesh, [1.0, 0.0, 0.0, 0.01]);
        let mut conserved = Patch::zeros([0, 0], mesh.shape(), 4);
        let mut output = Patch::zeros([-2, -2], [mesh.ni() + 4, mesh.nj() + 4], 4);
        primitive_to_conserved(&mesh, &primitive, &mut conserved, ExecutionMode::Serial);

        // Park the mass a hair away from a zone center
        let (x, y) = mesh.cell_coordinates(8, 8);
        let masses = [PointMass {
            x: x + 1e-9,
            y,
            vx: 0.0,
            vy: 0.0,
            mass: 1.0,
            rate: 1.0,
            model: SinkModel::TorqueFree,
        }];
        advance_rk(
            &mesh,
            &conserved,
            &primitive,
            &mut output,
            EquationOfState::GammaLaw,
            BufferZone::None,
            &masses,
            0.0,
            0.0,
            1e-6,
            1e16,
            0.0,
            1e-10,
            1e-10,
            ExecutionMode::Serial,
        );
        for i in 0..mesh.ni {
            for j in 0..mesh.nj {
                for q in output.get(i, j) {
                    assert!(q.is_finite());
                }
            }
        }
    }

    #[cfg(feature = "gpu")]
    #[test]
    fn device_parallel_matches_serial() {
        let mesh = Mesh::centered_square(1.0, 20);
        let mut primitive = uniform_primitive(&mesh, [1.0, 0.0, 0.0, 1.0]);
        for i in -GUARD..mesh.ni + GUARD {
            for j in -GUARD..mesh.nj + GUARD {
                let (x, y) = mesh.cell_coordinates(i, j);
                primitive.get_mut(i, j)[0] = 1.0 + 0.1 * (x + y).sin();
            }
        }
        let serial = advance_once(&mesh, &primitive, 0.0, ExecutionMode::Serial);
        let device = advance_once(&mesh, &primitive, 0.0, ExecutionMode::DeviceParallel);
        assert_eq!(serial.data(), device.data());
    }
}
