/*!
 * Advects a smooth isentropic vortex once around a periodic domain and
 * measures the L1 density error against the exact solution (which is the
 * initial condition again, since the displacement equals the domain
 * length on both axes). This checks the second-order accuracy of the
 * reconstruction on smooth flow; a first-order scheme fails the bound by
 * an order of magnitude at this resolution.
 */

use barracuda::driver::{BoundaryCondition, Solver};
use barracuda::mesh::Mesh;
use barracuda::models::IsentropicVortex;
use barracuda::physics::{BufferZone, EquationOfState, Physics};
use barracuda::runge_kutta::RungeKuttaOrder;
use barracuda::solver::ExecutionMode;
use barracuda::state::State;
use barracuda::traits::InitialModel;




#[test]
fn vortex_advection_is_second_order_accurate() {
    let model = IsentropicVortex {
        strength: 1.0,
        advection_velocity: [1.0, 1.0],
    };
    let physics = Physics {
        eos: EquationOfState::GammaLaw,
        buffer: BufferZone::None,
        point_masses: vec![],
        alpha: 0.0,
        cooling_coefficient: 0.0,
        velocity_ceiling: 1e16,
        density_floor: 1e-10,
        pressure_floor: 1e-10,
        cfl_number: 0.4,
        runge_kutta_order: RungeKuttaOrder::RK2,
    };
    let mesh = Mesh::centered_square(5.0, 64);
    let state = State::from_model(&model, &mesh);
    let mut solver = Solver::new(
        mesh,
        physics,
        BoundaryCondition::Periodic,
        ExecutionMode::Serial,
        state,
    );

    let final_time = 10.0;
    while solver.time() < final_time {
        let dt = solver.time_step().min(final_time - solver.time());
        solver.advance(dt);
    }

    let mut l1 = 0.0;
    for i in 0..mesh.ni {
        for j in 0..mesh.nj {
            let (x, y) = mesh.cell_coordinates(i, j);
            let exact = model.primitive_at((x, y)).mass_density();
            l1 += (solver.primitive().get(i, j)[0] - exact).abs();
        }
    }
    l1 /= mesh.num_total_zones() as f64;
    assert!(l1 < 2e-3, "L1 density error {} exceeds the bound", l1);
}
