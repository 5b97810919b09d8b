pub mod euler;

use serde::{Serialize, Deserialize};
use crate::runge_kutta::RungeKuttaOrder;
use self::euler::{Conserved, Primitive, GAMMA_LAW_INDEX};




/// Regularization added in quadrature to radii in orbital-frequency
/// denominators. Distinct from the gravitational softening length, which
/// is half the local disk height.
static SOFTENING_REGULARIZATION: f64 = 1e-12;




/**
 * Enum for the cardinal grid axes
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    X,
    Y,
}

impl Direction {
    /// 1.0 if this direction is the other one, else 0.0. Used to place the
    /// pressure term on the right component of a flux vector.
    pub fn along(self, other: Direction) -> f64 {
        if self == other { 1.0 } else { 0.0 }
    }
}




/**
 * Enum for any of the supported equations of state
 */
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquationOfState {
    GammaLaw,
    Isothermal { sound_speed_squared: f64 },
    LocallyIsothermal { mach_number_squared: f64 },
}




/**
 * How a point mass exchanges momentum with the gas it swallows
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkModel {

    /// Mass is removed carrying its own specific momentum, so the gas
    /// velocity field is unchanged by accretion.
    AccelerationFree,

    /// Mass is removed carrying only the radial part of its velocity in
    /// the frame of the mass, so accretion exerts no torque.
    TorqueFree,

    /// Mass is removed with no momentum at all.
    ForceFree,

    /// The mass is inert: no sink and no gravity.
    Inactive,
}




/**
 * A gravitating point mass, frozen over one sub-stage
 */
#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointMass {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
    pub rate: f64,
    pub model: SinkModel,
}




/**
 * Enum for a driven wave-damping region near the outer domain edge
 */
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferZone {
    None,
    Keplerian {
        surface_density: f64,
        surface_pressure: f64,
        central_mass: f64,
        driving_rate: f64,
        outer_radius: f64,
        onset_width: f64,
    },
}

impl Default for BufferZone {
    fn default() -> Self {
        BufferZone::None
    }
}




/**
 * Physics configuration: the equation of state, the embedded point
 * masses, and the driving and dissipation terms, plus the scheme knobs
 * that belong to them
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Physics {

    /// Equation of state providing the sound speed
    pub eos: EquationOfState,

    /// Outer wave-damping region
    #[serde(default)]
    pub buffer: BufferZone,

    /// Gravitating (and possibly accreting) point masses
    #[serde(default)]
    pub point_masses: Vec<PointMass>,

    /// Shakura-Sunyaev alpha viscosity parameter: [0.0, 1.0]
    #[serde(default)]
    pub alpha: f64,

    /// Coefficient of the optically thin cooling term
    #[serde(default)]
    pub cooling_coefficient: f64,

    /// Cap on each velocity component magnitude
    #[serde(default = "Physics::default_velocity_ceiling")]
    pub velocity_ceiling: f64,

    /// Smallest admissible mass density
    #[serde(default = "Physics::default_floor")]
    pub density_floor: f64,

    /// Smallest admissible gas pressure
    #[serde(default = "Physics::default_floor")]
    pub pressure_floor: f64,

    /// Time step size as a fraction of the smallest zone crossing time:
    /// [0.0, 0.7]
    pub cfl_number: f64,

    /// Runge-Kutta order: [rk1 | rk2 | rk3]
    pub runge_kutta_order: RungeKuttaOrder,
}




// ============================================================================
impl Physics {

    fn default_velocity_ceiling() -> f64 {
        1e16
    }

    fn default_floor() -> f64 {
        1e-10
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cfl_number <= 0.0 || self.cfl_number > 0.7 {
            anyhow::bail!("cfl_number must be in the range (0.0, 0.7]")
        }
        if self.alpha < 0.0 || self.alpha > 1.0 {
            anyhow::bail!("alpha must be in the range [0.0, 1.0]")
        }
        if self.cooling_coefficient < 0.0 {
            anyhow::bail!("cooling_coefficient must not be negative")
        }
        if self.density_floor <= 0.0 || self.pressure_floor <= 0.0 {
            anyhow::bail!("density_floor and pressure_floor must be positive")
        }
        if self.velocity_ceiling <= 0.0 {
            anyhow::bail!("velocity_ceiling must be positive")
        }
        for mass in &self.point_masses {
            if mass.mass < 0.0 || mass.rate < 0.0 {
                anyhow::bail!("point masses must have non-negative mass and sink rate")
            }
        }
        if let BufferZone::Keplerian { outer_radius, onset_width, .. } = self.buffer {
            if onset_width <= 0.0 || onset_width >= outer_radius {
                anyhow::bail!("buffer onset_width must be in the range (0.0, outer_radius)")
            }
        }
        Ok(())
    }
}




// ============================================================================
impl EquationOfState {

    /**
     * Sound speed squared at a zone center. The locally isothermal variant
     * derives it from the Newtonian potential of the mass list and so
     * depends on position, not on the gas pressure.
     */
    pub fn sound_speed_squared(&self, primitive: &Primitive, x: f64, y: f64, masses: &[PointMass]) -> f64 {
        match self {
            EquationOfState::GammaLaw => {
                primitive.sound_speed_squared()
            }
            EquationOfState::Isothermal { sound_speed_squared } => {
                *sound_speed_squared
            }
            EquationOfState::LocallyIsothermal { mach_number_squared } => {
                -gravitational_potential(masses, x, y) / mach_number_squared
            }
        }
    }
}




// ============================================================================
impl PointMass {

    /// Sink kernel: flat near the mass, truncated at four softening
    /// lengths.
    fn sink_rate(&self, r: f64, sink_radius: f64) -> f64 {
        if r < 4.0 * sink_radius {
            self.rate * f64::exp(-(r / sink_radius).powi(4))
        } else {
            0.0
        }
    }

    /**
     * The change in conserved quantities due to this mass over a time dt,
     * at a zone with the given primitives and center position. The
     * softening and sink length scale is half the local disk height.
     */
    pub fn source_term(&self, primitive: &Primitive, x: f64, y: f64, scale_height: f64, dt: f64) -> Conserved {
        let dx = x - self.x;
        let dy = y - self.y;
        let r2 = dx * dx + dy * dy;
        let r = r2.sqrt();
        let rs = 0.5 * scale_height;

        let d = primitive.mass_density();
        let vx = primitive.velocity_x();
        let vy = primitive.velocity_y();

        // Softened gravitational force per unit area. The direction vector
        // keeps the bare radius; only the magnitude is softened.
        let fx = -d * self.mass * dx / ((r2 + rs * rs) * r);
        let fy = -d * self.mass * dy / ((r2 + rs * rs) * r);

        let mdot = -d * self.sink_rate(r, rs);
        let specific_energy = primitive.gas_pressure() / ((GAMMA_LAW_INDEX - 1.0) * d);

        match self.model {
            SinkModel::AccelerationFree => Conserved(
                mdot,
                mdot * vx + fx,
                mdot * vy + fy,
                mdot * (specific_energy + 0.5 * (vx * vx + vy * vy)) + fx * vx + fy * vy,
            ) * dt,
            SinkModel::TorqueFree => {
                // Project the gas velocity, in the frame of the mass, onto
                // the radial direction, so the removed material carries no
                // angular momentum about the mass.
                let rhatx = dx / r;
                let rhaty = dy / r;
                let dv_dot_rhat = (vx - self.vx) * rhatx + (vy - self.vy) * rhaty;
                let vstarx = dv_dot_rhat * rhatx + self.vx;
                let vstary = dv_dot_rhat * rhaty + self.vy;
                Conserved(
                    mdot,
                    mdot * vstarx + fx,
                    mdot * vstary + fy,
                    mdot * (specific_energy + 0.5 * (vstarx * vstarx + vstary * vstary)) + fx * vx + fy * vy,
                ) * dt
            }
            SinkModel::ForceFree => Conserved(
                mdot,
                fx,
                fy,
                fx * vx + fy * vy,
            ) * dt,
            SinkModel::Inactive => Conserved::zeros(),
        }
    }
}




/**
 * Softened Newtonian potential of the mass list. Inactive masses still
 * contribute here; the potential only feeds the locally isothermal sound
 * speed, not the force.
 */
pub fn gravitational_potential(masses: &[PointMass], x: f64, y: f64) -> f64 {
    masses
        .iter()
        .map(|mass| {
            let dx = x - mass.x;
            let dy = y - mass.y;
            let r2 = dx * dx + dy * dy;
            -mass.mass / (r2 + SOFTENING_REGULARIZATION).sqrt()
        })
        .sum()
}




/**
 * Local disk scale height: the isothermal sound speed estimate
 * sqrt(p / rho) over the Keplerian orbital frequency of the combined mass
 * list.
 */
pub fn disk_scale_height(masses: &[PointMass], x: f64, y: f64, primitive: &Primitive) -> f64 {
    let omega2: f64 = masses
        .iter()
        .map(|mass| {
            let dx = x - mass.x;
            let dy = y - mass.y;
            let r2 = dx * dx + dy * dy + SOFTENING_REGULARIZATION;
            mass.mass / (r2 * r2.sqrt())
        })
        .sum();
    (primitive.gas_pressure() / primitive.mass_density()).sqrt() / omega2.sqrt()
}




// ============================================================================
impl BufferZone {

    /**
     * The change in conserved quantities over dt from relaxation toward
     * the reference ring state. Zones inside the onset radius are left
     * alone; outside it the relaxation rate grows linearly with radius.
     * The cutoff is a hard step, and the max(r, 1) factor is part of the
     * scheme as it stands.
     */
    pub fn source_term(&self, conserved: Conserved, x: f64, y: f64, dt: f64) -> Conserved {
        match self {
            BufferZone::None => Conserved::zeros(),
            BufferZone::Keplerian {
                surface_density,
                surface_pressure,
                central_mass,
                driving_rate,
                outer_radius,
                onset_width,
            } => {
                let rc = (x * x + y * y).sqrt();
                let onset_radius = outer_radius - onset_width;

                if rc > onset_radius {
                    let vp = (central_mass / rc).sqrt();
                    let vx = -vp * y / rc;
                    let vy = vp * x / rc;
                    let energy = surface_pressure / (GAMMA_LAW_INDEX - 1.0) + 0.5 * surface_density * vp * vp;
                    let u0 = Conserved(
                        *surface_density,
                        surface_density * vx,
                        surface_density * vy,
                        energy,
                    );
                    let omega_outer = (central_mass / onset_radius.powi(3)).sqrt();
                    let rate = driving_rate * omega_outer * rc.max(1.0);
                    (u0 - conserved) * (rate * dt)
                } else {
                    Conserved::zeros()
                }
            }
        }
    }
}




/**
 * Closed-form update of the internal energy under optically thin cooling
 * de/dt = -C e^4 / rho^2 over a time dt: positivity preserving and stable
 * for any non-negative dt. Returns the resulting change in total energy.
 */
pub fn cooling_source_term(primitive: &Primitive, coefficient: f64, dt: f64) -> Conserved {
    let d = primitive.mass_density();
    let e0 = primitive.specific_internal_energy();
    let e1 = e0 * (1.0 + 3.0 * coefficient * dt * e0.powi(3) / (d * d)).powf(-1.0 / 3.0);
    Conserved(0.0, 0.0, 0.0, d * (e1 - e0))
}
