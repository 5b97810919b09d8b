use std::f64::consts::PI;
use serde::{Serialize, Deserialize};
use crate::physics::euler::{Primitive, GAMMA_LAW_INDEX};
use crate::traits::InitialModel;




/**
 * A smooth isentropic vortex centered on the origin, superposed on a
 * uniform advection velocity. The classic smooth-flow accuracy benchmark:
 * the exact solution is the initial state translated by the advection
 * velocity, so it measures the convergence order of the scheme directly.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsentropicVortex {

    /// Circulation strength of the vortex
    pub strength: f64,

    /// Uniform background velocity
    pub advection_velocity: [f64; 2],
}




// ============================================================================
impl InitialModel for IsentropicVortex {

    fn validate(&self) -> anyhow::Result<()> {
        let core_deficit = (GAMMA_LAW_INDEX - 1.0) * self.strength * self.strength
            / (8.0 * GAMMA_LAW_INDEX * PI * PI) * f64::exp(1.0);
        if core_deficit >= 1.0 {
            anyhow::bail!("vortex strength would evacuate the core (temperature goes negative)")
        }
        Ok(())
    }

    fn primitive_at(&self, coordinate: (f64, f64)) -> Primitive {
        let (x, y) = coordinate;
        let r2 = x * x + y * y;
        let b = self.strength;

        let rotation = b / (2.0 * PI) * f64::exp(0.5 * (1.0 - r2));
        let temperature = 1.0
            - (GAMMA_LAW_INDEX - 1.0) * b * b / (8.0 * GAMMA_LAW_INDEX * PI * PI)
                * f64::exp(1.0 - r2);
        let density = temperature.powf(1.0 / (GAMMA_LAW_INDEX - 1.0));

        Primitive::new(
            density,
            self.advection_velocity[0] - y * rotation,
            self.advection_velocity[1] + x * rotation,
            density * temperature,
        )
    }
}
