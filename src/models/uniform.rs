use serde::{Serialize, Deserialize};
use crate::physics::euler::Primitive;
use crate::traits::InitialModel;




/**
 * A spatially uniform gas, mostly useful for testing
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Uniform {
    pub density: f64,
    pub pressure: f64,
    pub velocity: [f64; 2],
}




// ============================================================================
impl InitialModel for Uniform {

    fn validate(&self) -> anyhow::Result<()> {
        if self.density <= 0.0 || self.pressure <= 0.0 {
            anyhow::bail!("uniform model requires positive density and pressure")
        }
        Ok(())
    }

    fn primitive_at(&self, _coordinate: (f64, f64)) -> Primitive {
        Primitive::new(self.density, self.velocity[0], self.velocity[1], self.pressure)
    }
}
