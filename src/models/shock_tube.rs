use serde::{Serialize, Deserialize};
use crate::physics::euler::Primitive;
use crate::traits::InitialModel;




/**
 * Two gas states at rest, separated by a membrane at x = 0
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShockTube {
    pub left_density: f64,
    pub left_pressure: f64,
    pub right_density: f64,
    pub right_pressure: f64,
}




// ============================================================================
impl InitialModel for ShockTube {

    fn validate(&self) -> anyhow::Result<()> {
        for q in [self.left_density, self.left_pressure, self.right_density, self.right_pressure].iter() {
            if *q <= 0.0 {
                anyhow::bail!("shock tube states must have positive density and pressure")
            }
        }
        Ok(())
    }

    fn primitive_at(&self, coordinate: (f64, f64)) -> Primitive {
        let (x, _) = coordinate;
        if x < 0.0 {
            Primitive::new(self.left_density, 0.0, 0.0, self.left_pressure)
        } else {
            Primitive::new(self.right_density, 0.0, 0.0, self.right_pressure)
        }
    }
}
