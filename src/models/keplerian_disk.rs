use serde::{Serialize, Deserialize};
use crate::physics::euler::Primitive;
use crate::traits::InitialModel;




/**
 * A uniform-density disk in centrifugal balance around a central point
 * mass, with the rotation profile softened inside a small core radius
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeplerianDisk {
    pub surface_density: f64,
    pub surface_pressure: f64,
    pub central_mass: f64,
    pub softening_length: f64,
}




// ============================================================================
impl InitialModel for KeplerianDisk {

    fn validate(&self) -> anyhow::Result<()> {
        if self.surface_density <= 0.0 || self.surface_pressure <= 0.0 {
            anyhow::bail!("disk must have positive surface density and pressure")
        }
        if self.central_mass <= 0.0 {
            anyhow::bail!("disk requires a positive central mass")
        }
        if self.softening_length <= 0.0 {
            anyhow::bail!("softening_length must be positive")
        }
        Ok(())
    }

    fn primitive_at(&self, coordinate: (f64, f64)) -> Primitive {
        let (x, y) = coordinate;
        let rs = self.softening_length;
        let r_soft = (x * x + y * y + rs * rs).sqrt();

        // Orbital speed sqrt(M / r), rolled over smoothly to zero at the
        // center; the direction is counterclockwise.
        let vp = (self.central_mass / r_soft).sqrt();

        Primitive::new(
            self.surface_density,
            -vp * y / r_soft,
            vp * x / r_soft,
            self.surface_pressure,
        )
    }
}
