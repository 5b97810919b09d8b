use crate::physics::euler::Primitive;




/**
 * A hydrodynamic initial condition, sampled analytically at zone centers
 */
pub trait InitialModel: Clone {

    /// Check the model parameters for physical admissibility.
    fn validate(&self) -> anyhow::Result<()>;

    /// The primitive state at a point in the domain.
    fn primitive_at(&self, coordinate: (f64, f64)) -> Primitive;
}
