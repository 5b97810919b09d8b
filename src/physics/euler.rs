use std::ops::{Add, Sub, Mul, Div};
use crate::physics::Direction;




/// Adiabatic index of the gamma-law gas. A fixed property of the scheme,
/// not a configuration item.
pub const GAMMA_LAW_INDEX: f64 = 5.0 / 3.0;

/// Number of conserved fields per zone.
pub const NCONS: usize = 4;




// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conserved(pub(crate) f64, pub(crate) f64, pub(crate) f64, pub(crate) f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive(pub(crate) f64, pub(crate) f64, pub(crate) f64, pub(crate) f64);




// ============================================================================
impl Conserved {

    pub fn new(d: f64, sx: f64, sy: f64, e: f64) -> Self {
        Self(d, sx, sy, e)
    }

    pub fn zeros() -> Self {
        Self(0.0, 0.0, 0.0, 0.0)
    }

    pub fn mass_density(&self) -> f64 {
        self.0
    }

    pub fn momentum_x(&self) -> f64 {
        self.1
    }

    pub fn momentum_y(&self) -> f64 {
        self.2
    }

    pub fn energy_density(&self) -> f64 {
        self.3
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.0, self.1, self.2, self.3]
    }

    pub fn write_to_slice(&self, cons: &mut [f64]) {
        cons[0] = self.0;
        cons[1] = self.1;
        cons[2] = self.2;
        cons[3] = self.3;
    }

    /**
     * Recover the primitive state, repairing inadmissible input as it
     * goes: the density and pressure are floored and the velocity
     * magnitude is capped on each axis. The pressure is recomputed from
     * the kinetic energy of the *clamped* velocities, which makes the
     * round trip through `Primitive::to_conserved` idempotent on any
     * admissible state. There is no error path.
     */
    pub fn to_primitive(&self, velocity_ceiling: f64, density_floor: f64, pressure_floor: f64) -> Primitive {
        let d = self.0.max(density_floor);
        let vx = f64::copysign((self.1.abs() / d).min(velocity_ceiling), self.1);
        let vy = f64::copysign((self.2.abs() / d).min(velocity_ceiling), self.2);
        let p = ((self.3 - 0.5 * d * (vx * vx + vy * vy)) * (GAMMA_LAW_INDEX - 1.0)).max(pressure_floor);
        Primitive(d, vx, vy, p)
    }
}




// ============================================================================
impl Primitive {

    pub fn new(d: f64, vx: f64, vy: f64, p: f64) -> Self {
        Self(d, vx, vy, p)
    }

    pub fn mass_density(&self) -> f64 {
        self.0
    }

    pub fn velocity_x(&self) -> f64 {
        self.1
    }

    pub fn velocity_y(&self) -> f64 {
        self.2
    }

    pub fn gas_pressure(&self) -> f64 {
        self.3
    }

    pub fn velocity(&self, direction: Direction) -> f64 {
        match direction {
            Direction::X => self.1,
            Direction::Y => self.2,
        }
    }

    pub fn velocity_squared(&self) -> f64 {
        self.1 * self.1 + self.2 * self.2
    }

    /// Gamma-law sound speed squared. Isothermal equations of state bypass
    /// this and carry their own value; see `EquationOfState`.
    pub fn sound_speed_squared(&self) -> f64 {
        GAMMA_LAW_INDEX * self.3 / self.0
    }

    pub fn specific_kinetic_energy(&self) -> f64 {
        0.5 * self.velocity_squared()
    }

    pub fn specific_internal_energy(&self) -> f64 {
        self.3 / self.0 / (GAMMA_LAW_INDEX - 1.0)
    }

    /// Fastest signal speed over both axes, given a sound speed squared.
    pub fn max_signal_speed(&self, cs2: f64) -> f64 {
        let cs = cs2.sqrt();
        f64::max(self.1.abs() + cs, self.2.abs() + cs)
    }

    /// Inner and outer acoustic wavespeeds along one axis.
    pub fn outer_wavespeeds(&self, cs2: f64, direction: Direction) -> (f64, f64) {
        let cs = cs2.sqrt();
        let vn = self.velocity(direction);
        (vn - cs, vn + cs)
    }

    pub fn to_conserved(&self) -> Conserved {
        let d = self.0;
        Conserved(
            d,
            d * self.1,
            d * self.2,
            self.3 / (GAMMA_LAW_INDEX - 1.0) + 0.5 * d * self.velocity_squared(),
        )
    }

    /// The physical flux of mass, momentum, and energy along one axis.
    pub fn flux_vector(&self, direction: Direction) -> Conserved {
        let pg = self.3;
        let vn = self.velocity(direction);
        let u = self.to_conserved();
        Conserved(
            u.0 * vn,
            u.1 * vn + pg * direction.along(Direction::X),
            u.2 * vn + pg * direction.along(Direction::Y),
            (u.3 + pg) * vn,
        )
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.0, self.1, self.2, self.3]
    }

    pub fn write_to_slice(&self, prim: &mut [f64]) {
        prim[0] = self.0;
        prim[1] = self.1;
        prim[2] = self.2;
        prim[3] = self.3;
    }
}




// ============================================================================
impl From<&[f64]> for Conserved {
    fn from(cons: &[f64]) -> Self {
        Self(cons[0], cons[1], cons[2], cons[3])
    }
}

impl From<&[f64]> for Primitive {
    fn from(prim: &[f64]) -> Self {
        Self(prim[0], prim[1], prim[2], prim[3])
    }
}

impl From<[f64; 4]> for Primitive {
    fn from(prim: [f64; 4]) -> Self {
        Self(prim[0], prim[1], prim[2], prim[3])
    }
}




// ============================================================================
impl Add<Conserved> for Conserved {
    type Output = Self;
    fn add(self, u: Self) -> Self {
        Self(self.0 + u.0, self.1 + u.1, self.2 + u.2, self.3 + u.3)
    }
}

impl Sub<Conserved> for Conserved {
    type Output = Self;
    fn sub(self, u: Self) -> Self {
        Self(self.0 - u.0, self.1 - u.1, self.2 - u.2, self.3 - u.3)
    }
}

impl Mul<f64> for Conserved {
    type Output = Self;
    fn mul(self, a: f64) -> Self {
        Self(self.0 * a, self.1 * a, self.2 * a, self.3 * a)
    }
}

impl Div<f64> for Conserved {
    type Output = Self;
    fn div(self, a: f64) -> Self {
        Self(self.0 / a, self.1 / a, self.2 / a, self.3 / a)
    }
}

impl Add<Primitive> for Primitive {
    type Output = Self;
    fn add(self, p: Self) -> Self {
        Self(self.0 + p.0, self.1 + p.1, self.2 + p.2, self.3 + p.3)
    }
}

impl Sub<Primitive> for Primitive {
    type Output = Self;
    fn sub(self, p: Self) -> Self {
        Self(self.0 - p.0, self.1 - p.1, self.2 - p.2, self.3 - p.3)
    }
}

impl Mul<f64> for Primitive {
    type Output = Self;
    fn mul(self, a: f64) -> Self {
        Self(self.0 * a, self.1 * a, self.2 * a, self.3 * a)
    }
}




/**
 * HLLE approximate Riemann flux along one axis. Both input states share
 * the given sound speed squared; the outer wavespeed bounds include zero
 * on each side, so a face that is supersonic in either direction reduces
 * to the pure upwind flux.
 */
pub fn riemann_hlle(pl: &Primitive, pr: &Primitive, cs2: f64, direction: Direction) -> Conserved {
    let ul = pl.to_conserved();
    let ur = pr.to_conserved();
    let fl = pl.flux_vector(direction);
    let fr = pr.flux_vector(direction);

    let (alm, alp) = pl.outer_wavespeeds(cs2, direction);
    let (arm, arp) = pr.outer_wavespeeds(cs2, direction);
    let ap = alp.max(arp).max(0.0);
    let am = alm.min(arm).min(0.0);

    (fl * ap - fr * am - (ul - ur) * ap * am) / (ap - am)
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CEILING: f64 = 1e8;
    const FLOOR: f64 = 1e-10;

    #[test]
    fn round_trip_is_exact_on_power_of_two_densities() {
        let p0 = Primitive(2.0, 0.75, -1.25, 4.0);
        let p1 = p0.to_conserved().to_primitive(CEILING, FLOOR, FLOOR);
        assert_eq!(p0.0, p1.0);
        assert_eq!(p0.1, p1.1);
        assert_eq!(p0.2, p1.2);
        assert_relative_eq!(p0.3, p1.3, max_relative = 1e-15);
    }

    #[test]
    fn recovery_is_idempotent() {
        let u = Conserved(0.1, -2.0, 0.3, 7.0);
        let p1 = u.to_primitive(CEILING, FLOOR, FLOOR);
        let p2 = p1.to_conserved().to_primitive(CEILING, FLOOR, FLOOR);
        assert_relative_eq!(p1.0, p2.0, max_relative = 1e-14);
        assert_relative_eq!(p1.1, p2.1, max_relative = 1e-14);
        assert_relative_eq!(p1.2, p2.2, max_relative = 1e-14);
        assert_relative_eq!(p1.3, p2.3, max_relative = 1e-14);
    }

    #[test]
    fn floors_repair_vacuum_states() {
        let u = Conserved(-1.0, 0.0, 0.0, -5.0);
        let p = u.to_primitive(CEILING, FLOOR, FLOOR);
        assert_eq!(p.mass_density(), FLOOR);
        assert_eq!(p.gas_pressure(), FLOOR);
    }

    #[test]
    fn velocity_ceiling_caps_speed_and_energy_follows() {
        let u = Conserved(1.0, 3.0, -4.0, 1e6);
        let p = u.to_primitive(2.0, FLOOR, FLOOR);
        assert_eq!(p.velocity_x(), 2.0);
        assert_eq!(p.velocity_y(), -2.0);

        // The recomputed pressure sees the kinetic energy of the clamped
        // velocities, not of the raw momenta.
        let expected = (1e6 - 0.5 * (4.0 + 4.0)) * (GAMMA_LAW_INDEX - 1.0);
        assert_relative_eq!(p.gas_pressure(), expected, max_relative = 1e-15);
    }

    #[test]
    fn hlle_of_identical_states_is_the_physical_flux() {
        let p = Primitive(1.0, 0.2, -0.1, 0.8);
        let f = p.flux_vector(Direction::X);
        let fh = riemann_hlle(&p, &p, p.sound_speed_squared(), Direction::X);
        for (a, b) in f.as_array().iter().zip(fh.as_array().iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-14);
        }
    }

    #[test]
    fn hlle_upwinds_a_supersonic_face() {
        let pl = Primitive(1.0, 2.0, 0.0, 0.01);
        let pr = Primitive(0.5, 2.0, 0.0, 0.01);
        let cs2 = 0.01;
        let f = riemann_hlle(&pl, &pr, cs2, Direction::X);
        let fl = pl.flux_vector(Direction::X);
        for (a, b) in f.as_array().iter().zip(fl.as_array().iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-14);
        }
    }

    #[test]
    fn stationary_density_jump_keeps_the_pressure_flux() {
        let pl = Primitive(1.0, 0.0, 0.0, 1.0);
        let pr = Primitive(0.125, 0.0, 0.0, 1.0);
        let f = riemann_hlle(&pl, &pr, pl.sound_speed_squared(), Direction::X);
        // Pure density jump at rest and equal pressure: the momentum flux
        // is the common gas pressure on both sides. (The mass flux is not
        // zero; HLLE diffuses the contact.)
        assert_relative_eq!(f.momentum_x(), 1.0, max_relative = 1e-12);
    }
}
