use crate::mesh::Mesh;
use crate::patch::Patch;
use crate::physics::{
    cooling_source_term,
    disk_scale_height,
    BufferZone,
    Direction,
    EquationOfState,
    PointMass,
};
use crate::physics::euler::{riemann_hlle, Conserved, Primitive};
use crate::piecewise_linear::plm_gradient4;




static PLM_THETA: f64 = 1.5;




/**
 * Everything one Runge-Kutta sub-stage needs to update a single zone.
 * The small records are held by value and the arrays by shared reference,
 * so the whole struct is copied into each task's frame; the kernel itself
 * is a pure function of the struct and a zone index, with no knowledge of
 * iteration order or memory layout.
 */
#[derive(Clone, Copy)]
pub(crate) struct ZoneUpdate<'a> {
    pub mesh: Mesh,
    pub conserved_rk: &'a Patch,
    pub primitive_rd: &'a Patch,
    pub eos: EquationOfState,
    pub buffer: BufferZone,
    pub masses: &'a [PointMass],
    pub alpha: f64,
    pub rk_weight: f64,
    pub dt: f64,
    pub velocity_ceiling: f64,
    pub cooling_coefficient: f64,
    pub density_floor: f64,
    pub pressure_floor: f64,
}




/// Velocity shear components of the rate-of-strain tensor, built from the
/// limited gradients at one zone. The gradients are undivided differences,
/// so the zone spacings convert them to true derivatives here.
struct ShearStrain {
    xx: f64,
    yy: f64,
    xy: f64,
}

impl ShearStrain {
    fn new(gx: &Primitive, gy: &Primitive, dx: f64, dy: f64) -> Self {
        Self {
            xx: 4.0 / 3.0 * gx.velocity_x() / dx - 2.0 / 3.0 * gy.velocity_y() / dy,
            yy: -2.0 / 3.0 * gx.velocity_x() / dx + 4.0 / 3.0 * gy.velocity_y() / dy,
            xy: gx.velocity_y() / dx + gy.velocity_x() / dy,
        }
    }
}




// ============================================================================
impl ZoneUpdate<'_> {

    fn gradient(&self, a: &Primitive, b: &Primitive, c: &Primitive) -> Primitive {
        Primitive::from(plm_gradient4(PLM_THETA, &a.as_array(), &b.as_array(), &c.as_array()))
    }

    fn sound_speed_squared(&self, primitive: &Primitive, i: i32, j: i32) -> f64 {
        let (x, y) = self.mesh.cell_coordinates(i, j);
        self.eos.sound_speed_squared(primitive, x, y, self.masses)
    }

    /**
     * Advance the zone at (i, j) through one sub-stage and return its new
     * primitive state. Reads a 13-point stencil of the input primitives
     * (the axis cross out to two zones, plus the diagonal neighbors when
     * shear stresses are on), the anchor conserved state at the zone, and
     * nothing else.
     */
    pub(crate) fn zone(&self, i: i32, j: i32) -> Primitive {
        let mesh = self.mesh;
        let (dx, dy) = (mesh.dx, mesh.dy);
        let (xc, yc) = mesh.cell_coordinates(i, j);
        let prd = self.primitive_rd;

        let pcc = Primitive::from(prd.get(i, j));
        let pli = Primitive::from(prd.get(i - 1, j));
        let pri = Primitive::from(prd.get(i + 1, j));
        let plj = Primitive::from(prd.get(i, j - 1));
        let prj = Primitive::from(prd.get(i, j + 1));
        let pki = Primitive::from(prd.get(i - 2, j));
        let pti = Primitive::from(prd.get(i + 2, j));
        let pkj = Primitive::from(prd.get(i, j - 2));
        let ptj = Primitive::from(prd.get(i, j + 2));

        // Axial gradients at the zone and at each of its edge neighbors
        let gxcc = self.gradient(&pli, &pcc, &pri);
        let gycc = self.gradient(&plj, &pcc, &prj);
        let gxli = self.gradient(&pki, &pli, &pcc);
        let gxri = self.gradient(&pcc, &pri, &pti);
        let gylj = self.gradient(&pkj, &plj, &pcc);
        let gyrj = self.gradient(&pcc, &prj, &ptj);

        // Face-reconstructed states: (m)inus and (p)lus sides of the four
        // faces around the zone
        let plim = pli + gxli * 0.5;
        let plip = pcc - gxcc * 0.5;
        let prim = pcc + gxcc * 0.5;
        let prip = pri - gxri * 0.5;
        let pljm = plj + gylj * 0.5;
        let pljp = pcc - gycc * 0.5;
        let prjm = pcc + gycc * 0.5;
        let prjp = prj - gyrj * 0.5;

        // Both x faces of this zone share a single sound speed, computed
        // from the left neighbor's primitives, and both y faces use the
        // lower neighbor's. A zone's right face therefore sees a different
        // wavespeed bound than the same geometric face does when the zone
        // on its far side is updated, so strict flux telescoping holds
        // only where the sound-speed field is uniform. Upwind bias or
        // oversight; preserved exactly, not repaired.
        let cs2i = self.sound_speed_squared(&pli, i - 1, j);
        let cs2j = self.sound_speed_squared(&plj, i, j - 1);

        let mut fli = riemann_hlle(&plim, &plip, cs2i, Direction::X);
        let mut fri = riemann_hlle(&prim, &prip, cs2i, Direction::X);
        let mut flj = riemann_hlle(&pljm, &pljp, cs2j, Direction::Y);
        let mut frj = riemann_hlle(&prjm, &prjp, cs2j, Direction::Y);

        // The alpha prescription needs a local orbital frequency, so the
        // scale height (and with it the shear stress and the sink radius)
        // is only defined when at least one point mass is present.
        let scale_height = if self.masses.is_empty() {
            0.0
        } else {
            disk_scale_height(self.masses, xc, yc, &pcc)
        };

        if self.alpha > 0.0 && !self.masses.is_empty() {
            let plilj = Primitive::from(prd.get(i - 1, j - 1));
            let plirj = Primitive::from(prd.get(i - 1, j + 1));
            let prilj = Primitive::from(prd.get(i + 1, j - 1));
            let prirj = Primitive::from(prd.get(i + 1, j + 1));

            // Transverse gradients at the edge neighbors, for the
            // cross-derivative terms of the strain
            let gyli = self.gradient(&plilj, &pli, &plirj);
            let gyri = self.gradient(&prilj, &pri, &prirj);
            let gxlj = self.gradient(&plilj, &plj, &prilj);
            let gxrj = self.gradient(&plirj, &prj, &prirj);

            let scc = ShearStrain::new(&gxcc, &gycc, dx, dy);
            let sli = ShearStrain::new(&gxli, &gyli, dx, dy);
            let sri = ShearStrain::new(&gxri, &gyri, dx, dy);
            let slj = ShearStrain::new(&gxlj, &gylj, dx, dy);
            let srj = ShearStrain::new(&gxrj, &gyrj, dx, dy);

            // Warning: the kinematic viscosity is evaluated at the zone
            // center and reused on all four faces.
            let cs2cc = self.eos.sound_speed_squared(&pcc, xc, yc, self.masses);
            let nu = self.alpha * scale_height * cs2cc.sqrt();
            let dcc = pcc.mass_density();

            let txx_li = 0.5 * nu * (pli.mass_density() * sli.xx + dcc * scc.xx);
            let txy_li = 0.5 * nu * (pli.mass_density() * sli.xy + dcc * scc.xy);
            let txx_ri = 0.5 * nu * (pri.mass_density() * sri.xx + dcc * scc.xx);
            let txy_ri = 0.5 * nu * (pri.mass_density() * sri.xy + dcc * scc.xy);
            let txy_lj = 0.5 * nu * (plj.mass_density() * slj.xy + dcc * scc.xy);
            let tyy_lj = 0.5 * nu * (plj.mass_density() * slj.yy + dcc * scc.yy);
            let txy_rj = 0.5 * nu * (prj.mass_density() * srj.xy + dcc * scc.xy);
            let tyy_rj = 0.5 * nu * (prj.mass_density() * srj.yy + dcc * scc.yy);

            // Stresses subtract from the momentum and energy components of
            // the advective flux; the energy flux carries v dot tau with
            // the velocity of the cell beyond each face.
            fli = fli - Conserved::new(0.0, txx_li, txy_li, pli.velocity_x() * txx_li + pli.velocity_y() * txy_li);
            fri = fri - Conserved::new(0.0, txx_ri, txy_ri, pri.velocity_x() * txx_ri + pri.velocity_y() * txy_ri);
            flj = flj - Conserved::new(0.0, txy_lj, tyy_lj, plj.velocity_x() * txy_lj + plj.velocity_y() * tyy_lj);
            frj = frj - Conserved::new(0.0, txy_rj, tyy_rj, prj.velocity_x() * txy_rj + prj.velocity_y() * tyy_rj);
        }

        let mut u = pcc.to_conserved();

        u = u + self.buffer.source_term(u, xc, yc, self.dt);
        for mass in self.masses {
            u = u + mass.source_term(&pcc, xc, yc, scale_height, self.dt);
        }
        if self.cooling_coefficient > 0.0 {
            u = u + cooling_source_term(&pcc, self.cooling_coefficient, self.dt);
        }

        u = u - ((fri - fli) * (self.dt / dx) + (frj - flj) * (self.dt / dy));

        // Convex combination with the anchor state saved at the start of
        // the full step
        let u0 = Conserved::from(self.conserved_rk.get(i, j));
        let u = u * (1.0 - self.rk_weight) + u0 * self.rk_weight;

        u.to_primitive(self.velocity_ceiling, self.density_floor, self.pressure_floor)
    }
}
