use serde::{Serialize, Deserialize};




/**
 * A uniform rectangular patch of zones in the x-y plane. Two layers of
 * guard zones surround the interior; guard values are supplied by the
 * driver, so the mesh itself only describes the interior extent.
 */
#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "MeshForm", into = "MeshForm")]
pub struct Mesh {

    /// Number of zones on the i-axis
    pub ni: i32,

    /// Number of zones on the j-axis
    pub nj: i32,

    /// Left edge of the domain
    pub x0: f64,

    /// Bottom edge of the domain
    pub y0: f64,

    /// Zone spacing on the i-axis
    pub dx: f64,

    /// Zone spacing on the j-axis
    pub dy: f64,
}




/**
 * The user-facing form of the mesh: corner coordinates and zone counts
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeshForm {
    lower: [f64; 2],
    upper: [f64; 2],
    num_zones: [i32; 2],
}




// ============================================================================
impl Mesh {

    /**
     * A square mesh centered on the origin, with the given number of zones
     * on each side.
     */
    pub fn centered_square(domain_radius: f64, resolution: u32) -> Self {
        Self {
            ni: resolution as i32,
            nj: resolution as i32,
            x0: -domain_radius,
            y0: -domain_radius,
            dx: 2.0 * domain_radius / resolution as f64,
            dy: 2.0 * domain_radius / resolution as f64,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ni < 1 || self.nj < 1 {
            anyhow::bail!("mesh must have at least one zone per axis")
        }
        if self.dx <= 0.0 || self.dy <= 0.0 {
            anyhow::bail!("mesh zone spacing must be positive")
        }
        Ok(())
    }

    pub fn ni(&self) -> u32 {
        self.ni as u32
    }

    pub fn nj(&self) -> u32 {
        self.nj as u32
    }

    /// Total number of interior zones.
    pub fn num_total_zones(&self) -> usize {
        (self.ni * self.nj) as usize
    }

    /// Interior zone counts on each axis.
    pub fn shape(&self) -> [u32; 2] {
        [self.ni as u32, self.nj as u32]
    }

    /// The smaller of the two zone spacings, for time step estimates.
    pub fn smallest_spacing(&self) -> f64 {
        self.dx.min(self.dy)
    }

    /**
     * The zone-center [x, y] coordinate at a given index. Out-of-bounds
     * indexes are allowed; guard zone centers extrapolate the spacing.
     */
    pub fn cell_coordinates(&self, i: i32, j: i32) -> (f64, f64) {
        let x = self.x0 + (i as f64 + 0.5) * self.dx;
        let y = self.y0 + (j as f64 + 0.5) * self.dy;
        (x, y)
    }
}




// ============================================================================
impl From<MeshForm> for Mesh {
    fn from(form: MeshForm) -> Self {
        Self {
            ni: form.num_zones[0],
            nj: form.num_zones[1],
            x0: form.lower[0],
            y0: form.lower[1],
            dx: (form.upper[0] - form.lower[0]) / form.num_zones[0] as f64,
            dy: (form.upper[1] - form.lower[1]) / form.num_zones[1] as f64,
        }
    }
}

impl From<Mesh> for MeshForm {
    fn from(mesh: Mesh) -> Self {
        Self {
            lower: [mesh.x0, mesh.y0],
            upper: [mesh.x0 + mesh.ni as f64 * mesh.dx, mesh.y0 + mesh.nj as f64 * mesh.dy],
            num_zones: [mesh.ni, mesh.nj],
        }
    }
}
