pub static DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
pub static VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));


use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::Path;
use serde::{Serialize, Deserialize};


use crate::driver::BoundaryCondition;
use crate::io;
use crate::mesh::Mesh;
use crate::models::{
    IsentropicVortex,
    KeplerianDisk,
    ShockTube,
    Uniform,
};
use crate::physics::Physics;
use crate::physics::euler::Primitive;
use crate::solver::ExecutionMode;
use crate::state::State;
use crate::tasks::Tasks;
use crate::traits::InitialModel;




// ============================================================================
#[derive(thiserror::Error, Debug)]
pub enum Error {

    #[error("{0}")]
    IO(#[from] std::io::Error),

    #[error("{0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    AppIO(#[from] io::Error),

    #[error("unknown input file type '{0}'")]
    UnknownInputType(String),
}




/**
 * Model choice
 */
#[derive(Clone, Serialize, Deserialize, derive_more::From)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub enum AnyModel {
    Uniform(Uniform),
    ShockTube(ShockTube),
    IsentropicVortex(IsentropicVortex),
    KeplerianDisk(KeplerianDisk),
}




/**
 * Simulation control: how long to run for, how frequently to perform side
 * effects, and where to run
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Control {

    /// The simulation end time
    pub final_time: f64,

    /// The time between writing checkpoint files
    pub checkpoint_interval: f64,

    /// The number of iterations between performing side-effects
    #[serde(default = "Control::default_fold")]
    pub fold: usize,

    /// Which execution backend runs the zone updates
    pub execution_mode: ExecutionMode,

    /// How the guard zones are populated between sub-stages
    pub boundary_condition: BoundaryCondition,

    /// Number of worker threads for the thread-parallel backend. If
    /// omitted or nil, defaults to the number of physical cores.
    pub num_threads: Option<usize>,

    /// The directory where data files are written. If omitted or nil,
    /// defaults to the current directory.
    #[serde(default = "Control::default_output_directory")]
    pub output_directory: String,
}




/**
 * User configuration
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    pub physics: Physics,
    pub model: AnyModel,
    pub mesh: Mesh,
    pub control: Control,
}




/**
 * App state
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct App {
    pub state: State,
    pub tasks: Tasks,
    pub config: Configuration,
    pub version: String,
}




// ============================================================================
impl InitialModel for AnyModel {

    fn validate(&self) -> anyhow::Result<()> {
        match self {
            AnyModel::Uniform(m)          => m.validate(),
            AnyModel::ShockTube(m)        => m.validate(),
            AnyModel::IsentropicVortex(m) => m.validate(),
            AnyModel::KeplerianDisk(m)    => m.validate(),
        }
    }

    fn primitive_at(&self, coordinate: (f64, f64)) -> Primitive {
        match self {
            AnyModel::Uniform(m)          => m.primitive_at(coordinate),
            AnyModel::ShockTube(m)        => m.primitive_at(coordinate),
            AnyModel::IsentropicVortex(m) => m.primitive_at(coordinate),
            AnyModel::KeplerianDisk(m)    => m.primitive_at(coordinate),
        }
    }
}




// ============================================================================
impl Control {

    pub fn num_threads(&self) -> usize {
        match self.num_threads {
            Some(n) => n,
            None => num_cpus::get_physical(),
        }
    }

    fn default_fold() -> usize {
        10
    }

    fn default_output_directory() -> String {
        ".".into()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.num_threads() == 0 || self.num_threads() >= 1024 {
            anyhow::bail!("num_threads must be > 0 and < 1024")
        }
        if self.final_time < 0.0 {
            anyhow::bail!("final_time must not be negative")
        }
        if self.checkpoint_interval <= 0.0 {
            anyhow::bail!("checkpoint_interval must be positive")
        }
        if self.fold == 0 {
            anyhow::bail!("fold must be at least 1")
        }
        Ok(())
    }
}




// ============================================================================
impl Configuration {

    pub fn validate(&self) -> anyhow::Result<()> {
        self.physics.validate()?;
        self.model.validate()?;
        self.mesh.validate()?;
        self.control.validate()?;
        Ok(())
    }
}




// ============================================================================
impl App {

    /**
     * Return self as a result, which will be in an error state if any of
     * the configuration items did not pass validation.
     */
    pub fn validate(self) -> anyhow::Result<Self> {
        self.config.validate()?;
        Ok(self)
    }

    /**
     * Construct a new App instance from a user configuration.
     */
    pub fn from_config(config: Configuration) -> Self {
        let state = State::from_model(&config.model, &config.mesh);
        let tasks = Tasks::new();
        Self {
            state,
            tasks,
            config,
            version: VERSION.to_string(),
        }
    }

    /**
     * Construct a new App instance from a file: may be a config.yaml or a
     * chkpt.0000.cbor.
     */
    pub fn from_file(filename: &str) -> Result<Self, Error> {
        match Path::new(filename).extension().and_then(OsStr::to_str) {
            Some("yaml") => Ok(Self::from_config(serde_yaml::from_str(&read_to_string(filename)?)?)),
            Some("cbor") => Ok(io::read_cbor::<Self>(filename)?),
            _ => Err(Error::UnknownInputType(filename.to_string())),
        }
    }

    /**
     * Construct a new App instance from a preset (hard-coded)
     * configuration name, or otherwise an input file if no matching preset
     * is found.
     */
    pub fn from_preset_or_file(input: &str) -> Result<Self, Error> {
        for (key, yaml) in Self::presets() {
            if input == key {
                return Ok(Self::from_config(serde_yaml::from_str(yaml)?));
            }
        }
        Self::from_file(input)
    }

    pub fn presets() -> Vec<(&'static str, &'static str)> {
        vec![
            ("sod", include_str!("setups/sod.yaml")),
            ("isentropic_vortex", include_str!("setups/isentropic_vortex.yaml")),
            ("keplerian_disk", include_str!("setups/keplerian_disk.yaml")),
        ]
    }
}
