mod uniform;
mod shock_tube;
mod isentropic_vortex;
mod keplerian_disk;

pub use uniform::Uniform;
pub use shock_tube::ShockTube;
pub use isentropic_vortex::IsentropicVortex;
pub use keplerian_disk::KeplerianDisk;
