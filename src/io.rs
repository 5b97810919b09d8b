use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use serde::Serialize;
use serde::de::DeserializeOwned;




// ============================================================================
#[derive(thiserror::Error, Debug)]
pub enum Error {

    #[error("{0}")]
    IO(#[from] std::io::Error),

    #[error("{0}")]
    Cbor(#[from] serde_cbor::Error),
}




// ============================================================================
pub fn write_cbor<T: Serialize>(value: &T, filename: &str) -> Result<(), Error> {
    let file = BufWriter::new(File::create(filename)?);
    serde_cbor::to_writer(file, value)?;
    Ok(())
}

pub fn read_cbor<T: DeserializeOwned>(filename: &str) -> Result<T, Error> {
    let file = BufReader::new(File::open(filename)?);
    Ok(serde_cbor::from_reader(file)?)
}

/// The name of the numbered checkpoint file in the output directory.
pub fn checkpoint_filename(output_directory: &str, count: usize) -> String {
    Path::new(output_directory)
        .join(format!("chkpt.{:04}.cbor", count))
        .to_string_lossy()
        .into_owned()
}
