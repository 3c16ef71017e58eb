//! Checkpoint save/load via Burn's record system.
//!
//! Weights are stored as named MessagePack, the format the rest of the
//! tooling around this pipeline produces.

use std::path::Path;

use burn::module::Module;
use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder};
use crate::error::{ModelError, Result};

/// Save a model's weights to a checkpoint file.
pub fn save_weights<B, M>(model: &M, path: impl AsRef<Path>) -> Result<()>
where
    B: Backend,
    M: Module<B>,
{
    let path = path.as_ref();
    let record = model.clone().into_record();
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(record, path.to_path_buf())
        .map_err(|e| ModelError::Save(e.to_string()))?;
    Ok(())
}

/// Restore a model's weights from a checkpoint file.
///
/// # Errors
///
/// Returns [`ModelError::Unavailable`] if the file is missing or the
/// record cannot be deserialized into the model's architecture.
pub fn load_weights<B, M>(model: M, path: impl AsRef<Path>, device: &B::Device) -> Result<M>
where
    B: Backend,
    M: Module<B>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(ModelError::Unavailable(format!(
            "weights not found at {}",
            path.display()
        )));
    }

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .map_err(|e| ModelError::Unavailable(e.to_string()))?;

    Ok(model.load_record(record))
}
