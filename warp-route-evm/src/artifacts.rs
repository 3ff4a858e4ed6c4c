//! Router creation bytecode loaded from compiler artifacts.
//!
//! The artifacts directory holds one `<ContractName>.json` per router
//! contract (`HypERC20.json`, `HypNative.json`, ...). Both Hardhat
//! (`"bytecode": "0x..."`) and Foundry (`"bytecode": {"object": "0x..."}`)
//! layouts are accepted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolValue;
use serde::Deserialize;
use warp_route::router::{ConstructorArgs, RouterKind};

use crate::error::ArtifactError;

#[derive(Deserialize)]
struct Artifact {
    bytecode: Bytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Bytecode {
    Hardhat(Bytes),
    Foundry { object: Bytes },
}

impl From<Bytecode> for Bytes {
    fn from(value: Bytecode) -> Self {
        match value {
            Bytecode::Hardhat(bytes) | Bytecode::Foundry { object: bytes } => bytes,
        }
    }
}

/// Extracts the creation bytecode from artifact JSON.
///
/// # Errors
///
/// Returns the JSON error if the document matches neither layout.
pub fn parse_bytecode(json: &str) -> Result<Bytes, serde_json::Error> {
    let artifact: Artifact = serde_json::from_str(json)?;
    Ok(artifact.bytecode.into())
}

/// Creation code for a deployment: bytecode followed by the ABI-encoded
/// constructor arguments.
#[must_use]
pub fn creation_code(bytecode: &Bytes, constructor: &ConstructorArgs) -> Bytes {
    let args = match constructor {
        ConstructorArgs::Empty => Vec::new(),
        ConstructorArgs::WrappedToken(token) => (*token,).abi_encode_params(),
        ConstructorArgs::Decimals(decimals) => (U256::from(*decimals),).abi_encode_params(),
    };
    let mut code = Vec::with_capacity(bytecode.len() + args.len());
    code.extend_from_slice(bytecode);
    code.extend_from_slice(&args);
    code.into()
}

/// Lazily loaded, cached router artifacts.
#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
    cache: Arc<Mutex<HashMap<RouterKind, Bytes>>>,
}

impl Artifacts {
    /// Artifacts read from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Arc::default(),
        }
    }

    /// Directory the artifacts are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creation bytecode of `kind`, without constructor arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] if the file is missing, malformed or empty.
    pub fn bytecode(&self, kind: RouterKind) -> Result<Bytes, ArtifactError> {
        if let Some(bytes) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
        {
            return Ok(bytes.clone());
        }

        let path = self.dir.join(format!("{}.json", kind.contract_name()));
        let json = std::fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        let bytes = parse_bytecode(&json).map_err(|source| ArtifactError::Json {
            path: path.clone(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(ArtifactError::EmptyBytecode(path));
        }
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, bytes.clone());
        Ok(bytes)
    }
}
