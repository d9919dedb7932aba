//! Resolves contract names to compiled Hardhat artifacts.
//!
//! Hardhat writes one JSON file per contract to
//! `<root>/<source path>/<ContractName>.json` next to a `.dbg.json` file and
//! keeps the full compiler output in `<root>/build-info`. A contract can be
//! referred to either by its bare name, which must be unique across all
//! sources, or by its fully qualified name `<source path>:<ContractName>`.

use {
    alloy_json_abi::JsonAbi,
    alloy_primitives::{Bytes, hex},
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
};

/// Directory with the full compiler output, never contains contract
/// artifacts.
const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("artifact for contract {name:?} not found")]
    NotFound { name: String },
    #[error(
        "there are multiple artifacts for contract {name:?}, use one of these fully qualified \
         names instead: {}",
        .candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("contract {name:?} is abstract and can't be deployed")]
    Abstract { name: String },
    #[error("contract {name:?} needs to be linked against libraries: {}", .libraries.join(", "))]
    UnlinkedLibraries {
        name: String,
        libraries: Vec<String>,
    },
    #[error("invalid bytecode in artifact {path:?}")]
    Bytecode {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed artifact {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contract artifact as written by the Hardhat compiler task.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    source_name: String,
    abi: JsonAbi,
    bytecode: String,
    #[serde(default)]
    link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// A compiled contract that can be deployed without further preparation.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    /// Creation code of the contract.
    pub bytecode: Bytes,
    /// Number of arguments the constructor expects.
    pub constructor_inputs: usize,
}

impl Artifact {
    /// Fully qualified name of the contract, e.g.
    /// `contracts/AccountManager.sol:AccountManager`.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Reads the artifact at `path` and checks that it is neither abstract
    /// nor waiting for libraries to be linked.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let raw: RawArtifact = serde_json::from_slice(&contents).map_err(|source| Error::Json {
            path: path.to_owned(),
            source,
        })?;
        Self::try_from_raw(raw, path)
    }

    fn try_from_raw(raw: RawArtifact, path: &Path) -> Result<Self, Error> {
        let name = raw.contract_name;
        if !raw.link_references.is_empty() {
            let libraries = raw
                .link_references
                .iter()
                .flat_map(|(source, libraries)| {
                    libraries.keys().map(move |library| format!("{source}:{library}"))
                })
                .collect();
            return Err(Error::UnlinkedLibraries { name, libraries });
        }

        let bytecode = hex::decode(raw.bytecode.trim()).map_err(|source| Error::Bytecode {
            path: path.to_owned(),
            source,
        })?;
        if bytecode.is_empty() {
            return Err(Error::Abstract { name });
        }

        Ok(Self {
            contract_name: name,
            source_name: raw.source_name,
            bytecode: bytecode.into(),
            constructor_inputs: raw
                .abi
                .constructor
                .map(|constructor| constructor.inputs.len())
                .unwrap_or_default(),
        })
    }
}

/// Artifact directory of a compiled project.
#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the artifact for a bare or fully qualified contract name.
    pub fn find(&self, name: &str) -> Result<Artifact, Error> {
        let path = match name.rsplit_once(':') {
            Some((source, contract)) => {
                let path = self.root.join(source).join(format!("{contract}.json"));
                if !path.is_file() {
                    return Err(Error::NotFound { name: name.into() });
                }
                path
            }
            None => self.find_by_bare_name(name)?,
        };
        tracing::debug!(?path, name, "resolved artifact");
        Artifact::load(&path)
    }

    fn find_by_bare_name(&self, name: &str) -> Result<PathBuf, Error> {
        let file_name = format!("{name}.json");
        let mut matches = Vec::new();
        collect(&self.root, &file_name, &mut matches)?;
        matches.sort();

        match matches.len() {
            0 => Err(Error::NotFound { name: name.into() }),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::Ambiguous {
                name: name.into(),
                candidates: matches
                    .iter()
                    .map(|path| self.fully_qualified_name(path, name))
                    .collect(),
            }),
        }
    }

    fn fully_qualified_name(&self, path: &Path, name: &str) -> String {
        let source = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.root).ok())
            .unwrap_or(Path::new(""));
        format!("{}:{name}", source.display())
    }
}

/// Recursively collects all files named `file_name` below `dir`.
fn collect(dir: &Path, file_name: &str, matches: &mut Vec<PathBuf>) -> Result<(), Error> {
    let io_err = |source| Error::Io {
        path: dir.to_owned(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if entry.file_type().map_err(io_err)?.is_dir() {
            if entry.file_name() != BUILD_INFO_DIR {
                collect(&path, file_name, matches)?;
            }
        } else if entry.file_name() == file_name {
            matches.push(path);
        }
    }
    Ok(())
}
