use {
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    anyhow::{Context, Result, anyhow, bail, ensure},
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
};

/// Compiler output for a single contract in the Hardhat artifact format.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    /// Hex encoded creation code. May contain library placeholders when the
    /// contract links against external libraries.
    #[serde(default)]
    pub bytecode: String,
    #[serde(default)]
    pub link_references: BTreeMap<String, serde_json::Value>,
}

impl Artifact {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid contract artifact")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read artifact {path:?}"))?;
        Self::from_json(&json).with_context(|| format!("failed to parse artifact {path:?}"))
    }

    /// The code sent in the contract creation transaction.
    pub fn creation_code(&self) -> Result<Bytes> {
        let name = &self.contract_name;
        ensure!(
            self.link_references.is_empty(),
            "{name} must be linked against libraries, which is not supported"
        );
        let code = alloy::primitives::hex::decode(&self.bytecode)
            .with_context(|| format!("{name} has malformed bytecode"))?;
        ensure!(
            !code.is_empty(),
            "{name} has no bytecode, it is probably abstract or an interface"
        );
        if let Some(constructor) = &self.abi.constructor {
            ensure!(
                constructor.inputs.is_empty(),
                "{name} expects {} constructor arguments",
                constructor.inputs.len()
            );
        }
        Ok(code.into())
    }
}

/// Directory of compiled artifacts, searched by contract name.
///
/// Both a flat layout (`<dir>/<Name>.json`) and the Hardhat layout
/// (`<dir>/contracts/<File>.sol/<Name>.json`) are supported.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn get(&self, name: &str) -> Result<Artifact> {
        let path = self.find(name)?;
        tracing::debug!(%name, ?path, "found contract artifact");
        let artifact = Artifact::from_file(&path)?;
        ensure!(
            artifact.contract_name == name,
            "artifact {path:?} contains {} instead of {name}",
            artifact.contract_name
        );
        Ok(artifact)
    }

    fn find(&self, name: &str) -> Result<PathBuf> {
        ensure!(
            self.dir.is_dir(),
            "artifact directory {:?} does not exist",
            self.dir
        );

        let flat = self.dir.join(format!("{name}.json"));
        if flat.is_file() {
            return Ok(flat);
        }

        let mut found = Vec::new();
        collect(&self.dir, name, &mut found)?;
        match found.len() {
            0 => Err(anyhow!(
                "no artifact for contract {name} in {:?}",
                self.dir
            )),
            1 => Ok(found.remove(0)),
            _ => bail!("contract name {name} is ambiguous: {found:?}"),
        }
    }
}

/// Recursively collects `<Name>.json` files that live in a directory whose
/// name ends in `.sol`.
fn collect(dir: &Path, name: &str, found: &mut Vec<PathBuf>) -> Result<()> {
    let file_name = format!("{name}.json");
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {dir:?}"))? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let candidate = path.join(&file_name);
        if path.extension().is_some_and(|ext| ext == "sol") && candidate.is_file() {
            found.push(candidate);
        }
        collect(&path, name, found)?;
    }
    Ok(())
}
