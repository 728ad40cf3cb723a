//! In-memory build environment.
//!
//! `MemoryEnv` implements [`BuildEnv`] over plain maps: construction
//! variables are string lists, builds are recorded instead of executed.
//! Forks share one recorder, so a test can declare targets through the
//! pipeline and then inspect every builder invocation, dependency edge,
//! and alias the pipeline produced, including those made on discarded
//! clones.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use girder_core::{ParamValue, PlatformBit};

use crate::env::{BuildEnv, BuildNode, BuilderKind};

/// A record of one builder invocation, with the list variables as they
/// stood at build time.
#[derive(Debug, Clone)]
pub struct BuildRecord {
    /// The produced node.
    pub node: BuildNode,
    /// Source list passed to the builder.
    pub srcs: Vec<String>,
    /// Snapshot of the list-valued variables at invocation time.
    pub vars: BTreeMap<String, Vec<String>>,
}

/// Everything the environment observed, shared across forks.
#[derive(Debug, Default)]
pub struct BuildLog {
    /// Builder invocations in order.
    pub builds: Vec<BuildRecord>,
    /// Signing invocations: (source path, target name).
    pub signings: Vec<(String, String)>,
    /// Dependency registrations: (target, deps).
    pub dependencies: Vec<(String, Vec<String>)>,
    /// Alias registrations: (alias, node name).
    pub aliases: Vec<(String, String)>,
    /// Repository mounts: (mount point, source dir).
    pub repositories: Vec<(String, String)>,
}

impl BuildLog {
    /// Find the latest build record for a target name.
    pub fn record_for(&self, name: &str) -> Option<&BuildRecord> {
        self.builds.iter().rev().find(|r| r.node.name == name)
    }
}

/// An in-memory [`BuildEnv`] for tests and dry runs.
#[derive(Debug, Clone)]
pub struct MemoryEnv {
    bits: HashSet<PlatformBit>,
    supported: HashSet<BuilderKind>,
    lists: BTreeMap<String, Vec<String>>,
    scalars: BTreeMap<String, ParamValue>,
    out_dir: String,
    log: Rc<RefCell<BuildLog>>,
}

impl MemoryEnv {
    /// An environment with the given platform bits and every builder kind
    /// supported.
    pub fn new(bits: &[PlatformBit]) -> Self {
        let mut scalars = BTreeMap::new();
        scalars.insert("OBJSUFFIX".to_string(), ParamValue::from(".o"));
        scalars.insert("SHOBJSUFFIX".to_string(), ParamValue::from(".os"));
        MemoryEnv {
            bits: bits.iter().copied().collect(),
            supported: [
                BuilderKind::Program,
                BuilderKind::TestProgram,
                BuilderKind::Library,
                BuilderKind::SharedLibrary,
                BuilderKind::Object,
                BuilderKind::Installer,
            ]
            .into_iter()
            .collect(),
            lists: BTreeMap::new(),
            scalars,
            out_dir: "out".to_string(),
            log: Rc::new(RefCell::new(BuildLog::default())),
        }
    }

    /// A 32-bit Linux environment.
    pub fn linux() -> Self {
        MemoryEnv::new(&[PlatformBit::Linux, PlatformBit::Posix])
    }

    /// A Linux environment on a 64-bit host, eligible for dual-arch builds.
    pub fn linux64() -> Self {
        MemoryEnv::new(&[
            PlatformBit::Linux,
            PlatformBit::Posix,
            PlatformBit::Arch64Bit,
        ])
    }

    /// A Mac environment.
    pub fn mac() -> Self {
        MemoryEnv::new(&[PlatformBit::Mac, PlatformBit::Posix])
    }

    /// A Windows environment.
    pub fn windows() -> Self {
        MemoryEnv::new(&[PlatformBit::Windows])
    }

    /// Add a platform bit.
    pub fn with_bit(mut self, bit: PlatformBit) -> Self {
        self.bits.insert(bit);
        self
    }

    /// Withdraw support for a builder kind, making declarations of that
    /// kind skip.
    pub fn without_kind(mut self, kind: BuilderKind) -> Self {
        self.supported.remove(&kind);
        self
    }

    /// Inspect everything recorded so far.
    pub fn log(&self) -> std::cell::Ref<'_, BuildLog> {
        self.log.borrow()
    }

    fn artifact_suffix(&self, kind: BuilderKind) -> String {
        match kind {
            BuilderKind::Program | BuilderKind::TestProgram => String::new(),
            BuilderKind::Library => ".a".to_string(),
            BuilderKind::SharedLibrary => ".so".to_string(),
            BuilderKind::Object => self
                .get_str("OBJSUFFIX")
                .unwrap_or_else(|| ".o".to_string()),
            BuilderKind::Installer => ".msi".to_string(),
        }
    }
}

impl BuildEnv for MemoryEnv {
    fn fork(&self) -> Self {
        // Variable state is copied; the recorder is shared.
        self.clone()
    }

    fn bit(&self, bit: PlatformBit) -> bool {
        self.bits.contains(&bit)
    }

    fn append(&mut self, var: &str, values: &[String]) {
        self.lists
            .entry(var.to_string())
            .or_default()
            .extend(values.iter().cloned());
    }

    fn prepend(&mut self, var: &str, values: &[String]) {
        let list = self.lists.entry(var.to_string()).or_default();
        list.splice(0..0, values.iter().cloned());
    }

    fn replace(&mut self, var: &str, value: ParamValue) {
        match value {
            ParamValue::List(items) => {
                self.lists.insert(var.to_string(), items);
            }
            other => {
                self.scalars.insert(var.to_string(), other);
            }
        }
    }

    fn get_list(&self, var: &str) -> Vec<String> {
        self.lists.get(var).cloned().unwrap_or_default()
    }

    fn get_str(&self, var: &str) -> Option<String> {
        self.scalars
            .get(var)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    fn filter_out(&mut self, var: &str, values: &[String]) {
        if let Some(list) = self.lists.get_mut(var) {
            list.retain(|item| !values.contains(item));
        }
    }

    fn depends(&mut self, target: &str, deps: &[String]) {
        self.log
            .borrow_mut()
            .dependencies
            .push((target.to_string(), deps.to_vec()));
    }

    fn alias(&mut self, alias: &str, node: &BuildNode) {
        self.log
            .borrow_mut()
            .aliases
            .push((alias.to_string(), node.name.clone()));
    }

    fn supports(&self, kind: BuilderKind) -> bool {
        self.supported.contains(&kind)
    }

    fn build(&mut self, kind: BuilderKind, name: &str, srcs: &[String]) -> BuildNode {
        let node = BuildNode {
            name: name.to_string(),
            path: format!("{}/{}{}", self.out_dir, name, self.artifact_suffix(kind)),
            kind,
        };
        self.log.borrow_mut().builds.push(BuildRecord {
            node: node.clone(),
            srcs: srcs.to_vec(),
            vars: self.lists.clone(),
        });
        node
    }

    fn sign(&mut self, source: &BuildNode, target: &str) -> BuildNode {
        self.log
            .borrow_mut()
            .signings
            .push((source.path.clone(), target.to_string()));
        BuildNode {
            name: target.to_string(),
            path: format!("{}/{}", self.out_dir, target),
            kind: source.kind,
        }
    }

    fn map_repository(&mut self, at: &str, path: &str) {
        self.log
            .borrow_mut()
            .repositories
            .push((at.to_string(), path.to_string()));
    }
}
