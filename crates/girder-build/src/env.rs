//! The build-environment capability seam.
//!
//! The pipeline never owns a real build engine; it configures and invokes
//! one through [`BuildEnv`]. Implementations wrap whatever tool actually
//! compiles things. Capabilities mirror what the pipeline needs: cloning
//! before mutation, platform-bit queries, list append/prepend/replace on
//! named construction variables, dependency and alias registration, and
//! typed builder dispatch with a support predicate instead of reflection.

use girder_core::{ActivePlatforms, ParamValue, Platform, PlatformBit};

/// The builder kinds a target declaration can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderKind {
    /// An executable.
    Program,
    /// A test executable.
    TestProgram,
    /// A static library.
    Library,
    /// A dynamic library.
    SharedLibrary,
    /// A bare object file.
    Object,
    /// An installer package.
    Installer,
}

impl BuilderKind {
    /// Library-type kinds register in the library target registry.
    pub fn is_library(self) -> bool {
        matches!(self, BuilderKind::Library | BuilderKind::SharedLibrary)
    }

    /// Kinds whose link line names other build-product libraries, and so
    /// participate in 64-bit library renaming.
    pub fn links_build_libraries(self) -> bool {
        matches!(self, BuilderKind::Program | BuilderKind::SharedLibrary)
    }
}

/// One artifact produced by a builder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildNode {
    /// Target name the artifact was built under.
    pub name: String,
    /// Output path of the artifact.
    pub path: String,
    /// The builder kind that produced it.
    pub kind: BuilderKind,
}

/// Capabilities of a concrete build environment.
pub trait BuildEnv: Sized {
    /// Clone the environment. Mutations of the fork never leak back, so
    /// sibling targets built from the same base do not interfere.
    fn fork(&self) -> Self;

    /// Query a platform/feature bit.
    fn bit(&self, bit: PlatformBit) -> bool;

    /// The active platform set, derived from the OS bits.
    fn active_platforms(&self) -> ActivePlatforms {
        let mut active = Vec::new();
        if self.bit(PlatformBit::Linux) {
            active.push(Platform::Linux);
        }
        if self.bit(PlatformBit::Mac) {
            active.push(Platform::Mac);
        }
        if self.bit(PlatformBit::Posix) {
            active.push(Platform::Posix);
        }
        if self.bit(PlatformBit::Windows) {
            active.push(Platform::Windows);
        }
        ActivePlatforms::from_platforms(&active)
    }

    /// Append values to the end of a list-valued variable.
    fn append(&mut self, var: &str, values: &[String]);

    /// Insert values at the front of a list-valued variable.
    fn prepend(&mut self, var: &str, values: &[String]);

    /// Overwrite a variable. The escape hatch for parameters not covered
    /// by the named append/prepend rules.
    fn replace(&mut self, var: &str, value: ParamValue);

    /// Current contents of a list-valued variable (empty when unset).
    fn get_list(&self, var: &str) -> Vec<String>;

    /// Current value of a scalar string variable.
    fn get_str(&self, var: &str) -> Option<String>;

    /// Remove every occurrence of the given values from a list variable.
    fn filter_out(&mut self, var: &str, values: &[String]);

    /// Register explicit extra dependencies for a target name.
    fn depends(&mut self, target: &str, deps: &[String]);

    /// Register a node under a build-wide alias.
    fn alias(&mut self, alias: &str, node: &BuildNode);

    /// Whether this environment can run the given builder kind. An
    /// unsupported kind makes the declaration a silent per-platform skip.
    fn supports(&self, kind: BuilderKind) -> bool;

    /// Invoke a builder, producing one artifact.
    fn build(&mut self, kind: BuilderKind, name: &str, srcs: &[String]) -> BuildNode;

    /// Produce a signed copy of an artifact under the final target name.
    fn sign(&mut self, source: &BuildNode, target: &str) -> BuildNode;

    /// Mount an external directory at a path inside the build tree, so
    /// sources compiled from it land in the right output location.
    fn map_repository(&mut self, at: &str, path: &str);
}
