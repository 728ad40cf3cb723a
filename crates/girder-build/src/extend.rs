//! The target extender: one declaration in, environment mutations and
//! builder invocations out.
//!
//! Extension is a fixed sequence: fork the environment, pull out the
//! control keys, register library settings, inherit dependency-propagated
//! settings, merge platform-prefixed parameters, apply the surviving
//! parameters to the fork, and dispatch the builder. Two optional variant
//! passes follow the primary build: a parallel 64-bit build and a signing
//! rewrite. The two are mutually exclusive and requesting both is an error.

use girder_core::{merge_by_platform, ParamMap, ParamValue, PlatformBit};

use crate::context::{BuildContext, LibraryRecord};
use crate::env::{BuildEnv, BuildNode, BuilderKind};
use crate::error::{BuildError, Result};
use crate::media;

/// Parameter keys that append to environment list variables.
const APPEND_RULES: [(&str, &str); 5] = [
    ("cppdefines", "CPPDEFINES"),
    ("libdirs", "LIBPATH"),
    ("link_flags", "LINKFLAGS"),
    ("libs", "LIBS"),
    ("FRAMEWORKS", "FRAMEWORKS"),
];

/// Parameter keys that prepend to environment list variables. Compiler
/// flags go in front so a target's own flags win over inherited ones.
const PREPEND_RULES: [(&str, &str); 1] = [("ccflags", "CCFLAGS")];

/// Prefix a target builds under while waiting for its signing pass.
const UNSIGNED_PREFIX: &str = "unsigned_";

/// The result of extending one target declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutput {
    /// Nothing was built: no sources for this platform, or the builder
    /// kind is unsupported here. Declarations may be made unconditionally
    /// and skipped per platform.
    Skipped,
    /// The single produced node (plain or signed).
    Node(BuildNode),
    /// The default build plus its 64-bit sibling.
    Pair {
        /// The default-arch node.
        node: BuildNode,
        /// The `<name>64` node.
        node64: BuildNode,
    },
}

impl BuildOutput {
    /// Whether the declaration was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self, BuildOutput::Skipped)
    }

    /// The primary node, when anything was built.
    pub fn primary(&self) -> Option<&BuildNode> {
        match self {
            BuildOutput::Skipped => None,
            BuildOutput::Node(node) => Some(node),
            BuildOutput::Pair { node, .. } => Some(node),
        }
    }
}

/// Whether this environment may produce 64-bit siblings. A 64-bit host is
/// required, and ChromeOS builds stay 32-bit only.
pub(crate) fn allows_64bit<E: BuildEnv>(env: &E) -> bool {
    env.bit(PlatformBit::Linux)
        && env.bit(PlatformBit::Arch64Bit)
        && !env.bit(PlatformBit::ChromeOs)
}

pub(crate) fn extend_target<E: BuildEnv>(
    ctx: &mut BuildContext,
    env: &E,
    kind: BuilderKind,
    mut params: ParamMap,
) -> Result<BuildOutput> {
    let mut env = env.fork();

    // Control keys steer the pipeline and never reach the environment.
    let name = params
        .take_str("name")
        .ok_or(BuildError::MissingName { kind })?;
    let signed = params.take_bool("signed");
    let also64bit = params.take_bool("also64bit");
    let depends = params.take_list("depends");
    let include_media_libs = params.take_bool("include_media_libs");
    let prepend_includedirs = params.take_bool("prepend_includedirs");
    let dependent_settings = match params.take("dependent_target_settings") {
        Some(ParamValue::Map(map)) => Some(map),
        _ => None,
    };

    if signed && also64bit {
        return Err(BuildError::SignedConflict { name });
    }

    // Library declarations register before dependency merging, so the
    // record reflects the library's own settings, not inherited ones.
    if kind.is_library() {
        ctx.record_library(
            &name,
            LibraryRecord {
                dependent_settings: dependent_settings.clone(),
                builds_64bit: also64bit,
            },
        );
    }

    let active = env.active_platforms();

    // Inherit dependent_target_settings from directly linked libraries.
    // One hop only: settings do not propagate through consumers.
    let linked_libs: Vec<String> = params
        .get("libs")
        .and_then(ParamValue::as_list)
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    for lib in &linked_libs {
        if let Some(settings) = ctx
            .library_record(lib)
            .and_then(|r| r.dependent_settings.as_ref())
        {
            params = params.combine(&merge_by_platform(&active, settings));
        }
    }

    let mut params = merge_by_platform(&active, &params);

    if include_media_libs {
        params = media::add_media_libs(&env, params);
    }

    let srcs = params.take_list("srcs").filter(|s| !s.is_empty());
    let Some(srcs) = srcs else {
        return Ok(BuildOutput::Skipped);
    };
    if !env.supports(kind) {
        return Ok(BuildOutput::Skipped);
    }

    // A signed target builds under the unsigned name; the signing pass
    // produces the final artifact. Only the windows toolchain signs.
    let signed = signed && env.bit(PlatformBit::Windows);
    let build_name = if signed {
        format!("{UNSIGNED_PREFIX}{name}")
    } else {
        name
    };

    if let Some(deps) = depends {
        env.depends(&build_name, &deps);
    }

    for (field, var) in APPEND_RULES {
        if let Some(values) = params.take_list(field) {
            env.append(var, &values);
        }
    }
    for (field, var) in PREPEND_RULES {
        if let Some(values) = params.take_list(field) {
            env.prepend(var, &values);
        }
    }
    if let Some(values) = params.take_list("includedirs") {
        if prepend_includedirs {
            env.prepend("CPPPATH", &values);
        } else {
            env.append("CPPPATH", &values);
        }
    }

    // Whatever remains is applied verbatim as a replacement.
    for (key, value) in params {
        env.replace(&key, value);
    }

    let node = env.build(kind, &build_name, &srcs);

    if also64bit && allows_64bit(&env) {
        let node64 = build_64bit_variant(ctx, &env, kind, &build_name, &srcs);
        return Ok(BuildOutput::Pair { node, node64 });
    }

    if signed {
        let final_name = build_name
            .strip_prefix(UNSIGNED_PREFIX)
            .unwrap_or(&build_name)
            .to_string();
        let signed_node = env.sign(&node, &final_name);
        env.alias("signed_binaries", &signed_node);
        return Ok(BuildOutput::Node(signed_node));
    }

    Ok(BuildOutput::Node(node))
}

/// Build the `<name>64` sibling: swap the arch flags, keep object files
/// from colliding with the 32-bit ones, and relink against the 64-bit
/// variants of any library that builds one.
fn build_64bit_variant<E: BuildEnv>(
    ctx: &BuildContext,
    env: &E,
    kind: BuilderKind,
    name: &str,
    srcs: &[String],
) -> BuildNode {
    let mut env64 = env.fork();

    let m32 = ["-m32".to_string()];
    env64.filter_out("CCFLAGS", &m32);
    env64.filter_out("LINKFLAGS", &m32);
    env64.prepend("CCFLAGS", &["-m64".to_string(), "-fPIC".to_string()]);
    env64.prepend("LINKFLAGS", &["-m64".to_string()]);

    for var in ["OBJSUFFIX", "SHOBJSUFFIX"] {
        if let Some(suffix) = env64.get_str(var) {
            env64.replace(var, ParamValue::from(format!("64{suffix}")));
        }
    }

    if kind.links_build_libraries() {
        let libs: Vec<String> = env64
            .get_list("LIBS")
            .into_iter()
            .map(|lib| {
                if ctx.builds_64bit(&lib) {
                    format!("{lib}64")
                } else {
                    lib
                }
            })
            .collect();
        env64.replace("LIBS", ParamValue::List(libs));
    }

    env64.build(kind, &format!("{name}64"), srcs)
}
