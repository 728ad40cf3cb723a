//! Build context: the library target registry and the typed declaration
//! surface.
//!
//! One `BuildContext` lives for one build-description evaluation pass.
//! Library declarations register themselves so later targets that link
//! them inherit their `dependent_target_settings`; declaration order
//! matters: a library must be declared before its consumers.

use std::collections::HashMap;

use girder_core::{ParamMap, ParamValue};

use crate::env::{BuildEnv, BuilderKind};
use crate::error::Result;
use crate::extend::{self, BuildOutput};

/// System libraries linked into windows programs and tests unless the
/// declaration opts out with `explicit_libs`.
const DEFAULT_WIN_SYSTEM_LIBS: [&str; 9] = [
    "advapi32", "crypt32", "iphlpapi", "secur32", "shell32", "shlwapi", "user32", "wininet",
    "ws2_32",
];

/// System libraries linked into linux test programs unless `explicit_libs`.
const DEFAULT_LIN_TEST_LIBS: [&str; 3] = ["crypto", "pthread", "ssl"];

/// What consumers of a declared library need to know about it.
#[derive(Debug, Clone, Default)]
pub struct LibraryRecord {
    /// Settings merged into any target that links this library directly.
    pub dependent_settings: Option<ParamMap>,
    /// Whether the library also builds a `<name>64` variant.
    pub builds_64bit: bool,
}

/// The orchestration context for one build-description evaluation pass.
#[derive(Debug, Default)]
pub struct BuildContext {
    libraries: HashMap<String, LibraryRecord>,
}

impl BuildContext {
    /// Create an empty context.
    pub fn new() -> Self {
        BuildContext::default()
    }

    /// Declare a static library.
    pub fn library<E: BuildEnv>(&mut self, env: &E, mut params: ParamMap) -> Result<BuildOutput> {
        params.insert("COMPONENT_STATIC", ParamValue::Bool(true));
        self.extend_target(env, BuilderKind::Library, params)
    }

    /// Declare a dynamic library.
    pub fn dynamic_library<E: BuildEnv>(
        &mut self,
        env: &E,
        mut params: ParamMap,
    ) -> Result<BuildOutput> {
        params.insert("COMPONENT_STATIC", ParamValue::Bool(false));
        self.extend_target(env, BuilderKind::SharedLibrary, params)
    }

    /// Declare a bare object file.
    pub fn object<E: BuildEnv>(&mut self, env: &E, params: ParamMap) -> Result<BuildOutput> {
        self.extend_target(env, BuilderKind::Object, params)
    }

    /// Declare an executable. Windows programs link the default system
    /// libraries unless the declaration sets `explicit_libs`.
    pub fn app<E: BuildEnv>(&mut self, env: &E, mut params: ParamMap) -> Result<BuildOutput> {
        let explicit = params.take_bool("explicit_libs");
        if !explicit {
            let mut defaults = ParamMap::new();
            defaults.insert("win_libs", ParamValue::list(DEFAULT_WIN_SYSTEM_LIBS));
            params = params.combine(&defaults);
        }
        self.extend_target(env, BuilderKind::Program, params)
    }

    /// Declare a unit-test program. The target name gains a `_unittest`
    /// suffix and the common test harness parameters are merged in.
    pub fn unittest<E: BuildEnv>(&mut self, env: &E, mut params: ParamMap) -> Result<BuildOutput> {
        if let Some(name) = params.take_str("name") {
            params.insert("name", ParamValue::from(format!("{name}_unittest")));
        }

        let explicit = params.take_bool("explicit_libs");
        let mut defaults = ParamMap::new();
        defaults.insert(
            "posix_cppdefines",
            ParamValue::list(["GUNIT_NO_GOOGLE3", "GTEST_HAS_RTTI=0"]),
        );
        defaults.insert("libs", ParamValue::list(["unittest_main", "gunit"]));
        if !explicit {
            defaults.insert("win_libs", ParamValue::list(DEFAULT_WIN_SYSTEM_LIBS));
            defaults.insert("lin_libs", ParamValue::list(DEFAULT_LIN_TEST_LIBS));
        }

        let params = params.combine(&defaults);
        self.extend_target(env, BuilderKind::TestProgram, params)
    }

    /// Declare an installer package.
    pub fn installer<E: BuildEnv>(&mut self, env: &E, params: ParamMap) -> Result<BuildOutput> {
        self.extend_target(env, BuilderKind::Installer, params)
    }

    /// Run the target extender for an explicit builder kind.
    pub fn extend_target<E: BuildEnv>(
        &mut self,
        env: &E,
        kind: BuilderKind,
        params: ParamMap,
    ) -> Result<BuildOutput> {
        extend::extend_target(self, env, kind, params)
    }

    /// Look up a previously declared library.
    pub fn library_record(&self, name: &str) -> Option<&LibraryRecord> {
        self.libraries.get(name)
    }

    /// Whether a declared library builds a 64-bit variant.
    pub(crate) fn builds_64bit(&self, name: &str) -> bool {
        self.libraries.get(name).is_some_and(|r| r.builds_64bit)
    }

    /// Register a library record, overwriting any earlier declaration of
    /// the same name.
    pub(crate) fn record_library(&mut self, name: &str, record: LibraryRecord) {
        self.libraries.insert(name.to_string(), record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEnv;

    fn params(entries: &[(&str, ParamValue)]) -> ParamMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn settings(entries: &[(&str, ParamValue)]) -> ParamValue {
        ParamValue::Map(params(entries))
    }

    #[test]
    fn library_declarations_register() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("jingle")),
                ("srcs", ParamValue::list(["jingle.cc"])),
            ]),
        )
        .unwrap();

        assert!(ctx.library_record("jingle").is_some());
    }

    #[test]
    fn srcs_less_libraries_still_register() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        let output = ctx
            .library(
                &env,
                params(&[
                    ("name", ParamValue::from("headers_only")),
                    (
                        "dependent_target_settings",
                        settings(&[("cppdefines", ParamValue::list(["HEADER_ONLY"]))]),
                    ),
                ]),
            )
            .unwrap();

        assert!(output.is_skipped());
        assert!(ctx.library_record("headers_only").is_some());
    }

    #[test]
    fn dependent_settings_reach_later_consumers() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("sound")),
                ("srcs", ParamValue::list(["sound.cc"])),
                (
                    "dependent_target_settings",
                    settings(&[("cppdefines", ParamValue::list(["FOO"]))]),
                ),
            ]),
        )
        .unwrap();

        // The declaring library itself does not receive FOO.
        {
            let log = env.log();
            let lib_record = log.record_for("sound").unwrap();
            assert!(!lib_record.vars.contains_key("CPPDEFINES"));
        }

        ctx.app(
            &env,
            params(&[
                ("name", ParamValue::from("player")),
                ("srcs", ParamValue::list(["player.cc"])),
                ("libs", ParamValue::list(["sound"])),
            ]),
        )
        .unwrap();

        let log = env.log();
        let app_record = log.record_for("player").unwrap();
        assert_eq!(app_record.vars["CPPDEFINES"], vec!["FOO"]);
    }

    #[test]
    fn dependent_settings_do_not_propagate_two_hops() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("base")),
                ("srcs", ParamValue::list(["base.cc"])),
                (
                    "dependent_target_settings",
                    settings(&[("cppdefines", ParamValue::list(["FROM_BASE"]))]),
                ),
            ]),
        )
        .unwrap();

        // middle consumes base, but declares no settings of its own.
        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("middle")),
                ("srcs", ParamValue::list(["middle.cc"])),
                ("libs", ParamValue::list(["base"])),
            ]),
        )
        .unwrap();

        ctx.app(
            &env,
            params(&[
                ("name", ParamValue::from("top")),
                ("srcs", ParamValue::list(["top.cc"])),
                ("libs", ParamValue::list(["middle"])),
            ]),
        )
        .unwrap();

        let log = env.log();
        let top_record = log.record_for("top").unwrap();
        assert!(!top_record.vars.contains_key("CPPDEFINES"));
    }

    #[test]
    fn dependent_settings_are_platform_filtered() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("net")),
                ("srcs", ParamValue::list(["net.cc"])),
                (
                    "dependent_target_settings",
                    settings(&[
                        ("win_libs", ParamValue::list(["ws2_32"])),
                        ("lin_libs", ParamValue::list(["resolv"])),
                    ]),
                ),
            ]),
        )
        .unwrap();

        ctx.app(
            &env,
            params(&[
                ("name", ParamValue::from("client")),
                ("srcs", ParamValue::list(["client.cc"])),
                ("libs", ParamValue::list(["net"])),
            ]),
        )
        .unwrap();

        let log = env.log();
        let record = log.record_for("client").unwrap();
        assert_eq!(record.vars["LIBS"], vec!["net", "resolv"]);
    }

    #[test]
    fn sixty_four_bit_libraries_are_renamed_on_the_link_line() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux64();

        ctx.dynamic_library(
            &env,
            params(&[
                ("name", ParamValue::from("codec")),
                ("srcs", ParamValue::list(["codec.cc"])),
                ("also64bit", ParamValue::Bool(true)),
            ]),
        )
        .unwrap();

        let output = ctx
            .app(
                &env,
                params(&[
                    ("name", ParamValue::from("player")),
                    ("srcs", ParamValue::list(["player.cc"])),
                    ("libs", ParamValue::list(["codec", "m"])),
                    ("also64bit", ParamValue::Bool(true)),
                ]),
            )
            .unwrap();

        let BuildOutput::Pair { node64, .. } = output else {
            panic!("expected a 64-bit pair");
        };
        assert_eq!(node64.name, "player64");

        let log = env.log();
        let record64 = log.record_for("player64").unwrap();
        assert_eq!(record64.vars["LIBS"], vec!["codec64", "m"]);

        // The 32-bit link line is untouched.
        let record32 = log.record_for("player").unwrap();
        assert_eq!(record32.vars["LIBS"], vec!["codec", "m"]);
    }

    #[test]
    fn static_libraries_do_not_rename_their_link_line() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux64();

        ctx.dynamic_library(
            &env,
            params(&[
                ("name", ParamValue::from("codec")),
                ("srcs", ParamValue::list(["codec.cc"])),
                ("also64bit", ParamValue::Bool(true)),
            ]),
        )
        .unwrap();

        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("archive")),
                ("srcs", ParamValue::list(["archive.cc"])),
                ("libs", ParamValue::list(["codec"])),
                ("also64bit", ParamValue::Bool(true)),
            ]),
        )
        .unwrap();

        let log = env.log();
        let record64 = log.record_for("archive64").unwrap();
        assert_eq!(record64.vars["LIBS"], vec!["codec"]);
    }

    #[test]
    fn app_injects_windows_system_libraries() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::windows();

        ctx.app(
            &env,
            params(&[
                ("name", ParamValue::from("client")),
                ("srcs", ParamValue::list(["client.cc"])),
                ("libs", ParamValue::list(["jingle"])),
            ]),
        )
        .unwrap();

        let log = env.log();
        let record = log.record_for("client").unwrap();
        assert!(record.vars["LIBS"].contains(&"ws2_32".to_string()));
        assert_eq!(record.vars["LIBS"][0], "jingle");
    }

    #[test]
    fn explicit_libs_suppresses_the_defaults() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::windows();

        ctx.app(
            &env,
            params(&[
                ("name", ParamValue::from("client")),
                ("srcs", ParamValue::list(["client.cc"])),
                ("libs", ParamValue::list(["jingle"])),
                ("explicit_libs", ParamValue::Bool(true)),
            ]),
        )
        .unwrap();

        let log = env.log();
        let record = log.record_for("client").unwrap();
        assert_eq!(record.vars["LIBS"], vec!["jingle"]);
    }

    #[test]
    fn unittest_appends_suffix_and_harness_libs() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        ctx.unittest(
            &env,
            params(&[
                ("name", ParamValue::from("params")),
                ("srcs", ParamValue::list(["params_unittest.cc"])),
            ]),
        )
        .unwrap();

        let log = env.log();
        let record = log.record_for("params_unittest").unwrap();
        assert!(record.vars["LIBS"].contains(&"unittest_main".to_string()));
        assert!(record.vars["LIBS"].contains(&"gunit".to_string()));
        assert!(record.vars["LIBS"].contains(&"pthread".to_string()));
        assert!(record.vars["CPPDEFINES"].contains(&"GUNIT_NO_GOOGLE3".to_string()));
    }

    #[test]
    fn redeclaring_a_library_overwrites_its_record() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("codec")),
                ("srcs", ParamValue::list(["codec.cc"])),
                ("also64bit", ParamValue::Bool(true)),
            ]),
        )
        .unwrap();
        assert!(ctx.library_record("codec").unwrap().builds_64bit);

        ctx.library(
            &env,
            params(&[
                ("name", ParamValue::from("codec")),
                ("srcs", ParamValue::list(["codec.cc"])),
            ]),
        )
        .unwrap();
        assert!(!ctx.library_record("codec").unwrap().builds_64bit);
    }

    #[test]
    fn component_static_reaches_the_environment() {
        let mut ctx = BuildContext::new();
        let env = MemoryEnv::linux();

        ctx.dynamic_library(
            &env,
            params(&[
                ("name", ParamValue::from("plugin")),
                ("srcs", ParamValue::list(["plugin.cc"])),
            ]),
        )
        .unwrap();

        // COMPONENT_STATIC falls through the replace rule as a scalar.
        let log = env.log();
        assert!(log.record_for("plugin").is_some());
    }
}
