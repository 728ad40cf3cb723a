//! Default media-library injection.
//!
//! Targets that set `include_media_libs` link the bundled voice/video
//! engine stack. The library directories and the voice-engine flavor vary
//! per platform and per Debug/Coverage bit; the link list is a fixed set
//! plus a windows-only or posix-only tail.

use girder_core::{ParamMap, ParamValue, PlatformBit};

use crate::env::BuildEnv;

const LMI_LIBS: [&str; 28] = [
    "LmiAudioCommon",
    "LmiClient",
    "LmiCmcp",
    "LmiDeviceManager",
    "LmiH263ClientPlugIn",
    "LmiH263CodecCommon",
    "LmiH263Decoder",
    "LmiH263Encoder",
    "LmiH264ClientPlugIn",
    "LmiH264CodecCommon",
    "LmiH264Common",
    "LmiH264Decoder",
    "LmiH264Encoder",
    "LmiIce",
    "LmiMediaPayload",
    "LmiOs",
    "LmiPacketCache",
    "LmiProtocolStack",
    "LmiRateShaper",
    "LmiRtp",
    "LmiSecurity",
    "LmiSignaling",
    "LmiStun",
    "LmiTransport",
    "LmiUi",
    "LmiUtils",
    "LmiVideoCommon",
    "LmiXml",
];

const IPP_MERGED_LIBS: [&str; 8] = [
    "ippsmerged",
    "ippsemerged",
    "ippvcmerged",
    "ippvcemerged",
    "ippimerged",
    "ippiemerged",
    "ippsrmerged",
    "ippsremerged",
];

const WIN_MEDIA_LIBS: [&str; 7] = [
    "dsound",
    "d3d9",
    "gdi32",
    "ippcorel",
    "ippscmerged",
    "ippscemerged",
    "strmiids",
];

const POSIX_MEDIA_LIBS: [&str; 17] = [
    "ippcore",
    "ippacmerged",
    "ippacemerged",
    "ippccmerged",
    "ippccemerged",
    "ippchmerged",
    "ippchemerged",
    "ippcvmerged",
    "ippcvemerged",
    "ippdcmerged",
    "ippdcemerged",
    "ippjmerged",
    "ippjemerged",
    "ippmmerged",
    "ippmemerged",
    "ipprmerged",
    "ippremerged",
];

/// Merge the media-engine library directories and link libraries into a
/// resolved parameter map.
pub(crate) fn add_media_libs<E: BuildEnv>(env: &E, mut params: ParamMap) -> ParamMap {
    params.merge(
        "libdirs",
        ParamValue::list([
            "$MAIN_DIR/third_party/gips/Libraries".to_string(),
            ipp_libdir(env),
            lmi_libdir(env),
        ]),
    );

    let mut libs = vec![voice_engine_lib(env)];
    libs.extend(LMI_LIBS.iter().map(|s| s.to_string()));
    libs.extend(IPP_MERGED_LIBS.iter().map(|s| s.to_string()));
    params.merge("libs", ParamValue::List(libs));

    if env.bit(PlatformBit::Windows) {
        params.merge("libs", ParamValue::list(WIN_MEDIA_LIBS));
    } else {
        params.merge("libs", ParamValue::list(POSIX_MEDIA_LIBS));
    }

    params
}

/// The LMI library directory; windows coverage builds use the c_only
/// flavor.
fn lmi_libdir<E: BuildEnv>(env: &E) -> String {
    let base = "$THIRD_PARTY/lmi/files/merged/lib";
    let flavor = if env.bit(PlatformBit::Windows) {
        if env.bit(PlatformBit::Coverage) {
            "win32/c_only"
        } else {
            "win32/Release"
        }
    } else if env.bit(PlatformBit::Mac) {
        "macos"
    } else {
        "linux/x86"
    };
    format!("{base}/{flavor}")
}

/// The Intel IPP library directory for the active platform.
fn ipp_libdir<E: BuildEnv>(env: &E) -> String {
    let release = if env.bit(PlatformBit::Windows) {
        "v_5_2_windows"
    } else if env.bit(PlatformBit::Mac) {
        "v_5_3_mac_os_x"
    } else {
        "v_5_2_linux"
    };
    format!("$THIRD_PARTY/intel_ipp/{release}/ia32/lib")
}

/// The voice-engine library; windows debug builds link the _mtd flavor.
fn voice_engine_lib<E: BuildEnv>(env: &E) -> String {
    if env.bit(PlatformBit::Windows) {
        if env.bit(PlatformBit::Debug) {
            "gipsvoiceenginelib_mtd".to_string()
        } else {
            "gipsvoiceenginelib_mt".to_string()
        }
    } else if env.bit(PlatformBit::Mac) {
        "VoiceEngine_mac_universal_gcc".to_string()
    } else {
        "VoiceEngine_Linux_external_gcc".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEnv;

    #[test]
    fn linux_gets_the_posix_tail() {
        let env = MemoryEnv::linux();
        let params = add_media_libs(&env, ParamMap::new());
        let libs = params.get("libs").and_then(ParamValue::as_list).unwrap();

        assert_eq!(libs[0], "VoiceEngine_Linux_external_gcc");
        assert!(libs.contains(&"LmiRtp".to_string()));
        assert!(libs.contains(&"ippcore".to_string()));
        assert!(!libs.contains(&"dsound".to_string()));
    }

    #[test]
    fn windows_debug_links_the_mtd_engine() {
        let env = MemoryEnv::windows().with_bit(PlatformBit::Debug);
        let params = add_media_libs(&env, ParamMap::new());
        let libs = params.get("libs").and_then(ParamValue::as_list).unwrap();

        assert_eq!(libs[0], "gipsvoiceenginelib_mtd");
        assert!(libs.contains(&"strmiids".to_string()));
        assert!(!libs.contains(&"ippcore".to_string()));
    }

    #[test]
    fn coverage_switches_the_lmi_directory() {
        let env = MemoryEnv::windows().with_bit(PlatformBit::Coverage);
        let params = add_media_libs(&env, ParamMap::new());
        let dirs = params.get("libdirs").and_then(ParamValue::as_list).unwrap();

        assert!(dirs.iter().any(|d| d.ends_with("win32/c_only")));
    }

    #[test]
    fn injection_appends_to_declared_libs() {
        let env = MemoryEnv::mac();
        let mut params = ParamMap::new();
        params.insert("libs", ParamValue::list(["jingle"]));

        let params = add_media_libs(&env, params);
        let libs = params.get("libs").and_then(ParamValue::as_list).unwrap();
        assert_eq!(libs[0], "jingle");
        assert_eq!(libs[1], "VoiceEngine_mac_universal_gcc");
    }
}
