#[cfg(test)]
mod tests {
    use player_release::bundler::{BuildTarget, TargetGroup, resolve_output_path};

    #[test]
    fn test_target_short_names() {
        assert_eq!(BuildTarget::WebGl.short_name(), "webgl");
        assert_eq!(BuildTarget::AndroidApk.short_name(), "android-apk");
        assert_eq!(BuildTarget::AndroidAab.short_name(), "android-aab");
    }

    #[test]
    fn test_target_groups() {
        assert_eq!(BuildTarget::WebGl.group(), TargetGroup::WebGl);
        assert_eq!(BuildTarget::AndroidApk.group(), TargetGroup::Android);
        assert_eq!(BuildTarget::AndroidAab.group(), TargetGroup::Android);
    }

    #[test]
    fn test_output_paths() {
        let apk = resolve_output_path(BuildTarget::AndroidApk, "AR-Magic-Lite").unwrap();
        assert_eq!(apk.to_string_lossy().replace('\\', "/"), "Build/Android/AR-Magic-Lite.apk");

        let webgl = resolve_output_path(BuildTarget::WebGl, "AR-Magic-Lite").unwrap();
        assert!(!webgl.to_string_lossy().ends_with(".apk"));
    }
}
