//! End-to-end pipeline tests: assembly, rewriting, and remote
//! submission against an in-memory runtime.
//!
//! Copyright (c) 2025 Posit, PBC

use std::path::Path;
use std::time::Duration;

use sasscast_core::{compile_document, CompileError, CompilerConfig, FailureCooldown, SkipReason};
use sasscast_system_runtime::MemoryRuntime;

fn fixture_runtime() -> MemoryRuntime {
    MemoryRuntime::new()
        .with_file(
            "/theme/main.scss",
            "@import \"variables\";\n\
             @import \"bourbon/bourbon\";\n\
             @import \"missing\";\n\
             .logo { background: image-url(\"logo.png\"); }\n\
             @font-face { src: font-url('body.ttf'); }\n",
        )
        .with_file("/theme/_variables.scss", "$primary: blue;\n")
}

fn config() -> CompilerConfig {
    CompilerConfig {
        api_key: "key-123".to_string(),
        asset_root: "/sites/default".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_full_pipeline_submits_assembled_rewritten_document() {
    let runtime = fixture_runtime();
    runtime.push_response(200, r#"{"css":".logo{background:url(x)}"}"#);
    let cooldown = FailureCooldown::new();

    let compiled =
        compile_document(Path::new("/theme/main.scss"), &config(), &runtime, &cooldown).unwrap();

    assert_eq!(compiled.css, ".logo{background:url(x)}");

    // The missing import surfaced as a diagnostic without failing the run
    assert_eq!(compiled.skipped.len(), 1);
    assert_eq!(compiled.skipped[0].name, "missing");
    assert_eq!(compiled.skipped[0].reason, SkipReason::Missing);

    // Inspect what actually went over the wire
    let post = &runtime.posts()[0];
    let data = post.field("data").unwrap();

    // Imports inlined with provenance markers
    assert!(data.contains("// sasscast import /theme/main.scss"));
    assert!(data.contains("// sasscast import /theme/_variables.scss"));
    assert!(data.contains("$primary: blue;"));

    // Pass-through import preserved for the service
    assert!(data.contains("@import \"bourbon/bourbon\";"));

    // Missing import degraded to an ignore marker
    assert!(data.contains("// sasscast ignore import missing"));

    // Asset calls rewritten against the asset root fallbacks
    assert!(data.contains("url(/sites/default/assets/images/logo.png)"));
    assert!(data.contains("url(/sites/default/assets/fonts/body.ttf)"));
    assert!(!data.contains("image-url"));
    assert!(!data.contains("font-url"));

    // Wire fields and credential
    assert_eq!(post.field("output_style"), Some("compressed"));
    assert_eq!(
        post.field("image_path"),
        Some("/sites/default/assets/images")
    );
    assert_eq!(post.auth.as_ref().unwrap().0, "key-123");
}

#[test]
fn test_each_run_gets_a_fresh_tracker() {
    // The same import must be expanded again in a second run; the
    // tracker never leaks across runs.
    let runtime = fixture_runtime();
    runtime.push_response(200, r#"{"css":"a{}"}"#);
    runtime.push_response(200, r#"{"css":"a{}"}"#);
    let cooldown = FailureCooldown::new();
    let config = config();

    for _ in 0..2 {
        compile_document(Path::new("/theme/main.scss"), &config, &runtime, &cooldown).unwrap();
    }

    for post in runtime.posts() {
        let data = post.field("data").unwrap().to_string();
        assert!(data.contains("$primary: blue;"));
    }
}

#[test]
fn test_transport_failure_suppresses_the_next_run() {
    let runtime = fixture_runtime();
    runtime.push_transport_failure("connect timeout");
    let cooldown = FailureCooldown::new();
    let config = config();

    let first = compile_document(Path::new("/theme/main.scss"), &config, &runtime, &cooldown);
    assert!(matches!(first, Err(CompileError::ServiceUnavailable(_))));
    assert_eq!(runtime.post_calls(), 1);

    // The cooldown from the first run carries into the second: the
    // document is still assembled, but no POST goes out.
    let second = compile_document(Path::new("/theme/main.scss"), &config, &runtime, &cooldown);
    assert!(matches!(second, Err(CompileError::ServiceUnavailable(_))));
    assert_eq!(runtime.post_calls(), 1);
}

#[test]
fn test_unreadable_root_fails_before_any_network_activity() {
    let runtime = MemoryRuntime::new();
    let cooldown = FailureCooldown::new();

    let result = compile_document(Path::new("/theme/main.scss"), &config(), &runtime, &cooldown);
    assert!(matches!(result, Err(CompileError::Runtime(_))));
    assert_eq!(runtime.post_calls(), 0);
}

#[test]
fn test_remote_failure_detail_reaches_the_caller() {
    let runtime = fixture_runtime();
    runtime.push_response(400, r#"{"message":"output_style must be one of ..."}"#);
    let cooldown = FailureCooldown::new();

    match compile_document(Path::new("/theme/main.scss"), &config(), &runtime, &cooldown) {
        Err(CompileError::BadRequest(message)) => {
            assert!(message.contains("output_style"));
        }
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

#[test]
fn test_custom_passthrough_list() {
    let runtime = MemoryRuntime::new()
        .with_file("/theme/main.scss", "@import \"compass/css3\";\n")
        .with_file("/theme/compass/_css3.scss", ".should-not-appear {}\n");
    runtime.push_response(200, r#"{"css":"a{}"}"#);
    let cooldown = FailureCooldown::new();

    let config = CompilerConfig {
        passthrough: vec!["compass".to_string()],
        ..config()
    };

    compile_document(Path::new("/theme/main.scss"), &config, &runtime, &cooldown).unwrap();

    let data = runtime.posts()[0].field("data").unwrap().to_string();
    assert!(data.contains("@import \"compass/css3\";"));
    assert!(!data.contains(".should-not-appear"));
}

#[test]
fn test_timeout_respects_config() {
    // Timeout is plumbed through to the transport; MemoryRuntime just
    // records the call, so this exercises the wiring end to end.
    let runtime = fixture_runtime();
    runtime.push_response(200, r#"{"css":"a{}"}"#);
    let cooldown = FailureCooldown::new();

    let config = CompilerConfig {
        timeout: Duration::from_secs(5),
        ..config()
    };

    compile_document(Path::new("/theme/main.scss"), &config, &runtime, &cooldown).unwrap();
    assert_eq!(runtime.post_calls(), 1);
}
