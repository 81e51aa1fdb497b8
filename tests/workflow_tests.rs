//! End-to-end checks across fixtures, mocks and async utilities.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serial_test::serial;
use testkit_support::capture::{capture_output, is_capturing, log};
use testkit_support::prelude::*;

#[tokio::test]
async fn temp_dir_lifecycle() {
    for prefix in ["a-", "with.dots-", "test-"] {
        let path = create_temp_dir(prefix).await.unwrap();
        assert!(path.is_dir());

        cleanup_temp_dir(&path).await.unwrap();
        assert!(!path.exists());
        cleanup_temp_dir(&path).await.unwrap();
    }
}

#[tokio::test]
async fn project_fixture_in_temp_dir() {
    let dir = ScopedTempDir::new("project-").unwrap();

    write_package_json(
        dir.path(),
        &PackageJsonFixture::new("demo").dev_dependency("typescript", "^5.0.0"),
    )
    .await
    .unwrap();
    write_ts_file(dir.join("src/index.ts"), "export const answer = 42;\n")
        .await
        .unwrap();

    let raw = std::fs::read_to_string(dir.join("package.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["name"], "demo");
    assert_eq!(value["type"], "module");
    assert_eq!(value["devDependencies"]["typescript"], "^5.0.0");
    assert!(dir.join("src/index.ts").is_file());
}

#[test]
fn procedure_against_mocks() {
    fn build(
        fs: &impl FileSystem,
        log: &impl Logger,
        exec: &testkit_support::mock::MockExec,
    ) -> Result<()> {
        let manifest = fs.read_file("/repo/package.json")?;
        log.info(&format!("building {} bytes of manifest", manifest.len()));
        let output = exec.call("pnpm build".to_string())?;
        fs.mkdir("/repo/dist");
        fs.write_file("/repo/dist/out.txt", &output.stdout);
        Ok(())
    }

    let fs = create_mock_fs([("/repo/package.json", "{}")], ["/repo"]);
    let ctx = create_mock_context(MockContextOptions::default().cwd("/repo"));
    let exec = create_mock_exec(HashMap::from([(
        "pnpm build".to_string(),
        MockExecResult::success("ok"),
    )]));

    build(&fs, &ctx.log, &exec).unwrap();

    assert_eq!(fs.read_file("/repo/dist/out.txt").unwrap(), "ok");
    let mut entries = fs.readdir("/repo");
    entries.sort();
    assert_eq!(entries, vec!["dist", "package.json"]);
    assert!(fs.stat("/repo/dist").unwrap().is_dir());
    assert!(ctx.log.info.was_called_times(1));
    assert!(exec.was_called_with(&"pnpm build".to_string()));
}

#[tokio::test]
async fn wait_for_timeout_wall_time() {
    let start = Instant::now();

    let err = wait_for(
        || async { false },
        WaitOptions::new()
            .timeout(Duration::from_millis(50))
            .interval(Duration::from_millis(10)),
    )
    .await
    .unwrap_err();

    let elapsed = start.elapsed();
    assert!(err.is_timeout());
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_millis(500), "took {elapsed:?}");
}

#[tokio::test]
async fn wait_for_observes_deferred_settlement() {
    let Deferred { promise, settle } = create_deferred::<&str>();
    let settled = settle.clone();

    tokio::spawn(async move {
        sleep(Duration::from_millis(20)).await;
        settle.resolve("ready");
    });

    wait_for(
        move || {
            let done = settled.is_settled();
            async move { done }
        },
        WaitOptions::new().interval(Duration::from_millis(5)),
    )
    .await
    .unwrap();

    assert_eq!(promise.await.unwrap(), "ready");
}

#[tokio::test]
async fn with_timeout_does_not_wait_for_slow_operation() {
    let start = Instant::now();

    let err = with_timeout(Duration::from_millis(10), || async {
        sleep(Duration::from_millis(1000)).await;
        1
    })
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Operation timed out");
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn assert_throws_round_trip() {
    let err = assert_throws(
        || async { Err::<(), _>(Error::assertion_failed("boom")) },
        "boo",
    )
    .await
    .unwrap();
    assert_eq!(err.to_string(), "boom");

    let err = assert_throws(|| async { Ok::<(), Error>(()) }, ExpectedMessage::Any)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DidNotThrow));
}

#[tokio::test]
#[serial]
async fn capture_output_then_restore() {
    let output = capture_output(|| async {
        log("hello");
        Ok::<_, Error>(())
    })
    .await
    .unwrap();

    assert_eq!(output.stdout, vec!["hello"]);
    assert!(output.stderr.is_empty());

    assert!(!is_capturing());
    log("not captured");
    let after = capture_output(|| async { Ok::<_, Error>(()) }).await.unwrap();
    assert!(after.stdout.is_empty());
}

#[tokio::test]
#[serial]
async fn capture_output_restores_after_failure() {
    let err = capture_output(|| async {
        console_error!("about to fail");
        Err::<(), _>(Error::assertion_failed("inner"))
    })
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "inner");
    assert!(!is_capturing());
}

#[test]
fn runner_config_shallow_override() {
    let config = shared_config()
        .merged(serde_json::json!({ "include": ["src/**/*.spec.ts"] }))
        .unwrap();

    assert_eq!(config.include, vec!["src/**/*.spec.ts"]);
    assert_eq!(config.test_timeout, Duration::from_secs(10));
}
