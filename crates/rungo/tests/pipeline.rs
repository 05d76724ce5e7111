use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use rungo::config::Settings;
use rungo::{Error, InstallState, Pipeline, Toolchain};
use rungo_fetch::MockHttpClient;
use rungo_platform::{Arch, Os};
use rungo_verify::Sha256Digest;
use rungo_version::VersionRequest;

const BASE: &str = "https://dl.example/go";
const ARCHIVE_URL: &str = "https://dl.example/go/go1.22.5.linux-amd64.tar.gz";
const SHA_URL: &str = "https://dl.example/go/go1.22.5.linux-amd64.tar.gz.sha256";

const GO_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$GOROOT" > "$RECORD"
exit 3
"#;

fn toolchain_tar_gz() -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, mode, data) in [
        ("go/VERSION", 0o644, b"go1.22.5\n".as_slice()),
        ("go/bin/go", 0o755, GO_SCRIPT.as_bytes()),
        ("go/src/runtime/extern.go", 0o644, b"package runtime\n".as_slice()),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        builder.append_data(&mut header, path, data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

fn settings(base: &Path) -> Settings {
    Settings {
        os: Os::Linux,
        arch: Arch::Amd64,
        install_base: base.to_path_buf(),
        download_base: BASE.to_string(),
        go_version: None,
        verbose: false,
        print_root: false,
    }
}

fn serve(client: &MockHttpClient, archive: &[u8]) {
    client.route(SHA_URL, 200, format!("{}\n", Sha256Digest::of(archive)));
    client.route(ARCHIVE_URL, 200, archive.to_vec());
}

#[test]
fn second_run_makes_no_requests() {
    let temp = tempfile::tempdir().unwrap();
    let client = MockHttpClient::new();
    serve(&client, &toolchain_tar_gz());
    let pipeline = Pipeline::new(&client, settings(temp.path()));

    let layout = pipeline.install("1.22.5").unwrap();
    assert_eq!(client.requests(), vec![SHA_URL.to_string(), ARCHIVE_URL.to_string()]);
    assert_eq!(InstallState::probe(&layout), InstallState::Ready);
    assert!(layout.root().starts_with(temp.path().join("1.22.5")));
    assert_eq!(
        fs::read(layout.goroot().join("VERSION")).unwrap(),
        b"go1.22.5\n"
    );

    // Untouched tree proves no second extraction.
    fs::write(layout.goroot().join("VERSION"), b"local edit").unwrap();
    pipeline.install("1.22.5").unwrap();
    assert_eq!(client.request_count(), 2);
    assert_eq!(
        fs::read(layout.goroot().join("VERSION")).unwrap(),
        b"local edit"
    );
}

#[test]
fn partial_archive_is_downloaded_again() {
    let temp = tempfile::tempdir().unwrap();
    let archive = toolchain_tar_gz();
    let client = MockHttpClient::new();
    serve(&client, &archive);
    let pipeline = Pipeline::new(&client, settings(temp.path()));

    let layout = pipeline.layout("1.22.5").unwrap();
    fs::create_dir_all(layout.root()).unwrap();
    fs::write(layout.archive_path(), &archive[..archive.len() / 3]).unwrap();
    assert_eq!(InstallState::probe(&layout), InstallState::Downloading);

    pipeline.install("1.22.5").unwrap();
    assert_eq!(fs::read(layout.archive_path()).unwrap(), archive);
    assert_eq!(InstallState::probe(&layout), InstallState::Ready);
}

#[test]
fn dropped_connection_then_retry() {
    let temp = tempfile::tempdir().unwrap();
    let archive = toolchain_tar_gz();
    let client = MockHttpClient::new();
    serve(&client, &archive);
    client.route_truncated(ARCHIVE_URL, archive.clone(), archive.len() / 2);
    let pipeline = Pipeline::new(&client, settings(temp.path()));

    let err = pipeline.install("1.22.5").unwrap_err();
    assert!(matches!(err, Error::Fetch(rungo_fetch::Error::Download { .. })));
    let layout = pipeline.layout("1.22.5").unwrap();
    assert!(!layout.download_marker().exists());
    assert!(!layout.extract_marker().exists());

    client.route(ARCHIVE_URL, 200, archive);
    pipeline.install("1.22.5").unwrap();
    assert_eq!(InstallState::probe(&layout), InstallState::Ready);
    // Digest came from the cache on the retry.
    assert_eq!(
        client.requests().iter().filter(|url| *url == SHA_URL).count(),
        1
    );
}

#[test]
fn digest_mismatch_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let client = MockHttpClient::new();
    client.route(SHA_URL, 200, Sha256Digest::of(b"a different archive").to_hex());
    client.route(ARCHIVE_URL, 200, toolchain_tar_gz());
    let pipeline = Pipeline::new(&client, settings(temp.path()));

    let err = pipeline.install("1.22.5").unwrap_err();

    assert!(matches!(
        err,
        Error::Fetch(rungo_fetch::Error::IntegrityMismatch { .. })
    ));
    let layout = pipeline.layout("1.22.5").unwrap();
    assert!(layout.archive_path().exists());
    assert!(!layout.download_marker().exists());
    assert!(!layout.goroot().exists());
    assert_eq!(InstallState::probe(&layout), InstallState::Downloading);
}

#[test]
fn missing_digest_stops_before_download() {
    let temp = tempfile::tempdir().unwrap();
    let client = MockHttpClient::new();
    client.route(ARCHIVE_URL, 200, toolchain_tar_gz());
    let pipeline = Pipeline::new(&client, settings(temp.path()));

    let err = pipeline.install("1.22.5").unwrap_err();

    assert!(matches!(
        err,
        Error::Fetch(rungo_fetch::Error::HttpStatus { status: 404, .. })
    ));
    assert_eq!(client.requests(), vec![SHA_URL.to_string()]);
}

#[test]
fn removing_extract_marker_reextracts_without_download() {
    let temp = tempfile::tempdir().unwrap();
    let client = MockHttpClient::new();
    serve(&client, &toolchain_tar_gz());
    let pipeline = Pipeline::new(&client, settings(temp.path()));

    let layout = pipeline.install("1.22.5").unwrap();
    fs::remove_file(layout.goroot().join("src/runtime/extern.go")).unwrap();
    layout.extract_marker().clear().unwrap();
    assert_eq!(InstallState::probe(&layout), InstallState::Extracting);

    pipeline.install("1.22.5").unwrap();

    assert_eq!(client.request_count(), 2);
    assert!(layout.goroot().join("src/runtime/extern.go").is_file());
    assert!(layout.extract_marker().exists());
}

#[test]
fn windows_target_uses_zip() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("go/bin/go.exe", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"MZ").unwrap();
    let archive = writer.finish().unwrap().into_inner();

    let zip_url = "https://dl.example/go/go1.22.5.windows-amd64.zip";
    let client = MockHttpClient::new();
    client.route(
        format!("{zip_url}.sha256"),
        200,
        Sha256Digest::of(&archive).to_hex(),
    );
    client.route(zip_url, 200, archive);

    let temp = tempfile::tempdir().unwrap();
    let mut settings = settings(temp.path());
    settings.os = Os::Windows;
    let pipeline = Pipeline::new(&client, settings);

    let layout = pipeline.install("1.22.5").unwrap();
    assert_eq!(layout.url().as_str(), zip_url);
    assert_eq!(fs::read(layout.goroot().join("bin/go.exe")).unwrap(), b"MZ");
}

#[test]
fn each_platform_gets_its_own_tree() {
    let temp = tempfile::tempdir().unwrap();
    let client = MockHttpClient::new();
    serve(&client, &toolchain_tar_gz());
    let linux = Pipeline::new(&client, settings(temp.path()))
        .install("1.22.5")
        .unwrap();

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("go/bin/go.exe", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"MZ").unwrap();
    let archive = writer.finish().unwrap().into_inner();
    let zip_url = "https://dl.example/go/go1.22.5.windows-amd64.zip";
    client.route(
        format!("{zip_url}.sha256"),
        200,
        Sha256Digest::of(&archive).to_hex(),
    );
    client.route(zip_url, 200, archive);

    let mut windows_settings = settings(temp.path());
    windows_settings.os = Os::Windows;
    let windows = Pipeline::new(&client, windows_settings)
        .install("1.22.5")
        .unwrap();

    assert_ne!(windows.root(), linux.root());
    assert_eq!(client.request_count(), 4);
    assert_eq!(client.requests()[3], zip_url);
    assert_eq!(fs::read(windows.goroot().join("bin/go.exe")).unwrap(), b"MZ");
    assert!(!windows.goroot().join("bin/go").exists());
    assert!(!linux.goroot().join("bin/go.exe").exists());
    assert_eq!(InstallState::probe(&linux), InstallState::Ready);
    assert_eq!(InstallState::probe(&windows), InstallState::Ready);
}

#[test]
fn system_toolchain_skips_acquisition() {
    let temp = tempfile::tempdir().unwrap();
    let client = MockHttpClient::new();
    let pipeline = Pipeline::new(&client, settings(temp.path()));

    let toolchain = pipeline.prepare(&VersionRequest::System).unwrap();

    assert_eq!(toolchain, Toolchain::System);
    assert!(matches!(toolchain.layout(), Err(Error::SystemRoot)));
    assert_eq!(client.request_count(), 0);
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn managed_toolchain_runs_with_goroot() {
    let temp = tempfile::tempdir().unwrap();
    let record = temp.path().join("record");
    let client = MockHttpClient::new();
    serve(&client, &toolchain_tar_gz());
    let pipeline = Pipeline::new(&client, settings(&temp.path().join("roots")));

    let toolchain = pipeline
        .prepare(&VersionRequest::Release("1.22.5".into()))
        .unwrap();
    let status = pipeline
        .invocation(&toolchain, "go", ["version".into()])
        .unwrap()
        .envs([("RECORD", record.as_os_str())])
        .run()
        .unwrap();

    assert_eq!(rungo_shim::exit_code(status), 3);
    let goroot = toolchain.layout().unwrap().goroot();
    assert_eq!(
        fs::read_to_string(&record).unwrap().trim_end(),
        goroot.to_str().unwrap()
    );
}
