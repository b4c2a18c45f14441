use clap::Parser;
use satcmd::cli::app::{exit_code, run_cli, BuildArgs, Cli, RuntimeContext, TimeSyncArgs};
use satcmd::cli::config::{load_settings, CONFIG_ROOT_ENV};
use satcmd::cli::console::ConsoleInput;
use satcmd::cli::{commands_build, commands_time_sync};
use std::io::Cursor;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn context(config: &Path, extra: &[&str]) -> RuntimeContext {
    let mut args = vec!["satcmd", "--quiet", "--config", config.to_str().unwrap()];
    args.extend_from_slice(extra);
    RuntimeContext::load(Cli::parse_from(args)).unwrap()
}

fn console(script: &str) -> ConsoleInput<Cursor<Vec<u8>>, Vec<u8>> {
    ConsoleInput::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), 3300)
}

#[test]
fn build_walks_menu_identifier_and_fields() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp.path().join("config.toml"), &[]);
    // command 0, id 66, mode 1, okaying 0, reps 5, duration 300, breaktime 10
    let mut input = console("0\n66\n1\n0\n5\n300\n10\n");

    let packet = commands_build::run(&ctx, &BuildArgs::default(), &mut input).unwrap();
    assert_eq!(packet.bytes, [0xE0, 66, 0x16, 0x01, 0x2C, 0x00, 0x0A]);

    let transcript = String::from_utf8(input.into_writer()).unwrap();
    assert!(transcript.contains("[7]. Stop"));
    assert!(transcript.contains("Choose command [0-7]:"));
    assert!(transcript.contains("Set duration command"));
}

#[test]
fn build_menu_rejects_selection_past_registry() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp.path().join("config.toml"), &[]);
    let mut input = console("8\n4\n1\n");

    let packet = commands_build::run(&ctx, &BuildArgs::default(), &mut input).unwrap();
    assert_eq!(packet.name, "Reset");
    assert_eq!(packet.bytes, [0x0F, 1, 0, 0, 0, 0, 0]);
    let transcript = String::from_utf8(input.into_writer()).unwrap();
    assert!(transcript.contains("8 is outside 0-7"));
}

#[test]
fn build_with_preselected_command_and_id() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp.path().join("config.toml"), &[]);
    let args = BuildArgs {
        command: Some("set-scale".into()),
        id: Some(5),
    };
    // min 0 mV, max 3300 mV, resolution 7 then 64, sampling 10
    let mut input = console("0\n3300\n7\n64\n10\n");

    let packet = commands_build::run(&ctx, &args, &mut input).unwrap();
    assert_eq!(packet.bytes, [0xD0, 5, 0x00, 0x0F, 0xFF, 8, 10]);

    let transcript = String::from_utf8(input.into_writer()).unwrap();
    assert!(!transcript.contains("Select a command"));
    assert_eq!(transcript.matches("Resolution").count(), 2);
}

#[test]
fn build_uses_configured_reference_voltage() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "reference_millivolts = 4095\n").unwrap();
    let ctx = context(&path, &[]);
    let args = BuildArgs {
        command: Some("1".into()),
        id: Some(0),
    };
    let mut input = ConsoleInput::new(
        Cursor::new(b"171\n3567\n8\n1\n".to_vec()),
        Vec::new(),
        ctx.settings.reference_millivolts,
    );

    let packet = commands_build::run(&ctx, &args, &mut input).unwrap();
    // 171 = 0x0AB, 3567 = 0xDEF at a 4095 mV reference
    assert_eq!(&packet.bytes[2..5], &[0x0A, 0xBD, 0xEF]);
}

#[test]
fn build_fails_cleanly_when_input_ends() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp.path().join("config.toml"), &[]);
    let mut input = console("2\n1\n");

    let err = commands_build::run(&ctx, &BuildArgs::default(), &mut input).unwrap_err();
    assert!(err.to_string().contains("no more input"));
    assert_eq!(exit_code(&err), 2);
}

#[test]
fn time_sync_from_flag_and_prompt() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp.path().join("config.toml"), &[]);

    let args = TimeSyncArgs {
        timestamp: Some(0xAABB_CCDD),
        now: false,
    };
    let buffer = commands_time_sync::run(&ctx, &args, &mut console("")).unwrap();
    assert_eq!(buffer.as_bytes(), &[0xDD, 0xCC, 0xBB, 0xAA]);

    let args = TimeSyncArgs {
        timestamp: None,
        now: false,
    };
    let buffer = commands_time_sync::run(&ctx, &args, &mut console("0x01020304\n")).unwrap();
    assert_eq!(buffer.as_bytes(), &[0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("satcmd").join("config.toml");
    let path_arg = path.to_str().unwrap();

    let init = Cli::parse_from([
        "satcmd",
        "--quiet",
        "--config",
        path_arg,
        "config",
        "init",
        "--reference-millivolts",
        "5000",
    ]);
    run_cli(init.clone()).unwrap();
    assert_eq!(load_settings(&path).unwrap().reference_millivolts, 5000);

    let err = run_cli(init).unwrap_err().to_string();
    assert!(err.contains("--force"));

    let force = Cli::parse_from([
        "satcmd", "--quiet", "--config", path_arg, "config", "init", "--force",
    ]);
    run_cli(force).unwrap();
    assert_eq!(load_settings(&path).unwrap().reference_millivolts, 3300);
}

#[test]
fn config_root_env_selects_settings_file() {
    let _guard = env_lock().lock().unwrap();
    let temp = tempfile::tempdir().unwrap();
    std::env::set_var(CONFIG_ROOT_ENV, temp.path());
    std::fs::write(temp.path().join("config.toml"), "json = true\n").unwrap();

    let ctx = RuntimeContext::load(Cli::parse_from(["satcmd", "list"])).unwrap();
    assert_eq!(ctx.config_path, temp.path().join("config.toml"));
    assert!(ctx.output.json);
    run_cli(Cli::parse_from(["satcmd", "list"])).unwrap();

    std::env::remove_var(CONFIG_ROOT_ENV);
}

#[test]
fn invalid_settings_surface_path() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "reference_millivolts = \"high\"\n").unwrap();
    let cli = Cli::parse_from(["satcmd", "--config", path.to_str().unwrap(), "list"]);
    let err = run_cli(cli).unwrap_err();
    assert!(format!("{err:#}").contains("invalid settings"));
    assert_eq!(exit_code(&err), 1);
}
