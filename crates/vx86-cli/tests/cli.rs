use assert_cmd::Command;

fn vx86() -> Command {
    let mut cmd = Command::cargo_bin("vx86").expect("vx86 binary should be built");
    cmd.env_remove("VX86_RADIX").env_remove("RUST_LOG");
    cmd
}

#[test]
fn reads_commands_from_stdin() {
    let output = vx86()
        .arg("--no-prompt")
        .write_stdin("mov eax, 0x12345678\nax\nah\nal\n")
        .output()
        .expect("failed to run vx86");

    assert!(output.status.success(), "status: {:?}", output.status);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "4660\n86\n120\n");
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn prints_prompt_with_instruction_address() {
    let output = vx86()
        .write_stdin("mov eax, 1\nmov ebx, 2\n")
        .output()
        .expect("failed to run vx86");

    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "0x00000000    0x00000004    0x00000008    \n"
    );
}

#[test]
fn script_runs_until_sys_exit() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let script = dir.path().join("exit.asm");
    std::fs::write(
        &script,
        "; exit with status 7\nmov eax, 1\nmov ebx, 7\nint 0x80\nmov eax, 99 ; never reached\n",
    )
    .expect("failed to write script");

    let output = vx86()
        .arg("--script")
        .arg(&script)
        .output()
        .expect("failed to run vx86");

    assert_eq!(output.status.code(), Some(7));
    assert!(output.stdout.is_empty());
}

#[test]
fn errors_and_warnings_go_to_stderr() {
    let output = vx86()
        .args(["--no-prompt", "--radix", "hex"])
        .write_stdin("mov al, 300\nmov edx, 0x100000001\nedx\nfrob\n")
        .output()
        .expect("failed to run vx86");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0x00000001\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: register al cannot accept a value greater than 8 bits"),
        "{stderr}"
    );
    assert!(
        stderr.contains("warning: overflow occurred with register edx"),
        "{stderr}"
    );
    assert!(stderr.contains("error: invalid command: frob"), "{stderr}");
}

#[test]
fn fail_fast_exits_nonzero() {
    vx86()
        .args(["--no-prompt", "--fail-fast"])
        .write_stdin("mov eax, 2\nint 0x80\neax\n")
        .assert()
        .failure()
        .code(1)
        .stdout("");
}

#[test]
fn missing_script_is_reported() {
    vx86()
        .args(["--script", "/nonexistent/vx86/script.asm"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn double_interrupt_exits_while_waiting_for_input() {
    use std::io::{BufRead, BufReader, Read};
    use std::process::Stdio;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    fn interrupt(pid: u32) {
        let status = std::process::Command::new("kill")
            .args(["-INT", &pid.to_string()])
            .status()
            .expect("failed to run kill");
        assert!(status.success());
    }

    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("vx86"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn vx86");
    // Held open for the whole test so the loop is parked on a stdin read.
    let _stdin = child.stdin.take();
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout is piped"));

    let mut prompt = [0u8; 14];
    stdout.read_exact(&mut prompt).expect("failed to read prompt");
    assert_eq!(&prompt, b"0x00000000    ");
    // The Ctrl-C handler is installed on the first poll after the prompt is written.
    sleep(Duration::from_millis(300));

    interrupt(child.id());
    let mut line = String::new();
    stdout.read_line(&mut line).expect("failed to read output");
    line.clear();
    stdout.read_line(&mut line).expect("failed to read output");
    assert_eq!(line, "Ctrl-c again to exit.\n");
    sleep(Duration::from_millis(300));

    interrupt(child.id());
    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        if let Some(status) = child.try_wait().expect("failed to poll vx86") {
            break status;
        }
        if Instant::now() > deadline {
            child.kill().ok();
            panic!("vx86 still running after the second Ctrl-C");
        }
        sleep(Duration::from_millis(20));
    };
    assert_eq!(status.code(), Some(0));

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).expect("failed to read output");
    assert!(rest.ends_with("Goodbye.\n"), "{rest:?}");
}
