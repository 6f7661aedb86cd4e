use assert_cmd::Command;
use indoc::indoc;
use predicates::prelude::*;

#[test]
fn test_protocol_game_flow() {
    let script = indoc! {r#"
        ropasci
        isready
        setoption name seed value 5
        setoption name strategy value random
        init upper
        play
        update ("THROW", "r", (4, -4)) | ("THROW", "p", (-4, 4))
        display
        quit
    "#};

    let mut cmd = Command::cargo_bin("ropasci").unwrap();
    cmd.write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ropasciok")
                .and(predicate::str::contains("readyok"))
                .and(predicate::str::contains("(\"THROW\""))
                .and(predicate::str::contains("4,-4 R"))
                .and(predicate::str::contains("-4,4 p")),
        );
}

#[test]
fn test_protocol_collision_on_shared_hex() {
    let script = indoc! {r#"
        init lower
        update ("THROW", "r", (4, -4)) | ("THROW", "s", (4, -4))
        display
        quit
    "#};

    let mut cmd = Command::cargo_bin("ropasci").unwrap();
    cmd.write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("4,-4 R")
                .and(predicate::str::contains("4,-4 s").not())
                .and(predicate::str::contains("info result").not()),
        );
}

#[test]
fn test_protocol_errors_are_reported() {
    let mut cmd = Command::cargo_bin("ropasci").unwrap();
    cmd.write_stdin("bogus\nisready\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("readyok"))
        .stderr(predicate::str::contains("Unknown command"));
}

#[test]
fn test_protocol_strict_mode_aborts() {
    let script = indoc! {"
        setoption name strictmode value true
        bogus
        isready
    "};

    let mut cmd = Command::cargo_bin("ropasci").unwrap();
    cmd.write_stdin(script)
        .assert()
        .failure()
        .stdout(predicate::str::contains("readyok").not());
}
