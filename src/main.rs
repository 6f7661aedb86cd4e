use ropasci::protocol::{handle_command, parse_command, Flow, Session};
use std::io::{self, BufRead};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Ropasci - RoPaSci 360 Engine");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let input = line?;

        if let Some(cmd) = parse_command(&input) {
            match handle_command(&cmd, &mut session, &mut stdout) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => {
                    if session.options.strict_mode {
                        return Err(err);
                    }
                    eprintln!("{}", err);
                }
            }
        }
    }

    Ok(())
}
