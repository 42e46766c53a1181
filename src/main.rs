use std::io::{self, BufRead, Write};

use delivery_dispatch::logging::setup_logger;
use delivery_dispatch::{Command, DispatchConfig, Dispatcher};
use log::{error, info};

fn main() {
    let config = match DispatchConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    if let Err(e) = setup_logger(config.log_level) {
        eprintln!("Logging disabled: {}", e);
    }
    info!("Setting up central {} location", config.depot);
    let mut dispatcher = Dispatcher::new(&config);

    if let Err(e) = run(&mut dispatcher, io::stdin().lock(), io::stdout()) {
        error!("I/O failure: {}", e);
        std::process::exit(1);
    }
}

fn run<R: BufRead, W: Write>(dispatcher: &mut Dispatcher, input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "Food delivery dispatch. Type 'help' for commands.")?;
    prompt(&mut output)?;
    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            let result = line.parse::<Command>().and_then(|command| {
                let exit = command == Command::Exit;
                dispatcher.execute(command).map(|outcome| (outcome, exit))
            });
            match result {
                Ok((outcome, exit)) => {
                    writeln!(output, "{}", outcome)?;
                    if exit {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(output, "Error: {}", e)?
            }
        }
        prompt(&mut output)?;
    }
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> io::Result<()> {
    write!(output, "> ")?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use delivery_dispatch::Dispatcher;

    use crate::run;

    #[test]
    fn session_until_exit() {
        let mut dispatcher = Dispatcher::default();
        let input = Cursor::new("add-location A\n\nadd-route Depot A 5\nplace-order A Depot 3\nfly\nexit\nstatus\n");
        let mut output = Vec::new();
        run(&mut dispatcher, input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Location added: A"));
        assert!(text.contains("Route added: Depot <-> A (5 km)"));
        assert!(text.contains("New Order Placed (ID: 1001): A -> Depot"));
        assert!(text.contains("Error: Invalid command: unknown command 'fly'"));
        assert!(text.contains("Goodbye!"));
        assert!(!text.contains("System Status"));
        assert_eq!(dispatcher.status().pending, 1);
    }
}
