use scicalc::*;
use anyhow::Result;

fn main() -> Result<()> {
    // Stdout is deliberately not locked for the session: the handler prints
    // from another thread and must not contend with a held lock.
    ctrlc::set_handler(|| {
        println!("\nInterrupted by user. Exiting.");
        std::process::exit(0);
    })?;
    let stdin = std::io::stdin();
    let mut session = Session::new(stdin.lock(), std::io::stdout());
    session.run()
}
